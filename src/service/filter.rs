//! Local inclusion filtering.
//!
//! A channel is kept only when its own predicate and its category's predicate both admit
//! it. Exclusion is ordinary filtering: it is logged, never an error. Remote
//! reconciliation decides inclusion again on its own; this pass does not replace it.

use crate::{
    error::AppError,
    model::{category::Category, channel::Channel, PredicateId},
    runtime::PredicateHost,
};

/// Drops the category's channels that fail either predicate.
///
/// # Returns
/// - `Ok(usize)` - Number of channels removed
/// - `Err(AppError)` - A predicate raised an error
pub fn filter_category(
    category: &mut Category,
    host: &dyn PredicateHost,
) -> Result<usize, AppError> {
    let before = category.channels.len();
    let mut kept = Vec::with_capacity(before);

    for channel in std::mem::take(&mut category.channels) {
        let own = admits(host, channel.include, &channel)?;
        let inherited = admits(host, category.include, &channel)?;

        if own && inherited {
            kept.push(channel);
        } else {
            tracing::info!(
                "Excluding channel {} ({}) from category {}",
                channel.label(),
                channel.id,
                category.name
            );
        }
    }

    category.channels = kept;
    Ok(before - category.channels.len())
}

/// Drops global channels whose own predicate fails.
pub fn filter_global(
    channels: &mut Vec<Channel>,
    host: &dyn PredicateHost,
) -> Result<usize, AppError> {
    let before = channels.len();
    let mut kept = Vec::with_capacity(before);

    for channel in std::mem::take(channels) {
        if admits(host, channel.include, &channel)? {
            kept.push(channel);
        } else {
            tracing::info!("Excluding channel {} ({})", channel.label(), channel.id);
        }
    }

    *channels = kept;
    Ok(before - channels.len())
}

fn admits(
    host: &dyn PredicateHost,
    predicate: Option<PredicateId>,
    channel: &Channel,
) -> Result<bool, AppError> {
    match predicate {
        Some(predicate) => host.test(predicate, channel),
        None => Ok(true),
    }
}
