//! Category to channel permission inheritance.

use crate::model::{category::Category, permission::PermissionOverride};

/// Syncs a category's overrides into each of its channels.
///
/// For every category override, a channel without an override for the same subject gets
/// a copy of it; a channel that has one keeps its explicit settings and takes the
/// category's value for every key it leaves unset. Channels are never added or removed.
pub fn sync_category(category: &mut Category) {
    for channel in &mut category.channels {
        for parent in &category.overrides {
            sync_override(&mut channel.overrides, parent);
        }
    }
}

fn sync_override(overrides: &mut Vec<PermissionOverride>, parent: &PermissionOverride) {
    match overrides.iter_mut().find(|own| own.id == parent.id) {
        Some(own) => own.inherit_from(parent),
        None => overrides.push(parent.clone()),
    }
}
