//! Canonical ordering of override lists and top-level collections.

use crate::model::{
    category::Category, channel::Channel, guild::GuildConfiguration,
    permission::PermissionOverride, role::Role,
};

/// Sorts an override list: role overrides before user overrides, then by subject id.
pub fn sort_overrides(overrides: &mut [PermissionOverride]) {
    overrides.sort_by_key(|entry| (entry.kind, entry.id));
}

/// Sorts the override lists of a category and of each of its channels.
pub fn sort_category_overrides(category: &mut Category) {
    sort_overrides(&mut category.overrides);
    for channel in &mut category.channels {
        sort_overrides(&mut channel.overrides);
    }
}

/// Assembles the final artifact with every collection in canonical order.
///
/// Runs last, after merging and filtering. Predicate handles are dropped here since
/// they mean nothing outside the interpreter that issued them.
///
/// # Arguments
/// - `guild_id` - The id the entry script returned
/// - `channels` - Global channels that survived filtering
/// - `roles` - Declared roles
/// - `categories` - Merged and filtered categories
pub fn sequence(
    guild_id: String,
    mut channels: Vec<Channel>,
    mut roles: Vec<Role>,
    mut categories: Vec<Category>,
) -> GuildConfiguration {
    for channel in &mut channels {
        channel.include = None;
    }
    channels.sort_by_key(|channel| channel.id);
    roles.sort_by_key(|role| role.id);

    for category in &mut categories {
        category.include = None;
        for channel in &mut category.channels {
            channel.include = None;
        }
        category.channels.sort_by_key(|channel| channel.id);
    }
    categories.sort_by_key(|category| category.id);

    GuildConfiguration {
        guild_id,
        global_channels: channels,
        global_roles: roles,
        categories,
    }
}
