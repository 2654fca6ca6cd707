//! The Setup Context accumulator.

use crate::model::{category::Category, channel::Channel, role::Role, snowflake::Snowflake};

/// Everything a script declared through its setup callback.
///
/// A plain aggregation value: capability calls push already-validated entities into it
/// and, once `setup` returns, these three lists are the complete record of the script's
/// declarations. One context belongs to exactly one evaluation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetupContext {
    /// Channels declared outside any category.
    pub channels: Vec<Channel>,
    pub roles: Vec<Role>,
    pub categories: Vec<Category>,
}

impl SetupContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids already taken in the channel id space: global channels, categories, and every
    /// category's channels.
    pub fn channel_ids(&self) -> impl Iterator<Item = Snowflake> + '_ {
        self.channels
            .iter()
            .map(|channel| channel.id)
            .chain(self.categories.iter().flat_map(|category| {
                std::iter::once(category.id)
                    .chain(category.channels.iter().map(|channel| channel.id))
            }))
    }

    pub fn role_ids(&self) -> impl Iterator<Item = Snowflake> + '_ {
        self.roles.iter().map(|role| role.id)
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty() && self.roles.is_empty() && self.categories.is_empty()
    }
}
