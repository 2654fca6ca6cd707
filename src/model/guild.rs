//! The finished configuration artifact.

use serde::Serialize;

use crate::model::{category::Category, channel::Channel, role::Role};

/// Fully merged, filtered and ordered configuration for one guild.
///
/// Produced once per evaluation and never mutated afterwards; this is what the remote
/// reconciliation step diffs against live state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildConfiguration {
    pub guild_id: String,
    pub global_channels: Vec<Channel>,
    pub global_roles: Vec<Role>,
    pub categories: Vec<Category>,
}

impl GuildConfiguration {
    /// Renders the configuration as pretty JSON.
    ///
    /// Collections are already in canonical order and every map serializes in key order,
    /// so equal configurations render to identical bytes.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
