//! Category declarations.

use serde::Serialize;

use crate::model::{
    channel::Channel, permission::PermissionOverride, snowflake::Snowflake, PredicateId,
};

/// Channel group that owns its channels exclusively and carries default overrides
/// for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: Snowflake,
    pub name: String,
    pub channels: Vec<Channel>,
    pub overrides: Vec<PermissionOverride>,
    /// Predicate applied to each child channel; `None` always includes.
    #[serde(skip)]
    pub include: Option<PredicateId>,
}
