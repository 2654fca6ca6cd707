//! Role declarations.

use serde::{Serialize, Serializer};
use serenity::all::Permissions;

use crate::model::snowflake::Snowflake;

/// Guild role with its permission bitset and display attributes.
///
/// Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    #[serde(serialize_with = "serialize_permissions")]
    pub permissions: Permissions,
    /// RGB color, e.g. `0xFF5733`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Displayed separately in the member list.
    pub hoist: bool,
    pub mentionable: bool,
}

/// Permission bitsets travel as decimal strings, like the remote API sends them.
fn serialize_permissions<S: Serializer>(
    permissions: &Permissions,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&permissions.bits())
}
