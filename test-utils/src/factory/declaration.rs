//! Option records for the declaration capabilities.

use serde_json::{json, Value};

use crate::factory::helpers::next_snowflake;

/// Argument for `global.role` with a fresh id.
pub fn role(name: &str) -> Value {
    json!({ "id": next_snowflake(), "name": name })
}
