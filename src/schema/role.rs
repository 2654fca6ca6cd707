//! Role schema.

use serde_json::Value;
use serenity::all::Permissions;

use crate::{
    error::validation::ValidationError,
    model::role::Role,
    schema::{json_type, Record},
};

const FIELDS: [&str; 6] = ["id", "name", "permissions", "color", "hoist", "mentionable"];

/// Strict role declaration behind `global.role`.
pub fn parse_role(value: &Value, path: &str) -> Result<Role, ValidationError> {
    let record = Record::new(path, value)?;
    record.reject_unknown(&FIELDS)?;

    Ok(Role {
        id: record.snowflake("id")?,
        name: record.name("name")?,
        permissions: parse_permission_bits(&record)?,
        color: parse_color(&record)?,
        hoist: record.optional_bool("hoist")?.unwrap_or(false),
        mentionable: record.optional_bool("mentionable")?.unwrap_or(false),
    })
}

/// Accepts the bitset as an integer or as a decimal string. Bits outside the known
/// permission set are rejected rather than silently dropped.
fn parse_permission_bits(record: &Record<'_>) -> Result<Permissions, ValidationError> {
    let path = record.field_path("permissions");

    let bits = match record.get("permissions") {
        None => return Ok(Permissions::empty()),
        Some(Value::Number(number)) => number.as_u64(),
        Some(Value::String(raw)) => raw.trim().parse::<u64>().ok(),
        Some(other) => {
            return Err(ValidationError::new(
                path,
                format!("expected a permission bitset, got {}", json_type(other)),
            ))
        }
    }
    .ok_or_else(|| ValidationError::new(&path, "expected a non-negative integer bitset"))?;

    Permissions::from_bits(bits).ok_or_else(|| {
        ValidationError::new(path, format!("bitset {bits} contains unknown permission bits"))
    })
}

/// Accepts `0xRRGGBB` as an integer or a `#RRGGBB` string.
fn parse_color(record: &Record<'_>) -> Result<Option<u32>, ValidationError> {
    let path = record.field_path("color");
    let invalid = || ValidationError::new(&path, "expected an RGB integer or \"#RRGGBB\"");

    let color = match record.get("color") {
        None => return Ok(None),
        Some(Value::Number(number)) => number.as_u64().and_then(|raw| u32::try_from(raw).ok()),
        Some(Value::String(raw)) => raw
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6)
            .and_then(|hex| u32::from_str_radix(hex, 16).ok()),
        Some(_) => None,
    }
    .filter(|rgb| *rgb <= 0xFF_FF_FF)
    .ok_or_else(invalid)?;

    Ok(Some(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_role_names_missing_id() {
        let err = parse_role(&json!({}), "global.role").unwrap_err();

        assert_eq!(err.path, "global.role.id");
        assert!(err.constraint.contains("required"));
    }

    #[test]
    fn role_without_name_is_rejected() {
        let err = parse_role(&json!({ "id": "1" }), "global.role").unwrap_err();

        assert_eq!(err.path, "global.role.name");
    }

    #[test]
    fn parses_full_role() {
        let role = parse_role(
            &json!({
                "id": "1001",
                "name": "Moderator",
                "permissions": "8192",
                "color": "#FF5733",
                "hoist": true
            }),
            "global.role",
        )
        .unwrap();

        assert_eq!(role.id.get(), 1001);
        assert_eq!(role.permissions, Permissions::MANAGE_MESSAGES);
        assert_eq!(role.color, Some(0xFF5733));
        assert!(role.hoist);
        assert!(!role.mentionable);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse_role(
            &json!({ "id": "1", "name": "x", "colour": 3 }),
            "global.role",
        )
        .unwrap_err();

        assert_eq!(err.path, "global.role.colour");
    }

    #[test]
    fn out_of_range_color_is_rejected() {
        let err = parse_role(
            &json!({ "id": "1", "name": "x", "color": 0x1000000 }),
            "global.role",
        )
        .unwrap_err();

        assert_eq!(err.path, "global.role.color");
    }

    #[test]
    fn wrong_type_for_hoist() {
        let err = parse_role(
            &json!({ "id": "1", "name": "x", "hoist": "yes" }),
            "global.role",
        )
        .unwrap_err();

        assert_eq!(err.path, "global.role.hoist");
        assert_eq!(err.constraint, "expected a boolean, got string");
    }
}
