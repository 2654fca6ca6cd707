//! Permission override schemas.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::{
    error::validation::ValidationError,
    model::permission::{OverrideKind, PermissionOverride, PermissionValue},
    schema::{ensure_unique_ids, json_type, OpenEntity, Record},
};

const KINDS: &str = "\"role\" or \"user\"";
const FIELDS: [&str; 3] = ["id", "type", "permissions"];

/// Open builder behind `override.role` / `override.user`.
///
/// Enforces the subject type and a subject id; permissions and any other fields are left
/// for the strict pass that runs when the override is attached to a channel or category.
pub fn parse_override_builder(
    value: &Value,
    path: &str,
    kind: OverrideKind,
) -> Result<OpenEntity, ValidationError> {
    let record = Record::new(path, value)?;

    let kind = record.discriminant("type", Some(kind), OverrideKind::parse, KINDS)?;
    let id = record.snowflake("id")?;

    Ok(OpenEntity {
        kind: kind.as_str(),
        id: Some(id),
        fields: record.rest(&["type", "id"]),
    })
}

/// Strict form of an override attached to a channel or category.
pub fn parse_override(value: &Value, path: &str) -> Result<PermissionOverride, ValidationError> {
    let record = Record::new(path, value)?;

    let id = record.snowflake("id")?;
    let kind = record.discriminant("type", None, OverrideKind::parse, KINDS)?;
    let permissions = parse_permissions(&record)?;

    Ok(PermissionOverride {
        id,
        kind,
        permissions,
        extra: record.rest(&FIELDS),
    })
}

/// Parses an override list and enforces unique subject ids within it.
pub fn parse_override_list(
    values: &[Value],
    path: &str,
) -> Result<Vec<PermissionOverride>, ValidationError> {
    let overrides = values
        .iter()
        .enumerate()
        .map(|(index, value)| parse_override(value, &format!("{path}[{index}]")))
        .collect::<Result<Vec<_>, _>>()?;

    ensure_unique_ids(path, overrides.iter().map(|o| o.id))?;

    Ok(overrides)
}

fn parse_permissions(
    record: &Record<'_>,
) -> Result<BTreeMap<String, PermissionValue>, ValidationError> {
    let path = record.field_path("permissions");

    let map = match record.get("permissions") {
        None => return Ok(BTreeMap::new()),
        Some(Value::Object(map)) => map,
        Some(Value::Array(items)) if items.is_empty() => return Ok(BTreeMap::new()),
        Some(other) => {
            return Err(ValidationError::new(
                path,
                format!("expected a table of permission settings, got {}", json_type(other)),
            ))
        }
    };

    map.iter()
        .map(|(key, value)| {
            permission_value(value)
                .map(|setting| (key.clone(), setting))
                .ok_or_else(|| {
                    ValidationError::new(
                        format!("{path}.{key}"),
                        format!(
                            "expected \"allow\", \"deny\", \"inherit\", true or false, got {}",
                            json_type(value)
                        ),
                    )
                })
        })
        .collect()
}

fn permission_value(value: &Value) -> Option<PermissionValue> {
    match value {
        Value::Bool(true) => Some(PermissionValue::Allow),
        Value::Bool(false) => Some(PermissionValue::Deny),
        Value::String(raw) => match raw.as_str() {
            "allow" => Some(PermissionValue::Allow),
            "deny" => Some(PermissionValue::Deny),
            "inherit" => Some(PermissionValue::Inherit),
            _ => None,
        },
        _ => None,
    }
}
