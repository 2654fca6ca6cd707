//! Per-declaration schema validation.
//!
//! Capability calls hand this layer a JSON-shaped copy of the script's argument and get
//! back a typed entity or a `ValidationError` naming the offending field path. There are
//! two tiers:
//!
//! - **Strict** (`Role`, `Category`, declared `Channel`s): every known field is checked,
//!   required fields must be present, and roles and categories reject unknown fields.
//! - **Open** (`channel.*` and `override.*` builders): only the `type` discriminant and
//!   the `id` are enforced. Everything else passes through untouched as an
//!   [`OpenEntity`], because platform-specific option sets vary.
//!
//! Inclusion predicates never reach this layer as functions. The runtime bridge replaces
//! them with a `{ "$predicate": <handle> }` marker, which [`Record::predicate`] reads back.

pub mod category;
pub mod channel;
pub mod permission;
pub mod role;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    error::validation::ValidationError,
    model::{snowflake::Snowflake, PredicateId},
    util::parse::parse_snowflake,
};

/// Key of the marker object standing in for a script function.
pub const PREDICATE_MARKER: &str = "$predicate";

/// Builds the marker object for a registered predicate.
pub fn predicate_marker(id: PredicateId) -> Value {
    let mut marker = Map::new();
    marker.insert(PREDICATE_MARKER.to_string(), Value::from(id.0));
    Value::Object(marker)
}

/// Reads a predicate marker, if `value` is one.
pub fn read_predicate_marker(value: &Value) -> Option<PredicateId> {
    let map = value.as_object()?;
    if map.len() != 1 {
        return None;
    }

    map.get(PREDICATE_MARKER)?
        .as_u64()
        .and_then(|raw| usize::try_from(raw).ok())
        .map(PredicateId)
}

/// Result of an open-tier builder: discriminant and id enforced, the rest untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenEntity {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A JSON object being validated, together with its path from the capability root.
pub(crate) struct Record<'a> {
    path: &'a str,
    map: &'a Map<String, Value>,
}

impl<'a> Record<'a> {
    /// Opens `value` as a record.
    ///
    /// An empty array is accepted as an empty record since the bridge cannot tell an
    /// empty script table from an empty list.
    pub fn new(path: &'a str, value: &'a Value) -> Result<Self, ValidationError> {
        static EMPTY: std::sync::OnceLock<Map<String, Value>> = std::sync::OnceLock::new();

        match value {
            Value::Object(map) => Ok(Self { path, map }),
            Value::Array(items) if items.is_empty() => Ok(Self {
                path,
                map: EMPTY.get_or_init(Map::new),
            }),
            other => Err(ValidationError::new(
                path,
                format!("expected a table, got {}", json_type(other)),
            )),
        }
    }

    pub fn field_path(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    /// Field value, with explicit `null` treated as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    pub fn snowflake(&self, key: &str) -> Result<Snowflake, ValidationError> {
        self.optional_snowflake(key)?
            .ok_or_else(|| ValidationError::missing(self.field_path(key), "a snowflake id"))
    }

    pub fn optional_snowflake(&self, key: &str) -> Result<Option<Snowflake>, ValidationError> {
        self.get(key)
            .map(|value| snowflake_value(&self.field_path(key), value))
            .transpose()
    }

    /// Required non-empty string.
    pub fn name(&self, key: &str) -> Result<String, ValidationError> {
        let value = self
            .optional_string(key)?
            .ok_or_else(|| ValidationError::missing(self.field_path(key), "a non-empty string"))?;

        if value.trim().is_empty() {
            return Err(ValidationError::new(
                self.field_path(key),
                "expected a non-empty string",
            ));
        }

        Ok(value)
    }

    pub fn optional_string(&self, key: &str) -> Result<Option<String>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(self.type_mismatch(key, "a string", other)),
        }
    }

    pub fn optional_bool(&self, key: &str) -> Result<Option<bool>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(self.type_mismatch(key, "a boolean", other)),
        }
    }

    /// Optional non-negative integer.
    pub fn optional_uint(&self, key: &str) -> Result<Option<u64>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(number)) => number.as_u64().map(Some).ok_or_else(|| {
                ValidationError::new(self.field_path(key), "expected a non-negative integer")
            }),
            Some(other) => Err(self.type_mismatch(key, "a non-negative integer", other)),
        }
    }

    /// List field; absent means empty.
    pub fn list(&self, key: &str) -> Result<&'a [Value], ValidationError> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(Value::Object(map)) if map.is_empty() => Ok(&[]),
            Some(other) => Err(self.type_mismatch(key, "a list", other)),
        }
    }

    pub fn predicate(&self, key: &str) -> Result<Option<PredicateId>, ValidationError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => read_predicate_marker(value)
                .map(Some)
                .ok_or_else(|| self.type_mismatch(key, "a function", value)),
        }
    }

    /// Checks the `type` discriminant.
    ///
    /// With `expected` set (the capability fixes the variant), the field may be omitted
    /// but must agree if given. Without it the field is required.
    pub fn discriminant<T: Copy + PartialEq>(
        &self,
        key: &str,
        expected: Option<T>,
        parse: fn(&str) -> Option<T>,
        choices: &str,
    ) -> Result<T, ValidationError> {
        let given = match self.get(key) {
            None => None,
            Some(Value::String(raw)) => Some(parse(raw).ok_or_else(|| {
                ValidationError::new(
                    self.field_path(key),
                    format!("expected one of {choices}, got \"{raw}\""),
                )
            })?),
            Some(other) => return Err(self.type_mismatch(key, choices, other)),
        };

        match (given, expected) {
            (Some(given), Some(expected)) if given != expected => Err(ValidationError::new(
                self.field_path(key),
                "does not match the capability it was declared with",
            )),
            (_, Some(expected)) => Ok(expected),
            (Some(given), None) => Ok(given),
            (None, None) => Err(ValidationError::missing(self.field_path(key), choices)),
        }
    }

    pub fn reject_unknown(&self, known: &[&str]) -> Result<(), ValidationError> {
        match self.map.keys().find(|key| !known.contains(&key.as_str())) {
            Some(key) => Err(ValidationError::new(
                self.field_path(key),
                format!("unknown field (expected one of: {})", known.join(", ")),
            )),
            None => Ok(()),
        }
    }

    /// Copies every field not listed in `known`.
    pub fn rest(&self, known: &[&str]) -> Map<String, Value> {
        self.map
            .iter()
            .filter(|(key, _)| !known.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn type_mismatch(&self, key: &str, expected: &str, got: &Value) -> ValidationError {
        ValidationError::new(
            self.field_path(key),
            format!("expected {expected}, got {}", json_type(got)),
        )
    }
}

/// Parses a snowflake given either as a decimal string or as a positive integer.
pub(crate) fn snowflake_value(path: &str, value: &Value) -> Result<Snowflake, ValidationError> {
    let parsed = match value {
        Value::String(raw) => parse_snowflake(raw).ok().flatten(),
        Value::Number(number) => number.as_u64().and_then(Snowflake::new),
        _ => None,
    };

    parsed.ok_or_else(|| {
        ValidationError::new(
            path,
            format!(
                "expected a snowflake id (non-zero decimal string or integer), got {}",
                describe(value)
            ),
        )
    })
}

/// Ensures no subject id appears twice in one list.
pub(crate) fn ensure_unique_ids(
    path: &str,
    ids: impl IntoIterator<Item = Snowflake>,
) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();

    for (index, id) in ids.into_iter().enumerate() {
        if !seen.insert(id) {
            return Err(ValidationError::new(
                format!("{path}[{index}].id"),
                format!("duplicate id {id} in this list"),
            ));
        }
    }

    Ok(())
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "nil",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) if read_predicate_marker(value).is_some() => "function",
        Value::Object(_) => "table",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(raw) => format!("\"{raw}\""),
        Value::Number(number) => number.to_string(),
        other => json_type(other).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snowflake_accepts_string_and_integer() {
        assert_eq!(snowflake_value("x", &json!("42")).unwrap().get(), 42);
        assert_eq!(snowflake_value("x", &json!(42)).unwrap().get(), 42);
    }

    #[test]
    fn snowflake_rejects_zero_and_words() {
        assert!(snowflake_value("x", &json!("0")).is_err());
        assert!(snowflake_value("x", &json!(-3)).is_err());
        let err = snowflake_value("role.id", &json!("admin")).unwrap_err();
        assert_eq!(err.path, "role.id");
        assert!(err.constraint.contains("\"admin\""));
    }

    #[test]
    fn record_treats_empty_list_as_empty_table() {
        let value = json!([]);
        let record = Record::new("category", &value).unwrap();
        assert!(record.get("id").is_none());
    }

    #[test]
    fn predicate_marker_round_trips() {
        let marker = predicate_marker(PredicateId(7));
        assert_eq!(read_predicate_marker(&marker), Some(PredicateId(7)));
        assert_eq!(json_type(&marker), "function");
    }

    #[test]
    fn discriminant_must_agree_with_capability() {
        let value = json!({ "type": "voice" });
        let record = Record::new("channel.text", &value).unwrap();
        let err = record
            .discriminant(
                "type",
                Some(crate::model::channel::ChannelKind::Text),
                crate::model::channel::ChannelKind::parse,
                "\"text\" or \"voice\"",
            )
            .unwrap_err();
        assert_eq!(err.path, "channel.text.type");
    }

    #[test]
    fn duplicate_ids_are_reported_at_second_occurrence() {
        let ids = [1, 2, 1].map(|raw| Snowflake::new(raw).unwrap());
        let err = ensure_unique_ids("category.overrides", ids).unwrap_err();
        assert_eq!(err.path, "category.overrides[2].id");
    }
}
