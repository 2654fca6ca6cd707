//! Category schema.

use serde_json::Value;

use crate::{
    error::validation::ValidationError,
    model::category::Category,
    schema::{
        channel::parse_channel, ensure_unique_ids, permission::parse_override_list, Record,
    },
};

const FIELDS: [&str; 5] = ["id", "name", "channels", "overrides", "include"];

/// Strict category declaration behind `category`.
///
/// Each nested channel is validated strictly and must carry its own `type`, which the
/// `channel.*` builders set.
pub fn parse_category(value: &Value, path: &str) -> Result<Category, ValidationError> {
    let record = Record::new(path, value)?;
    record.reject_unknown(&FIELDS)?;

    let id = record.snowflake("id")?;
    let name = record.name("name")?;

    let channels_path = record.field_path("channels");
    let channels = record
        .list("channels")?
        .iter()
        .enumerate()
        .map(|(index, value)| parse_channel(value, &format!("{channels_path}[{index}]"), None))
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_ids(&channels_path, channels.iter().map(|channel| channel.id))?;
    if let Some(index) = channels.iter().position(|channel| channel.id == id) {
        return Err(ValidationError::new(
            format!("{channels_path}[{index}].id"),
            format!("id {id} is already used by the category itself"),
        ));
    }

    let overrides = parse_override_list(
        record.list("overrides")?,
        &record.field_path("overrides"),
    )?;
    let include = record.predicate("include")?;

    Ok(Category {
        id,
        name,
        channels,
        overrides,
        include,
    })
}
