//! Channel schemas.

use serde_json::Value;

use crate::{
    error::validation::ValidationError,
    model::channel::{Channel, ChannelKind},
    schema::{permission::parse_override_list, OpenEntity, Record},
};

const KINDS: &str = "\"text\" or \"voice\"";
const STRUCTURAL: [&str; 5] = ["id", "name", "type", "overrides", "include"];

/// Open builder behind `channel.text` / `channel.voice`.
///
/// Only the discriminant and, when given, the id are checked. The result is meant to be
/// nested into a category or global declaration, which validates it strictly.
pub fn parse_channel_builder(
    value: &Value,
    path: &str,
    kind: ChannelKind,
) -> Result<OpenEntity, ValidationError> {
    let record = Record::new(path, value)?;

    let kind = record.discriminant("type", Some(kind), ChannelKind::parse, KINDS)?;
    let id = record.optional_snowflake("id")?;

    Ok(OpenEntity {
        kind: kind.as_str(),
        id,
        fields: record.rest(&["type", "id"]),
    })
}

/// Strict channel, as declared globally or nested in a category.
///
/// `expected` fixes the variant when the capability implies it (`global.text`); nested
/// channels must carry their own `type`.
pub fn parse_channel(
    value: &Value,
    path: &str,
    expected: Option<ChannelKind>,
) -> Result<Channel, ValidationError> {
    let record = Record::new(path, value)?;

    let id = record.snowflake("id")?;
    let name = record.name("name")?;
    let kind = record.discriminant("type", expected, ChannelKind::parse, KINDS)?;
    let overrides = parse_override_list(
        record.list("overrides")?,
        &record.field_path("overrides"),
    )?;
    let include = record.predicate("include")?;

    check_known_options(&record, kind)?;

    Ok(Channel {
        id,
        name,
        kind,
        overrides,
        options: record.rest(&STRUCTURAL),
        include,
    })
}

/// Type-checks the well-known options of each variant. Anything else is an extension
/// field and stays unexamined.
fn check_known_options(record: &Record<'_>, kind: ChannelKind) -> Result<(), ValidationError> {
    match kind {
        ChannelKind::Text => {
            record.optional_string("topic")?;
            record.optional_bool("nsfw")?;
            record.optional_uint("slowmode")?;
        }
        ChannelKind::Voice => {
            record.optional_uint("bitrate")?;
            record.optional_uint("user_limit")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_keeps_custom_fields() {
        let entity = parse_channel_builder(
            &json!({ "customFlag": true }),
            "channel.text",
            ChannelKind::Text,
        )
        .unwrap();

        assert_eq!(entity.kind, "text");
        assert_eq!(entity.id, None);
        assert_eq!(entity.fields["customFlag"], true);

        let echoed = serde_json::to_value(&entity).unwrap();
        assert_eq!(echoed, json!({ "type": "text", "customFlag": true }));
    }

    #[test]
    fn builder_rejects_bad_id() {
        let err = parse_channel_builder(&json!({ "id": "abc" }), "channel.voice", ChannelKind::Voice)
            .unwrap_err();

        assert_eq!(err.path, "channel.voice.id");
    }

    #[test]
    fn strict_channel_requires_name() {
        let err = parse_channel(&json!({ "id": "3" }), "global.text", Some(ChannelKind::Text))
            .unwrap_err();

        assert_eq!(err.path, "global.text.name");
        assert!(err.constraint.contains("required"));
    }

    #[test]
    fn nested_channel_requires_type() {
        let err = parse_channel(
            &json!({ "id": "3", "name": "lobby" }),
            "category.channels[0]",
            None,
        )
        .unwrap_err();

        assert_eq!(err.path, "category.channels[0].type");
    }

    #[test]
    fn known_options_are_type_checked() {
        let err = parse_channel(
            &json!({ "id": "3", "name": "lobby", "bitrate": "fast" }),
            "global.voice",
            Some(ChannelKind::Voice),
        )
        .unwrap_err();

        assert_eq!(err.path, "global.voice.bitrate");
    }

    #[test]
    fn extension_options_are_carried() {
        let channel = parse_channel(
            &json!({ "id": "3", "name": "news", "topic": "updates", "rtc_region": "eu" }),
            "global.text",
            Some(ChannelKind::Text),
        )
        .unwrap();

        assert_eq!(channel.options["topic"], "updates");
        assert_eq!(channel.options["rtc_region"], "eu");
        assert!(channel.overrides.is_empty());
        assert_eq!(channel.include, None);
    }
}
