//! Channel declarations.

use serde::Serialize;
use serde_json::{Map, Value};
use serenity::all::ChannelType;

use crate::model::{permission::PermissionOverride, snowflake::Snowflake, PredicateId};

/// Channel variant, carried as the `type` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Text,
    Voice,
}

impl ChannelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "voice" => Some(Self::Voice),
            _ => None,
        }
    }

    /// Remote channel type this variant is created as.
    pub fn channel_type(self) -> ChannelType {
        match self {
            Self::Text => ChannelType::Text,
            Self::Voice => ChannelType::Voice,
        }
    }
}

/// A text or voice channel, either global or owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    pub overrides: Vec<PermissionOverride>,
    /// Type-specific options (topic, bitrate, ...) and any platform extension fields.
    #[serde(flatten)]
    pub options: Map<String, Value>,
    /// Local inclusion predicate; `None` always includes.
    #[serde(skip)]
    pub include: Option<PredicateId>,
}

impl Channel {
    /// Human label used in log lines, e.g. `#general` or `lobby (voice)`.
    pub fn label(&self) -> String {
        match self.kind {
            ChannelKind::Text => format!("#{}", self.name),
            ChannelKind::Voice => format!("{} (voice)", self.name),
        }
    }
}
