//! Permission overrides and their tri-state values.

use serde::Serialize;
use serde_json::{Map, Value};
use serenity::all::{PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId};
use std::collections::BTreeMap;

use crate::{error::internal::InternalError, model::snowflake::Snowflake};

/// Tri-state setting for one permission key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionValue {
    Allow,
    Deny,
    /// Unset; the effective value comes from the parent.
    Inherit,
}

/// Subject an override applies to.
///
/// Variant order is the canonical sort precedence: role overrides sort before user
/// overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideKind {
    Role,
    User,
}

impl OverrideKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "role" => Some(Self::Role),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// Per-subject permission settings attached to a channel or category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionOverride {
    /// Subject id; unique within one override list.
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub kind: OverrideKind,
    /// Permission key to setting, kept in key order so output is canonical.
    pub permissions: BTreeMap<String, PermissionValue>,
    /// Platform-specific fields the script passed along; carried unexamined.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PermissionOverride {
    /// Fills this override's unset keys from a parent override for the same subject.
    ///
    /// Keys this override sets explicitly (allow or deny) are never touched. A key that is
    /// absent here is unset, so it takes the parent's value as well.
    pub fn inherit_from(&mut self, parent: &PermissionOverride) {
        for (key, value) in &parent.permissions {
            let slot = self
                .permissions
                .entry(key.clone())
                .or_insert(PermissionValue::Inherit);

            if *slot == PermissionValue::Inherit {
                *slot = *value;
            }
        }
    }

    /// Converts into the overwrite shape the remote API accepts.
    ///
    /// # Returns
    /// - `Ok(PermissionOverwrite)` - Allow and deny bitsets built from the explicit keys
    /// - `Err(InternalError::UnknownPermission)` - A key with an explicit value has no
    ///   remote permission flag
    pub fn to_overwrite(&self) -> Result<PermissionOverwrite, InternalError> {
        let mut allow = Permissions::empty();
        let mut deny = Permissions::empty();

        for (key, value) in &self.permissions {
            if *value == PermissionValue::Inherit {
                continue;
            }

            let flag = permission_flag(key).ok_or_else(|| InternalError::UnknownPermission {
                key: key.clone(),
            })?;

            match value {
                PermissionValue::Allow => allow |= flag,
                PermissionValue::Deny => deny |= flag,
                PermissionValue::Inherit => {}
            }
        }

        let kind = match self.kind {
            OverrideKind::Role => PermissionOverwriteType::Role(RoleId::new(self.id.get())),
            OverrideKind::User => PermissionOverwriteType::Member(UserId::new(self.id.get())),
        };

        Ok(PermissionOverwrite { allow, deny, kind })
    }
}

/// Looks up the remote permission flag for a declared permission key.
pub fn permission_flag(key: &str) -> Option<Permissions> {
    let flag = match key {
        "CREATE_INSTANT_INVITE" => Permissions::CREATE_INSTANT_INVITE,
        "MANAGE_CHANNELS" => Permissions::MANAGE_CHANNELS,
        "MANAGE_ROLES" => Permissions::MANAGE_ROLES,
        "MANAGE_WEBHOOKS" => Permissions::MANAGE_WEBHOOKS,
        "VIEW_CHANNEL" => Permissions::VIEW_CHANNEL,
        "SEND_MESSAGES" => Permissions::SEND_MESSAGES,
        "SEND_TTS_MESSAGES" => Permissions::SEND_TTS_MESSAGES,
        "MANAGE_MESSAGES" => Permissions::MANAGE_MESSAGES,
        "EMBED_LINKS" => Permissions::EMBED_LINKS,
        "ATTACH_FILES" => Permissions::ATTACH_FILES,
        "READ_MESSAGE_HISTORY" => Permissions::READ_MESSAGE_HISTORY,
        "MENTION_EVERYONE" => Permissions::MENTION_EVERYONE,
        "USE_EXTERNAL_EMOJIS" => Permissions::USE_EXTERNAL_EMOJIS,
        "ADD_REACTIONS" => Permissions::ADD_REACTIONS,
        "USE_APPLICATION_COMMANDS" => Permissions::USE_APPLICATION_COMMANDS,
        "MANAGE_THREADS" => Permissions::MANAGE_THREADS,
        "CREATE_PUBLIC_THREADS" => Permissions::CREATE_PUBLIC_THREADS,
        "CREATE_PRIVATE_THREADS" => Permissions::CREATE_PRIVATE_THREADS,
        "SEND_MESSAGES_IN_THREADS" => Permissions::SEND_MESSAGES_IN_THREADS,
        "CONNECT" => Permissions::CONNECT,
        "SPEAK" => Permissions::SPEAK,
        "STREAM" => Permissions::STREAM,
        "MUTE_MEMBERS" => Permissions::MUTE_MEMBERS,
        "DEAFEN_MEMBERS" => Permissions::DEAFEN_MEMBERS,
        "MOVE_MEMBERS" => Permissions::MOVE_MEMBERS,
        "USE_VAD" => Permissions::USE_VAD,
        "PRIORITY_SPEAKER" => Permissions::PRIORITY_SPEAKER,
        _ => return None,
    };

    Some(flag)
}
