use super::*;
use crate::service::inheritance::sync_category;

use PermissionValue::{Allow, Deny, Inherit};

/// Tests per-key inheritance into a matching channel override.
///
/// The category allows VIEW for role 5; the channel's own override for role 5 leaves VIEW
/// unset and denies SEND.
///
/// Expected: the channel override ends with VIEW allowed and SEND still denied
#[test]
fn fills_unset_keys_from_category() {
    let mut child = channel(10, "general");
    child.overrides.push(permission_override(
        OverrideKind::Role,
        5,
        &[("VIEW_CHANNEL", Inherit), ("SEND_MESSAGES", Deny)],
    ));
    let mut category = category(
        1,
        vec![child],
        vec![permission_override(OverrideKind::Role, 5, &[("VIEW_CHANNEL", Allow)])],
    );

    sync_category(&mut category);

    let merged = &category.channels[0].overrides;
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].permissions["VIEW_CHANNEL"], Allow);
    assert_eq!(merged[0].permissions["SEND_MESSAGES"], Deny);
}

/// Tests that explicit channel settings win over the category.
///
/// Expected: a channel DENY survives a category ALLOW for the same key
#[test]
fn keeps_explicit_channel_values() {
    let mut child = channel(10, "general");
    child
        .overrides
        .push(permission_override(OverrideKind::Role, 5, &[("VIEW_CHANNEL", Deny)]));
    let mut category = category(
        1,
        vec![child],
        vec![permission_override(OverrideKind::Role, 5, &[("VIEW_CHANNEL", Allow)])],
    );

    sync_category(&mut category);

    assert_eq!(category.channels[0].overrides[0].permissions["VIEW_CHANNEL"], Deny);
}

/// Tests that a key the channel override never mentions is taken from the category.
///
/// Expected: the channel override gains the category's key
#[test]
fn absent_key_counts_as_unset() {
    let mut child = channel(10, "general");
    child
        .overrides
        .push(permission_override(OverrideKind::Role, 5, &[("SEND_MESSAGES", Deny)]));
    let mut category = category(
        1,
        vec![child],
        vec![permission_override(OverrideKind::Role, 5, &[("VIEW_CHANNEL", Allow)])],
    );

    sync_category(&mut category);

    let permissions = &category.channels[0].overrides[0].permissions;
    assert_eq!(permissions["VIEW_CHANNEL"], Allow);
    assert_eq!(permissions["SEND_MESSAGES"], Deny);
}

/// Tests wholesale inheritance of an override the channel does not have.
///
/// Expected: every child channel gets an identical copy of the category override
#[test]
fn copies_missing_override_wholesale() {
    let parent = permission_override(OverrideKind::Role, 7, &[("VIEW_CHANNEL", Deny)]);
    let mut category = category(
        1,
        vec![channel(10, "general"), channel(11, "random")],
        vec![parent.clone()],
    );

    sync_category(&mut category);

    for child in &category.channels {
        assert_eq!(child.overrides, vec![parent.clone()]);
    }
}

/// Tests that an empty channel override for the same user takes every category key.
///
/// Expected: no second override for id 5 is appended
#[test]
fn matches_on_subject_id() {
    let mut child = channel(10, "general");
    child.overrides.push(permission_override(OverrideKind::User, 5, &[]));
    let mut category = category(
        1,
        vec![child],
        vec![permission_override(OverrideKind::User, 5, &[("CONNECT", Allow)])],
    );

    sync_category(&mut category);

    assert_eq!(category.channels[0].overrides.len(), 1);
    assert_eq!(category.channels[0].overrides[0].permissions["CONNECT"], Allow);
}

/// Tests that syncing never touches the channel list itself.
///
/// Expected: a category without channels stays empty and keeps its overrides
#[test]
fn never_adds_channels() {
    let mut category = category(
        1,
        Vec::new(),
        vec![permission_override(OverrideKind::Role, 5, &[("VIEW_CHANNEL", Allow)])],
    );

    sync_category(&mut category);

    assert!(category.channels.is_empty());
    assert_eq!(category.overrides.len(), 1);
}
