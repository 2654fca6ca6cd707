use super::*;
use crate::{
    model::role::Role,
    service::ordering::{sequence, sort_category_overrides, sort_overrides},
};
use serenity::all::Permissions;

fn role(id: u64) -> Role {
    Role {
        id: sf(id),
        name: format!("role-{id}"),
        permissions: Permissions::empty(),
        color: None,
        hoist: false,
        mentionable: false,
    }
}

/// Tests the canonical override order.
///
/// Expected: role overrides first, each group by ascending subject id
#[test]
fn sorts_roles_before_users_then_by_id() {
    let mut overrides = vec![
        permission_override(OverrideKind::User, 1, &[]),
        permission_override(OverrideKind::Role, 30, &[]),
        permission_override(OverrideKind::User, 900, &[]),
        permission_override(OverrideKind::Role, 4, &[]),
    ];

    sort_overrides(&mut overrides);

    let order: Vec<(OverrideKind, u64)> = overrides
        .iter()
        .map(|entry| (entry.kind, entry.id.get()))
        .collect();
    assert_eq!(
        order,
        vec![
            (OverrideKind::Role, 4),
            (OverrideKind::Role, 30),
            (OverrideKind::User, 1),
            (OverrideKind::User, 900),
        ]
    );
}

/// Tests that ids are compared as numbers rather than strings.
///
/// Expected: 9 sorts before 10
#[test]
fn compares_ids_numerically() {
    let mut overrides = vec![
        permission_override(OverrideKind::Role, 10, &[]),
        permission_override(OverrideKind::Role, 9, &[]),
    ];

    sort_overrides(&mut overrides);

    assert_eq!(overrides[0].id.get(), 9);
}

/// Tests sorting of a category's own and its channels' override lists.
#[test]
fn sorts_nested_override_lists() {
    let mut child = channel(10, "general");
    child.overrides = vec![
        permission_override(OverrideKind::User, 2, &[]),
        permission_override(OverrideKind::Role, 3, &[]),
    ];
    let mut category = category(
        1,
        vec![child],
        vec![
            permission_override(OverrideKind::Role, 8, &[]),
            permission_override(OverrideKind::Role, 7, &[]),
        ],
    );

    sort_category_overrides(&mut category);

    assert_eq!(category.overrides[0].id.get(), 7);
    assert_eq!(category.channels[0].overrides[0].kind, OverrideKind::Role);
}

/// Tests the final sequencing of every collection.
///
/// Categories are declared as [200, 100].
///
/// Expected: categories come out as [100, 200], with channels, roles and nested channels
/// ordered the same way and predicate handles cleared
#[test]
fn sequences_all_collections() {
    let mut included = channel(31, "b");
    included.include = Some(PredicateId(0));
    let mut later = category(200, vec![included, channel(30, "a")], Vec::new());
    later.include = Some(PredicateId(1));

    let configuration = sequence(
        "guild".to_string(),
        vec![channel(21, "y"), channel(20, "x")],
        vec![role(6), role(5)],
        vec![later, category(100, Vec::new(), Vec::new())],
    );

    assert_eq!(
        configuration.categories.iter().map(|c| c.id.get()).collect::<Vec<_>>(),
        vec![100, 200]
    );
    assert_eq!(
        configuration.global_channels.iter().map(|c| c.id.get()).collect::<Vec<_>>(),
        vec![20, 21]
    );
    assert_eq!(
        configuration.global_roles.iter().map(|r| r.id.get()).collect::<Vec<_>>(),
        vec![5, 6]
    );

    let nested = &configuration.categories[1];
    assert_eq!(
        nested.channels.iter().map(|c| c.id.get()).collect::<Vec<_>>(),
        vec![30, 31]
    );
    assert!(nested.include.is_none());
    assert!(nested.channels.iter().all(|c| c.include.is_none()));
}
