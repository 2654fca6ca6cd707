use super::*;
use crate::service::filter::{filter_category, filter_global};

/// Tests that a channel rejected by its own predicate is removed.
///
/// Expected: Ok(1) and only the admitted channel remains
#[test]
fn removes_channel_failing_own_predicate() {
    let mut dropped = channel(11, "secret");
    dropped.include = Some(PredicateId(0));
    let mut category = category(1, vec![channel(10, "general"), dropped], Vec::new());
    let host = StubHost::default().with(0, |_| false);

    let removed = filter_category(&mut category, &host).unwrap();

    assert_eq!(removed, 1);
    assert_eq!(category.channels.len(), 1);
    assert_eq!(category.channels[0].name, "general");
}

/// Tests that the category predicate applies to every child channel.
///
/// Expected: channels are kept only when the category predicate admits them
#[test]
fn applies_category_predicate_to_each_channel() {
    let mut category = category(
        1,
        vec![channel(10, "keep-me"), channel(11, "drop-me")],
        Vec::new(),
    );
    category.include = Some(PredicateId(3));
    let host = StubHost::default().with(3, |channel| channel.name.starts_with("keep"));

    filter_category(&mut category, &host).unwrap();

    assert_eq!(category.channels.len(), 1);
    assert_eq!(category.channels[0].name, "keep-me");
}

/// Tests that both predicates run even when the first one already rejects.
///
/// Expected: the host sees one call for each predicate
#[test]
fn evaluates_both_predicates() {
    let mut child = channel(10, "general");
    child.include = Some(PredicateId(0));
    let mut category = category(1, vec![child], Vec::new());
    category.include = Some(PredicateId(1));
    let host = StubHost::default().with(0, |_| false).with(1, |_| true);

    filter_category(&mut category, &host).unwrap();

    assert!(category.channels.is_empty());
    assert_eq!(host.calls.borrow().len(), 2);
}

/// Tests that a predicate error aborts filtering.
///
/// Expected: Err(AppError::ScriptErr) carrying the predicate's message
#[test]
fn propagates_predicate_errors() {
    let mut child = channel(10, "general");
    child.include = Some(PredicateId(0));
    let mut category = category(1, vec![child], Vec::new());
    let host = StubHost::default().failing(0, "predicate blew up");

    let result = filter_category(&mut category, &host);

    match result {
        Err(AppError::ScriptErr(err)) => assert_eq!(err.message, "predicate blew up"),
        other => panic!("expected a script error, got {other:?}"),
    }
}

/// Tests filtering of global channels by their own predicate.
///
/// Expected: channels without a predicate are kept untouched
#[test]
fn filters_global_channels() {
    let mut dropped = channel(21, "staging");
    dropped.include = Some(PredicateId(0));
    let mut channels = vec![channel(20, "general"), dropped];
    let host = StubHost::default().with(0, |_| false);

    let removed = filter_global(&mut channels, &host).unwrap();

    assert_eq!(removed, 1);
    assert_eq!(channels[0].name, "general");
    assert_eq!(host.calls.borrow().len(), 1);
}
