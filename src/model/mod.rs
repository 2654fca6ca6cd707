//! Typed entities produced by script declarations.
//!
//! Entities are only ever constructed by the `schema` layer, so every value of these
//! types has passed validation. After script execution they are mutated by the
//! inheritance resolver and the predicate filter, then sealed into a
//! `GuildConfiguration`.

pub mod category;
pub mod channel;
pub mod guild;
pub mod permission;
pub mod role;
pub mod snowflake;

use std::fmt;

/// Handle to an inclusion predicate registered by the evaluator that produced the entity.
///
/// The predicate itself lives inside the interpreter; entities only carry the handle so
/// they stay plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PredicateId(pub usize);

impl fmt::Display for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
