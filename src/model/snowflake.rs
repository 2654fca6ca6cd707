//! Platform-assigned entity identifiers.

use serde::{Serialize, Serializer};
use std::{fmt, num::NonZeroU64};

/// Non-zero 64-bit platform identifier.
///
/// Snowflakes are roughly time-ordered and serve as the canonical sort key for every
/// output collection. Ordering is numeric, never lexicographic: `20 < 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake(NonZeroU64);

impl Snowflake {
    /// Wraps a raw id, returning `None` for zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialized as a decimal string, the way the platform API transports ids.
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_numerically() {
        let small = Snowflake::new(20).unwrap();
        let large = Snowflake::new(100).unwrap();
        assert!(small < large);
    }

    #[test]
    fn serializes_as_string() {
        let id = Snowflake::new(42).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
