//! Shared helper utilities for factory methods.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique ids in tests.
///
/// Starts well above zero so generated ids never collide with the small literal ids
/// tests tend to write by hand.
static COUNTER: AtomicU64 = AtomicU64::new(1_000_000);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Gets the next unique snowflake, as the decimal string scripts declare ids with.
pub fn next_snowflake() -> String {
    next_id().to_string()
}
