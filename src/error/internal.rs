use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the host side indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse a snowflake id from String
    #[error("Failed to parse snowflake from String '{value}': {source}")]
    ParseSnowflake {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// The embedded interpreter could not be booted or prepared.
    ///
    /// Raised by host-side setup (creating tables, registering capabilities), never by
    /// the script itself.
    #[error("Failed to prepare script interpreter: {0}")]
    Interpreter(String),

    /// A channel references a predicate handle the current interpreter never issued.
    ///
    /// Happens when a declaration outlives the interpreter that produced it, for example
    /// when it is resolved after a reset.
    #[error("Unknown predicate handle {0}")]
    DanglingPredicate(usize),

    /// Permission key that has no counterpart in the remote permission set
    #[error("Unknown permission key '{key}'")]
    UnknownPermission {
        /// The permission key as declared by the script
        key: String,
    },
}
