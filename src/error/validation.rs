use thiserror::Error;

/// A declaration failed its schema at the moment it was made.
///
/// `path` locates the offending field from the capability that was called, for example
/// `category.channels[2].name`; `constraint` says what was expected there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid `{path}`: {constraint}")]
pub struct ValidationError {
    pub path: String,
    pub constraint: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            constraint: constraint.into(),
        }
    }

    /// Shorthand for a required field that was not given.
    pub fn missing(path: impl Into<String>, expected: &str) -> Self {
        Self::new(path, format!("required field is missing (expected {expected})"))
    }
}

/// The value returned by the entry script does not have the `{ id, setup }` shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("entry script returned an invalid value: {0}")]
pub struct SchemaError(pub String);
