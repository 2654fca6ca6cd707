//! Error types for the configuration resolution pipeline.
//!
//! `AppError` is the top-level error type. It wraps one domain error per concern so
//! callers can tell a malformed declaration apart from a faulty script or a missing
//! file. Every variant is fatal to the evaluation that produced it; nothing here is
//! retried internally.

pub mod config;
pub mod internal;
pub mod script;
pub mod validation;

use thiserror::Error;

use crate::error::{
    config::ConfigError,
    internal::InternalError,
    script::{FilesystemError, ScriptExecutionError},
    validation::{SchemaError, ValidationError},
};

/// Top-level application error type.
///
/// Aggregates all errors that can end an evaluation. Domain errors convert in through
/// `#[from]`, so pipeline stages propagate them with `?`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error while loading environment variables at startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// A declared entity failed schema validation at the moment it was declared.
    ///
    /// Carries the offending field path and the constraint it violated.
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    /// The entry script returned something other than `{ id, setup }`.
    #[error(transparent)]
    SchemaErr(#[from] SchemaError),

    /// The script raised an error of its own.
    ///
    /// The evaluator's diagnostic is passed through unmodified.
    #[error(transparent)]
    ScriptErr(#[from] ScriptExecutionError),

    /// The entry script is missing or a companion script could not be read.
    #[error(transparent)]
    FilesystemErr(#[from] FilesystemError),

    /// Host-side failure that indicates a bug or a broken interpreter rather than a
    /// problem with the script.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Failure to serialize the finished configuration.
    #[error(transparent)]
    SerializeErr(#[from] serde_json::Error),

    /// Failure to write the finished configuration to its destination.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),
}
