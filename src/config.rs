use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

pub struct Config {
    /// Entry script to compile.
    pub script: PathBuf,
    /// File the compiled configuration is written to; stdout when unset.
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            script: std::env::var("GUILD_SCRIPT")
                .map(PathBuf::from)
                .map_err(|_| ConfigError::MissingEnvVar("GUILD_SCRIPT".to_string()))?,
            output: std::env::var("GUILD_OUTPUT")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}
