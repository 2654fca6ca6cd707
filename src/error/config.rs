use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// `GUILD_SCRIPT` must name the entry script; `GUILD_OUTPUT` is optional and
    /// defaults to stdout.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}
