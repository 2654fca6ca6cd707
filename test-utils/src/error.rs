use thiserror::Error;

/// Errors that can occur while setting up a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Creating the temporary directory or writing a script into it failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A script path handed to the builder would land outside the temporary directory.
    #[error("Script path escapes the test directory: {0}")]
    InvalidPath(String),
}
