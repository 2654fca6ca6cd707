use std::path::PathBuf;
use thiserror::Error;

/// Fault raised inside the sandboxed script.
///
/// `message` is the evaluator's own diagnostic, untouched.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ScriptExecutionError {
    pub message: String,
}

impl ScriptExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum FilesystemError {
    /// The entry script does not exist or is not a regular file.
    #[error("Entry script not found: {}", path.display())]
    MissingEntry { path: PathBuf },

    /// A script file beside the entry could not be listed or read.
    #[error("Failed to read script {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
