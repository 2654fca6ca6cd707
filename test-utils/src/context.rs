use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A script tree laid out in a temporary directory.
///
/// The directory and everything in it is removed when the context is dropped, so keep
/// the context alive for as long as the test reads from it.
pub struct TestContext {
    dir: TempDir,

    /// Path of the entry script, `main.lua` at the root of the tree.
    ///
    /// The file only exists if the builder was given an entry; tests for a missing entry
    /// rely on that.
    pub entry: PathBuf,
}

impl TestContext {
    pub(crate) fn new(dir: TempDir, entry: PathBuf) -> Self {
        Self { dir, entry }
    }

    /// Root directory of the script tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}
