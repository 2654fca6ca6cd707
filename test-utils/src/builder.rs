use std::path::{Component, Path};

use crate::{context::TestContext, error::TestError};

/// File name of the entry script inside every test tree.
pub const ENTRY_FILE: &str = "main.lua";

/// Builder for creating temporary script trees.
///
/// Provides a fluent interface for laying out an entry script and companion files in a
/// fresh temporary directory. Files are written verbatim as bytes when `build()` is
/// called; parent directories are created as needed.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_entry(r#"return { id = "1", setup = function(ctx) end }"#)
///     .with_file("lib/helpers.lua", "return {}")
///     .build()?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    /// Source of `main.lua`; no entry file is written when unset.
    entry: Option<Vec<u8>>,

    /// Companion files as (relative path, content) in the order they were added.
    files: Vec<(String, Vec<u8>)>,
}

impl TestBuilder {
    /// Creates a new builder with no entry and no companion files.
    ///
    /// # Returns
    /// - New `TestBuilder` instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry script source.
    ///
    /// # Arguments
    /// - `source` - Content written to `main.lua`
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_entry(mut self, source: impl Into<Vec<u8>>) -> Self {
        self.entry = Some(source.into());
        self
    }

    /// Adds a companion file.
    ///
    /// The content is written as-is, so non-script files and non-UTF-8 bytes can be laid
    /// out too.
    ///
    /// # Arguments
    /// - `relative` - `/`-separated path below the tree root
    /// - `content` - Raw file content
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_file(mut self, relative: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.push((relative.to_string(), content.into()));
        self
    }

    /// Writes the tree into a fresh temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - The laid-out tree
    /// - `Err(TestError::Io)` - Creating the directory or writing a file failed
    /// - `Err(TestError::InvalidPath)` - A companion path is absolute or uses `..`
    pub fn build(self) -> Result<TestContext, TestError> {
        let dir = tempfile::tempdir()?;

        for (relative, content) in &self.files {
            let escapes = Path::new(relative)
                .components()
                .any(|part| !matches!(part, Component::Normal(_) | Component::CurDir));
            if escapes {
                return Err(TestError::InvalidPath(relative.clone()));
            }

            let path = dir.path().join(relative);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, content)?;
        }

        let entry = dir.path().join(ENTRY_FILE);
        if let Some(source) = &self.entry {
            std::fs::write(&entry, source)?;
        }

        Ok(TestContext::new(dir, entry))
    }
}
