//! Companion script mounting.
//!
//! Every script beside the entry script (recursively) is read into a [`MountTable`] keyed
//! by its `/`-separated path relative to the entry's directory. Contents are kept as raw
//! bytes so nothing gets re-encoded on the way into the interpreter.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::error::script::FilesystemError;

/// File extensions recognized as script sources.
pub const SCRIPT_EXTENSIONS: [&str; 2] = ["lua", "luau"];

/// In-memory view of the entry script and its companions.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    root: PathBuf,
    entry: String,
    directories: BTreeSet<String>,
    files: BTreeMap<String, Vec<u8>>,
}

impl MountTable {
    /// Reads the entry script and every companion script under its directory.
    ///
    /// The walk is sequential and depth-first; a directory is always recorded before the
    /// files inside it.
    ///
    /// # Arguments
    /// - `entry` - Path to the entry script
    ///
    /// # Returns
    /// - `Ok(MountTable)` - All scripts read
    /// - `Err(FilesystemError::MissingEntry)` - `entry` is not an existing file
    /// - `Err(FilesystemError::Unreadable)` - A directory or script could not be read
    pub async fn scan(entry: &Path) -> Result<Self, FilesystemError> {
        let is_file = tokio::fs::metadata(entry)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        let entry_name = entry.file_name().map(|name| name.to_string_lossy().into_owned());

        let (true, Some(entry_name)) = (is_file, entry_name) else {
            return Err(FilesystemError::MissingEntry {
                path: entry.to_path_buf(),
            });
        };

        let root = match entry.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut table = Self {
            root: root.clone(),
            entry: entry_name.clone(),
            ..Self::default()
        };

        let entry_source = read(entry).await?;
        table.files.insert(entry_name, entry_source);

        for item in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let item = item.map_err(|e| FilesystemError::Unreadable {
                path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
                source: e.into(),
            })?;

            let Some(relative) = relative_key(&root, item.path()) else {
                continue;
            };

            if item.file_type().is_dir() {
                table.directories.insert(relative);
            } else if item.file_type().is_file() && has_script_extension(&relative) {
                if table.files.contains_key(&relative) {
                    continue;
                }
                let source = read(item.path()).await?;
                tracing::debug!("Mounted {} ({} bytes)", relative, source.len());
                table.files.insert(relative, source);
            }
        }

        tracing::debug!(
            "Mounted {} scripts in {} directories from {}",
            table.files.len(),
            table.directories.len(),
            table.root.display()
        );

        Ok(table)
    }

    /// Builds a table from in-memory sources, rooted at `.`.
    ///
    /// Parent directories of every file are recorded as well.
    pub fn from_sources<I, K, V>(entry: &str, files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let mut table = Self {
            root: PathBuf::from("."),
            entry: entry.to_string(),
            ..Self::default()
        };

        for (path, source) in files {
            let path: String = path.into();
            let mut parent = path.as_str();
            while let Some((dir, _)) = parent.rsplit_once('/') {
                table.directories.insert(dir.to_string());
                parent = dir;
            }
            table.files.insert(path, source.into());
        }

        table
    }

    /// Entry script path relative to the directory it lives in.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn entry_path(&self) -> PathBuf {
        self.root.join(&self.entry)
    }

    pub fn entry_source(&self) -> Option<&[u8]> {
        self.get(&self.entry)
    }

    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files
            .iter()
            .map(|(path, source)| (path.as_str(), source.as_slice()))
    }

    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.directories.iter().map(String::as_str)
    }

    /// Resolves a `require` name to a mounted script.
    ///
    /// `lib.helpers` tries `lib/helpers.lua`, `lib/helpers.luau`, `lib/helpers/init.lua`
    /// and `lib/helpers/init.luau` in that order. A name that already ends in a script
    /// extension is looked up verbatim, minus any leading `./`.
    pub fn resolve_module(&self, name: &str) -> Option<(&str, &[u8])> {
        let name = name.trim_start_matches("./");

        if has_script_extension(name) {
            return self.lookup(name);
        }

        let module = name.replace('.', "/");
        SCRIPT_EXTENSIONS
            .iter()
            .map(|ext| format!("{module}.{ext}"))
            .chain(
                SCRIPT_EXTENSIONS
                    .iter()
                    .map(|ext| format!("{module}/init.{ext}")),
            )
            .find_map(|candidate| self.lookup(&candidate))
    }

    fn lookup(&self, path: &str) -> Option<(&str, &[u8])> {
        self.files
            .get_key_value(path)
            .map(|(path, source)| (path.as_str(), source.as_slice()))
    }
}

pub fn has_script_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

async fn read(path: &Path) -> Result<Vec<u8>, FilesystemError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| FilesystemError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
}

fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy().into_owned())
        .collect();

    (!parts.is_empty()).then(|| parts.join("/"))
}
