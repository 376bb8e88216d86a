//! File-backed storage.
//!
//! All keys live in a single JSON object, `{ "cart": "<json>", ... }`, which
//! is rewritten in full on every `set`. Writes go to a temporary file in the
//! same directory that is then renamed over the store, so a crash mid-write
//! leaves the previous document intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{Storage, StorageError};

/// Storage persisted to a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Use the file at `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents, `None` when the file does not exist yet.
    fn read_raw(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Parse the document, treating corrupt JSON as empty.
    fn parse_document(&self, content: &str) -> BTreeMap<String, String> {
        serde_json::from_str(content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Storage file is corrupt, ignoring");
            BTreeMap::new()
        })
    }

    fn write_document(&self, document: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let encoded = serde_json::to_string_pretty(document)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(encoded.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.read_raw() {
            Ok(Some(content)) => self.parse_document(&content).remove(key),
            Ok(None) => {
                debug!(path = %self.path.display(), "Storage file not found");
                None
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read storage file");
                None
            }
        }
    }

    /// Store `value` under `key`, keeping every other key in the file.
    ///
    /// A file that exists but cannot be read is an error rather than an empty
    /// document, so the other keys are never overwritten blind.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut document = self
            .read_raw()?
            .map(|content| self.parse_document(&content))
            .unwrap_or_default();
        document.insert(key.to_owned(), value);

        self.write_document(&document)?;

        debug!(path = %self.path.display(), key, "Storage value written");
        Ok(())
    }
}
