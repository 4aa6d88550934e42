//! Persistent storage for the progress document.
//!
//! The document is a single pretty-printed JSON file. Writes go to a
//! temporary file in the same directory which is then renamed over the
//! target, so a reader sees either the old or the new document.

use crate::error::{Error, Result};
use crate::progress::ProgressState;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage backend for the progress document.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Open storage at `path`, creating its parent directory if needed.
    /// The file itself is created on first save.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(parent_dir(&path))?;
        Ok(Self { path })
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. Never fails: a missing, unreadable or corrupt
    /// file yields the default state.
    pub fn load(&self) -> ProgressState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = ?self.path, "no progress document yet, using defaults");
                return ProgressState::default();
            }
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "progress document unreadable, using defaults");
                return ProgressState::default();
            }
        };

        if raw.trim().is_empty() {
            return ProgressState::default();
        }

        match serde_json::from_str(&raw) {
            Ok(value) => ProgressState::from_document(&value),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "progress document is not valid JSON, using defaults");
                ProgressState::default()
            }
        }
    }

    /// Write the document atomically.
    pub fn save(&self, state: &ProgressState) -> Result<()> {
        let dir = parent_dir(&self.path);
        fs::create_dir_all(dir)?;

        let mut body = serde_json::to_string_pretty(state)?;
        body.push('\n');

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(body.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|e| Error::Storage(format!("failed to replace progress document: {}", e.error)))?;
        Ok(())
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
