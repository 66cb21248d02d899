//! # Blob Gateway
//!
//! The store persists as a single opaque blob under a single location,
//! mirroring a key-value slot. The gateway trait keeps the choice of
//! backing injectable: a JSON file in production, a held string in tests.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     BlobStore Backends                      │
//! │                                                             │
//! │  FileStore                      MemoryStore                 │
//! │  ─────────                      ───────────                 │
//! │  blob in a JSON file at a       blob in an Option<String>   │
//! │  caller-supplied path;          owned by the value;         │
//! │  missing file reads as None     fresh state per test        │
//! │                                                             │
//! │  Both are single-writer: the one Store that owns the        │
//! │  backend is the only writer, last write wins.               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreResult;

// =============================================================================
// Gateway Trait
// =============================================================================

/// Storage for the single persisted blob.
///
/// `read` yields `None` when nothing has been stored yet; `write`
/// replaces the blob wholesale. There are no partial writes and no
/// versioning, by contract.
pub trait BlobStore {
    /// Reads the stored blob, or `None` if none exists yet.
    fn read(&self) -> StoreResult<Option<String>>;

    /// Replaces the stored blob.
    fn write(&mut self, blob: &str) -> StoreResult<()>;
}

// =============================================================================
// File Store
// =============================================================================

/// Blob storage in a file on disk.
///
/// The parent directory is created on first write. A missing file reads
/// as `None` rather than an error, which is the fresh-install case.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a file store at the given path.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let backend = FileStore::new("./data/till.json");
    /// let store = Store::open(Box::new(backend))?;
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for FileStore {
    fn read(&self) -> StoreResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => {
                debug!(path = %self.path.display(), bytes = blob.len(), "Blob read");
                Ok(Some(blob))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No blob on disk yet");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, blob: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, blob)?;
        debug!(path = %self.path.display(), bytes = blob.len(), "Blob written");
        Ok(())
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Blob storage in memory, for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
}

impl MemoryStore {
    /// Creates an empty memory store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Returns the current blob, if any. Handy for asserting on what a
    /// save actually wrote.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl BlobStore for MemoryStore {
    fn read(&self) -> StoreResult<Option<String>> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> StoreResult<()> {
        self.blob = Some(blob.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
