//! Observed filesystem entries.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single `(path, size)` observation produced during traversal.
///
/// For directories the size is the one reported by the directory's own
/// metadata, not the sum of its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    /// Full path of the entry, as built by joining the walk root with each
    /// child name along the way.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

impl Entry {
    /// Create a new entry.
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Get the entry path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
