//! Scan report and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::ScanWarning;

/// Summary statistics gathered while walking a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Entries handed to the selector.
    pub entries_observed: u64,
    /// Regular files observed.
    pub total_files: u64,
    /// Directories observed (the root itself is not an entry).
    pub total_dirs: u64,
    /// Anything else observed: symlinks, sockets, devices.
    pub total_other: u64,
    /// Sum of all observed sizes.
    pub bytes_observed: u64,
    /// Deepest level reached; children of the root are at depth 1.
    pub max_depth: u32,
    /// Number of nodes skipped because of errors.
    pub warnings: u64,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed file.
    pub fn record_file(&mut self, size: u64, depth: u32) {
        self.total_files += 1;
        self.record_entry(size, depth);
    }

    /// Record an observed directory.
    pub fn record_dir(&mut self, size: u64, depth: u32) {
        self.total_dirs += 1;
        self.record_entry(size, depth);
    }

    /// Record an observed entry that is neither a file nor a directory.
    pub fn record_other(&mut self, size: u64, depth: u32) {
        self.total_other += 1;
        self.record_entry(size, depth);
    }

    /// Record a skipped node.
    pub fn record_warning(&mut self) {
        self.warnings += 1;
    }

    fn record_entry(&mut self, size: u64, depth: u32) {
        self.entries_observed += 1;
        self.bytes_observed = self.bytes_observed.saturating_add(size);
        self.max_depth = self.max_depth.max(depth);
    }
}

/// Outcome of a complete scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Root path that was scanned.
    pub root_path: PathBuf,

    /// When this scan finished.
    pub scanned_at: SystemTime,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Largest entries, sorted by size descending.
    pub entries: Vec<Entry>,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Warnings for nodes skipped during the scan.
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    /// Create a new report.
    pub fn new(
        root_path: PathBuf,
        entries: Vec<Entry>,
        stats: TreeStats,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root_path,
            scanned_at: SystemTime::now(),
            scan_duration,
            entries,
            stats,
            warnings,
        }
    }

    /// Check if any node was skipped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// The single largest entry, if anything was observed.
    pub fn largest(&self) -> Option<&Entry> {
        self.entries.first()
    }
}
