//! Recursive directory walker for topsize.
//!
//! # Overview
//!
//! `topsize-scan` walks a directory tree depth-first and feeds every entry it
//! can stat into a bounded [`Selector`], which keeps only the largest ones.
//!
//! - **Single-threaded** pre-order recursion, one entry at a time
//! - **Skip and continue** on unreadable directories and vanished entries
//! - **Progress updates** via broadcast channels
//! - **Pluggable filesystem** through the [`FileSystem`] trait
//!
//! # Example
//!
//! ```rust,no_run
//! use topsize_scan::{ScanConfig, TopScanner};
//!
//! let scanner = TopScanner::new(ScanConfig::new("/path/to/scan")).unwrap();
//! let report = scanner.scan().unwrap();
//!
//! for entry in &report.entries {
//!     println!("{}\t{}", entry.path.display(), entry.size);
//! }
//! ```
//!
//! # Driving the walker directly
//!
//! ```rust,no_run
//! use std::path::Path;
//! use topsize_scan::{Selector, Walker};
//!
//! let mut selector = Selector::new(10).unwrap();
//! let summary = Walker::new().walk(Path::new("."), &mut selector).unwrap();
//!
//! for warning in &summary.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! let top = selector.results();
//! ```

mod fs;
mod progress;
mod scanner;
mod walker;

pub use fs::{ChildKind, DirChild, FileSystem, OsFileSystem};
pub use progress::ScanProgress;
pub use scanner::TopScanner;
pub use walker::{WalkSummary, Walker};

// Re-export core types for convenience
pub use topsize_core::{
    DEFAULT_TOP_N, Entry, ScanConfig, ScanError, ScanReport, ScanWarning, Selector, TreeStats,
    WarningKind,
};
