//! Core types for topsize.
//!
//! This crate provides the data structures shared by the walker and the
//! command line front end: observed entries, the bounded [`Selector`] that
//! keeps the N largest of them, scan configuration, and error types.

mod config;
mod entry;
mod error;
mod report;
mod selector;

pub use config::{DEFAULT_TOP_N, ScanConfig, ScanConfigBuilder};
pub use entry::Entry;
pub use error::{ScanError, ScanWarning, WarningKind};
pub use report::{ScanReport, TreeStats};
pub use selector::Selector;
