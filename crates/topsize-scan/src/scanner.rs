//! One-call scan: selector, walker and timing wired together.

use std::time::Instant;

use tokio::sync::broadcast;

use topsize_core::{ScanConfig, ScanError, ScanReport, Selector};

use crate::fs::{FileSystem, OsFileSystem};
use crate::progress::ScanProgress;
use crate::walker::Walker;

/// Finds the largest entries under a root described by a [`ScanConfig`].
pub struct TopScanner<F = OsFileSystem> {
    walker: Walker<F>,
    config: ScanConfig,
}

impl TopScanner<OsFileSystem> {
    /// Create a scanner over the host filesystem.
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        Self::with_filesystem(config, OsFileSystem)
    }
}

impl<F: FileSystem> TopScanner<F> {
    /// Create a scanner over an arbitrary filesystem.
    pub fn with_filesystem(config: ScanConfig, fs: F) -> Result<Self, ScanError> {
        let walker = Walker::from_config(&config, fs)?;
        Ok(Self { walker, config })
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.walker.subscribe()
    }

    /// Run the scan.
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        let start = Instant::now();
        let mut selector = Selector::new(self.config.top_n)?;
        let summary = self.walker.walk(&self.config.root, &mut selector)?;

        Ok(ScanReport::new(
            self.config.root.clone(),
            selector.into_results(),
            summary.stats,
            start.elapsed(),
            summary.warnings,
        ))
    }
}
