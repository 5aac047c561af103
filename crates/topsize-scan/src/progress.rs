//! Scan progress reporting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of entries observed so far.
    pub entries_observed: u64,
    /// Number of directories listed so far.
    pub dirs_listed: u64,
    /// Sum of observed sizes so far.
    pub bytes_observed: u64,
    /// Most recently observed path.
    pub current_path: PathBuf,
    /// Number of skipped nodes.
    pub errors_count: u64,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Calculate scan rate in entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.entries_observed as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Running counters behind the progress snapshots.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    entries_observed: u64,
    dirs_listed: u64,
    bytes_observed: u64,
    errors_count: u64,
    current_path: PathBuf,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            entries_observed: 0,
            dirs_listed: 0,
            bytes_observed: 0,
            errors_count: 0,
            current_path: PathBuf::new(),
        }
    }

    /// Record an observation; returns the running entry count.
    pub fn record_entry(&mut self, path: &std::path::Path, size: u64) -> u64 {
        self.entries_observed += 1;
        self.bytes_observed = self.bytes_observed.saturating_add(size);
        self.current_path.clear();
        self.current_path.push(path);
        self.entries_observed
    }

    pub fn record_dir(&mut self) {
        self.dirs_listed += 1;
    }

    pub fn record_error(&mut self) {
        self.errors_count += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self) -> ScanProgress {
        ScanProgress {
            entries_observed: self.entries_observed,
            dirs_listed: self.dirs_listed,
            bytes_observed: self.bytes_observed,
            current_path: self.current_path.clone(),
            errors_count: self.errors_count,
            elapsed: self.start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_tracker_snapshot() {
        let mut tracker = ProgressTracker::new();
        tracker.record_dir();
        assert_eq!(tracker.record_entry(Path::new("/a"), 10), 1);
        assert_eq!(tracker.record_entry(Path::new("/a/b"), 5), 2);
        tracker.record_error();

        let snap = tracker.snapshot();
        assert_eq!(snap.entries_observed, 2);
        assert_eq!(snap.dirs_listed, 1);
        assert_eq!(snap.bytes_observed, 15);
        assert_eq!(snap.errors_count, 1);
        assert_eq!(snap.current_path, Path::new("/a/b"));
    }

    #[test]
    fn test_rate_with_zero_elapsed() {
        let progress = ScanProgress {
            entries_observed: 10,
            dirs_listed: 0,
            bytes_observed: 0,
            current_path: PathBuf::new(),
            errors_count: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(progress.entries_per_second(), 0.0);
    }
}
