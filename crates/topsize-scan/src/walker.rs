//! Depth-first recursive walker feeding a [`Selector`].

use std::path::Path;
use std::time::Duration;

use globset::GlobSet;
use tokio::sync::broadcast;

use topsize_core::{ScanConfig, ScanError, ScanWarning, Selector, TreeStats};

use crate::fs::{ChildKind, DirChild, FileSystem, OsFileSystem};
use crate::progress::{ProgressTracker, ScanProgress};

/// Observations between two progress snapshots.
const PROGRESS_INTERVAL: u64 = 1000;

/// What a finished walk produced besides the selector contents.
#[derive(Debug, Clone, Default)]
pub struct WalkSummary {
    /// Counters gathered during the walk.
    pub stats: TreeStats,
    /// One warning per skipped directory or entry, in the order hit.
    pub warnings: Vec<ScanWarning>,
    /// Wall-clock time spent walking.
    pub duration: Duration,
}

/// Single-threaded, depth-first, pre-order directory walker.
///
/// Every child that can be stat'd is handed to the selector, directories
/// included (ranked by their own metadata size, not their contents). Failures
/// below the root never abort the walk: they are logged, recorded as
/// warnings, and the affected node is skipped.
///
/// Recursion depth equals tree depth. Nothing bounds it beyond the
/// filesystem's own path limits and the thread's stack.
pub struct Walker<F = OsFileSystem> {
    fs: F,
    include_hidden: bool,
    ignore: GlobSet,
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl Walker<OsFileSystem> {
    /// Create a walker over the host filesystem that visits everything.
    pub fn new() -> Self {
        Self::with_filesystem(OsFileSystem)
    }
}

impl Default for Walker<OsFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> Walker<F> {
    /// Create a walker over `fs` that visits everything.
    pub fn with_filesystem(fs: F) -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self {
            fs,
            include_hidden: true,
            ignore: GlobSet::empty(),
            progress_tx,
        }
    }

    /// Create a walker over `fs` honoring the filters in `config`.
    pub fn from_config(config: &ScanConfig, fs: F) -> Result<Self, ScanError> {
        let mut walker = Self::with_filesystem(fs);
        walker.include_hidden = config.include_hidden;
        walker.ignore = config.ignore_set()?;
        Ok(walker)
    }

    /// Subscribe to walk progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Walk the tree under `root`, observing every entry into `selector`.
    ///
    /// Fails only if `root` itself cannot be listed.
    pub fn walk(&self, root: &Path, selector: &mut Selector) -> Result<WalkSummary, ScanError> {
        let tracker = ProgressTracker::new();
        let children = self
            .fs
            .list_children(root)
            .map_err(|e| ScanError::io(root, e))?;

        tracing::debug!(root = %root.display(), "walk started");

        let mut state = WalkState {
            selector,
            stats: TreeStats::new(),
            warnings: Vec::new(),
            tracker,
        };
        self.visit_children(root, children, 1, &mut state);

        let _ = self.progress_tx.send(state.tracker.snapshot());
        let duration = state.tracker.elapsed();

        tracing::debug!(
            entries = state.stats.entries_observed,
            warnings = state.warnings.len(),
            "walk finished"
        );

        Ok(WalkSummary {
            stats: state.stats,
            warnings: state.warnings,
            duration,
        })
    }

    fn visit_dir(&self, dir: &Path, depth: u32, state: &mut WalkState<'_>) {
        match self.fs.list_children(dir) {
            Ok(children) => self.visit_children(dir, children, depth, state),
            Err(err) => state.skip(ScanWarning::read_error(dir, &err)),
        }
    }

    fn visit_children(
        &self,
        dir: &Path,
        children: Vec<DirChild>,
        depth: u32,
        state: &mut WalkState<'_>,
    ) {
        state.tracker.record_dir();

        for child in children {
            if child.name == "." || child.name == ".." || self.is_filtered(&child) {
                continue;
            }

            let path = dir.join(&child.name);

            match self.fs.size_of(&path) {
                Ok(size) => {
                    state.selector.observe(&path, size);
                    match child.kind {
                        ChildKind::Directory => state.stats.record_dir(size, depth),
                        ChildKind::File => state.stats.record_file(size, depth),
                        ChildKind::Other => state.stats.record_other(size, depth),
                    }
                    let count = state.tracker.record_entry(&path, size);
                    if count % PROGRESS_INTERVAL == 0 {
                        let _ = self.progress_tx.send(state.tracker.snapshot());
                    }
                }
                Err(err) => state.skip(ScanWarning::metadata_error(&path, &err)),
            }

            // A failed stat does not stop descent; a vanished directory will
            // report its own listing failure.
            if child.is_dir() {
                self.visit_dir(&path, depth + 1, state);
            }
        }
    }

    fn is_filtered(&self, child: &DirChild) -> bool {
        let name = child.name.to_string_lossy();
        (!self.include_hidden && name.starts_with('.')) || self.ignore.is_match(&*name)
    }
}

/// Mutable state threaded through one walk.
struct WalkState<'a> {
    selector: &'a mut Selector,
    stats: TreeStats,
    warnings: Vec<ScanWarning>,
    tracker: ProgressTracker,
}

impl WalkState<'_> {
    fn skip(&mut self, warning: ScanWarning) {
        tracing::warn!(path = %warning.path.display(), kind = ?warning.kind, "{}", warning.message);
        self.stats.record_warning();
        self.tracker.record_error();
        self.warnings.push(warning);
    }
}
