//! Watching documents and re-rendering them on change

use anyhow::{Context, Result};
use crossbeam_channel::Receiver;
use log::{debug, error, info};
use mdtoc_core::TocConfig;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use crate::discovery::WatchTarget;
use crate::process::{process_file, WritePolicy};
use crate::report::{FileOutcome, Summary};

/// Quiet period before a burst of events is handed out
pub const DEBOUNCE_MS: u64 = 250;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Watches documents and directories for Markdown changes
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<PathBuf>,
    pending: BTreeSet<PathBuf>,
    last_event: Option<Instant>,
}

impl DocumentWatcher {
    /// Create a new watcher for the given targets
    pub fn new(targets: &[WatchTarget]) -> Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let targets = canonical_targets(targets)?;
        let filter = targets.clone();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Only care about writes and new files
                if matches!(
                    event.kind,
                    notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                ) {
                    for path in event.paths {
                        if is_relevant(&path, &filter) {
                            let _ = tx.send(path);
                        }
                    }
                }
            }
        })
        .context("Failed to create file watcher")?;

        let mut watched_dirs = HashSet::new();
        for target in &targets {
            match target {
                WatchTarget::Dir(dir) | WatchTarget::Glob { base: dir, .. } => {
                    watcher
                        .watch(dir, RecursiveMode::Recursive)
                        .with_context(|| format!("Failed to watch directory: {}", dir.display()))?;
                }
                // Watch the parent directory (for editors that use atomic rename)
                WatchTarget::File(file) => {
                    if let Some(parent) = file.parent() {
                        if watched_dirs.insert(parent.to_path_buf()) {
                            watcher
                                .watch(parent, RecursiveMode::NonRecursive)
                                .with_context(|| format!("Failed to watch file: {}", file.display()))?;
                        }
                    }
                }
            }
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            pending: BTreeSet::new(),
            last_event: None,
        })
    }

    /// Collect changed documents.
    /// Returns them once no new event has arrived for `debounce_ms`.
    pub fn check_changed(&mut self, debounce_ms: u64) -> Vec<PathBuf> {
        // Drain all pending events
        while let Ok(path) = self.receiver.try_recv() {
            self.pending.insert(path);
            self.last_event = Some(Instant::now());
        }

        if let Some(last) = self.last_event {
            if last.elapsed() >= Duration::from_millis(debounce_ms) {
                self.last_event = None;
                return std::mem::take(&mut self.pending).into_iter().collect();
            }
        }

        Vec::new()
    }
}

fn canonical_targets(targets: &[WatchTarget]) -> Result<Vec<WatchTarget>> {
    targets
        .iter()
        .map(|target| {
            let root = target.root();
            let canonical = root
                .canonicalize()
                .with_context(|| format!("Failed to canonicalize path: {}", root.display()))?;
            Ok(match target {
                WatchTarget::Dir(_) => WatchTarget::Dir(canonical),
                WatchTarget::File(_) => WatchTarget::File(canonical),
                WatchTarget::Glob { pattern, .. } => WatchTarget::Glob {
                    base: canonical,
                    pattern: pattern.clone(),
                },
            })
        })
        .collect()
}

fn is_relevant(path: &Path, targets: &[WatchTarget]) -> bool {
    targets.iter().any(|target| target.covers(path))
}

/// Re-renders changed documents and ignores the echoes of its own writes
pub struct WatchSession<'a> {
    config: &'a TocConfig,
    last_written: HashMap<PathBuf, String>,
}

impl<'a> WatchSession<'a> {
    pub fn new(config: &'a TocConfig) -> Self {
        Self {
            config,
            last_written: HashMap::new(),
        }
    }

    /// Record the current content of `path` as already handled
    pub fn remember(&mut self, path: &Path) {
        if let Ok(content) = fs::read_to_string(path) {
            self.last_written.insert(path.to_path_buf(), content);
        }
    }

    /// Handle a change notification for `path`.
    /// Returns `None` when the change was our own write or the file vanished.
    pub fn handle(&mut self, path: &Path) -> Option<FileOutcome> {
        let Ok(content) = fs::read_to_string(path) else {
            debug!("[{}] Gone before it could be processed", path.display());
            return None;
        };

        if self.last_written.get(path) == Some(&content) {
            debug!("[{}] Ignoring change caused by our own write", path.display());
            return None;
        }

        info!("[{}] Change detected", path.display());
        let outcome = process_file(path, self.config, WritePolicy::Always);
        self.remember(path);
        Some(outcome)
    }

    /// Handle one debounced batch of changes
    pub fn handle_batch(&mut self, paths: Vec<PathBuf>) -> Summary {
        let mut summary = Summary::default();
        for path in paths {
            if let Some(outcome) = self.handle(&path) {
                summary.record(path, outcome);
            }
        }
        summary
    }
}

/// Watch `targets` forever, re-rendering documents as they change.
/// `seen` are the documents already processed by the initial pass.
pub fn watch(targets: &[WatchTarget], seen: &[PathBuf], config: &TocConfig) -> Result<()> {
    let mut watcher = DocumentWatcher::new(targets)?;
    let mut session = WatchSession::new(config);
    for path in seen {
        if let Ok(canonical) = path.canonicalize() {
            session.remember(&canonical);
        }
    }

    info!("Watching for changes (Ctrl-C to stop)...");

    let mut failed = 0;
    loop {
        thread::sleep(POLL_INTERVAL);
        let summary = session.handle_batch(watcher.check_changed(DEBOUNCE_MS));
        if summary.total() == 0 {
            continue;
        }

        summary.log_report();
        if summary.has_failures() {
            failed += summary.failed();
            error!("{} failed update(s) since watching started", failed);
        }
    }
}
