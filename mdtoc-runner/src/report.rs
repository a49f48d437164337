//! Per-document outcomes and the batch report

use log::{error, info};
use std::path::PathBuf;

/// Why a document was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The TOC was already current
    UpToDate,
    /// The document has no marker pair
    NoMarkers,
    /// A start marker without an end marker
    MalformedMarkers,
}

/// Result of processing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Updated,
    Skipped(SkipReason),
    Failed(String),
}

/// Counts of outcomes across a batch
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub updated: usize,
    pub skipped: usize,
    pub failures: Vec<(PathBuf, String)>,
}

impl Summary {
    pub fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Updated => self.updated += 1,
            FileOutcome::Skipped(_) => self.skipped += 1,
            FileOutcome::Failed(reason) => self.failures.push((path, reason)),
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.updated + self.skipped + self.failed()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Log the final counts
    pub fn log_report(&self) {
        info!("Processed {} file(s):", self.total());
        info!("  ✓ {} updated", self.updated);
        info!("  - {} unchanged", self.skipped);
        if self.has_failures() {
            error!("  × {} failed", self.failed());
            for (path, reason) in &self.failures {
                error!("    {}: {}", path.display(), reason);
            }
        }
    }
}
