//! Reading, rendering and writing documents

use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use mdtoc_core::{render, Outcome, TocConfig};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::{FileOutcome, SkipReason, Summary};

/// When to write a rendered document back to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Only when the rendered text differs from the file
    IfChanged,
    /// Whenever markers were found, even if nothing changed
    Always,
}

/// Process a single document. Errors are turned into [`FileOutcome::Failed`].
pub fn process_file(path: &Path, config: &TocConfig, policy: WritePolicy) -> FileOutcome {
    match try_process_file(path, config, policy) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("[{}] Failed: {:#}", path.display(), err);
            FileOutcome::Failed(format!("{:#}", err))
        }
    }
}

fn try_process_file(path: &Path, config: &TocConfig, policy: WritePolicy) -> Result<FileOutcome> {
    debug!("[{}] Processing", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let rendered = render(&content, config);

    match rendered.outcome {
        Outcome::NoMarkersFound => {
            warn!(
                "[{}] No TOC markers found. Add '{}' and '{}' lines, or use --auto-insert.",
                path.display(),
                config.markers.start,
                config.markers.end
            );
            return Ok(FileOutcome::Skipped(SkipReason::NoMarkers));
        }
        Outcome::MalformedMarkerBlock => {
            warn!(
                "[{}] Found '{}' without a matching '{}'; leaving the file unchanged.",
                path.display(),
                config.markers.start,
                config.markers.end
            );
            return Ok(FileOutcome::Skipped(SkipReason::MalformedMarkers));
        }
        Outcome::Updated | Outcome::Unchanged => {}
    }

    if rendered.changed || policy == WritePolicy::Always {
        fs::write(path, &rendered.output)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        info!("[{}] TOC updated", path.display());
        Ok(FileOutcome::Updated)
    } else {
        info!("[{}] TOC already up to date", path.display());
        Ok(FileOutcome::Skipped(SkipReason::UpToDate))
    }
}

/// Process documents in parallel and aggregate their outcomes.
///
/// A failing document never stops the others.
pub fn process_files(paths: &[PathBuf], config: &TocConfig, policy: WritePolicy) -> Summary {
    let outcomes: Vec<(PathBuf, FileOutcome)> = paths
        .par_iter()
        .map(|path| (path.clone(), process_file(path, config, policy)))
        .collect();

    let mut summary = Summary::default();
    for (path, outcome) in outcomes {
        summary.record(path, outcome);
    }
    summary
}
