//! mdtoc Runner - File system side of TOC generation
//!
//! This crate wires the pure core pipeline to real files:
//! - Expanding paths, directories and glob patterns into documents
//! - Reading, rendering and writing documents with per-file outcomes
//! - Aggregating outcomes into a batch report
//! - Watching documents and re-rendering them on change

pub mod discovery;
pub mod process;
pub mod report;

#[cfg(feature = "watch")]
pub mod watcher;

// Re-export main types
pub use discovery::{discover, watch_targets, WatchTarget};
pub use process::{process_file, process_files, WritePolicy};
pub use report::{FileOutcome, SkipReason, Summary};

#[cfg(feature = "watch")]
pub use watcher::{watch, DocumentWatcher, WatchSession};
