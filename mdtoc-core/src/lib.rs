//! mdtoc Core - Table of contents generation for Markdown documents
//!
//! This crate contains the pure document pipeline, independent of any file system:
//! - Line-based document model and fence tracking
//! - Pipe-table filtering and ATX heading extraction
//! - Marker scanning and TOC splicing
//! - Configuration types and config file loading
//! - Injected logging sink

pub mod config;
pub mod doc;
pub mod error;
pub mod fence;
pub mod log_sink;
pub mod markers;
pub mod pipeline;
pub mod render;
pub mod splice;
pub mod table;
pub mod toc;

// Re-export commonly used types
pub use config::{FileConfig, MarkerPair, TocConfig, TocStyle};
pub use doc::{Document, Heading};
pub use log_sink::{LogFacade, LogSink, MemorySink};
pub use markers::{MarkerScan, ScanState};
pub use pipeline::{render, render_with, Outcome, Rendered};
