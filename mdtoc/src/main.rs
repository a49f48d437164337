//! mdtoc - Keep Markdown tables of contents up to date

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, warn};
use mdtoc_core::config::{LogLevel, MarkerOverrides};
use mdtoc_core::{FileConfig, TocStyle};
use mdtoc_runner::{discover, process_files, WritePolicy};
use std::path::PathBuf;

/// Generate a table of contents between marker lines in Markdown files
#[derive(Parser, Debug)]
#[command(name = "mdtoc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Markdown files, directories or glob patterns
    #[arg(value_name = "PATH")]
    paths: Vec<String>,

    /// TOC layout: horizontal or vertical
    #[arg(long, value_name = "STYLE")]
    style: Option<TocStyle>,

    /// Insert markers after the first level-1 heading when missing
    #[arg(long)]
    auto_insert: bool,

    /// Deepest heading level to include (1-6)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=6))]
    max_level: Option<u8>,

    /// Keep running and update files as they change
    #[arg(long)]
    watch: bool,

    /// Log verbosity: error, warn, info or debug
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Line that opens the TOC region
    #[arg(long, value_name = "MARKER")]
    start_marker: Option<String>,

    /// Line that closes the TOC region
    #[arg(long, value_name = "MARKER")]
    end_marker: Option<String>,

    /// Config file (defaults to .tocrc, .tocrc.json or .tocrc.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// Command-line values as a config layer; unset flags stay unset
    fn overrides(&self) -> FileConfig {
        FileConfig {
            style: self.style,
            max_level: self.max_level,
            auto_insert: self.auto_insert.then_some(true),
            watch: self.watch.then_some(true),
            log_level: self.log_level,
            markers: MarkerOverrides {
                start: self.start_marker.clone(),
                end: self.end_marker.clone(),
            },
            files: self.paths.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let (file_config, config_path) =
        FileConfig::load(args.config.as_deref(), &cwd).context("Failed to load configuration")?;
    let settings = file_config.merge(args.overrides());

    env_logger::Builder::new()
        .filter_level(settings.log_level().to_level_filter())
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Some(path) = config_path {
        debug!("Loaded configuration from {}", path.display());
    }

    if settings.files.is_empty() {
        eprintln!("No files or directories given.\n");
        Args::command().print_help().context("Failed to print usage")?;
        std::process::exit(1);
    }

    let toc_config = settings.toc_config().context("Invalid configuration")?;
    debug!("Effective configuration: {:?}", toc_config);

    let files = discover(&settings.files);
    if files.is_empty() {
        warn!("No Markdown files found");
    }

    let policy = if settings.watch() {
        WritePolicy::Always
    } else {
        WritePolicy::IfChanged
    };

    let summary = process_files(&files, &toc_config, policy);
    summary.log_report();

    if settings.watch() {
        #[cfg(feature = "watch")]
        {
            let targets = mdtoc_runner::watch_targets(&settings.files, &files);
            return mdtoc_runner::watch(&targets, &files, &toc_config).context("Watch mode failed");
        }

        #[cfg(not(feature = "watch"))]
        warn!("Watch mode requested but mdtoc was built without the `watch` feature");
    }

    if summary.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
