//! Per-document pipeline: scan, extract, render, splice

use crate::config::TocConfig;
use crate::doc::Document;
use crate::log_sink::{LogFacade, LogSink};
use crate::markers::{self, MarkerScan};
use crate::render::render_toc;
use crate::splice::{insert_markers, replace_toc};
use crate::table::filter_tables;
use crate::toc::extract_headings;

/// What happened to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The TOC was written and the text changed
    Updated,
    /// Markers were found and the TOC was already current
    Unchanged,
    /// No marker pair and auto-insert is off
    NoMarkersFound,
    /// A start marker without an end marker; nothing was replaced
    MalformedMarkerBlock,
}

/// Result of rendering one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    pub changed: bool,
    pub outcome: Outcome,
}

impl Rendered {
    fn untouched(document: &str, outcome: Outcome) -> Self {
        Self {
            output: document.to_string(),
            changed: false,
            outcome,
        }
    }

    fn from_output(document: &str, output: String) -> Self {
        let changed = output != document;
        Self {
            output,
            changed,
            outcome: if changed {
                Outcome::Updated
            } else {
                Outcome::Unchanged
            },
        }
    }
}

/// Render the TOC of `document`, logging through the `log` crate
pub fn render(document: &str, config: &TocConfig) -> Rendered {
    render_with(document, config, &LogFacade)
}

/// Render the TOC of `document`, reporting diagnostics to `log`
pub fn render_with(document: &str, config: &TocConfig, log: &dyn LogSink) -> Rendered {
    let doc = Document::parse(document);
    let found = markers::scan(doc.lines(), &config.markers);
    log.debug(&format!("Marker scan result: {:?}", found));

    match found {
        MarkerScan::SingleLine { .. } | MarkerScan::Block { .. } => {
            fill(&doc, found, config, log)
                .map(|output| Rendered::from_output(document, output))
                .unwrap_or_else(|| Rendered::untouched(document, Outcome::MalformedMarkerBlock))
        }
        MarkerScan::Unterminated { start } => {
            log.debug(&format!(
                "Start marker on line {} has no matching end marker",
                start + 1
            ));
            Rendered::untouched(document, Outcome::MalformedMarkerBlock)
        }
        MarkerScan::Absent if !config.auto_insert => {
            log.debug("No TOC markers found");
            Rendered::untouched(document, Outcome::NoMarkersFound)
        }
        MarkerScan::Absent => {
            log.debug("No TOC markers found, inserting them");
            let inserted = insert_markers(doc.lines(), &config.markers);
            let inserted_doc = Document::parse(&inserted);
            let found = markers::scan(inserted_doc.lines(), &config.markers);

            match fill(&inserted_doc, found, config, log) {
                Some(output) => Rendered::from_output(document, output),
                None => {
                    log.warn("Inserted markers could not be located again");
                    Rendered::untouched(document, Outcome::NoMarkersFound)
                }
            }
        }
    }
}

/// Build the TOC body for a document.
///
/// Headings come from the table-filtered lines of the whole document. A
/// rendering failure yields an empty body rather than an error.
pub fn generate_toc(doc: &Document<'_>, config: &TocConfig, log: &dyn LogSink) -> String {
    let filtered = filter_tables(doc.lines());
    let headings = extract_headings(&filtered, config.max_level);
    log.debug(&format!(
        "Found {} heading(s) up to level {}",
        headings.len(),
        config.max_level
    ));

    render_toc(&headings, config.style).unwrap_or_else(|err| {
        log.error(&format!("Failed to render TOC: {}", err));
        String::new()
    })
}

fn fill(doc: &Document<'_>, found: MarkerScan, config: &TocConfig, log: &dyn LogSink) -> Option<String> {
    let toc = generate_toc(doc, config, log);
    replace_toc(doc.lines(), found, &toc, config)
}
