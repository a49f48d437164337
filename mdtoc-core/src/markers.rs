//! TOC marker detection
//!
//! A single scanner decides where the generated region lives. It is used both
//! to report whether a document has markers and to tell the splicer which lines
//! to replace, so detection and replacement can never disagree.

use crate::config::MarkerPair;
use crate::fence::is_fence;

/// Where the scanner is in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Normal,
    InCodeFence,
    AwaitingEndMarker,
}

/// Result of scanning a document for a marker pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerScan {
    /// No start marker outside of fences
    Absent,
    /// Start and end marker on the same line
    SingleLine { line: usize },
    /// Start and end marker on their own lines
    Block { start: usize, end: usize },
    /// A start marker line without a matching end marker line
    Unterminated { start: usize },
}

impl MarkerScan {
    pub fn present(&self) -> bool {
        matches!(self, MarkerScan::SingleLine { .. } | MarkerScan::Block { .. })
    }

    pub fn single_line(&self) -> bool {
        matches!(self, MarkerScan::SingleLine { .. })
    }
}

/// Split a line around a combined `start ... end` marker.
///
/// Returns `(prefix, old_content, suffix)` when the line holds the start marker
/// followed by the end marker.
pub fn split_single_line<'a>(
    line: &'a str,
    markers: &MarkerPair,
) -> Option<(&'a str, &'a str, &'a str)> {
    let (prefix, rest) = line.split_once(markers.start.as_str())?;
    let (old, suffix) = rest.split_once(markers.end.as_str())?;
    Some((prefix, old, suffix))
}

/// Line-by-line marker scanner
#[derive(Debug)]
pub struct MarkerScanner<'m> {
    markers: &'m MarkerPair,
    escaped_start: String,
    escaped_end: String,
    in_fence: bool,
    start: Option<usize>,
}

impl<'m> MarkerScanner<'m> {
    pub fn new(markers: &'m MarkerPair) -> Self {
        let (escaped_start, escaped_end) = markers.escaped();
        Self {
            markers,
            escaped_start,
            escaped_end,
            in_fence: false,
            start: None,
        }
    }

    pub fn state(&self) -> ScanState {
        if self.in_fence {
            ScanState::InCodeFence
        } else if self.start.is_some() {
            ScanState::AwaitingEndMarker
        } else {
            ScanState::Normal
        }
    }

    /// Feed line `idx`. Returns the final decision once a pair is complete.
    pub fn step(&mut self, idx: usize, line: &str) -> Option<MarkerScan> {
        if is_fence(line) {
            self.in_fence = !self.in_fence;
            return None;
        }
        if self.in_fence {
            return None;
        }

        let trimmed = line.trim();
        if self.is_escaped(trimmed) {
            return None;
        }

        if split_single_line(trimmed, self.markers).is_some() {
            return Some(MarkerScan::SingleLine { line: idx });
        }

        match self.start {
            None if trimmed == self.markers.start => {
                self.start = Some(idx);
                None
            }
            Some(start) if trimmed == self.markers.end => {
                Some(MarkerScan::Block { start, end: idx })
            }
            _ => None,
        }
    }

    /// Decision after the last line has been fed without completing a pair
    pub fn finish(&self) -> MarkerScan {
        match self.start {
            Some(start) => MarkerScan::Unterminated { start },
            None => MarkerScan::Absent,
        }
    }

    fn is_escaped(&self, trimmed: &str) -> bool {
        trimmed.contains(&self.escaped_start) || trimmed.contains(&self.escaped_end)
    }
}

/// Scan raw (unfiltered) lines for the first marker pair
pub fn scan(lines: &[&str], markers: &MarkerPair) -> MarkerScan {
    let mut scanner = MarkerScanner::new(markers);

    for (idx, line) in lines.iter().enumerate() {
        if let Some(found) = scanner.step(idx, line) {
            return found;
        }
    }

    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_text(text: &str) -> MarkerScan {
        let lines: Vec<&str> = text.split('\n').collect();
        scan(&lines, &MarkerPair::default())
    }

    #[test]
    fn test_absent() {
        let result = scan_text("# Title\n\nNo markers here\n");
        assert_eq!(result, MarkerScan::Absent);
        assert!(!result.present());
        assert!(!result.single_line());
    }

    #[test]
    fn test_block_markers() {
        let result = scan_text("# Title\n<!-- toc -->\nold\n<!-- tocstop -->\n## A\n");
        assert_eq!(result, MarkerScan::Block { start: 1, end: 3 });
        assert!(result.present());
        assert!(!result.single_line());
    }

    #[test]
    fn test_indented_block_markers() {
        let result = scan_text("  <!-- toc -->\n\t<!-- tocstop -->  \n");
        assert_eq!(result, MarkerScan::Block { start: 0, end: 1 });
    }

    #[test]
    fn test_single_line_markers() {
        let result = scan_text("# Title\n<!-- toc --><!-- tocstop -->\n");
        assert_eq!(result, MarkerScan::SingleLine { line: 1 });
        assert!(result.present());
        assert!(result.single_line());
    }

    #[test]
    fn test_single_line_with_surrounding_text() {
        let result = scan_text("Contents: <!-- toc -->[A](#a)<!-- tocstop --> end\n");
        assert_eq!(result, MarkerScan::SingleLine { line: 0 });
    }

    #[test]
    fn test_end_before_start_is_not_single_line() {
        let result = scan_text("<!-- tocstop --> <!-- toc -->\n");
        assert_eq!(result, MarkerScan::Absent);
    }

    #[test]
    fn test_markers_in_fence_ignored() {
        let result = scan_text("```md\n<!-- toc -->\n<!-- tocstop -->\n```\n");
        assert_eq!(result, MarkerScan::Absent);

        let result = scan_text("```\n<!-- toc --><!-- tocstop -->\n```\n");
        assert_eq!(result, MarkerScan::Absent);
    }

    #[test]
    fn test_fenced_end_marker_does_not_close_block() {
        let text = "<!-- toc -->\n```\n<!-- tocstop -->\n```\n<!-- tocstop -->\n";
        assert_eq!(scan_text(text), MarkerScan::Block { start: 0, end: 4 });
    }

    #[test]
    fn test_escaped_markers_ignored() {
        let result = scan_text("\\<!-- toc -->\n\\<!-- tocstop -->\n");
        assert_eq!(result, MarkerScan::Absent);

        let result = scan_text("Use `\\<!-- toc -->\\<!-- tocstop -->` in docs\n");
        assert_eq!(result, MarkerScan::Absent);
    }

    #[test]
    fn test_escaped_end_does_not_close_block() {
        let text = "<!-- toc -->\n\\<!-- tocstop -->\n<!-- tocstop -->\n";
        assert_eq!(scan_text(text), MarkerScan::Block { start: 0, end: 2 });
    }

    #[test]
    fn test_unterminated() {
        let result = scan_text("# Title\n<!-- toc -->\n## A\n");
        assert_eq!(result, MarkerScan::Unterminated { start: 1 });
        assert!(!result.present());
    }

    #[test]
    fn test_end_without_start_is_absent() {
        assert_eq!(scan_text("<!-- tocstop -->\n"), MarkerScan::Absent);
    }

    #[test]
    fn test_first_pair_wins() {
        let text = "<!-- toc -->\n<!-- tocstop -->\n<!-- toc --><!-- tocstop -->\n";
        assert_eq!(scan_text(text), MarkerScan::Block { start: 0, end: 1 });
    }

    #[test]
    fn test_second_start_ignored_while_awaiting_end() {
        let text = "<!-- toc -->\n<!-- toc -->\n<!-- tocstop -->\n";
        assert_eq!(scan_text(text), MarkerScan::Block { start: 0, end: 2 });
    }

    #[test]
    fn test_single_line_inside_open_block_wins() {
        let text = "<!-- toc -->\n<!-- toc --><!-- tocstop -->\n<!-- tocstop -->\n";
        assert_eq!(scan_text(text), MarkerScan::SingleLine { line: 1 });
    }

    #[test]
    fn test_marker_with_extra_text_not_block() {
        let result = scan_text("Intro <!-- toc -->\n<!-- tocstop -->\n");
        assert_eq!(result, MarkerScan::Absent);
    }

    #[test]
    fn test_custom_markers() {
        let markers = MarkerPair::new("[[toc]]", "[[/toc]]");
        let lines = ["# A", "[[toc]]", "[[/toc]]"];
        assert_eq!(scan(&lines, &markers), MarkerScan::Block { start: 1, end: 2 });
    }

    #[test]
    fn test_state_transitions() {
        let markers = MarkerPair::default();
        let mut scanner = MarkerScanner::new(&markers);
        assert_eq!(scanner.state(), ScanState::Normal);

        assert_eq!(scanner.step(0, "<!-- toc -->"), None);
        assert_eq!(scanner.state(), ScanState::AwaitingEndMarker);

        assert_eq!(scanner.step(1, "```"), None);
        assert_eq!(scanner.state(), ScanState::InCodeFence);

        assert_eq!(scanner.step(2, "<!-- tocstop -->"), None);
        assert_eq!(scanner.step(3, "```"), None);
        assert_eq!(scanner.state(), ScanState::AwaitingEndMarker);

        assert_eq!(
            scanner.step(4, "<!-- tocstop -->"),
            Some(MarkerScan::Block { start: 0, end: 4 })
        );
    }

    #[test]
    fn test_split_single_line() {
        let markers = MarkerPair::default();
        let parts = split_single_line("pre <!-- toc -->old<!-- tocstop --> post", &markers);
        assert_eq!(parts, Some(("pre ", "old", " post")));
        assert_eq!(split_single_line("<!-- toc -->", &markers), None);
    }
}
