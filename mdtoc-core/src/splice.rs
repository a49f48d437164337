//! Writing a rendered TOC back into the document

use std::borrow::Cow;

use crate::config::{MarkerPair, TocConfig, TocStyle};
use crate::doc::indent_of;
use crate::fence::FenceTracker;
use crate::markers::{split_single_line, MarkerScan};

/// Insert an empty marker block after the first level-1 heading, or at the
/// top of the document when there is none.
pub fn insert_markers(lines: &[&str], markers: &MarkerPair) -> String {
    let mut fence = FenceTracker::new();
    let h1 = lines.iter().position(|line| {
        if fence.consume(line) {
            return false;
        }
        is_h1(line.trim())
    });

    let at = h1.map_or(0, |idx| idx + 1);
    let block = ["", markers.start.as_str(), "", markers.end.as_str(), ""];

    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + block.len());
    out.extend_from_slice(&lines[..at]);
    out.extend_from_slice(&block);
    out.extend_from_slice(&lines[at..]);
    out.join("\n")
}

fn is_h1(trimmed: &str) -> bool {
    trimmed
        .strip_prefix('#')
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_whitespace()))
}

/// Replace the region located by `scan` with `toc`.
///
/// Returns `None` when the scan did not find a complete marker pair; the
/// document must then be left alone. Every line outside the region is
/// copied through unchanged.
pub fn replace_toc(lines: &[&str], scan: MarkerScan, toc: &str, config: &TocConfig) -> Option<String> {
    let (first, last, replacement) = match scan {
        MarkerScan::SingleLine { line } => {
            (line, line, splice_single_line(lines[line], toc, config)?)
        }
        MarkerScan::Block { start, end } => (start, end, splice_block(lines[start], lines[end], toc)),
        MarkerScan::Absent | MarkerScan::Unterminated { .. } => return None,
    };

    let mut out: Vec<Cow<'_, str>> = Vec::with_capacity(lines.len() + 4);
    out.extend(lines[..first].iter().map(|&l| Cow::Borrowed(l)));
    out.extend(replacement);
    out.extend(lines[last + 1..].iter().map(|&l| Cow::Borrowed(l)));
    Some(out.join("\n"))
}

fn splice_single_line<'a>(line: &'a str, toc: &str, config: &TocConfig) -> Option<Vec<Cow<'a, str>>> {
    let MarkerPair { start, end } = &config.markers;
    let indent = indent_of(line);
    let trailing = &line[line.trim_end().len()..];
    let (prefix, _old, suffix) = split_single_line(line.trim(), &config.markers)?;

    // Bare markers in horizontal style stay on one line
    if config.style == TocStyle::Horizontal && prefix.is_empty() && suffix.is_empty() {
        return Some(vec![Cow::Owned(format!("{indent}{start}{toc}{end}{trailing}"))]);
    }

    // Otherwise the markers get lines of their own in block layout, with any
    // surrounding text kept on the lines before and after
    let mut out = Vec::with_capacity(7);
    if !prefix.is_empty() {
        out.push(Cow::Owned(format!("{indent}{}", prefix.trim_end())));
    }
    out.extend(block(
        Cow::Owned(format!("{indent}{start}")),
        Cow::Owned(format!("{indent}{end}")),
        toc,
        indent,
    ));
    if !suffix.is_empty() {
        out.push(Cow::Owned(format!("{indent}{}", suffix.trim_start())));
    }
    if let Some(last) = out.last_mut() {
        last.to_mut().push_str(trailing);
    }
    Some(out)
}

fn splice_block<'a>(start_line: &'a str, end_line: &'a str, toc: &str) -> Vec<Cow<'a, str>> {
    Vec::from(block(
        Cow::Borrowed(start_line),
        Cow::Borrowed(end_line),
        toc,
        indent_of(start_line),
    ))
}

/// Start line, blank, indented TOC, blank, end line
fn block<'a>(start: Cow<'a, str>, end: Cow<'a, str>, toc: &str, indent: &str) -> [Cow<'a, str>; 5] {
    [
        start,
        Cow::Borrowed(""),
        Cow::Owned(indent_block(toc, indent)),
        Cow::Borrowed(""),
        end,
    ]
}

/// Prefix every non-empty line of `text` with `indent`
fn indent_block(text: &str, indent: &str) -> String {
    if indent.is_empty() {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                Cow::Borrowed(line)
            } else {
                Cow::Owned(format!("{indent}{line}"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
