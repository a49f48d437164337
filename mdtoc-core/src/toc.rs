//! Table of Contents extraction from Markdown

use std::sync::LazyLock;

use regex::Regex;

use crate::doc::Heading;
use crate::fence::FenceTracker;

/// Anything that is not an ASCII word character, a CJK ideograph, or a hyphen
static SLUG_STRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9_\x{4e00}-\x{9fa5}-]").expect("slug strip pattern is valid")
});

static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("hyphen run pattern is valid"));

/// Extract ATX headings up to `max_level` from (table-filtered) lines.
///
/// Lines inside fenced code blocks are skipped. Headings deeper than
/// `max_level` are dropped after collection; they never influence scanning.
pub fn extract_headings(lines: &[&str], max_level: u8) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut fence = FenceTracker::new();

    for (line_idx, line) in lines.iter().enumerate() {
        if fence.consume(line) {
            continue;
        }

        if let Some(level) = parse_atx_heading(line) {
            let text = line[level..].trim();
            if text.is_empty() {
                continue;
            }

            headings.push(Heading {
                level: level as u8,
                text: text.to_string(),
                line: line_idx,
                slug: slugify(text),
            });
        }
    }

    headings.retain(|h| h.level <= max_level);
    headings
}

/// Parse ATX heading (returns level if valid, None otherwise)
///
/// The hashes must start at column 0 and be followed by whitespace.
fn parse_atx_heading(line: &str) -> Option<usize> {
    if !line.starts_with('#') {
        return None;
    }

    let hash_count = line.chars().take_while(|&c| c == '#').count();
    if hash_count > 6 {
        return None;
    }

    let rest = &line[hash_count..];
    if rest.starts_with(|c: char| c.is_whitespace()) {
        Some(hash_count)
    } else {
        None
    }
}

/// Create a URL fragment from heading text.
///
/// Identical headings produce identical slugs; no `-1` suffixes are added.
pub fn slugify(text: &str) -> String {
    let hyphenated: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();

    let stripped = SLUG_STRIP.replace_all(&hyphenated, "");
    let collapsed = HYPHEN_RUN.replace_all(&stripped, "-");

    collapsed.trim_matches('-').to_string()
}
