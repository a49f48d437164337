//! TOC rendering

use std::fmt::Write;

use crate::config::TocStyle;
use crate::doc::Heading;
use crate::error::RenderError;

/// Separator between entries of a horizontal TOC
pub const HORIZONTAL_SEPARATOR: &str = " • ";

/// Render headings as a TOC body (without markers)
pub fn render_toc(headings: &[Heading], style: TocStyle) -> Result<String, RenderError> {
    let mut out = String::new();

    for (idx, heading) in headings.iter().enumerate() {
        match style {
            TocStyle::Horizontal => {
                if idx > 0 {
                    out.push_str(HORIZONTAL_SEPARATOR);
                }
                write!(out, "[{}](#{})", heading.text, heading.slug)?;
            }
            TocStyle::Vertical => {
                if idx > 0 {
                    out.push('\n');
                }
                let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
                write!(out, "{}- [{}](#{})", indent, heading.text, heading.slug)?;
            }
        }
    }

    Ok(out)
}
