//! Line-based document model

/// A heading in the markdown document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub line: usize,
    pub slug: String,
}

/// A markdown document viewed as a sequence of `\n`-separated lines.
///
/// Lines borrow from the source text and keep any trailing `\r`, so
/// [`Document::to_text`] reproduces the input byte for byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Document<'a> {
    /// Split text into lines
    pub fn parse(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
        }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Join the lines back into a single string
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Leading whitespace of a line
pub fn indent_of(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let doc = Document::parse("");
        assert_eq!(doc.lines(), &[""]);
    }

    #[test]
    fn test_trailing_newline_yields_empty_last_line() {
        let doc = Document::parse("# Title\nbody\n");
        assert_eq!(doc.lines(), &["# Title", "body", ""]);
    }

    #[test]
    fn test_to_text_preserves_bytes() {
        let text = "line 1\r\n  line 2\n\n\tline 4";
        let doc = Document::parse(text);
        assert_eq!(doc.to_text(), text);
        assert_eq!(doc.lines()[0], "line 1\r");
    }

    #[test]
    fn test_indent_of() {
        assert_eq!(indent_of("  - item"), "  ");
        assert_eq!(indent_of("\t<!-- toc -->"), "\t");
        assert_eq!(indent_of("none"), "");
        assert_eq!(indent_of("   "), "   ");
    }
}
