//! Pipe table filtering
//!
//! Blanks lines that belong to pipe tables so that table cells are never read
//! as headings. The detection is a heuristic: the first line that contains both
//! `|` and `-` opens a table, every following line with a `|` stays inside it,
//! and the first line without a `|` closes it. Prose that happens to contain
//! both characters is blanked as well.

/// Return a same-length copy of `lines` with table rows replaced by `""`
pub fn filter_tables<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let mut in_table = false;

    lines
        .iter()
        .map(|&line| {
            if !in_table {
                if line.contains('|') && line.contains('-') {
                    in_table = true;
                    return "";
                }
                return line;
            }

            if line.contains('|') {
                ""
            } else {
                in_table = false;
                line
            }
        })
        .collect()
}
