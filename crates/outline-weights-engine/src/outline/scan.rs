use std::sync::OnceLock;

use regex::Regex;

use crate::outline::Dialect;
use crate::weights::Weight;

/// Outline counted by scanning lines with a heading regex, no parse.
///
/// Paragraph counting is an approximation. Walking backward from the span
/// end, every block start is a boundary; a block starts at a heading line
/// or at the first non-blank line after a blank one, and the span's own
/// first line is where the walk stops. Then
/// `paragraphs = boundaries + 1 - subtrees`. Headings with empty bodies, and
/// blank lines right after a heading line, throw the count off.
#[derive(Debug, Clone)]
pub struct ScanOutline {
    /// First capture group is the level marker run
    heading: Regex,
    marker: char,
}

impl ScanOutline {
    /// Build from a pattern whose first group captures the level markers.
    pub fn new(heading: Regex, marker: char) -> Self {
        Self { heading, marker }
    }

    /// `*` headings at column 0.
    pub fn org() -> Self {
        static ORG_HEADING: OnceLock<Regex> = OnceLock::new();
        let regex = ORG_HEADING
            .get_or_init(|| Regex::new(r"^(\*+)[ \t]").expect("Invalid org heading regex"));
        Self::new(regex.clone(), '*')
    }

    /// ATX headings, `#` to `######`.
    pub fn markdown() -> Self {
        static ATX_HEADING: OnceLock<Regex> = OnceLock::new();
        let regex = ATX_HEADING.get_or_init(|| {
            Regex::new(r"^(#{1,6})(?:[ \t]|$)").expect("Invalid markdown heading regex")
        });
        Self::new(regex.clone(), '#')
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

impl Dialect for ScanOutline {
    fn heading_level(&self, line: &str) -> Option<usize> {
        let captures = self.heading.captures(line)?;
        captures.get(1).map(|m| m.as_str().chars().count())
    }

    fn count_span(&self, text: &str) -> Weight {
        let lines: Vec<&str> = text.lines().collect();

        let mut headings: usize = 0;
        let mut boundaries = 0;
        for i in (0..lines.len()).rev() {
            let is_heading = self.heading_level(lines[i]).is_some();
            if is_heading {
                headings += 1;
            }
            if i == 0 {
                break;
            }
            if is_heading || (!is_blank(lines[i]) && is_blank(lines[i - 1])) {
                boundaries += 1;
            }
        }

        let subtrees = headings.saturating_sub(1);
        Weight {
            subtrees,
            paragraphs: (boundaries + 1usize).saturating_sub(subtrees),
        }
    }

    fn level_marker(&self) -> char {
        self.marker
    }
}
