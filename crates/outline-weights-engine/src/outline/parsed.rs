use outline_weights_syntax::{SyntaxKind, heading_level, parse};

use crate::outline::Dialect;
use crate::weights::Weight;

/// Org-style outline counted from a full syntax tree.
///
/// Subtrees are the `HEADLINE` nodes under the span's own headline.
/// Paragraphs are paragraph-like blocks at any depth, including the text of
/// list items; drawers, keywords, comments and special blocks do not count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParsedOutline;

impl Dialect for ParsedOutline {
    fn heading_level(&self, line: &str) -> Option<usize> {
        heading_level(line)
    }

    fn count_span(&self, text: &str) -> Weight {
        let tree = parse(text);
        let mut headlines: usize = 0;
        let mut paragraphs = 0;
        for node in tree.descendants() {
            if node.kind() == SyntaxKind::HEADLINE {
                headlines += 1;
            } else if node.kind().is_paragraph_like() {
                paragraphs += 1;
            }
        }
        Weight {
            subtrees: headlines.saturating_sub(1),
            paragraphs,
        }
    }

    fn level_marker(&self) -> char {
        '*'
    }
}
