//! Subtree folding.
//!
//! Folding hides the body of a heading (every line after the heading line,
//! up to the end of its span). Hidden headings are skipped by
//! [`Outline::next_visible_heading`], so the hidden-lines count of a folded
//! heading covers its whole subtree.

use log::debug;

use crate::editing::Document;
use crate::outline::{Dialect, Heading, Outline};

/// The range a fold of `heading` would hide, if its body is not empty.
pub fn subtree_body(
    doc: &Document,
    dialect: &dyn Dialect,
    heading: Heading,
) -> Option<std::ops::Range<usize>> {
    let span = Outline::new(doc, dialect).span(heading);
    let body_start = doc.offset_of_line(doc.line_of_offset(heading.pos) + 1);
    (body_start < span.end).then_some(body_start..span.end)
}

/// Fold or unfold the body of `heading`. Returns true when the body is now
/// hidden.
pub fn toggle_subtree(doc: &mut Document, dialect: &dyn Dialect, heading: Heading) -> bool {
    let Some(body) = subtree_body(doc, dialect, heading) else {
        return false;
    };

    if doc.unfold(body.start) {
        debug!("unfolded subtree at {}", heading.pos);
        false
    } else {
        debug!("folded subtree at {} ({:?})", heading.pos, body);
        doc.fold(body);
        true
    }
}
