//! # Grammar Rules
//!
//! Each rule takes `&mut Parser`, inspects the current line, consumes tokens
//! and wraps them in nodes with markers.
//!
//! The tree mirrors the outline: a `HEADLINE` owns its `TITLE` line, an
//! optional `SECTION` of body elements, and the `HEADLINE`s of deeper level
//! that follow it. Text before the first heading is a `SECTION` directly under
//! `ROOT`.
//!
//! Rules are lenient. Unclosed blocks and drawers fall back to paragraphs and
//! every byte of the input ends up in the tree.

mod block;

use crate::line::{LineKind, classify};
use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    if !p.at_end() && current_heading(p).is_none() {
        block::section(p);
    }
    while !p.at_end() {
        block::headline(p);
    }

    m.complete(p, SyntaxKind::ROOT);
}

/// Classification of the current line.
fn current_line(p: &Parser<'_, '_>) -> LineKind {
    classify(&p.line_text())
}

/// Level of the heading on the current line, if any.
fn current_heading(p: &Parser<'_, '_>) -> Option<usize> {
    match current_line(p) {
        LineKind::Heading(level) => Some(level),
        _ => None,
    }
}
