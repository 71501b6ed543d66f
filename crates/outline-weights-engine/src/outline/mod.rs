//! # Outline structure
//!
//! Heading recognition and navigation over a [`Document`].
//!
//! A [`Dialect`] knows what a heading line looks like and how to count the
//! structure inside a span of text. Two strategies implement it:
//! [`ParsedOutline`] parses the span into a syntax tree, [`ScanOutline`]
//! scans lines with a heading regex. [`Outline`] combines a document with a
//! dialect and answers the navigation questions the weights engine asks;
//! every query stays inside the document's accessible region.

pub mod folding;
mod parsed;
mod scan;

use std::ops::Range;

use outline_weights_config::DialectName;

use crate::editing::Document;
use crate::weights::Weight;

pub use parsed::ParsedOutline;
pub use scan::ScanOutline;

/// Heading syntax plus a counting strategy for one kind of document.
pub trait Dialect {
    /// Level of `line` if it is a heading line.
    fn heading_level(&self, line: &str) -> Option<usize>;

    /// Count the subtrees and paragraph-like blocks in `text`, which starts
    /// with a heading line and ends where that heading's subtree ends.
    fn count_span(&self, text: &str) -> Weight;

    /// Character repeated `level` times in front of rendered weights.
    fn level_marker(&self) -> char;
}

/// Build the dialect selected in the configuration.
pub fn dialect_for(name: DialectName) -> Box<dyn Dialect> {
    match name {
        DialectName::Org => Box::new(ParsedOutline),
        DialectName::OrgScan => Box::new(ScanOutline::org()),
        DialectName::Markdown => Box::new(ScanOutline::markdown()),
    }
}

/// A heading line: where it starts and how deep it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Heading {
    /// Byte offset of the heading line start
    pub pos: usize,
    /// 1 is the shallowest level
    pub level: usize,
}

/// Navigation over the headings of a document.
pub struct Outline<'a> {
    doc: &'a Document,
    dialect: &'a dyn Dialect,
}

impl<'a> Outline<'a> {
    pub fn new(doc: &'a Document, dialect: &'a dyn Dialect) -> Self {
        Self { doc, dialect }
    }

    /// Lines whose start lies in the accessible region.
    fn accessible_lines(&self) -> Range<usize> {
        let region = self.doc.accessible_range();
        let first = self.doc.line_of_offset(region.start);
        let mut last = self.doc.line_of_offset(region.end);
        // A region ending on a line start does not include that line
        if region.end > region.start && self.doc.is_line_start(region.end) {
            last -= 1;
        }
        first..last + 1
    }

    fn heading_on_line(&self, line: usize) -> Option<Heading> {
        if !self.accessible_lines().contains(&line) {
            return None;
        }
        let level = self.dialect.heading_level(&self.doc.line_text(line))?;
        Some(Heading {
            pos: self.doc.offset_of_line(line),
            level,
        })
    }

    /// The heading whose line contains `pos`.
    pub fn heading_at(&self, pos: usize) -> Option<Heading> {
        self.heading_on_line(self.doc.line_of_offset(pos))
    }

    pub fn level_of(&self, pos: usize) -> Option<usize> {
        self.heading_at(pos).map(|h| h.level)
    }

    pub fn is_heading_line(&self, pos: usize) -> bool {
        self.heading_at(pos).is_some()
    }

    /// The heading at or before `pos`.
    pub fn enclosing_heading(&self, pos: usize) -> Option<Heading> {
        let first = self.accessible_lines().start;
        let line = self.doc.line_of_offset(pos);
        (first..=line).rev().find_map(|l| self.heading_on_line(l))
    }

    /// The nearest heading on a line before the one containing `pos`.
    pub fn previous_heading(&self, pos: usize) -> Option<Heading> {
        let first = self.accessible_lines().start;
        let line = self.doc.line_of_offset(pos);
        (first..line).rev().find_map(|l| self.heading_on_line(l))
    }

    /// The first heading after the line containing `pos`, limited to levels
    /// `<= max_level` when given.
    pub fn next_heading(&self, pos: usize, max_level: Option<usize>) -> Option<Heading> {
        let lines = self.accessible_lines();
        let line = self.doc.line_of_offset(pos);
        (line + 1..lines.end)
            .filter_map(|l| self.heading_on_line(l))
            .find(|h| max_level.is_none_or(|max| h.level <= max))
    }

    /// The first heading after the line containing `pos` that is not folded
    /// away.
    pub fn next_visible_heading(&self, pos: usize) -> Option<Heading> {
        let lines = self.accessible_lines();
        let line = self.doc.line_of_offset(pos);
        (line + 1..lines.end)
            .filter_map(|l| self.heading_on_line(l))
            .find(|h| !self.doc.is_hidden(h.pos))
    }

    /// The first visible heading of the accessible region.
    pub fn first_visible_heading(&self) -> Option<Heading> {
        let start = self.doc.accessible_range().start;
        match self.heading_at(start) {
            Some(h) if !self.doc.is_hidden(h.pos) => Some(h),
            _ => self.next_visible_heading(start),
        }
    }

    /// The nearest preceding heading with a smaller level.
    pub fn parent_heading(&self, heading: Heading) -> Option<Heading> {
        let mut pos = heading.pos;
        while let Some(prev) = self.previous_heading(pos) {
            if prev.level < heading.level {
                return Some(prev);
            }
            pos = prev.pos;
        }
        None
    }

    /// Every heading in the accessible region, folded or not.
    pub fn headings(&self) -> Vec<Heading> {
        self.accessible_lines()
            .filter_map(|l| self.heading_on_line(l))
            .collect()
    }

    /// From the heading line start to the next heading of equal or lower
    /// level, or the end of the accessible region.
    pub fn span(&self, heading: Heading) -> Range<usize> {
        let end = self
            .next_heading(heading.pos, Some(heading.level))
            .map(|h| h.pos)
            .unwrap_or(self.doc.accessible_range().end);
        heading.pos..end
    }

    /// Lines after the heading line up to the next visible heading of any
    /// level or the end of the accessible region. Blank lines count, so do a
    /// final line without a newline; the empty position after a final
    /// newline does not.
    pub fn body_line_count(&self, heading: Heading) -> usize {
        let end = self
            .next_visible_heading(heading.pos)
            .map(|h| h.pos)
            .unwrap_or(self.doc.accessible_range().end);
        let lines = self.doc.line_of_offset(end) - self.doc.line_of_offset(heading.pos);
        if lines > 0 && self.doc.is_line_start(end) {
            lines - 1
        } else {
            lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "intro\n* H1\n** H2\npara1\n\npara2\n* H3\npara\n";
    // offsets:        0      6     11     17     23 24     30     35

    fn doc(text: &str) -> Document {
        Document::from_bytes(text.as_bytes()).unwrap()
    }

    fn h(pos: usize, level: usize) -> Heading {
        Heading { pos, level }
    }

    #[test]
    fn finds_headings() {
        let d = doc(DOC);
        let outline = Outline::new(&d, &ParsedOutline);
        assert_eq!(outline.headings(), vec![h(6, 1), h(11, 2), h(30, 1)]);
        assert_eq!(outline.level_of(13), Some(2));
        assert_eq!(outline.level_of(0), None);
        assert!(outline.is_heading_line(33));
        assert!(!outline.is_heading_line(17));
    }

    #[test]
    fn enclosing_and_previous() {
        let d = doc(DOC);
        let outline = Outline::new(&d, &ParsedOutline);
        assert_eq!(outline.enclosing_heading(2), None);
        assert_eq!(outline.enclosing_heading(11), Some(h(11, 2)));
        assert_eq!(outline.enclosing_heading(25), Some(h(11, 2)));
        assert_eq!(outline.previous_heading(11), Some(h(6, 1)));
        assert_eq!(outline.previous_heading(6), None);
    }

    #[test]
    fn next_heading_respects_max_level() {
        let d = doc(DOC);
        let outline = Outline::new(&d, &ParsedOutline);
        assert_eq!(outline.next_heading(6, None), Some(h(11, 2)));
        assert_eq!(outline.next_heading(6, Some(1)), Some(h(30, 1)));
        assert_eq!(outline.next_heading(30, None), None);
    }

    #[test]
    fn parents() {
        let d = doc(DOC);
        let outline = Outline::new(&d, &ParsedOutline);
        assert_eq!(outline.parent_heading(h(11, 2)), Some(h(6, 1)));
        assert_eq!(outline.parent_heading(h(30, 1)), None);

        let deep = doc("* A\n** B\n*** C\n** D\n*** E\n");
        let outline = Outline::new(&deep, &ParsedOutline);
        assert_eq!(outline.parent_heading(h(20, 3)), Some(h(15, 2)));
        assert_eq!(outline.parent_heading(h(15, 2)), Some(h(0, 1)));
    }

    #[test]
    fn spans_end_at_same_or_lower_level() {
        let d = doc(DOC);
        let outline = Outline::new(&d, &ParsedOutline);
        assert_eq!(outline.span(h(6, 1)), 6..30);
        assert_eq!(outline.span(h(11, 2)), 11..30);
        assert_eq!(outline.span(h(30, 1)), 30..d.len());
    }

    #[test]
    fn body_lines_count_blank_lines() {
        let d = doc(DOC);
        let outline = Outline::new(&d, &ParsedOutline);
        assert_eq!(outline.body_line_count(h(6, 1)), 0);
        assert_eq!(outline.body_line_count(h(11, 2)), 3);
        assert_eq!(outline.body_line_count(h(30, 1)), 1);
    }

    #[test]
    fn body_lines_at_document_end() {
        let with_newline = doc("* A\nbody\n");
        let outline = Outline::new(&with_newline, &ParsedOutline);
        assert_eq!(outline.body_line_count(h(0, 1)), 1);

        let without_newline = doc("* A\nbody");
        let outline = Outline::new(&without_newline, &ParsedOutline);
        assert_eq!(outline.body_line_count(h(0, 1)), 1);

        let bare = doc("* A");
        let outline = Outline::new(&bare, &ParsedOutline);
        assert_eq!(outline.body_line_count(h(0, 1)), 0);
    }

    #[test]
    fn folded_headings_are_not_visible() {
        let mut d = doc(DOC);
        d.fold(11..30);
        let outline = Outline::new(&d, &ParsedOutline);
        assert_eq!(outline.next_visible_heading(6), Some(h(30, 1)));
        assert_eq!(outline.next_heading(6, None), Some(h(11, 2)));
        // The hidden lines now belong to H1's body
        assert_eq!(outline.body_line_count(h(6, 1)), 4);
    }

    #[test]
    fn queries_stay_inside_narrowing() {
        let mut d = doc(DOC);
        d.narrow(11..30);
        let outline = Outline::new(&d, &ParsedOutline);
        assert_eq!(outline.headings(), vec![h(11, 2)]);
        assert_eq!(outline.enclosing_heading(25), Some(h(11, 2)));
        assert_eq!(outline.parent_heading(h(11, 2)), None);
        assert_eq!(outline.span(h(11, 2)), 11..30);
        assert_eq!(outline.first_visible_heading(), Some(h(11, 2)));
    }

    #[test]
    fn first_visible_heading_skips_preamble() {
        let d = doc(DOC);
        let outline = Outline::new(&d, &ParsedOutline);
        assert_eq!(outline.first_visible_heading(), Some(h(6, 1)));
    }

    #[test]
    fn dialects_from_config_names() {
        assert_eq!(dialect_for(DialectName::Org).level_marker(), '*');
        assert_eq!(dialect_for(DialectName::OrgScan).level_marker(), '*');
        assert_eq!(dialect_for(DialectName::Markdown).level_marker(), '#');
        assert_eq!(dialect_for(DialectName::Markdown).heading_level("## x"), Some(2));
    }
}
