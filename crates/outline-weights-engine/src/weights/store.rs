use std::collections::HashSet;
use std::ops::RangeInclusive;

use log::trace;

use crate::editing::{AnchorId, Decoration, Document};
use crate::outline::Dialect;
use crate::weights::render::{Rendered, column_to_byte};

/// A live annotation, bound to its heading line through an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub anchor: AnchorId,
    pub text: String,
    pub face: String,
    /// Character column on the heading line
    pub column: usize,
    /// Bumped on every write; tells a rewrite from an untouched annotation
    pub stamp: u64,
}

/// The annotations of one document, at most one per heading line.
///
/// Annotations never touch the text. Removing one releases its anchor.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    next_stamp: u64,
}

fn line_of(doc: &Document, annotation: &Annotation) -> Option<usize> {
    doc.anchor_pos(annotation.anchor)
        .map(|pos| doc.line_of_offset(pos))
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_stamp(&mut self) -> u64 {
        self.next_stamp += 1;
        self.next_stamp
    }

    /// Write the annotation of the heading starting at `heading_pos`,
    /// reusing the one already on that line. Returns the new stamp.
    pub fn upsert(&mut self, doc: &mut Document, heading_pos: usize, rendered: Rendered) -> u64 {
        let line = doc.line_of_offset(heading_pos);
        let stamp = self.next_stamp();

        let existing = self
            .annotations
            .iter()
            .position(|a| line_of(doc, a) == Some(line));
        match existing {
            Some(index) => {
                let annotation = &mut self.annotations[index];
                doc.move_anchor(annotation.anchor, heading_pos);
                annotation.text = rendered.text;
                annotation.face = rendered.face;
                annotation.column = rendered.column;
                annotation.stamp = stamp;
            }
            None => {
                let anchor = doc.create_anchor(heading_pos);
                self.annotations.push(Annotation {
                    anchor,
                    text: rendered.text,
                    face: rendered.face,
                    column: rendered.column,
                    stamp,
                });
            }
        }
        stamp
    }

    /// Remove every annotation on the line of `heading_pos`. Returns whether
    /// there was one.
    pub fn remove(&mut self, doc: &mut Document, heading_pos: usize) -> bool {
        let line = doc.line_of_offset(heading_pos);
        let mut removed = false;
        self.annotations.retain(|a| {
            if line_of(doc, a) == Some(line) {
                doc.release_anchor(a.anchor);
                removed = true;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Remove everything and release all anchors.
    pub fn clear(&mut self, doc: &mut Document) {
        for annotation in self.annotations.drain(..) {
            doc.release_anchor(annotation.anchor);
        }
    }

    /// Drop annotations in `lines` whose line is no longer a heading, or
    /// that share a line with an earlier one. Returns the start offsets of
    /// heading lines that lost an annotation, so they can be rewritten.
    pub fn sweep(
        &mut self,
        doc: &mut Document,
        dialect: &dyn Dialect,
        lines: RangeInclusive<usize>,
    ) -> Vec<usize> {
        let mut seen = HashSet::new();
        let mut lost = Vec::new();

        self.annotations.retain(|a| {
            let Some(line) = line_of(doc, a) else {
                return false;
            };
            if !lines.contains(&line) {
                return true;
            }

            let keep = if dialect.heading_level(&doc.line_text(line)).is_none() {
                trace!("sweeping annotation on non-heading line {}", line);
                false
            } else if !seen.insert(line) {
                trace!("sweeping duplicate annotation on line {}", line);
                let start = doc.offset_of_line(line);
                if !lost.contains(&start) {
                    lost.push(start);
                }
                false
            } else {
                true
            };

            if !keep {
                doc.release_anchor(a.anchor);
            }
            keep
        });

        lost
    }

    /// The annotation on the line of `pos`.
    pub fn on_line(&self, doc: &Document, pos: usize) -> Option<&Annotation> {
        let line = doc.line_of_offset(pos);
        self.annotations
            .iter()
            .find(|a| line_of(doc, a) == Some(line))
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Decorations for every annotation on a visible line.
    pub fn decorations(&self, doc: &Document) -> Vec<Decoration> {
        self.annotations
            .iter()
            .filter_map(|a| {
                let line = line_of(doc, a)?;
                let start = doc.offset_of_line(line);
                if doc.is_hidden(start) {
                    return None;
                }
                let text = doc.line_text(line);
                Some(Decoration {
                    offset: start + column_to_byte(&text, a.column),
                    text: a.text.clone(),
                    face: a.face.clone(),
                })
            })
            .collect()
    }
}
