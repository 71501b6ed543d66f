use log::trace;

use crate::editing::{AnchorId, Document};
use crate::outline::{Dialect, Heading, Outline};

/// What the session should do after a command moved the cursor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CursorMove {
    /// Heading the cursor arrived on: hide its annotation
    pub suppress: Option<Heading>,
    /// Heading the cursor left: recompute its annotation
    pub restore: Option<Heading>,
}

/// Keeps the annotation of the heading under the cursor out of the way
/// while it is edited.
#[derive(Debug, Default)]
pub struct CursorTracker {
    /// Heading line the cursor was on when the current command started
    remembered: Option<AnchorId>,
    /// Heading whose annotation is currently hidden
    suppressed: Option<AnchorId>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the heading line under the cursor, if any.
    pub fn before_command(&mut self, doc: &mut Document, dialect: &dyn Dialect) {
        self.forget(doc);
        let heading = Outline::new(doc, dialect).heading_at(doc.point());
        if let Some(heading) = heading {
            self.remembered = Some(doc.create_anchor(heading.pos));
        }
    }

    /// Compare the cursor line with the remembered one. The remembered
    /// anchor is released either way.
    pub fn after_command(&mut self, doc: &mut Document, dialect: &dyn Dialect) -> CursorMove {
        let remembered_pos = self.remembered.and_then(|id| doc.anchor_pos(id));
        let point_line = doc.line_of_offset(doc.point());
        let mut result = CursorMove::default();

        if remembered_pos.map(|pos| doc.line_of_offset(pos)) != Some(point_line) {
            let outline = Outline::new(doc, dialect);
            result.suppress = outline.heading_at(doc.point());
            result.restore = remembered_pos.and_then(|pos| outline.heading_at(pos));
        }
        self.forget(doc);

        if let Some(heading) = result.restore
            && self.is_suppressed(doc, heading.pos)
        {
            self.unsuppress(doc);
        }
        if let Some(heading) = result.suppress {
            self.suppress(doc, heading.pos);
        }
        if result != CursorMove::default() {
            trace!("cursor move: {:?}", result);
        }
        result
    }

    fn forget(&mut self, doc: &mut Document) {
        if let Some(id) = self.remembered.take() {
            doc.release_anchor(id);
        }
    }

    /// Mark the heading at `heading_pos` as suppressed, replacing any other.
    pub fn suppress(&mut self, doc: &mut Document, heading_pos: usize) {
        self.unsuppress(doc);
        self.suppressed = Some(doc.create_anchor(heading_pos));
    }

    pub fn unsuppress(&mut self, doc: &mut Document) {
        if let Some(id) = self.suppressed.take() {
            doc.release_anchor(id);
        }
    }

    /// Line start of the suppressed heading.
    pub fn suppressed(&self, doc: &Document) -> Option<usize> {
        self.suppressed
            .and_then(|id| doc.anchor_pos(id))
            .map(|pos| doc.line_start(pos))
    }

    fn is_suppressed(&self, doc: &Document, pos: usize) -> bool {
        self.suppressed(doc) == Some(doc.line_start(pos))
    }

    /// Release every anchor held and forget all state.
    pub fn reset(&mut self, doc: &mut Document) {
        self.forget(doc);
        self.unsuppress(doc);
    }
}
