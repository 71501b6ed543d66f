use xi_rope::delta::Transformer;
use xi_rope::{Delta, RopeInfo};

use crate::editing::Document;

/// A byte position that follows the text around it through edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub id: AnchorId,
    pub pos: usize,
}

/// Unique identifier for an anchor
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

/// Transform anchors through a delta operation.
///
/// Anchors are never dropped here: an anchor whose text was deleted collapses
/// onto the deletion point and stays alive until it is released.
pub(crate) fn transform_anchors(doc: &mut Document, delta: &Delta<RopeInfo>) {
    let mut transformer = Transformer::new(delta);
    let doc_len = doc.len();

    for anchor in &mut doc.anchors {
        // Text inserted exactly at the anchor pushes it forward, so an anchor
        // on a line start stays with that line
        anchor.pos = transformer.transform(anchor.pos, true).min(doc_len);
    }
}

impl Document {
    /// Create an anchor at `pos` (clamped to the buffer).
    pub fn create_anchor(&mut self, pos: usize) -> AnchorId {
        let id = AnchorId(self.next_anchor_id);
        self.next_anchor_id += 1;
        self.anchors.push(Anchor {
            id,
            pos: pos.min(self.len()),
        });
        id
    }

    /// Current position of an anchor, `None` once released.
    pub fn anchor_pos(&self, id: AnchorId) -> Option<usize> {
        self.anchors.iter().find(|a| a.id == id).map(|a| a.pos)
    }

    /// Re-seat an existing anchor. Returns false if it was released.
    pub fn move_anchor(&mut self, id: AnchorId, pos: usize) -> bool {
        let len = self.len();
        match self.anchors.iter_mut().find(|a| a.id == id) {
            Some(anchor) => {
                anchor.pos = pos.min(len);
                true
            }
            None => false,
        }
    }

    pub fn release_anchor(&mut self, id: AnchorId) {
        self.anchors.retain(|a| a.id != id);
    }

    /// Get reference to anchors for testing
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }
}
