use std::borrow::Cow;
use std::ops::{Deref, DerefMut, Range};

use xi_rope::delta::Transformer;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::commands::{changed_ranges, compile_command};
use crate::editing::{Anchor, Cmd, Patch};

/// An editable outline document.
///
/// The xi-rope buffer is the single source of truth; everything else (point,
/// anchors, restriction, folds) is a byte position or range that is carried
/// through every edit by transforming it with the edit's delta.
///
/// ```rust
/// # use outline_weights_engine::editing::{Document, Cmd};
/// let mut doc = Document::from_bytes(b"* Hello\nworld\n").unwrap();
///
/// let patch = doc.apply(Cmd::InsertText { at: 8, text: "big ".to_string() });
/// assert_eq!(doc.text(), "* Hello\nbig world\n");
/// assert_eq!(patch.changed, vec![8..12]);
///
/// // Round-trip: save exact bytes
/// assert_eq!(doc.to_bytes(), b"* Hello\nbig world\n");
/// ```
#[derive(Clone)]
pub struct Document {
    pub(crate) buffer: Rope,
    /// Cursor byte offset
    pub(crate) point: usize,
    /// Incremented on each edit
    pub(crate) version: u64,
    pub(crate) anchors: Vec<Anchor>,
    pub(crate) next_anchor_id: u64,
    /// Narrowed accessible range; `None` means the whole buffer
    pub(crate) restriction: Option<Range<usize>>,
    /// Hidden byte ranges, each covering whole lines
    pub(crate) folds: Vec<Range<usize>>,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;

        Ok(Self {
            buffer: Rope::from(text),
            point: 0,
            version: 0,
            anchors: Vec::new(),
            next_anchor_id: 0,
            restriction: None,
            folds: Vec::new(),
        })
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    /// Apply a command: edit the buffer, then carry point, anchors,
    /// restriction and folds through the same delta.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let delta = compile_command(self, &cmd);
        let changed = changed_ranges(&delta);

        self.buffer = delta.apply(&self.buffer);
        self.transform_positions(&delta);
        self.version += 1;

        Patch {
            changed,
            new_point: self.point,
            version: self.version,
        }
    }

    fn transform_positions(&mut self, delta: &Delta<RopeInfo>) {
        crate::editing::anchors::transform_anchors(self, delta);

        let len = self.len();
        let mut transformer = Transformer::new(delta);
        self.point = transformer.transform(self.point, true).min(len);

        // Text typed at either edge of the restriction stays accessible
        if let Some(range) = self.restriction.take() {
            let start = transformer.transform(range.start, false).min(len);
            let end = transformer.transform(range.end, true).min(len).max(start);
            self.restriction = Some(start..end);
        }

        self.folds = std::mem::take(&mut self.folds)
            .into_iter()
            .map(|fold| {
                let start = transformer.transform(fold.start, true).min(len);
                let end = transformer.transform(fold.end, false).min(len);
                start..end
            })
            .filter(|fold| fold.start < fold.end)
            .collect();
    }

    pub fn point(&self) -> usize {
        self.point
    }

    /// Move the cursor, clamped to the accessible region.
    pub fn set_point(&mut self, pos: usize) {
        let region = self.accessible_range();
        self.point = pos.clamp(region.start, region.end);
    }

    /// Get the current version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Slice the buffer, clamping the range to the document bounds.
    pub fn slice_to_cow(&self, range: Range<usize>) -> Cow<'_, str> {
        let doc_len = self.buffer.len();
        let start = range.start.min(doc_len);
        let end = range.end.min(doc_len).max(start);
        self.buffer.slice_to_cow(start..end)
    }

    // --- Lines ---

    /// Zero-based line containing `offset`.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.buffer.line_of_offset(offset.min(self.len()))
    }

    /// Offset of the start of `line`; past the last line this is the buffer
    /// length.
    pub fn offset_of_line(&self, line: usize) -> usize {
        if line > self.last_line() {
            return self.len();
        }
        self.buffer.offset_of_line(line)
    }

    /// Number of lines. A trailing newline opens a final empty line.
    pub fn line_count(&self) -> usize {
        self.last_line() + 1
    }

    fn last_line(&self) -> usize {
        self.buffer.line_of_offset(self.len())
    }

    /// Start of the line containing `offset`.
    pub fn line_start(&self, offset: usize) -> usize {
        self.offset_of_line(self.line_of_offset(offset))
    }

    /// End of the line containing `offset`, before its line ending.
    pub fn line_end(&self, offset: usize) -> usize {
        let line = self.line_of_offset(offset);
        let start = self.offset_of_line(line);
        start + self.line_text(line).len()
    }

    /// Text of `line` without its line ending.
    pub fn line_text(&self, line: usize) -> String {
        let start = self.offset_of_line(line);
        let next = self.offset_of_line(line + 1);
        let text = self.slice_to_cow(start..next);
        text.trim_end_matches('\n').trim_end_matches('\r').to_string()
    }

    /// Is `offset` at the very start of a line?
    pub fn is_line_start(&self, offset: usize) -> bool {
        self.line_start(offset) == offset
    }

    // --- Narrowing ---

    /// Restrict the accessible region to `range` (clamped to the buffer).
    pub fn narrow(&mut self, range: Range<usize>) {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.restriction = Some(start..end);
        self.point = self.point.clamp(start, end);
    }

    pub fn widen(&mut self) {
        self.restriction = None;
    }

    pub fn is_narrowed(&self) -> bool {
        self.restriction.is_some()
    }

    /// The range queries are confined to.
    pub fn accessible_range(&self) -> Range<usize> {
        self.restriction.clone().unwrap_or(0..self.len())
    }

    pub fn accessible_text(&self) -> Cow<'_, str> {
        self.slice_to_cow(self.accessible_range())
    }

    /// Save restriction and point; both are restored when the guard drops,
    /// unwinding included.
    pub fn save_restriction(&mut self) -> RestrictionGuard<'_> {
        RestrictionGuard {
            restriction: self.restriction.clone(),
            point: self.point,
            doc: self,
        }
    }

    // --- Folding ---

    /// Hide `range`. Overlapping folds are kept as they are.
    pub fn fold(&mut self, range: Range<usize>) {
        if range.start < range.end && !self.folds.contains(&range) {
            self.folds.push(range);
            self.folds.sort_by_key(|fold| fold.start);
        }
    }

    /// Remove the fold starting at `start`. Returns whether one existed.
    pub fn unfold(&mut self, start: usize) -> bool {
        let before = self.folds.len();
        self.folds.retain(|fold| fold.start != start);
        self.folds.len() != before
    }

    pub fn unfold_all(&mut self) {
        self.folds.clear();
    }

    pub fn folds(&self) -> &[Range<usize>] {
        &self.folds
    }

    /// Is `offset` inside a folded region?
    pub fn is_hidden(&self, offset: usize) -> bool {
        self.folds.iter().any(|fold| fold.contains(&offset))
    }
}

/// Restores the restriction and point captured by
/// [`Document::save_restriction`].
pub struct RestrictionGuard<'a> {
    doc: &'a mut Document,
    restriction: Option<Range<usize>>,
    point: usize,
}

impl Deref for RestrictionGuard<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        &*self.doc
    }
}

impl DerefMut for RestrictionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        &mut *self.doc
    }
}

impl Drop for RestrictionGuard<'_> {
    fn drop(&mut self) {
        self.doc.restriction = self.restriction.take();
        self.doc.point = self.point;
    }
}
