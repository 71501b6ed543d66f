use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::Document;

/// Commands that can be applied to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    InsertText {
        at: usize,
        text: String,
    },
    DeleteRange {
        range: std::ops::Range<usize>,
    },
    ReplaceRange {
        range: std::ops::Range<usize>,
        text: String,
    },
}

/// Compile a command into a delta. Ranges are clamped to the buffer.
pub(crate) fn compile_command(doc: &Document, cmd: &Cmd) -> Delta<RopeInfo> {
    let len = doc.len();
    let clamp = |range: &std::ops::Range<usize>| {
        let start = range.start.min(len);
        start..range.end.min(len).max(start)
    };

    let mut builder = Builder::new(len);
    match cmd {
        Cmd::InsertText { at, text } => {
            let at = (*at).min(len);
            builder.replace(at..at, Rope::from(text));
        }
        Cmd::DeleteRange { range } => {
            builder.delete(clamp(range));
        }
        Cmd::ReplaceRange { range, text } => {
            builder.replace(clamp(range), Rope::from(text));
        }
    }
    builder.build()
}

/// Post-edit ranges touched by a delta. Insertions map to their new text,
/// deletions to an empty range at the point where text disappeared; touching
/// ranges are merged.
pub(crate) fn changed_ranges(delta: &Delta<RopeInfo>) -> Vec<std::ops::Range<usize>> {
    let mut changed: Vec<std::ops::Range<usize>> = Vec::new();
    let mut push = |range: std::ops::Range<usize>| match changed.last_mut() {
        Some(last) if last.end >= range.start => last.end = last.end.max(range.end),
        _ => changed.push(range),
    };

    let mut old_pos = 0;
    let mut new_pos = 0;
    for op in delta.els.iter() {
        match op {
            xi_rope::delta::DeltaElement::Copy(from, to) => {
                if *from > old_pos {
                    push(new_pos..new_pos);
                }
                new_pos += to - from;
                old_pos = *to;
            }
            xi_rope::delta::DeltaElement::Insert(inserted) => {
                let end = new_pos + inserted.len();
                push(new_pos..end);
                new_pos = end;
            }
        }
    }
    if old_pos < delta.base_len {
        push(new_pos..new_pos);
    }

    changed
}
