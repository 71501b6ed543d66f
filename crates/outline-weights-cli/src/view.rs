//! Lays the document out as visible lines with their decorations, for the
//! terminal view and for `--print`.

use outline_weights_engine::{Decoration, Editor};

/// One line as it is shown: folded lines are left out, decorations are kept
/// apart from the text so they can be styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    /// Zero-based document line
    pub line: usize,
    /// Byte offset of the line start
    pub start: usize,
    pub text: String,
    /// Byte column within `text` and the string drawn there
    pub decorations: Vec<(usize, String)>,
    /// The lines below this one are folded away
    pub folded: bool,
}

pub const FOLD_MARKER: &str = "...";

pub fn visible_lines(editor: &Editor) -> Vec<ViewLine> {
    let doc = editor.document();
    let region = doc.accessible_range();
    let decorations = editor.decorations_in(region.start..region.end + 1);

    let first = doc.line_of_offset(region.start);
    let last = doc.line_of_offset(region.end);
    (first..=last)
        .filter_map(|line| {
            let start = doc.offset_of_line(line);
            if doc.is_hidden(start) {
                return None;
            }
            let text = doc.line_text(line);
            let end = start + text.len();
            let next = doc.offset_of_line(line + 1);
            let folded = next > end && next < doc.len() && doc.is_hidden(next);
            Some(ViewLine {
                line,
                start,
                decorations: on_line(&decorations, start, end),
                text,
                folded,
            })
        })
        .collect()
}

fn on_line(decorations: &[Decoration], start: usize, end: usize) -> Vec<(usize, String)> {
    decorations
        .iter()
        .filter(|d| (start..=end).contains(&d.offset))
        .map(|d| (d.offset - start, d.text.clone()))
        .collect()
}

impl ViewLine {
    /// Screen column of `point` on this line, counting the decorations drawn
    /// before it. Offsets past the text (a line ending) sit at its end.
    pub fn cursor_column(&self, point: usize) -> usize {
        let mut column = point.saturating_sub(self.start).min(self.text.len());
        while !self.text.is_char_boundary(column) {
            column -= 1;
        }
        let decoration_width: usize = self
            .decorations
            .iter()
            .filter(|(c, _)| *c <= column)
            .map(|(_, t)| t.chars().count())
            .sum();
        self.text[..column].chars().count() + decoration_width
    }

    /// Text with the decorations spliced in, as plain characters.
    pub fn rendered(&self) -> String {
        let mut out = String::new();
        let mut from = 0;
        for (column, text) in &self.decorations {
            out.push_str(&self.text[from..*column]);
            out.push_str(text);
            from = *column;
        }
        out.push_str(&self.text[from..]);
        if self.folded {
            out.push_str(FOLD_MARKER);
        }
        out
    }
}

/// Position one character to the left of `point`; a CRLF pair is one step.
pub fn step_left(text: &str, point: usize) -> Option<usize> {
    let before = &text[..point];
    if before.ends_with("\r\n") {
        return Some(point - 2);
    }
    before.chars().next_back().map(|c| point - c.len_utf8())
}

/// Position one character to the right of `point`; a CRLF pair is one step.
pub fn step_right(text: &str, point: usize) -> Option<usize> {
    let after = &text[point..];
    if after.starts_with("\r\n") {
        return Some(point + 2);
    }
    after.chars().next().map(|c| point + c.len_utf8())
}

/// The whole visible document, annotated, one line per output line.
pub fn annotated_text(editor: &Editor) -> String {
    let mut lines = visible_lines(editor);
    if editor.document().text().ends_with('\n')
        && lines.last().is_some_and(|l| l.text.is_empty())
    {
        lines.pop();
    }
    lines.iter().map(|l| l.rendered() + "\n").collect()
}
