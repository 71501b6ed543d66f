use outline_weights_config::WeightsConfig;

use crate::weights::{DisplayMode, Weight};

/// Formats annotations and decides where on a heading line they go.
#[derive(Debug, Clone)]
pub struct Renderer {
    column: usize,
    cookie_left_delimiter: String,
    cookie_left_signal: String,
    cookie_right_signal: String,
    cookie_right_delimiter: String,
    face: String,
    marker: char,
}

/// A rendered annotation ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Character column on the heading line the text is spliced at
    pub column: usize,
    /// Display string, filler included
    pub text: String,
    pub face: String,
}

impl Renderer {
    pub fn new(config: &WeightsConfig, marker: char) -> Self {
        Self {
            column: config.column,
            cookie_left_delimiter: config.cookie_left_delimiter.clone(),
            cookie_left_signal: config.cookie_left_signal.clone(),
            cookie_right_signal: config.cookie_right_signal.clone(),
            cookie_right_delimiter: config.cookie_right_delimiter.clone(),
            face: config.face.clone(),
            marker,
        }
    }

    /// The bare annotation string.
    ///
    /// Weights: `"** 3 + 2"`, the level marker then paragraphs, with the
    /// subtree term left out when there are none. Hidden lines:
    /// `" [+12]"` with the configured delimiters and signals.
    pub fn render(
        &self,
        level: usize,
        weight: Weight,
        body_lines: usize,
        mode: DisplayMode,
    ) -> String {
        match mode {
            DisplayMode::Weights => {
                let marker: String = std::iter::repeat_n(self.marker, level).collect();
                let mut text = format!("{} {}", marker, weight.paragraphs);
                if weight.subtrees > 0 {
                    text.push_str(&format!(" + {}", weight.subtrees));
                }
                text
            }
            DisplayMode::HiddenLines => format!(
                " {}{}{}{}{}",
                self.cookie_left_delimiter,
                self.cookie_left_signal,
                body_lines,
                self.cookie_right_signal,
                self.cookie_right_delimiter
            ),
        }
    }

    /// Render for a heading line: resolve the splice column and pad weights
    /// so they start at the configured column (at least one space).
    pub fn decorate(
        &self,
        line: &str,
        level: usize,
        weight: Weight,
        body_lines: usize,
        mode: DisplayMode,
    ) -> Rendered {
        let column = splice_column(line, self.column);
        let body = self.render(level, weight, body_lines, mode);
        let text = match mode {
            DisplayMode::Weights => {
                let fill = self.column.saturating_sub(column).max(1);
                format!("{}{}", " ".repeat(fill), body)
            }
            DisplayMode::HiddenLines => body,
        };
        Rendered {
            column,
            text,
            face: self.face.clone(),
        }
    }
}

/// Character column where an annotation is spliced into `line`.
///
/// Start at `column`, or the line end if the line is shorter. Short of the
/// line end, back up to the start of the word under the column. Then back
/// up over whitespace, so the annotation sits right after a word.
pub fn splice_column(line: &str, column: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut col = column.min(chars.len());
    if col < chars.len() {
        while col > 0 && !chars[col - 1].is_whitespace() {
            col -= 1;
        }
    }
    while col > 0 && chars[col - 1].is_whitespace() {
        col -= 1;
    }
    col
}

/// Byte offset of character `column` in `line`, clamped to the line end.
pub fn column_to_byte(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}
