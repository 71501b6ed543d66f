//! # Outline weights
//!
//! Every visible heading gets a display-only annotation with its weight: the
//! number of subtrees below it and the number of paragraph-like blocks in
//! its span. The alternative display shows how many body lines the heading
//! hides instead.
//!
//! The pieces, leaves first:
//!
//! - **`analyzer`**: weight and body-line count of one heading
//! - **`render`**: display strings and the column they are spliced at
//! - **`store`**: the live annotations, one per heading line, anchored
//! - **`reconcile`**: which headings to recompute after an edit, bottom-up
//! - **`cursor`**: hides the annotation of the heading being edited
//! - **`session`**: per-document state, installed as editor hooks
//! - **`mode`**: enable, disable and display toggles for hosts

pub mod analyzer;
pub mod cursor;
pub mod mode;
pub mod reconcile;
pub mod render;
pub mod session;
pub mod store;

pub use analyzer::analyze;
pub use render::Renderer;
pub use session::WeightsSession;
pub use store::{Annotation, AnnotationStore};

/// Structural size of a heading's subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Weight {
    /// Headings nested anywhere below the heading
    pub subtrees: usize,
    /// Paragraph-like blocks anywhere in the span
    pub paragraphs: usize,
}

/// Everything the renderer needs about one heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Analysis {
    pub weight: Weight,
    pub body_lines: usize,
}

/// What annotations show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Subtree and paragraph counts
    Weights,
    /// Body lines as a cookie, useful on folded headings
    HiddenLines,
}

impl DisplayMode {
    pub fn from_show_weights(show_weights: bool) -> Self {
        if show_weights {
            DisplayMode::Weights
        } else {
            DisplayMode::HiddenLines
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Weights => DisplayMode::HiddenLines,
            DisplayMode::HiddenLines => DisplayMode::Weights,
        }
    }
}
