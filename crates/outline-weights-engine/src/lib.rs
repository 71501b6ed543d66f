//! # outline-weights-engine
//!
//! Keeps a structural "weight" annotation next to every visible heading of an
//! outline document and keeps it current while the document is edited.
//!
//! - [`editing`]: rope-backed [`Document`], commands, anchors, narrowing,
//!   folds, and the [`Editor`] that routes edits to installed hooks
//! - [`outline`]: heading navigation and span queries for each dialect
//! - [`weights`]: analysis, rendering, reconciliation and the host-facing
//!   [`weights::mode`] switches
//! - [`io`]: reading and writing documents

pub mod editing;
pub mod io;
pub mod outline;
pub mod weights;

pub use editing::{Cmd, CommandHooks, Decoration, Document, Editor, Patch};
pub use io::{IoError, read_document, write_document};
pub use outline::{Dialect, Heading, Outline, dialect_for};
pub use weights::{Analysis, DisplayMode, Weight, WeightsSession};
