//! # Editing core
//!
//! The document is a single `xi_rope::Rope` buffer. Every edit is a [`Cmd`]
//! compiled to a `Delta`; the same delta carries the cursor, [anchors],
//! the narrowed region and folds through the edit, so positions held by
//! other components never go stale on their own.
//!
//! Hosts drive a document through an [`Editor`], which brackets each user
//! action with the installed [`CommandHooks`]. That is the only way the
//! weights engine learns about edits and cursor moves.
//!
//! ## Module Structure
//!
//! - **`document`**: `Document` with line arithmetic, narrowing and folds
//! - **`commands`**: `Cmd` enum and delta compilation
//! - **`anchors`**: positions that survive edits
//! - **`patch`**: edit result metadata including changed ranges
//! - **`hooks`**: `CommandHooks` trait and `Decoration`
//! - **`editor`**: `Editor` hook registry and command loop
//!
//! [anchors]: anchors::Anchor

pub mod anchors;
pub mod commands;
pub mod document;
pub mod editor;
pub mod hooks;
pub mod patch;

pub use anchors::{Anchor, AnchorId};
pub use commands::Cmd;
pub use document::{Document, RestrictionGuard};
pub use editor::{CommandContext, Editor};
pub use hooks::{CommandHooks, Decoration};
pub use patch::Patch;
