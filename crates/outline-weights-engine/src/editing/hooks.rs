//! Pluggable command hooks.
//!
//! A hook observes every command run through the [`Editor`]: it is called
//! before and after the command, once for every range the command changed,
//! and when the host collects decorations to draw.
//!
//! [`Editor`]: crate::editing::Editor

use std::any::Any;
use std::ops::Range;

use crate::editing::Document;

/// A display-only string drawn at a byte offset. Never part of the text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoration {
    /// Byte offset the text is drawn in front of
    pub offset: usize,
    pub text: String,
    /// Highlight style tag
    pub face: String,
}

/// Handler invoked synchronously by the editor. Hooks never fail; anything
/// they cannot resolve is skipped.
pub trait CommandHooks {
    /// Called before a command runs
    fn before_command(&mut self, _doc: &mut Document) {}

    /// Called after a command and all its edits are done
    fn after_command(&mut self, _doc: &mut Document) {}

    /// Called once per changed range (post-edit coordinates)
    fn after_change(&mut self, _doc: &mut Document, _changed: Range<usize>) {}

    /// Decorations this hook wants drawn, in document order
    fn decorations(&self, _doc: &Document) -> Vec<Decoration> {
        Vec::new()
    }

    /// Hook name for logging
    fn name(&self) -> &str;

    /// Downcast support for type-specific operations
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
