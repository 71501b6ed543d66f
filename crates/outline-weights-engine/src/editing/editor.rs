use std::ops::Range;

use log::debug;

use crate::editing::hooks::{CommandHooks, Decoration};
use crate::editing::{Cmd, Document, Patch};

/// Owns a document and the hooks installed on it.
///
/// Every user action goes through [`Editor::run_command`], which calls the
/// hooks' `before_command`, runs the action, routes each edit's changed
/// ranges to `after_change`, and finally calls `after_command`.
pub struct Editor {
    document: Document,
    hooks: Vec<Box<dyn CommandHooks>>,
}

/// What a command sees while it runs: the document, plus an `apply` that
/// notifies change hooks as edits land.
pub struct CommandContext<'a> {
    document: &'a mut Document,
    hooks: &'a mut [Box<dyn CommandHooks>],
}

impl CommandContext<'_> {
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let patch = self.document.apply(cmd);
        for range in &patch.changed {
            for hook in self.hooks.iter_mut() {
                hook.after_change(self.document, range.clone());
            }
        }
        patch
    }

    pub fn document(&mut self) -> &mut Document {
        &mut *self.document
    }
}

impl Editor {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            hooks: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Direct access, bypassing hooks. Hosts use [`Editor::run_command`] for
    /// anything the user does.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Run one user action bracketed by the hooks.
    pub fn run_command<R>(&mut self, action: impl FnOnce(&mut CommandContext<'_>) -> R) -> R {
        for hook in self.hooks.iter_mut() {
            hook.before_command(&mut self.document);
        }

        let result = {
            let mut cx = CommandContext {
                document: &mut self.document,
                hooks: &mut self.hooks,
            };
            action(&mut cx)
        };

        for hook in self.hooks.iter_mut() {
            hook.after_command(&mut self.document);
        }
        result
    }

    /// Apply a single edit as its own command.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        self.run_command(|cx| cx.apply(cmd))
    }

    /// Move the cursor as its own command.
    pub fn move_point(&mut self, pos: usize) {
        self.run_command(|cx| cx.document().set_point(pos));
    }

    pub fn install(&mut self, hook: Box<dyn CommandHooks>) {
        debug!("installing hook {}", hook.name());
        self.hooks.push(hook);
    }

    /// Remove the first installed hook of type `H`.
    pub fn uninstall<H: CommandHooks + 'static>(&mut self) -> Option<Box<dyn CommandHooks>> {
        let index = self.hooks.iter().position(|h| h.as_any().is::<H>())?;
        let hook = self.hooks.remove(index);
        debug!("uninstalled hook {}", hook.name());
        Some(hook)
    }

    pub fn hook<H: CommandHooks + 'static>(&self) -> Option<&H> {
        self.hooks.iter().find_map(|h| h.as_any().downcast_ref::<H>())
    }

    pub fn hook_mut<H: CommandHooks + 'static>(&mut self) -> Option<&mut H> {
        self.hooks
            .iter_mut()
            .find_map(|h| h.as_any_mut().downcast_mut::<H>())
    }

    /// Hook plus the document, borrowed together.
    pub fn hook_and_document_mut<H: CommandHooks + 'static>(
        &mut self,
    ) -> Option<(&mut H, &mut Document)> {
        let hook = self
            .hooks
            .iter_mut()
            .find_map(|h| h.as_any_mut().downcast_mut::<H>())?;
        Some((hook, &mut self.document))
    }

    /// Decorations from every hook, sorted by offset.
    pub fn decorations(&self) -> Vec<Decoration> {
        let mut decorations: Vec<Decoration> = self
            .hooks
            .iter()
            .flat_map(|h| h.decorations(&self.document))
            .collect();
        decorations.sort_by_key(|d| d.offset);
        decorations
    }

    /// Decorations whose offset lies in `range`.
    pub fn decorations_in(&self, range: Range<usize>) -> Vec<Decoration> {
        self.decorations()
            .into_iter()
            .filter(|d| range.contains(&d.offset))
            .collect()
    }
}
