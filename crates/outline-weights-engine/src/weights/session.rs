use std::any::Any;
use std::ops::Range;

use log::{debug, info};
use outline_weights_config::WeightsConfig;

use crate::editing::{CommandHooks, Decoration, Document};
use crate::outline::{Dialect, Heading, Outline};
use crate::weights::cursor::CursorTracker;
use crate::weights::render::Renderer;
use crate::weights::store::{Annotation, AnnotationStore};
use crate::weights::{DisplayMode, analyze, reconcile};

/// Weights state for one document, live between activation and
/// deactivation. Installed on an [`Editor`] as its command hooks.
///
/// [`Editor`]: crate::editing::Editor
pub struct WeightsSession {
    pub(crate) dialect: Box<dyn Dialect>,
    pub(crate) renderer: Renderer,
    pub(crate) mode: DisplayMode,
    pub(crate) store: AnnotationStore,
    pub(crate) tracker: CursorTracker,
}

impl WeightsSession {
    /// A session showing what `config.show_weights` asks for.
    pub fn new(dialect: Box<dyn Dialect>, config: &WeightsConfig) -> Self {
        Self::with_mode(
            dialect,
            config,
            DisplayMode::from_show_weights(config.show_weights),
        )
    }

    pub fn with_mode(dialect: Box<dyn Dialect>, config: &WeightsConfig, mode: DisplayMode) -> Self {
        let renderer = Renderer::new(config, dialect.level_marker());
        Self {
            dialect,
            renderer,
            mode,
            store: AnnotationStore::new(),
            tracker: CursorTracker::new(),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn dialect(&self) -> &dyn Dialect {
        &*self.dialect
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// The annotation on the line of `pos`.
    pub fn annotation_at(&self, doc: &Document, pos: usize) -> Option<&Annotation> {
        self.store.on_line(doc, pos)
    }

    /// Line start of the heading whose annotation is hidden under the cursor.
    pub fn suppressed(&self, doc: &Document) -> Option<usize> {
        self.tracker.suppressed(doc)
    }

    /// Full pass: annotate every visible heading from the top of the
    /// accessible region. The heading under the cursor starts suppressed.
    /// Returns the number of annotations written.
    pub fn activate(&mut self, doc: &mut Document) -> usize {
        self.deactivate(doc);

        let point_line = doc.line_of_offset(doc.point());
        let mut next = Outline::new(doc, &*self.dialect).first_visible_heading();
        let mut written = 0;
        while let Some(heading) = next {
            if doc.line_of_offset(heading.pos) == point_line {
                self.tracker.suppress(doc, heading.pos);
            } else {
                self.refresh_heading(doc, heading);
                written += 1;
            }
            next = Outline::new(doc, &*self.dialect).next_visible_heading(heading.pos);
        }

        info!("outline weights active: {} headings annotated", written);
        written
    }

    /// Drop every annotation and all cursor state.
    pub fn deactivate(&mut self, doc: &mut Document) {
        if !self.store.is_empty() {
            info!("outline weights cleared: {} annotations", self.store.len());
        }
        self.store.clear(doc);
        self.tracker.reset(doc);
    }

    /// Recompute one heading and write its annotation. Returns the stamp.
    pub fn refresh_heading(&mut self, doc: &mut Document, heading: Heading) -> u64 {
        let analysis = analyze(doc, &*self.dialect, heading);
        let line = doc.line_text(doc.line_of_offset(heading.pos));
        let rendered = self.renderer.decorate(
            &line,
            heading.level,
            analysis.weight,
            analysis.body_lines,
            self.mode,
        );
        debug!("annotating heading at {}: {:?}", heading.pos, rendered.text);
        self.store.upsert(doc, heading.pos, rendered)
    }
}

impl CommandHooks for WeightsSession {
    fn before_command(&mut self, doc: &mut Document) {
        self.tracker.before_command(doc, &*self.dialect);
    }

    fn after_command(&mut self, doc: &mut Document) {
        let moved = self.tracker.after_command(doc, &*self.dialect);
        if let Some(heading) = moved.suppress {
            self.store.remove(doc, heading.pos);
        }
        if let Some(heading) = moved.restore {
            self.refresh_heading(doc, heading);
        }
    }

    fn after_change(&mut self, doc: &mut Document, changed: Range<usize>) {
        reconcile::on_document_change(self, doc, changed);
    }

    fn decorations(&self, doc: &Document) -> Vec<Decoration> {
        self.store.decorations(doc)
    }

    fn name(&self) -> &str {
        "outline-weights"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
