//! Incremental recomputation after an edit.
//!
//! An edit can only change the weights of the heading it happened under and
//! of that heading's ancestors. Those are recomputed innermost first, so an
//! ancestor never renders before its descendants are fresh; every other
//! annotation is left untouched.

use std::collections::HashSet;
use std::ops::Range;

use log::debug;

use crate::editing::Document;
use crate::outline::{Heading, Outline};
use crate::weights::WeightsSession;

/// Bring annotations up to date after `changed` (post-edit coordinates).
///
/// 1. Sweep stale and duplicate annotations on the changed lines.
/// 2. Walk from the heading enclosing `changed.end` up through its parents.
/// 3. Walk again from the heading enclosing `changed.start`, and from the
///    heading above the changed line when the change starts on a line
///    boundary or leaves a heading on that line, stopping at headings
///    already done.
/// 4. Re-annotate heading lines the sweep stripped.
///
/// The heading on the cursor line is never annotated here; it stays
/// suppressed while it is being edited.
pub fn on_document_change(session: &mut WeightsSession, doc: &mut Document, changed: Range<usize>) {
    let first_line = doc.line_of_offset(changed.start);
    let last_line = doc.line_of_offset(changed.end);
    let swept = session
        .store
        .sweep(doc, &*session.dialect, first_line..=last_line);

    let point_line = doc.line_of_offset(doc.point());
    let mut done = HashSet::new();

    let starts = {
        let outline = Outline::new(doc, &*session.dialect);
        let mut starts = vec![outline.enclosing_heading(changed.end)];
        starts.push(outline.enclosing_heading(changed.start));
        // The heading above the changed line owned it before the edit when
        // the change begins at a line start or turned the line into a heading
        let region = doc.accessible_range();
        let line_start = doc.line_start(changed.start);
        if line_start > region.start
            && (line_start == changed.start || outline.is_heading_line(changed.start))
        {
            starts.push(outline.enclosing_heading(line_start - 1));
        }
        starts
    };

    for start in starts.into_iter().flatten() {
        walk_up(session, doc, start, point_line, &mut done);
    }

    for pos in swept {
        let heading = Outline::new(doc, &*session.dialect).heading_at(pos);
        if let Some(heading) = heading
            && !done.contains(&heading.pos)
            && doc.line_of_offset(heading.pos) != point_line
        {
            session.refresh_heading(doc, heading);
        }
    }
}

/// Recompute `heading` and its ancestors, innermost first. Stops at the top
/// or at the first heading another walk already handled.
fn walk_up(
    session: &mut WeightsSession,
    doc: &mut Document,
    heading: Heading,
    point_line: usize,
    done: &mut HashSet<usize>,
) {
    let mut current = Some(heading);
    while let Some(heading) = current {
        if !done.insert(heading.pos) {
            break;
        }
        if doc.line_of_offset(heading.pos) == point_line {
            debug!("skipping heading at {} under the cursor", heading.pos);
        } else {
            session.refresh_heading(doc, heading);
        }
        current = Outline::new(doc, &*session.dialect).parent_heading(heading);
    }
}
