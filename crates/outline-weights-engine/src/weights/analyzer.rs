use log::debug;

use crate::editing::Document;
use crate::outline::{Dialect, Heading, Outline};
use crate::weights::Analysis;

/// Weigh one heading.
///
/// The dialect counts over the heading's span with the document narrowed to
/// that span; restriction and point are back to what they were on return.
/// `heading` must be a heading line.
pub fn analyze(doc: &mut Document, dialect: &dyn Dialect, heading: Heading) -> Analysis {
    let (span, body_lines) = {
        let outline = Outline::new(doc, dialect);
        (outline.span(heading), outline.body_line_count(heading))
    };

    let weight = {
        let mut narrowed = doc.save_restriction();
        narrowed.narrow(span.clone());
        dialect.count_span(&narrowed.accessible_text())
    };

    debug!(
        "weighed heading at {} ({:?}): {:?}, {} body lines",
        heading.pos, span, weight, body_lines
    );
    Analysis { weight, body_lines }
}
