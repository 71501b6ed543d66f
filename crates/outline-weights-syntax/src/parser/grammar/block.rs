//! Outline-level grammar rules: headlines, sections and body elements.

use crate::line::{LineKind, classify};
use crate::parser::{CompletedMarker, Parser};
use crate::syntax_kind::SyntaxKind;

use super::{current_heading, current_line};

/// Parse a heading line and its whole subtree.
pub(super) fn headline(p: &mut Parser<'_, '_>) {
    let Some(level) = current_heading(p) else {
        // Only reachable on malformed input; keep the bytes anyway
        let m = p.start();
        p.bump_line();
        m.complete(p, SyntaxKind::ERROR);
        return;
    };

    let m = p.start();
    title(p, level);

    if !p.at_end() && current_heading(p).is_none() {
        section(p);
    }
    while let Some(child) = current_heading(p)
        && child > level
    {
        headline(p);
    }

    m.complete(p, SyntaxKind::HEADLINE);
}

fn title(p: &mut Parser<'_, '_>, level: usize) {
    let m = p.start();
    p.bump_n(level, SyntaxKind::STARS);
    p.bump_line();
    m.complete(p, SyntaxKind::TITLE);
}

/// Body elements up to the next heading line.
pub(super) fn section(p: &mut Parser<'_, '_>) {
    let m = p.start();
    while !p.at_end() && current_heading(p).is_none() {
        element(p);
    }
    m.complete(p, SyntaxKind::SECTION);
}

fn element(p: &mut Parser<'_, '_>) {
    match current_line(p) {
        LineKind::Blank => p.bump_line(),
        LineKind::TableRow => table(p),
        LineKind::BlockBegin(name) => {
            if closes_before_heading(p, |kind| *kind == LineKind::BlockEnd(name.clone())) {
                block(p, &name);
            } else {
                paragraph(p);
            }
        }
        LineKind::Keyword | LineKind::BlockEnd(_) => single_line(p, SyntaxKind::KEYWORD),
        LineKind::Comment => comment(p),
        LineKind::DrawerBegin => {
            if closes_before_heading(p, |kind| *kind == LineKind::DrawerEnd) {
                drawer(p);
            } else {
                paragraph(p);
            }
        }
        LineKind::Item { indent } => {
            plain_list(p, indent);
        }
        // Headings never reach here: `section` stops in front of them
        LineKind::Heading(_) | LineKind::DrawerEnd | LineKind::Text { .. } => paragraph(p),
    }
}

/// Does a line matching `is_close` appear below the current one before the
/// next heading?
fn closes_before_heading(p: &Parser<'_, '_>, is_close: impl Fn(&LineKind) -> bool) -> bool {
    let mut n = 1;
    while let Some(text) = p.nth_line_text(n) {
        let kind = classify(&text);
        if matches!(kind, LineKind::Heading(_)) {
            return false;
        }
        if is_close(&kind) {
            return true;
        }
        n += 1;
    }
    false
}

/// First line plus following plain text lines.
fn paragraph(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump_line();
    while !p.at_end() && matches!(current_line(p), LineKind::Text { .. }) {
        p.bump_line();
    }
    m.complete(p, SyntaxKind::PARAGRAPH);
}

fn single_line(p: &mut Parser<'_, '_>, kind: SyntaxKind) {
    let m = p.start();
    p.bump_line();
    m.complete(p, kind);
}

fn comment(p: &mut Parser<'_, '_>) {
    let m = p.start();
    while !p.at_end() && current_line(p) == LineKind::Comment {
        p.bump_line();
    }
    m.complete(p, SyntaxKind::COMMENT);
}

fn table(p: &mut Parser<'_, '_>) {
    let m = p.start();
    while !p.at_end() && current_line(p) == LineKind::TableRow {
        single_line(p, SyntaxKind::TABLE_ROW);
    }
    m.complete(p, SyntaxKind::TABLE);
}

/// `#+begin_NAME` .. `#+end_NAME`; the caller checked that the end exists.
fn block(p: &mut Parser<'_, '_>, name: &str) {
    let kind = match name {
        "src" => SyntaxKind::SRC_BLOCK,
        "example" => SyntaxKind::EXAMPLE_BLOCK,
        "quote" => SyntaxKind::QUOTE_BLOCK,
        "verse" => SyntaxKind::VERSE_BLOCK,
        _ => SyntaxKind::SPECIAL_BLOCK,
    };

    let m = p.start();
    p.bump_line();
    while !p.at_end() {
        let closing = matches!(current_line(p), LineKind::BlockEnd(end) if end == name);
        p.bump_line();
        if closing {
            break;
        }
    }
    m.complete(p, kind);
}

/// `:NAME:` .. `:END:`; the caller checked that the end exists.
fn drawer(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump_line();
    while !p.at_end() {
        let closing = current_line(p) == LineKind::DrawerEnd;
        p.bump_line();
        if closing {
            break;
        }
    }
    m.complete(p, SyntaxKind::DRAWER);
}

/// Items at `indent`, allowing blank lines between them.
fn plain_list(p: &mut Parser<'_, '_>, indent: usize) {
    let first = item(p, indent);
    let list = first.precede(p);

    loop {
        match current_line(p) {
            LineKind::Item { indent: i } if i == indent => {
                item(p, indent);
            }
            LineKind::Blank if next_item_indent(p) == Some(indent) => p.bump_line(),
            _ => break,
        }
        if p.at_end() {
            break;
        }
    }

    list.complete(p, SyntaxKind::PLAIN_LIST);
}

/// Indentation of the first non-blank line below a run of blank lines, if
/// that line is an item.
fn next_item_indent(p: &Parser<'_, '_>) -> Option<usize> {
    let mut n = 1;
    while let Some(text) = p.nth_line_text(n) {
        match classify(&text) {
            LineKind::Blank => n += 1,
            LineKind::Item { indent } => return Some(indent),
            _ => return None,
        }
    }
    None
}

/// Bullet, then the item's text as a paragraph, then deeper nested lists.
fn item(p: &mut Parser<'_, '_>, indent: usize) -> CompletedMarker {
    let m = p.start();

    p.eat(SyntaxKind::WHITESPACE);
    p.bump();
    p.eat(SyntaxKind::WHITESPACE);

    let has_text = !p.at_end() && !p.at(SyntaxKind::NEWLINE);

    if has_text {
        let para = p.start();
        p.bump_line();
        while continues_item(p, indent) {
            p.bump_line();
        }
        para.complete(p, SyntaxKind::PARAGRAPH);
    } else {
        p.eat(SyntaxKind::NEWLINE);
        if continues_item(p, indent) {
            let para = p.start();
            while continues_item(p, indent) {
                p.bump_line();
            }
            para.complete(p, SyntaxKind::PARAGRAPH);
        }
    }

    while !p.at_end()
        && let LineKind::Item { indent: nested } = current_line(p)
        && nested > indent
    {
        plain_list(p, nested);
    }

    m.complete(p, SyntaxKind::ITEM)
}

/// Text indented deeper than the bullet belongs to the item.
fn continues_item(p: &Parser<'_, '_>, indent: usize) -> bool {
    !p.at_end() && matches!(current_line(p), LineKind::Text { indent: i } if i > indent)
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use crate::syntax_kind::{SyntaxKind, SyntaxNode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children().map(|c| c.kind()).collect()
    }

    fn count(node: &SyntaxNode, kind: SyntaxKind) -> usize {
        node.descendants().filter(|n| n.kind() == kind).count()
    }

    #[test]
    fn headlines_nest_by_level() {
        let tree = parse("* A\n** B\n*** C\n** D\n* E\n");
        assert_eq!(kinds(&tree), vec![SyntaxKind::HEADLINE, SyntaxKind::HEADLINE]);

        let a = tree.children().next().unwrap();
        assert_eq!(
            kinds(&a),
            vec![SyntaxKind::TITLE, SyntaxKind::HEADLINE, SyntaxKind::HEADLINE]
        );
        assert_eq!(count(&a, SyntaxKind::HEADLINE), 4);
    }

    #[test]
    fn preamble_is_a_root_section() {
        let tree = parse("#+TITLE: x\n\nintro\n* A\n");
        assert_eq!(kinds(&tree), vec![SyntaxKind::SECTION, SyntaxKind::HEADLINE]);
        let section = tree.children().next().unwrap();
        assert_eq!(kinds(&section), vec![SyntaxKind::KEYWORD, SyntaxKind::PARAGRAPH]);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let tree = parse("* A\none\nstill one\n\ntwo\n");
        assert_eq!(count(&tree, SyntaxKind::PARAGRAPH), 2);
    }

    #[rstest]
    #[case("#+begin_src rust\nfn x() {}\n#+end_src\n", SyntaxKind::SRC_BLOCK)]
    #[case("#+BEGIN_EXAMPLE\nout\n#+END_EXAMPLE\n", SyntaxKind::EXAMPLE_BLOCK)]
    #[case("#+begin_quote\nwise\n\nwords\n#+end_quote\n", SyntaxKind::QUOTE_BLOCK)]
    #[case("#+begin_verse\nroses\n#+end_verse\n", SyntaxKind::VERSE_BLOCK)]
    #[case("#+begin_center\nmid\n#+end_center\n", SyntaxKind::SPECIAL_BLOCK)]
    #[case("| a | b |\n|---+---|\n| 1 | 2 |\n", SyntaxKind::TABLE)]
    #[case(":PROPERTIES:\n:ID: 1\n:END:\n", SyntaxKind::DRAWER)]
    fn recognizes_body_elements(#[case] body: &str, #[case] expected: SyntaxKind) {
        let input = format!("* H\n{body}");
        let tree = parse(&input);
        let headline = tree.children().next().unwrap();
        let section = headline.children().nth(1).unwrap();
        assert_eq!(section.kind(), SyntaxKind::SECTION);
        assert_eq!(kinds(&section), vec![expected]);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn block_contents_are_not_paragraphs() {
        let tree = parse("* H\n#+begin_quote\nfirst\n\nsecond\n#+end_quote\n");
        assert_eq!(count(&tree, SyntaxKind::QUOTE_BLOCK), 1);
        assert_eq!(count(&tree, SyntaxKind::PARAGRAPH), 0);
    }

    #[test]
    fn unclosed_block_falls_back_to_paragraph() {
        let tree = parse("* H\n#+begin_src\ncode\n* Next\n#+end_src\n");
        let first = tree.children().next().unwrap();
        assert_eq!(count(&first, SyntaxKind::SRC_BLOCK), 0);
        assert_eq!(count(&first, SyntaxKind::PARAGRAPH), 1);
        assert_eq!(count(&tree, SyntaxKind::HEADLINE), 2);
    }

    #[test]
    fn unclosed_drawer_falls_back_to_paragraph() {
        let tree = parse("* H\n:LOGBOOK:\nentry\n");
        assert_eq!(count(&tree, SyntaxKind::DRAWER), 0);
        assert_eq!(count(&tree, SyntaxKind::PARAGRAPH), 1);
    }

    #[test]
    fn list_items_each_hold_a_paragraph() {
        let tree = parse("* H\n- one\n  continued\n- two\n\n- three\n-\n");
        assert_eq!(count(&tree, SyntaxKind::PLAIN_LIST), 1);
        assert_eq!(count(&tree, SyntaxKind::ITEM), 4);
        assert_eq!(count(&tree, SyntaxKind::PARAGRAPH), 3);
    }

    #[test]
    fn nested_lists_live_inside_items() {
        let tree = parse("- outer\n  - inner\n  - inner 2\n- outer 2\n");
        let section = tree.children().next().unwrap();
        assert_eq!(kinds(&section), vec![SyntaxKind::PLAIN_LIST]);
        assert_eq!(count(&tree, SyntaxKind::PLAIN_LIST), 2);
        assert_eq!(count(&tree, SyntaxKind::ITEM), 4);
    }

    #[test]
    fn text_after_list_starts_a_paragraph() {
        let tree = parse("- item\nafter\n");
        let section = tree.children().next().unwrap();
        assert_eq!(
            kinds(&section),
            vec![SyntaxKind::PLAIN_LIST, SyntaxKind::PARAGRAPH]
        );
    }

    #[test]
    fn bold_text_at_line_start_is_not_a_heading() {
        let tree = parse("* H\n*bold* start\n");
        assert_eq!(count(&tree, SyntaxKind::HEADLINE), 1);
        assert_eq!(count(&tree, SyntaxKind::PARAGRAPH), 1);
    }

    #[test]
    fn comments_and_keywords_do_not_count() {
        let tree = parse("* H\n# note\n# more\n#+STARTUP: fold\n");
        let headline = tree.children().next().unwrap();
        let section = headline.children().nth(1).unwrap();
        assert_eq!(kinds(&section), vec![SyntaxKind::COMMENT, SyntaxKind::KEYWORD]);
    }
}
