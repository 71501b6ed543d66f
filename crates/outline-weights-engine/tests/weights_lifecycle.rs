//! End-to-end behaviour of outline weights through the `Editor`, the way a
//! host drives it: enable, edit, move the cursor, toggle, disable.

use insta::assert_snapshot;
use outline_weights_config::{DialectName, WeightsConfig};
use outline_weights_engine::weights::mode;
use outline_weights_engine::{Cmd, DisplayMode, Document, Editor, WeightsSession};
use pretty_assertions::assert_eq;
use rstest::rstest;

// Offsets: H1 0, H2 5, para1 11, blank 17, para2 18, H3 24, para 29
const DOC: &str = "* H1\n** H2\npara1\n\npara2\n* H3\npara\n";

fn editor_at(text: &str, point: usize) -> Editor {
    let mut doc = Document::from_bytes(text.as_bytes()).unwrap();
    doc.set_point(point);
    Editor::new(doc)
}

/// (line, annotation without its filler) for every decoration shown.
fn shown(editor: &Editor) -> Vec<(usize, String)> {
    let doc = editor.document();
    editor
        .decorations()
        .into_iter()
        .map(|d| (doc.line_of_offset(d.offset), d.text.trim_start().to_string()))
        .collect()
}

fn stamp_on_line(editor: &Editor, line: usize) -> u64 {
    let doc = editor.document();
    let session = editor.hook::<WeightsSession>().unwrap();
    session
        .annotation_at(doc, doc.offset_of_line(line))
        .unwrap()
        .stamp
}

/// The document as a host would draw it, annotations spliced in.
fn listing(editor: &Editor) -> String {
    let doc = editor.document();
    let decorations = editor.decorations();
    (0..doc.line_count())
        .map(|line| {
            let start = doc.offset_of_line(line);
            let mut text = doc.line_text(line);
            for d in decorations.iter().rev() {
                if doc.line_of_offset(d.offset) == line {
                    text.insert_str(d.offset - start, &d.text);
                }
            }
            text
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

fn owned(pairs: &[(usize, &str)]) -> Vec<(usize, String)> {
    pairs.iter().map(|(l, t)| (*l, t.to_string())).collect()
}

#[rstest]
#[case(DialectName::Org)]
#[case(DialectName::OrgScan)]
fn enabling_annotates_every_heading(#[case] dialect: DialectName) {
    let mut editor = editor_at(DOC, 13);
    mode::enable(&mut editor, dialect, &WeightsConfig::default());

    assert_eq!(
        shown(&editor),
        owned(&[(0, "* 2 + 1"), (1, "** 2"), (5, "* 1")])
    );
}

#[test]
fn weights_are_padded_to_the_configured_column() {
    let mut editor = editor_at(DOC, 13);
    mode::enable(&mut editor, DialectName::Org, &WeightsConfig::default());

    let first = &editor.decorations()[0];
    assert_eq!(first.offset, 4);
    assert_eq!(first.text, format!("{}* 2 + 1", " ".repeat(61)));
    assert_eq!(first.face, "outline-weights");
}

#[test]
fn markdown_documents_use_hash_markers() {
    let text = "# Intro\n\n## Part\nbody\n";
    let mut editor = editor_at(text, 17);
    mode::enable(&mut editor, DialectName::Markdown, &WeightsConfig::default());

    assert_eq!(shown(&editor), owned(&[(0, "# 1 + 1"), (2, "## 1")]));
}

#[test]
fn deleting_a_heading_line_updates_its_parent() {
    let mut editor = editor_at(DOC, 13);
    mode::enable(&mut editor, DialectName::Org, &WeightsConfig::default());
    let h3_stamp = stamp_on_line(&editor, 5);

    editor.apply(Cmd::DeleteRange { range: 5..11 });

    assert_eq!(editor.document().text(), "* H1\npara1\n\npara2\n* H3\npara\n");
    assert_eq!(shown(&editor), owned(&[(0, "* 2"), (4, "* 1")]));
    assert_eq!(stamp_on_line(&editor, 4), h3_stamp);
    assert_eq!(editor.document().anchors().len(), 2);
}

#[test]
fn deleting_a_whole_subtree_empties_its_parent() {
    let mut editor = editor_at(DOC, 30);
    mode::enable(&mut editor, DialectName::Org, &WeightsConfig::default());

    editor.apply(Cmd::DeleteRange { range: 5..24 });

    assert_eq!(editor.document().text(), "* H1\n* H3\npara\n");
    assert_eq!(shown(&editor), owned(&[(0, "* 0"), (1, "* 1")]));
    assert_eq!(editor.document().anchors().len(), 2);
}

#[test]
fn editing_a_body_leaves_sibling_subtrees_alone() {
    let mut editor = editor_at(DOC, 13);
    mode::enable(&mut editor, DialectName::Org, &WeightsConfig::default());
    let h1_stamp = stamp_on_line(&editor, 0);
    let h2_stamp = stamp_on_line(&editor, 1);
    let h3_stamp = stamp_on_line(&editor, 5);

    editor.apply(Cmd::InsertText {
        at: 18,
        text: "more\n\n".to_string(),
    });

    assert_ne!(stamp_on_line(&editor, 0), h1_stamp);
    assert_ne!(stamp_on_line(&editor, 1), h2_stamp);
    assert_eq!(stamp_on_line(&editor, 7), h3_stamp);
    assert_eq!(
        shown(&editor),
        owned(&[(0, "* 3 + 1"), (1, "** 3"), (7, "* 1")])
    );
}

#[test]
fn enabling_twice_gives_the_same_annotations() {
    let mut editor = editor_at(DOC, 13);
    let config = WeightsConfig::default();
    mode::enable(&mut editor, DialectName::Org, &config);
    let first = editor.decorations();

    mode::enable(&mut editor, DialectName::Org, &config);

    assert_eq!(editor.decorations(), first);
    assert_eq!(editor.document().anchors().len(), 3);
}

#[test]
fn cursor_hides_and_restores_the_heading_it_visits() {
    let mut editor = editor_at(DOC, 13);
    mode::enable(&mut editor, DialectName::Org, &WeightsConfig::default());
    let before = shown(&editor);

    editor.move_point(7);
    assert_eq!(shown(&editor), owned(&[(0, "* 2 + 1"), (5, "* 1")]));

    editor.move_point(13);
    assert_eq!(shown(&editor), before);
}

#[test]
fn typing_on_a_heading_keeps_it_hidden_until_the_cursor_leaves() {
    let mut editor = editor_at(DOC, 13);
    mode::enable(&mut editor, DialectName::Org, &WeightsConfig::default());

    editor.move_point(10);
    editor.apply(Cmd::InsertText {
        at: 10,
        text: " plan".to_string(),
    });
    assert_eq!(editor.document().line_text(1), "** H2 plan");
    assert!(
        editor
            .hook::<WeightsSession>()
            .unwrap()
            .annotation_at(editor.document(), 5)
            .is_none()
    );

    editor.move_point(20);
    assert_eq!(
        shown(&editor),
        owned(&[(0, "* 2 + 1"), (1, "** 2"), (5, "* 1")])
    );
}

#[test]
fn display_toggle_annotates_the_same_lines() {
    let mut editor = editor_at(DOC, 13);
    let config = WeightsConfig::default();
    mode::enable(&mut editor, DialectName::Org, &config);
    let lines: Vec<usize> = shown(&editor).into_iter().map(|(l, _)| l).collect();

    mode::toggle_display(&mut editor, DialectName::Org, &config);

    let session = editor.hook::<WeightsSession>().unwrap();
    assert_eq!(session.mode(), DisplayMode::HiddenLines);
    assert_eq!(
        shown(&editor),
        owned(&[(0, "[+0]"), (1, "[+3]"), (5, "[+1]")])
    );
    let toggled: Vec<usize> = shown(&editor).into_iter().map(|(l, _)| l).collect();
    assert_eq!(toggled, lines);
}

#[test]
fn folded_subtrees_are_not_annotated() {
    let mut editor = editor_at(DOC, 13);
    editor.document_mut().fold(5..24);
    mode::enable(&mut editor, DialectName::Org, &WeightsConfig::default());

    assert_eq!(shown(&editor), owned(&[(0, "* 2 + 1"), (5, "* 1")]));
}

#[test]
fn disabling_restores_the_plain_document() {
    let mut editor = editor_at(DOC, 7);
    mode::enable(&mut editor, DialectName::Org, &WeightsConfig::default());
    editor.move_point(13);

    mode::disable(&mut editor);

    assert!(editor.decorations().is_empty());
    assert!(editor.document().anchors().is_empty());
    assert_eq!(editor.document().text(), DOC);
}

#[test]
fn empty_and_headingless_documents_get_nothing() {
    for text in ["", "just text\n\nmore\n"] {
        let mut editor = editor_at(text, 0);
        mode::enable(&mut editor, DialectName::Org, &WeightsConfig::default());
        assert!(editor.decorations().is_empty());
    }
}

#[test]
fn hidden_lines_listing() {
    let mut editor = editor_at(DOC, 13);
    let config = WeightsConfig {
        show_weights: false,
        ..WeightsConfig::default()
    };
    mode::enable(&mut editor, DialectName::Org, &config);

    assert_snapshot!(listing(&editor), @r"
    * H1 [+0]
    ** H2 [+3]
    para1

    para2
    * H3 [+1]
    para
    ");
}
