//! # outline-weights-syntax
//!
//! A lossless syntax tree for star-headed outlines using [Rowan] + [Logos],
//! following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! The grammar is line oriented. [`line::classify`] decides what a single
//! line is; the rules in `parser::grammar` group lines into headlines,
//! sections and body elements. The weights engine uses the tree to count
//! child headlines and paragraph-like blocks under a heading, and uses
//! [`heading_level`] on its own when it only needs to navigate.
//!
//! ## Module Structure
//!
//! ```text
//! outline-weights-syntax/
//! ├── lib.rs           # Public API and tree snapshot tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── line.rs          # Single-line classification
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse() function
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs   # Root document parsing
//!         └── block.rs # Headlines, sections, paragraphs, blocks, lists
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use outline_weights_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("* Hello\nworld\n");
//! assert_eq!(tree.text().to_string(), "* Hello\nworld\n");
//!
//! let headline = tree.children().next().unwrap();
//! assert_eq!(headline.kind(), SyntaxKind::HEADLINE);
//! ```

pub mod lexer;
pub mod line;
pub mod parser;
pub mod syntax_kind;

pub use line::{LineKind, classify, heading_level};
pub use parser::parse;
pub use syntax_kind::{OutlineLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// Helper to format a syntax tree for snapshot testing.
    fn format_tree(node: &SyntaxNode, indent: usize) -> String {
        let mut result = String::new();
        let prefix = "  ".repeat(indent);

        result.push_str(&format!(
            "{}{:?}@{:?}\n",
            prefix,
            node.kind(),
            node.text_range()
        ));

        for child in node.children_with_tokens() {
            match child {
                rowan::NodeOrToken::Node(n) => {
                    result.push_str(&format_tree(&n, indent + 1));
                }
                rowan::NodeOrToken::Token(t) => {
                    let text = t.text().replace('\n', "\\n");
                    result.push_str(&format!(
                        "{}  {:?}@{:?} {:?}\n",
                        prefix,
                        t.kind(),
                        t.text_range(),
                        text
                    ));
                }
            }
        }

        result
    }

    #[test]
    fn snapshot_headline_with_body() {
        let tree = parse("* Hi\nbody\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..10
          HEADLINE@0..10
            TITLE@0..5
              STARS@0..1 "*"
              WHITESPACE@1..2 " "
              TEXT@2..4 "Hi"
              NEWLINE@4..5 "\\n"
            SECTION@5..10
              PARAGRAPH@5..10
                TEXT@5..9 "body"
                NEWLINE@9..10 "\\n"
        "#);
    }

    #[test]
    fn snapshot_nested_headlines_glue_stars() {
        let tree = parse("* A\n** B\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..9
          HEADLINE@0..9
            TITLE@0..4
              STARS@0..1 "*"
              WHITESPACE@1..2 " "
              TEXT@2..3 "A"
              NEWLINE@3..4 "\\n"
            HEADLINE@4..9
              TITLE@4..9
                STARS@4..6 "**"
                WHITESPACE@6..7 " "
                TEXT@7..8 "B"
                NEWLINE@8..9 "\\n"
        "#);
    }

    #[test]
    fn snapshot_list_item() {
        let tree = parse("- a\n");
        assert_snapshot!(format_tree(&tree, 0), @r#"
        ROOT@0..4
          SECTION@0..4
            PLAIN_LIST@0..4
              ITEM@0..4
                DASH@0..1 "-"
                WHITESPACE@1..2 " "
                PARAGRAPH@2..4
                  TEXT@2..3 "a"
                  NEWLINE@3..4 "\\n"
        "#);
    }

    // Real notes are messy: half-typed blocks, stray delimiters, CRLF. The
    // tree must still hold every byte.
    #[test]
    fn messy_input_round_trips() {
        let input = "intro\r\n*not a heading*\n* A :tag:\n#+begin_src\n** B\n#+end_src\n:END:\n  - x\n |\n***\n";
        let tree = parse(input);
        assert_eq!(tree.text().to_string(), input);
    }

    #[test]
    fn roundtrip_preserves_text() {
        let inputs = [
            "Hello, world!\n",
            "* Heading\n",
            "* A\n** B\n*** C\n* D",
            "- Item\n  - nested\n",
            "#+begin_quote\nq\n#+end_quote\n",
            "| a | b |\n",
            ":PROPERTIES:\n:ID: 7\n:END:\n",
            "# comment\n",
            "\n\n\n",
        ];

        for input in inputs {
            let tree = parse(input);
            assert_eq!(
                tree.text().to_string(),
                input,
                "Roundtrip failed for: {:?}",
                input
            );
        }
    }
}
