//! Parser events.
//!
//! The grammar never touches rowan directly. It records a flat event list
//! that the [`Sink`](super::sink::Sink) replays:
//!
//! ```text
//! Start(HEADLINE)
//!   Start(TITLE)
//!     Token(STARS) Token(WHITESPACE) Token(TEXT) Token(NEWLINE)
//!   Finish
//! Finish
//! ```
//!
//! `forward_parent` on a `Start` points at a later `Start` that must be opened
//! first; it is how [`CompletedMarker::precede`](super::CompletedMarker::precede)
//! wraps a finished node without rewriting the list.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open a composite node.
    Start {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },

    /// Attach `n_raw_tokens` lexer tokens to the open node as one token of
    /// `kind` (more than one when the parser glues runs such as heading stars).
    Token { kind: SyntaxKind, n_raw_tokens: u8 },

    /// Close the innermost open node.
    Finish,

    /// Reserved slot from `Parser::start`; ignored by the Sink unless a
    /// marker completes it.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start {
            kind,
            forward_parent: None,
        }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token {
            kind,
            n_raw_tokens: 1,
        }
    }
}
