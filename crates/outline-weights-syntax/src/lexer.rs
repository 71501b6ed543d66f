//! # Lexer
//!
//! First parsing stage: split outline source into tokens with [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! Every byte of the input lands in exactly one token, so concatenating the
//! token texts reproduces the source:
//!
//! ```
//! use outline_weights_syntax::lexer::lex;
//!
//! let input = "* Tasks\n| a | b |\n";
//! let tokens = lex(input);
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! Tokens are context free. The lexer does not know whether `*` opens a
//! heading, a bullet or emphasis; the grammar decides from line context.
//! Characters with structural meaning get their own token, everything else is
//! grouped into `TEXT` runs.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// Separate from [`SyntaxKind`] because Logos needs to derive on it.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    #[token("*")]
    Star,

    #[token("#")]
    Hash,

    #[token("+")]
    Plus,

    #[token("-")]
    Dash,

    #[token("|")]
    Pipe,

    #[token(":")]
    Colon,

    /// Anything not matched by the rules above
    #[regex(r"[^\s*#+|:-]+")]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Hash => SyntaxKind::HASH,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
///
/// Unrecognized input (a lone `\r`, for instance) becomes `TEXT`, so no byte
/// is ever dropped.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let kind = result
            .map(TokenKind::to_syntax_kind)
            .unwrap_or(SyntaxKind::TEXT);
        tokens.push(Token {
            kind,
            text: lexer.slice(),
        });
    }

    tokens
}
