//! # Parser
//!
//! Turns the token stream into a syntax tree using the event-based design
//! from rust-analyzer: grammar functions emit a flat list of [`Event`]s
//! (Start, Token, Finish) and the [`Sink`] replays them into a rowan tree.
//!
//! Nodes are opened with [`Parser::start`], which returns a [`Marker`]. A
//! marker must be completed (`marker.complete(p, KIND)`) or abandoned; dropping
//! it unfinished panics, so half-built nodes cannot slip into the tree.
//! [`CompletedMarker::precede`] wraps an already finished node in a new
//! parent, which is how a list is opened only after its first item parsed.
//!
//! The outline grammar is line oriented. Besides token-level inspection the
//! parser exposes line helpers ([`Parser::line_text`],
//! [`Parser::nth_line_text`], [`Parser::bump_line`]); grammar rules always
//! leave the parser at the start of a line.
//!
//! ```
//! use outline_weights_syntax::parse;
//!
//! let tree = parse("* Hello\nworld\n");
//! println!("{:#?}", tree);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine: token stream, cursor and accumulated events.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        Sink::new(self.tokens, self.events).finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume n tokens as a single composite token.
    pub fn bump_n(&mut self, n: usize, kind: SyntaxKind) {
        if n > 0 && self.pos + n <= self.tokens.len() {
            self.events.push(Event::Token {
                kind,
                n_raw_tokens: n as u8,
            });
            self.pos += n;
        }
    }

    /// Consume the rest of the current line, line ending included.
    pub fn bump_line(&mut self) {
        while !self.at_end() && !self.at(SyntaxKind::NEWLINE) {
            self.bump();
        }
        self.eat(SyntaxKind::NEWLINE);
    }

    /// Text from the cursor to the end of the current line (no line ending).
    pub fn line_text(&self) -> String {
        self.line_text_from(self.pos)
    }

    /// Text of the line `n` lines below the current one; `0` is the current
    /// line. `None` once past the last line.
    pub fn nth_line_text(&self, n: usize) -> Option<String> {
        let mut idx = self.pos;
        for _ in 0..n {
            idx = self.line_end_from(idx) + 1;
            if idx >= self.tokens.len() {
                return None;
            }
        }
        if idx >= self.tokens.len() {
            return None;
        }
        Some(self.line_text_from(idx))
    }

    /// Index of the NEWLINE ending the line that contains `idx`, or the token
    /// count if the line runs to EOF.
    fn line_end_from(&self, idx: usize) -> usize {
        self.tokens[idx.min(self.tokens.len())..]
            .iter()
            .position(|t| t.kind == SyntaxKind::NEWLINE)
            .map(|offset| idx + offset)
            .unwrap_or(self.tokens.len())
    }

    fn line_text_from(&self, idx: usize) -> String {
        let end = self.line_end_from(idx);
        self.tokens[idx.min(end)..end].iter().map(|t| t.text).collect()
    }
}

/// A node under construction.
///
/// Points at the `Placeholder` event pushed by [`Parser::start`]. Must be
/// completed or abandoned; the `Drop` impl panics otherwise.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    pos: usize,
    completed: bool,
}

impl Marker {
    /// Turn the placeholder into `Start { kind }` and push the matching
    /// `Finish`.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::Start {
            kind,
            forward_parent: None,
        };
        p.events.push(Event::Finish);
        CompletedMarker { pos: self.pos }
    }

    /// Give up on this node. The placeholder is popped when nothing was
    /// pushed after it, otherwise it stays inert and the Sink skips it.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// A finished node that can still be wrapped in a new parent.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    pos: usize,
}

impl CompletedMarker {
    /// Open a node that will become the parent of this one. The link is
    /// stored as a `forward_parent` and resolved by the Sink.
    pub fn precede(self, p: &mut Parser<'_, '_>) -> Marker {
        let new_pos = p.events.len();
        p.events.push(Event::Placeholder);

        if let Event::Start { forward_parent, .. } = &mut p.events[self.pos] {
            *forward_parent = Some(new_pos);
        }

        Marker {
            pos: new_pos,
            completed: false,
        }
    }
}

/// Parse outline source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    Parser::new(&tokens).parse()
}
