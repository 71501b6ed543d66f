//! Replays parser events into a rowan green tree.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: &'t [Token<'input>],
    cursor: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens,
            cursor: 0,
            events,
        }
    }

    /// Build the tree. Forward-parent chains are opened outermost first.
    pub fn finish(mut self) -> SyntaxNode {
        let mut chain = Vec::new();

        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    chain.push(kind);
                    let mut next = forward_parent;
                    while let Some(parent_idx) = next {
                        match std::mem::replace(&mut self.events[parent_idx], Event::Placeholder) {
                            Event::Start {
                                kind,
                                forward_parent,
                            } => {
                                chain.push(kind);
                                next = forward_parent;
                            }
                            _ => unreachable!(),
                        }
                    }
                    for kind in chain.drain(..).rev() {
                        self.builder.start_node(kind.into());
                    }
                }
                Event::Token { kind, n_raw_tokens } => self.token(kind, n_raw_tokens as usize),
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }

        SyntaxNode::new_root(self.builder.finish())
    }

    fn token(&mut self, kind: SyntaxKind, n_raw_tokens: usize) {
        let start = self.cursor;
        self.cursor += n_raw_tokens;
        let text: String = self.tokens[start..self.cursor]
            .iter()
            .map(|t| t.text)
            .collect();
        self.builder.token(kind.into(), &text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn glued_tokens_keep_their_text() {
        let tokens = lex("** x");
        let events = vec![
            Event::start(SyntaxKind::ROOT),
            Event::start(SyntaxKind::TITLE),
            Event::Token {
                kind: SyntaxKind::STARS,
                n_raw_tokens: 2,
            },
            Event::token(SyntaxKind::WHITESPACE),
            Event::token(SyntaxKind::TEXT),
            Event::Finish,
            Event::Finish,
        ];

        let tree = Sink::new(&tokens, events).finish();

        assert_eq!(tree.text().to_string(), "** x");
        let title = tree.children().next().unwrap();
        let stars = title.first_token().unwrap();
        assert_eq!(stars.kind(), SyntaxKind::STARS);
        assert_eq!(stars.text(), "**");
    }

    #[test]
    fn forward_parent_wraps_earlier_node() {
        let tokens = lex("a");
        let events = vec![
            Event::start(SyntaxKind::ROOT),
            Event::Start {
                kind: SyntaxKind::ITEM,
                forward_parent: Some(4),
            },
            Event::token(SyntaxKind::TEXT),
            Event::Finish,
            Event::start(SyntaxKind::PLAIN_LIST),
            Event::Finish,
            Event::Finish,
        ];

        let tree = Sink::new(&tokens, events).finish();

        let list = tree.children().next().unwrap();
        assert_eq!(list.kind(), SyntaxKind::PLAIN_LIST);
        assert_eq!(list.children().next().unwrap().kind(), SyntaxKind::ITEM);
    }
}
