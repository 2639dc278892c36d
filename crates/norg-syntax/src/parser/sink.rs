//! Sink for converting parser events into a Rowan green tree.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::lexer::Token;
use crate::parser::event::Event;

/// Converts parser events and tokens into a Rowan green tree.
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

    /// Consume the sink and build the green tree.
    pub fn finish(mut self) -> GreenNode {
        for event in std::mem::take(&mut self.events) {
            match event {
                Event::Start { kind } => self.builder.start_node(kind.into()),
                Event::Token { kind } => {
                    let text = self.tokens[self.cursor].text;
                    self.cursor += 1;
                    self.builder.token(kind.into(), text);
                }
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }

        debug_assert_eq!(self.cursor, self.tokens.len(), "every token must be sunk");
        self.builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax_kind::{SyntaxKind, SyntaxNode};

    fn token(kind: SyntaxKind, text: &str) -> Token<'_> {
        Token { kind, text }
    }

    #[test]
    fn sink_builds_simple_tree() {
        let tokens = vec![token(SyntaxKind::PARAGRAPH_SEGMENT, "hello")];

        let events = vec![
            Event::start(SyntaxKind::DOCUMENT),
            Event::start(SyntaxKind::PARAGRAPH),
            Event::token(SyntaxKind::PARAGRAPH_SEGMENT),
            Event::Finish,
            Event::Finish,
        ];

        let tree = SyntaxNode::new_root(Sink::new(&tokens, events).finish());

        assert_eq!(tree.kind(), SyntaxKind::DOCUMENT);
        assert_eq!(tree.children().count(), 1);
        assert_eq!(tree.text().to_string(), "hello");
    }

    #[test]
    fn sink_skips_placeholders() {
        let tokens = vec![
            token(SyntaxKind::QUOTE_PREFIX, "> "),
            token(SyntaxKind::PARAGRAPH_SEGMENT, "quoted"),
        ];

        let events = vec![
            Event::start(SyntaxKind::DOCUMENT),
            Event::Placeholder,
            Event::start(SyntaxKind::QUOTE),
            Event::token(SyntaxKind::QUOTE_PREFIX),
            Event::token(SyntaxKind::PARAGRAPH_SEGMENT),
            Event::Finish,
            Event::Finish,
        ];

        let tree = SyntaxNode::new_root(Sink::new(&tokens, events).finish());

        let quote = tree.first_child().unwrap();
        assert_eq!(quote.kind(), SyntaxKind::QUOTE);
        assert_eq!(tree.text().to_string(), "> quoted");
    }
}
