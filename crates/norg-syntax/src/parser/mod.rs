//! # Parser - Event-Based Tree Construction
//!
//! This module implements the grammar compositor: it turns a typed token
//! stream into a syntax tree using the **event-based** architecture from
//! rust-analyzer.
//!
//! ## The Event Model
//!
//! Parsing produces events like:
//! ```text
//! Start(HEADING1)
//! Token(HEADING1_PREFIX)
//! Token(PARAGRAPH_SEGMENT)
//! Token(LINE_ENDING)
//! Finish
//! ```
//!
//! The [`Sink`] processes these in order, calling `start_node()` for Start,
//! `token()` for Token, and `finish_node()` for Finish.
//!
//! ## The Marker System
//!
//! When you call `parser.start()`, you get a [`Marker`]. This marker **must**
//! be either:
//!
//! - Completed with `marker.complete(parser, KIND)` → emits Start+Finish
//! - Abandoned with `marker.abandon(parser)` → removes the placeholder
//!
//! If you drop a marker without doing either, **the program panics**. Rules
//! that can fail use [`Parser::node`], which completes the marker on success
//! and abandons it on error, so `?` can be used freely inside the rule.
//!
//! ## Trivia
//!
//! [`Parser::bump`] consumes a token together with the indentation and line
//! ending trivia that follow it. The current token is therefore never trivia,
//! and trivia ends up inside the node that precedes it.
//!
//! ## Failure
//!
//! There is no recovery. The first [`ParseError`] aborts the parse and the
//! events collected so far are dropped.
//!
//! ## Public API
//!
//! ```
//! use norg_syntax::parse;
//!
//! let parse = parse("* Hello\n").unwrap();
//! assert_eq!(parse.syntax().text().to_string(), "* Hello\n");
//! ```

pub mod error;
pub mod event;
pub mod sink;

mod grammar;

use rowan::{GreenNode, TextSize};

use crate::ast::{AstNode, Document};
use crate::lexer::{NorgLexer, Token, TokenSource};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
pub use error::ParseError;
use event::Event;
use sink::Sink;

/// Default ceiling on heading nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest heading nesting accepted before the parse fails with
    /// [`ParseError::DepthLimitExceeded`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A successfully parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    green: GreenNode,
}

impl Parse {
    /// The untyped root node.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// The typed root node.
    pub fn document(&self) -> Document {
        Document::cast(self.syntax()).expect("parser always produces a DOCUMENT root")
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }
}

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth_raw()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `bump_attached()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`, or `node()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    /// Byte offset of each token, plus one trailing entry for end of input.
    offsets: Vec<TextSize>,
    pos: usize,
    events: Vec<Event>,
    depth: usize,
    options: ParseOptions,
}

impl<'t, 'input> Parser<'t, 'input> {
    /// Create a new parser from a slice of tokens.
    pub fn new(tokens: &'t [Token<'input>], options: ParseOptions) -> Self {
        let mut offsets = Vec::with_capacity(tokens.len() + 1);
        let mut offset = TextSize::from(0);
        offsets.push(offset);
        for token in tokens {
            offset += TextSize::of(token.text);
            offsets.push(offset);
        }

        Self {
            tokens,
            offsets,
            pos: 0,
            events: Vec::new(),
            depth: 0,
            options,
        }
    }

    /// Parse the tokens into a green tree.
    pub fn parse(mut self) -> Result<Parse, ParseError> {
        log::debug!(
            "parsing {} tokens (max depth {})",
            self.tokens.len(),
            self.options.max_depth
        );

        if let Err(error) = grammar::document(&mut self) {
            log::warn!("parse aborted: {error}");
            return Err(error);
        }

        let green = Sink::new(self.tokens, self.events).finish();
        log::debug!("parse finished");
        Ok(Parse { green })
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

    /// Run `rule` inside a node of the given kind.
    ///
    /// The node is completed when the rule succeeds and abandoned when it
    /// fails.
    pub fn node(
        &mut self,
        kind: SyntaxKind,
        rule: impl FnOnce(&mut Self) -> Result<(), ParseError>,
    ) -> Result<CompletedMarker, ParseError> {
        let m = self.start();
        match rule(self) {
            Ok(()) => Ok(m.complete(self, kind)),
            Err(error) => {
                m.abandon(self);
                Err(error)
            }
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth_raw(0)
    }

    /// Look ahead n raw tokens, trivia included.
    pub fn nth_raw(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token and any trivia after it.
    pub fn bump(&mut self) {
        self.bump_attached();
        self.eat_trivia();
    }

    /// Consume exactly the current token, leaving following trivia alone.
    pub fn bump_attached(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume trivia tokens at the cursor.
    pub fn eat_trivia(&mut self) {
        while self.current().is_trivia() {
            self.bump_attached();
        }
    }

    /// Byte offset of the current token (source length at end of input).
    pub fn offset(&self) -> TextSize {
        self.offsets[self.pos.min(self.tokens.len())]
    }

    /// Text of the current token.
    pub fn current_text(&self) -> &'input str {
        self.tokens.get(self.pos).map(|t| t.text).unwrap_or("")
    }

    /// Enter one more level of nesting.
    pub fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                depth: self.depth,
                limit: self.options.max_depth,
                offset: self.offset(),
            });
        }
        Ok(())
    }

    /// Leave a level entered with [`Parser::enter`].
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// The error for a token no rule accepts here.
    pub fn unexpected(&self) -> ParseError {
        ParseError::UnrecognizedToken {
            kind: self.current(),
            offset: self.offset(),
        }
    }
}

/// A marker for a node being constructed.
///
/// When you call `parser.start()`, a `Placeholder` event is pushed and you
/// get a `Marker` pointing to it.
///
/// ## The Must-Use Contract
///
/// The `#[must_use]` attribute and the `Drop` impl together enforce that
/// every marker is either:
///
/// - **Completed** via `marker.complete(parser, KIND)` - converts the
///   placeholder to a `Start` event and pushes a `Finish` event
/// - **Abandoned** via `marker.abandon(parser)` - removes the placeholder
///   (only works if nothing was pushed after it)
///
/// If you drop a marker without doing either, **the program panics**. This
/// catches bugs at runtime rather than producing corrupt trees.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) -> CompletedMarker {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
        CompletedMarker { kind }
    }

    /// Abandon this marker without creating a node.
    ///
    /// **Note**: This only removes the placeholder if it's the last event.
    /// If other events were pushed after `start()`, the placeholder becomes
    /// inert and is ignored by the Sink.
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

/// A marker for a node that has been completed.
#[derive(Debug, Clone, Copy)]
pub struct CompletedMarker {
    kind: SyntaxKind,
}

impl CompletedMarker {
    pub fn kind(self) -> SyntaxKind {
        self.kind
    }
}

/// Parse Norg source into a syntax tree with default options.
pub fn parse(source: &str) -> Result<Parse, ParseError> {
    parse_with(source, &ParseOptions::default())
}

/// Parse Norg source with explicit options.
pub fn parse_with(source: &str, options: &ParseOptions) -> Result<Parse, ParseError> {
    parse_with_source(source, &NorgLexer, options)
}

/// Parse Norg source tokenized by a caller-supplied [`TokenSource`].
pub fn parse_with_source(
    source: &str,
    token_source: &impl TokenSource,
    options: &ParseOptions,
) -> Result<Parse, ParseError> {
    let tokens = token_source.tokenize(source);
    parse_tokens(&tokens, options)
}

/// Parse an already tokenized stream.
pub fn parse_tokens(tokens: &[Token<'_>], options: &ParseOptions) -> Result<Parse, ParseError> {
    Parser::new(tokens, *options).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_input() {
        let tree = parse("").unwrap().syntax();
        assert_eq!(tree.kind(), SyntaxKind::DOCUMENT);
        assert_eq!(tree.children().count(), 0);
    }

    #[test]
    fn parse_whitespace_only_input() {
        let tree = parse("   ").unwrap().syntax();
        assert_eq!(tree.children().count(), 0);
        assert_eq!(tree.text().to_string(), "   ");
    }

    #[test]
    fn parse_preserves_all_text() {
        let input = "Hello, world!";
        let tree = parse(input).unwrap().syntax();
        assert_eq!(tree.text(), input);
    }

    #[test]
    fn parse_simple_paragraph() {
        let tree = parse("Hello").unwrap().syntax();

        assert_eq!(tree.kind(), SyntaxKind::DOCUMENT);
        let para = tree.children().next().unwrap();
        assert_eq!(para.kind(), SyntaxKind::PARAGRAPH);
    }

    #[test]
    fn offsets_track_token_text() {
        let tokens = lex("* a\nb");
        let mut parser = Parser::new(&tokens, ParseOptions::default());
        assert_eq!(parser.offset(), TextSize::from(0));
        parser.bump();
        assert_eq!(parser.offset(), TextSize::from(2));
        assert_eq!(parser.current_text(), "a");
        parser.bump();
        // the line ending went with the title
        assert_eq!(parser.offset(), TextSize::from(4));
        assert_eq!(parser.current(), SyntaxKind::PARAGRAPH_SEGMENT);
        parser.bump();
        assert!(parser.at_end());
        assert_eq!(parser.offset(), TextSize::from(5));
        assert_eq!(parser.current(), SyntaxKind::EOF);
    }

    #[test]
    fn bump_attached_leaves_trivia() {
        let tokens = lex("\\\n");
        let mut parser = Parser::new(&tokens, ParseOptions::default());
        parser.bump_attached();
        assert_eq!(parser.current(), SyntaxKind::LINE_ENDING);
    }

    #[test]
    fn depth_guard() {
        let tokens = lex("");
        let mut parser = Parser::new(&tokens, ParseOptions { max_depth: 1 });
        assert_eq!(parser.enter(), Ok(()));
        assert!(matches!(
            parser.enter(),
            Err(ParseError::DepthLimitExceeded {
                depth: 2,
                limit: 1,
                ..
            })
        ));
        parser.leave();
        parser.leave();
        assert_eq!(parser.enter(), Ok(()));
    }

    #[test]
    fn failed_node_is_abandoned() {
        let tokens = lex("x");
        let mut parser = Parser::new(&tokens, ParseOptions::default());
        let result = parser.node(SyntaxKind::PARAGRAPH, |p| Err(p.unexpected()));
        assert!(result.is_err());
        assert!(parser.events.is_empty());
    }

    #[test]
    fn marker_must_be_completed() {
        let result = std::panic::catch_unwind(|| {
            let tokens = lex("test");
            let mut parser = Parser::new(&tokens, ParseOptions::default());
            let _marker = parser.start();
            // Marker dropped without completion - should panic
        });
        assert!(result.is_err());
    }

    #[test]
    fn marker_can_be_abandoned() {
        let tokens = lex("test");
        let mut parser = Parser::new(&tokens, ParseOptions::default());
        let marker = parser.start();
        marker.abandon(&mut parser);
        // Should not panic
    }
}
