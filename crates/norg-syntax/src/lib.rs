//! # norg-syntax
//!
//! A lossless, block-level syntax tree for the Norg markup notation using
//! [Rowan] + [Logos], following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## What It Parses
//!
//! Norg organises text into a strict heading hierarchy (`*` to `******`),
//! single-line quotes (`>`), unordered list items (`-`), paragraphs, blank
//! lines, `===` paragraph delimiters and line-start escapes (`\*`).
//!
//! The central rule is **strict nesting**: a heading only ever contains
//! headings deeper than itself. A heading of the same or a shallower level
//! closes it.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → TokenSource → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)                (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! The grammar only sees typed tokens: heading prefixes for six levels, quote
//! and list prefixes, paragraph segments, escapes, delimiters and blank lines.
//! Tokenizing is behind the [`TokenSource`](lexer::TokenSource) trait;
//! [`NorgLexer`](lexer::NorgLexer) is the default implementation.
//!
//! ### 2. Parser ([`parser`] module)
//!
//! A recursive-descent parser that walks the tokens once, left to right, and
//! emits **events**. Where several constructs could start, the grammar tries
//! a fixed, prioritised list of alternatives.
//!
//! ### 3. Sink ([`parser::sink`] module)
//!
//! The sink builds a Rowan green tree from the events. The typed views in
//! [`ast`] sit on top of it.
//!
//! ## Errors
//!
//! Parsing is all or nothing. A heading prefix with no title, an escape with
//! nothing to escape, a token no rule accepts, or nesting beyond
//! [`ParseOptions::max_depth`] each yield a [`ParseError`] carrying the byte
//! offset where it happened. No partial tree is returned.
//!
//! ## Module Structure
//!
//! ```text
//! norg-syntax/
//! ├── lib.rs           # This file - public API and integration tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # TokenSource trait and the Logos-based NorgLexer
//! ├── ast.rs           # Typed views: Document, Block, Heading, ...
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, public parse functions
//!     ├── error.rs     # ParseError
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs   # Document root and the ordered-choice rule tables
//!         ├── block.rs # Paragraphs, escapes, quotes, list items
//!         └── heading.rs # The heading hierarchy
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use norg_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("* Hello\n").unwrap().syntax();
//!
//! // The tree preserves all text
//! assert_eq!(tree.text().to_string(), "* Hello\n");
//!
//! // Navigate the tree structure
//! assert_eq!(tree.kind(), SyntaxKind::DOCUMENT);
//! let heading = tree.children().next().unwrap();
//! assert_eq!(heading.kind(), SyntaxKind::HEADING1);
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use parser::{
    DEFAULT_MAX_DEPTH, Parse, ParseError, ParseOptions, parse, parse_tokens, parse_with,
    parse_with_source,
};
pub use syntax_kind::{
    MAX_HEADING_LEVEL, NorgLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken,
};
