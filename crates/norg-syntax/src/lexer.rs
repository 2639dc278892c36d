//! # Lexer - Tokenizing Norg Source
//!
//! The grammar core never looks at characters. It consumes typed tokens from a
//! [`TokenSource`], which keeps the tokenizer swappable and lets tests drive
//! the parser from hand-built token fixtures. This module provides the
//! default source, [`NorgLexer`].
//!
//! ## Two Stages
//!
//! ```text
//! Source Text → RawKind runs → line classifier → Tokens
//!               (Logos)
//! ```
//!
//! 1. [Logos] splits the input into **context-free runs**: a run of `*`, a run
//!    of `>`, horizontal whitespace, a line ending, other text, and so on.
//! 2. The line classifier walks those runs one physical line at a time. Norg
//!    prefixes only mean something at the start of a line, so this is where a
//!    `**` becomes a [`HEADING2_PREFIX`] and where the rest of the line becomes
//!    a [`PARAGRAPH_SEGMENT`].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Line Classification
//!
//! | Line starts with                         | Tokens                                   |
//! |------------------------------------------|------------------------------------------|
//! | only whitespace, then a line ending      | `STANDALONE_BREAK` (the whole line)      |
//! | `*`×n then whitespace                    | `HEADING{min(n,6)}_PREFIX`               |
//! | `>` then whitespace                      | `QUOTE_PREFIX`                           |
//! | `-` then whitespace                      | `UNORDERED_LIST_PREFIX`                  |
//! | `===` (three or more) then whitespace    | `PARAGRAPH_DELIMITER`                    |
//! | `\`                                      | `ESCAPE_PREFIX`, `ANY_CHAR`              |
//!
//! Whatever follows on the line is one `PARAGRAPH_SEGMENT`. Indentation before
//! the first token is `WHITESPACE` trivia and the line ending of a non-blank
//! line is `LINE_ENDING` trivia.
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token:
//!
//! ```
//! use norg_syntax::lexer::lex;
//!
//! let input = "* Hello\n> quoted\n";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! [`HEADING2_PREFIX`]: SyntaxKind::HEADING2_PREFIX
//! [`PARAGRAPH_SEGMENT`]: SyntaxKind::PARAGRAPH_SEGMENT

use std::ops::Range;

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Minimum run of `=` that forms a paragraph delimiter.
const DELIMITER_MIN_LEN: usize = 3;

/// Context-free runs produced by the Logos stage.
///
/// No variant is skipped; every byte of the input lands in some run. Bytes
/// Logos cannot match (a lone `\r`) are treated as [`RawKind::Text`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    /// Horizontal whitespace (spaces, tabs)
    #[regex(r"[ \t]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// Heading markers
    #[regex(r"\*+")]
    Stars,

    /// Quote markers
    #[regex(r">+")]
    Gts,

    /// List markers
    #[regex(r"-+")]
    Dashes,

    /// Paragraph delimiter markers
    #[regex(r"=+")]
    Equals,

    /// Escape marker
    #[token("\\")]
    Backslash,

    /// Anything else
    #[regex(r"[^ \t\r\n*>=\\-]+")]
    Text,
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: SyntaxKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// Anything that can turn source text into the typed token stream the
/// grammar consumes.
///
/// Implementations must keep the lossless property: the texts of the returned
/// tokens, concatenated, are exactly `input`.
pub trait TokenSource {
    fn tokenize<'a>(&self, input: &'a str) -> Vec<Token<'a>>;
}

/// The default Norg tokenizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NorgLexer;

impl TokenSource for NorgLexer {
    fn tokenize<'a>(&self, input: &'a str) -> Vec<Token<'a>> {
        lex(input)
    }
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, Range<usize>)> {
    let raw = raw_runs(input);
    let mut classifier = LineClassifier {
        input,
        raw: &raw,
        pos: 0,
        tokens: Vec::new(),
    };

    while classifier.pos < raw.len() {
        classifier.line();
    }

    log::trace!(
        "lexed {} bytes into {} runs and {} tokens",
        input.len(),
        raw.len(),
        classifier.tokens.len()
    );
    classifier.tokens
}

/// A run from the Logos stage.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Raw {
    kind: RawKind,
    span: Range<usize>,
}

impl Raw {
    fn len(&self) -> usize {
        self.span.len()
    }
}

fn raw_runs(input: &str) -> Vec<Raw> {
    let mut runs = Vec::new();
    let mut lexer = RawKind::lexer(input);

    while let Some(result) = lexer.next() {
        // Logos error means unrecognized character - treat as text
        let kind = result.unwrap_or(RawKind::Text);
        runs.push(Raw {
            kind,
            span: lexer.span(),
        });
    }

    runs
}

struct LineClassifier<'i, 'r> {
    input: &'i str,
    raw: &'r [Raw],
    pos: usize,
    tokens: Vec<(Token<'i>, Range<usize>)>,
}

impl<'i> LineClassifier<'i, '_> {
    fn emit(&mut self, kind: SyntaxKind, span: Range<usize>) {
        if span.is_empty() {
            return;
        }
        let text = &self.input[span.clone()];
        self.tokens.push((Token::new(kind, text), span));
    }

    /// Classify one physical line, leaving `pos` at the start of the next.
    fn line(&mut self) {
        let start = self.pos;
        let newline = self.raw[start..]
            .iter()
            .position(|r| r.kind == RawKind::Newline)
            .map(|offset| start + offset);
        let content_end = newline.unwrap_or(self.raw.len());
        let content_end_byte = newline.map_or(self.input.len(), |nl| self.raw[nl].span.start);

        let mut i = start;
        let indent = if self.raw[i].kind == RawKind::Whitespace {
            i += 1;
            Some(self.raw[start].span.clone())
        } else {
            None
        };

        if i == content_end {
            match newline {
                Some(nl) => {
                    let span = self.raw[start].span.start..self.raw[nl].span.end;
                    self.emit(SyntaxKind::STANDALONE_BREAK, span);
                }
                None => {
                    if let Some(span) = indent {
                        self.emit(SyntaxKind::WHITESPACE, span);
                    }
                }
            }
            self.pos = content_end + 1;
            return;
        }

        if let Some(span) = indent {
            self.emit(SyntaxKind::WHITESPACE, span);
        }

        let rest = self.prefix(i, content_end, newline.is_some());
        self.emit(SyntaxKind::PARAGRAPH_SEGMENT, rest..content_end_byte);

        if let Some(nl) = newline {
            self.emit(SyntaxKind::LINE_ENDING, self.raw[nl].span.clone());
        }
        self.pos = content_end + 1;
    }

    /// Emit the line-start prefix at run `i`, if any, and return the byte
    /// offset where the line's segment begins.
    fn prefix(&mut self, i: usize, content_end: usize, has_newline: bool) -> usize {
        let raw = self.raw;
        let first = &raw[i];
        let next = (i + 1 < content_end).then(|| &raw[i + 1]);
        let at_eof = next.is_none() && !has_newline;
        let spaced = match next {
            Some(next) => next.kind == RawKind::Whitespace,
            None => has_newline,
        };
        // The marker swallows the whitespace that separates it from its content.
        let marker_end = match next {
            Some(next) if next.kind == RawKind::Whitespace => next.span.end,
            _ => first.span.end,
        };

        let kind = match first.kind {
            RawKind::Stars if spaced => {
                let level = first.len().min(u8::MAX as usize) as u8;
                SyntaxKind::heading_prefix(level)
            }
            RawKind::Gts if spaced && first.len() == 1 => Some(SyntaxKind::QUOTE_PREFIX),
            RawKind::Dashes if spaced && first.len() == 1 => {
                Some(SyntaxKind::UNORDERED_LIST_PREFIX)
            }
            RawKind::Equals if (spaced || at_eof) && first.len() >= DELIMITER_MIN_LEN => {
                Some(SyntaxKind::PARAGRAPH_DELIMITER)
            }
            RawKind::Backslash => return self.escape(i, content_end),
            _ => None,
        };

        match kind {
            Some(kind) => {
                self.emit(kind, first.span.start..marker_end);
                marker_end
            }
            None => first.span.start,
        }
    }

    /// `\` plus the one character glued to it.
    fn escape(&mut self, i: usize, content_end: usize) -> usize {
        let prefix = self.raw[i].span.clone();
        self.emit(SyntaxKind::ESCAPE_PREFIX, prefix.clone());

        if i + 1 >= content_end {
            return prefix.end;
        }
        let target_start = self.raw[i + 1].span.start;
        let target_len = self.input[target_start..]
            .chars()
            .next()
            .map_or(0, char::len_utf8);
        let target = target_start..target_start + target_len;
        self.emit(SyntaxKind::ANY_CHAR, target.clone());
        target.end
    }
}
