//! # Grammar Rules
//!
//! Each rule takes a `&mut Parser` and uses its methods to:
//!
//! 1. Inspect the current token (`p.current()`, `p.at()`)
//! 2. Consume tokens (`p.bump()`, `p.bump_attached()`)
//! 3. Build tree structure (`p.node(KIND, |p| ...)`)
//!
//! ## Module Structure
//!
//! - [`block`] - Paragraphs, escapes and the non-heading detached modifiers
//! - [`heading`] - The heading hierarchy
//!
//! ## Ordered Choice
//!
//! Wherever more than one construct may start, the grammar tries a fixed,
//! prioritised list of [`Rule`]s and takes the first one whose leading token
//! matches. The lists are:
//!
//! | Context          | Rules, highest priority first                                       |
//! |------------------|---------------------------------------------------------------------|
//! | document         | standalone break, escape, paragraph, delimiter, heading, modifier   |
//! | heading level L  | paragraph, standalone break, modifier, heading of level > L         |
//!
//! Every construct is keyed by a distinct leading token, so the priority
//! order only matters where two rules could claim the same token. A context
//! with no matching rule either fails (document) or ends (heading content).
//!
//! ## Failure
//!
//! Rules return `Result`. Nothing is recovered: the first error unwinds to
//! [`document`] and the parse fails.

mod block;
mod heading;

use crate::parser::{ParseError, Parser};
use crate::syntax_kind::SyntaxKind;

/// One alternative of an ordered choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    StandaloneBreak,
    Escape,
    Paragraph,
    ParagraphDelimiter,
    /// Headings strictly deeper than the enclosing level.
    Heading,
    /// Quotes and unordered list items.
    DetachedModifier,
}

/// Alternatives at the top level of a document.
const DOCUMENT_RULES: [Rule; 6] = [
    Rule::StandaloneBreak,
    Rule::Escape,
    Rule::Paragraph,
    Rule::ParagraphDelimiter,
    Rule::Heading,
    Rule::DetachedModifier,
];

/// Alternatives inside a heading's content.
const HEADING_CONTENT_RULES: [Rule; 4] = [
    Rule::Paragraph,
    Rule::StandaloneBreak,
    Rule::DetachedModifier,
    Rule::Heading,
];

impl Rule {
    /// Whether this rule can start at `kind` inside a construct of level
    /// `enclosing` (0 for the document).
    fn starts_with(self, kind: SyntaxKind, enclosing: u8) -> bool {
        match self {
            Rule::StandaloneBreak => kind == SyntaxKind::STANDALONE_BREAK,
            Rule::Escape => kind == SyntaxKind::ESCAPE_PREFIX,
            Rule::Paragraph => kind == SyntaxKind::PARAGRAPH_SEGMENT,
            Rule::ParagraphDelimiter => kind == SyntaxKind::PARAGRAPH_DELIMITER,
            Rule::Heading => kind
                .heading_level()
                .is_some_and(|level| kind.is_token() && level > enclosing),
            Rule::DetachedModifier => kind.is_detached_modifier_prefix(),
        }
    }

    fn parse(self, p: &mut Parser<'_, '_>) -> Result<(), ParseError> {
        match self {
            Rule::StandaloneBreak | Rule::ParagraphDelimiter => {
                p.bump();
                Ok(())
            }
            Rule::Escape => block::escape_sequence(p),
            Rule::Paragraph => block::paragraph(p),
            Rule::Heading => heading::heading(p),
            Rule::DetachedModifier => block::detached_modifier(p),
        }
    }
}

/// Try `rules` in order at the current token.
///
/// Returns `None` when no rule starts here; nothing is consumed in that case.
fn ordered_choice(
    p: &mut Parser<'_, '_>,
    rules: &[Rule],
    enclosing: u8,
) -> Option<Result<(), ParseError>> {
    let kind = p.current();
    let rule = rules.iter().find(|rule| rule.starts_with(kind, enclosing))?;
    log::trace!("{rule:?} at {:?} ({kind:?})", p.offset());
    Some(rule.parse(p))
}

/// Parse the root document.
///
/// Creates a DOCUMENT node containing all top-level blocks. Every token must
/// be claimed by some rule.
pub fn document(p: &mut Parser<'_, '_>) -> Result<(), ParseError> {
    p.node(SyntaxKind::DOCUMENT, |p| {
        p.eat_trivia();
        while !p.at_end() {
            match ordered_choice(p, &DOCUMENT_RULES, 0) {
                Some(result) => result?,
                None => return Err(p.unexpected()),
            }
        }
        Ok(())
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Token, lex};
    use crate::parser::{ParseOptions, parse_tokens};
    use crate::syntax_kind::SyntaxKind::*;
    use rowan::TextSize;

    #[test]
    fn document_rules_are_prioritised() {
        assert_eq!(DOCUMENT_RULES[0], Rule::StandaloneBreak);
        assert_eq!(HEADING_CONTENT_RULES[0], Rule::Paragraph);
        assert!(!HEADING_CONTENT_RULES.contains(&Rule::Escape));
        assert!(!HEADING_CONTENT_RULES.contains(&Rule::ParagraphDelimiter));
    }

    #[test]
    fn heading_rule_only_accepts_deeper_prefixes() {
        assert!(Rule::Heading.starts_with(HEADING1_PREFIX, 0));
        assert!(Rule::Heading.starts_with(HEADING3_PREFIX, 2));
        assert!(!Rule::Heading.starts_with(HEADING2_PREFIX, 2));
        assert!(!Rule::Heading.starts_with(HEADING1_PREFIX, 2));
        assert!(!Rule::Heading.starts_with(HEADING3, 0));
    }

    #[test]
    fn ordered_choice_consumes_nothing_without_a_match() {
        let tokens = lex("\\x");
        let mut p = Parser::new(&tokens, ParseOptions::default());
        assert!(ordered_choice(&mut p, &HEADING_CONTENT_RULES, 1).is_none());
        assert_eq!(p.current(), ESCAPE_PREFIX);
    }

    #[test]
    fn stray_token_at_document_level_is_rejected() {
        let tokens = vec![
            Token::new(PARAGRAPH_SEGMENT, "text"),
            Token::new(LINE_ENDING, "\n"),
            Token::new(ANY_CHAR, "x"),
        ];
        let error = parse_tokens(&tokens, &ParseOptions::default()).unwrap_err();
        assert_eq!(
            error,
            ParseError::UnrecognizedToken {
                kind: ANY_CHAR,
                offset: TextSize::from(5),
            }
        );
    }

    #[test]
    fn node_kinds_in_the_stream_are_rejected() {
        let tokens = vec![Token::new(QUOTE, "> x")];
        let error = parse_tokens(&tokens, &ParseOptions::default()).unwrap_err();
        assert!(matches!(
            error,
            ParseError::UnrecognizedToken { kind: QUOTE, .. }
        ));
    }
}
