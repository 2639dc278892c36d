//! Paragraphs, escapes and the non-heading detached modifiers.

use crate::parser::{ParseError, Parser};
use crate::syntax_kind::SyntaxKind;

/// Parse a paragraph: the longest run of contiguous segments.
///
/// Must be called at a `PARAGRAPH_SEGMENT`. Line endings between segments are
/// trivia and do not interrupt the run; a blank line or any prefix does.
pub(super) fn paragraph(p: &mut Parser<'_, '_>) -> Result<(), ParseError> {
    if !p.at(SyntaxKind::PARAGRAPH_SEGMENT) {
        return Err(p.unexpected());
    }

    p.node(SyntaxKind::PARAGRAPH, |p| {
        while p.at(SyntaxKind::PARAGRAPH_SEGMENT) {
            p.bump();
        }
        Ok(())
    })?;
    Ok(())
}

/// Parse an escape: the prefix and the character glued to it.
pub(super) fn escape_sequence(p: &mut Parser<'_, '_>) -> Result<(), ParseError> {
    let offset = p.offset();
    p.node(SyntaxKind::ESCAPE_SEQUENCE, |p| {
        p.bump_attached();
        if !p.at(SyntaxKind::ANY_CHAR) {
            return Err(ParseError::DanglingEscape { offset });
        }
        p.bump();
        Ok(())
    })?;
    Ok(())
}

/// Parse a quote or an unordered list item.
pub(super) fn detached_modifier(p: &mut Parser<'_, '_>) -> Result<(), ParseError> {
    match p.current() {
        SyntaxKind::QUOTE_PREFIX => quote(p),
        SyntaxKind::UNORDERED_LIST_PREFIX => unordered_list_item(p),
        _ => Err(p.unexpected()),
    }
}

/// A quote holds exactly one segment.
fn quote(p: &mut Parser<'_, '_>) -> Result<(), ParseError> {
    p.node(SyntaxKind::QUOTE, |p| {
        p.bump();
        if !p.at(SyntaxKind::PARAGRAPH_SEGMENT) {
            return Err(p.unexpected());
        }
        p.bump();
        Ok(())
    })?;
    Ok(())
}

/// A list item holds one paragraph, which may span several lines.
fn unordered_list_item(p: &mut Parser<'_, '_>) -> Result<(), ParseError> {
    p.node(SyntaxKind::UNORDERED_LIST_ITEM, |p| {
        p.bump();
        paragraph(p)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::parser::{ParseError, parse};
    use crate::syntax_kind::{SyntaxKind, SyntaxNode};
    use pretty_assertions::assert_eq;
    use rowan::TextSize;

    fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
        node.children().map(|child| child.kind()).collect()
    }

    #[test]
    fn paragraph_spans_contiguous_lines() {
        let tree = parse("one\ntwo\nthree\n").unwrap().syntax();
        assert_eq!(kinds(&tree), vec![SyntaxKind::PARAGRAPH]);

        let para = tree.first_child().unwrap();
        let segments = para
            .children_with_tokens()
            .filter(|element| element.kind() == SyntaxKind::PARAGRAPH_SEGMENT)
            .count();
        assert_eq!(segments, 3);
    }

    #[test]
    fn blank_line_splits_paragraphs() {
        let tree = parse("one\n\ntwo\n").unwrap().syntax();
        assert_eq!(kinds(&tree), vec![SyntaxKind::PARAGRAPH, SyntaxKind::PARAGRAPH]);
        let breaks = tree
            .children_with_tokens()
            .filter(|element| element.kind() == SyntaxKind::STANDALONE_BREAK)
            .count();
        assert_eq!(breaks, 1);
    }

    #[test]
    fn parse_quote() {
        let tree = parse("> quoted text\n").unwrap().syntax();
        assert_eq!(kinds(&tree), vec![SyntaxKind::QUOTE]);
    }

    #[test]
    fn quote_is_a_single_line() {
        let tree = parse("> quoted\nafter\n").unwrap().syntax();
        assert_eq!(kinds(&tree), vec![SyntaxKind::QUOTE, SyntaxKind::PARAGRAPH]);
    }

    #[test]
    fn parse_list_items() {
        let tree = parse("- one\n- two\n  continued\n").unwrap().syntax();
        assert_eq!(
            kinds(&tree),
            vec![SyntaxKind::UNORDERED_LIST_ITEM, SyntaxKind::UNORDERED_LIST_ITEM]
        );
        let second = tree.children().nth(1).unwrap();
        assert_eq!(second.text().to_string(), "- two\n  continued\n");
    }

    #[test]
    fn parse_escape() {
        let tree = parse("\\*").unwrap().syntax();
        assert_eq!(kinds(&tree), vec![SyntaxKind::ESCAPE_SEQUENCE]);
    }

    #[test]
    fn escape_followed_by_text() {
        let tree = parse("\\* not a heading\n").unwrap().syntax();
        assert_eq!(
            kinds(&tree),
            vec![SyntaxKind::ESCAPE_SEQUENCE, SyntaxKind::PARAGRAPH]
        );
    }

    #[test]
    fn dangling_escape_at_end_of_input() {
        let error = parse("text\n\\").unwrap_err();
        assert_eq!(
            error,
            ParseError::DanglingEscape {
                offset: TextSize::from(5)
            }
        );
    }

    #[test]
    fn dangling_escape_before_line_ending() {
        let error = parse("\\\nmore").unwrap_err();
        assert_eq!(
            error,
            ParseError::DanglingEscape {
                offset: TextSize::from(0)
            }
        );
    }

    #[test]
    fn quote_without_content() {
        let error = parse("> ").unwrap_err();
        assert_eq!(
            error,
            ParseError::UnrecognizedToken {
                kind: SyntaxKind::EOF,
                offset: TextSize::from(2)
            }
        );
    }

    #[test]
    fn list_item_without_content() {
        let error = parse("-\n\nafter").unwrap_err();
        assert_eq!(
            error,
            ParseError::UnrecognizedToken {
                kind: SyntaxKind::STANDALONE_BREAK,
                offset: TextSize::from(2)
            }
        );
    }

    #[test]
    fn text_preservation() {
        let input = "> Quote\n\n- Item\n  more\n\\- literal\n";
        let tree = parse(input).unwrap().syntax();
        assert_eq!(tree.text().to_string(), input);
    }
}
