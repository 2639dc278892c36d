//! # Typed AST
//!
//! Thin, typed views over the untyped [`SyntaxNode`] tree. Each view wraps a
//! node (or, for the two blank-line blocks, a token) and exposes accessors for
//! the parts the grammar guarantees. Nothing is copied; the views borrow from
//! the same reference-counted green tree.
//!
//! ```
//! use norg_syntax::{parse, ast::Block};
//!
//! let doc = parse("* Intro\n** Sub\n").unwrap().document();
//! let Some(Block::Heading(intro)) = doc.blocks().next() else { panic!() };
//! assert_eq!(intro.level(), 1);
//! assert_eq!(intro.title_text().as_deref(), Some("Intro"));
//! ```

use crate::syntax_kind::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// A typed view over a syntax node.
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(node: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(
    /// The root of a parsed document.
    Document,
    DOCUMENT
);
ast_node!(
    /// A run of contiguous paragraph segments.
    Paragraph,
    PARAGRAPH
);
ast_node!(
    /// `\` plus the literal character it protects.
    Escape,
    ESCAPE_SEQUENCE
);
ast_node!(
    /// A heading of any level, with its title and nested content.
    Heading,
    HEADING1 | HEADING2 | HEADING3 | HEADING4 | HEADING5 | HEADING6
);
ast_node!(
    /// A single-line quote.
    Quote,
    QUOTE
);
ast_node!(
    /// One item of an unordered list.
    UnorderedListItem,
    UNORDERED_LIST_ITEM
);

/// A blank line separating blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StandaloneBreak(SyntaxToken);

/// An explicit `===` delimiter line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParagraphDelimiter(SyntaxToken);

impl StandaloneBreak {
    pub fn syntax(&self) -> &SyntaxToken {
        &self.0
    }
}

impl ParagraphDelimiter {
    pub fn syntax(&self) -> &SyntaxToken {
        &self.0
    }
}

/// Any block that can appear in a document or a heading.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Block {
    StandaloneBreak(StandaloneBreak),
    Escape(Escape),
    Paragraph(Paragraph),
    ParagraphDelimiter(ParagraphDelimiter),
    Heading(Heading),
    Quote(Quote),
    UnorderedListItem(UnorderedListItem),
}

impl Block {
    /// View a child element as a block, skipping trivia and the parts of a
    /// heading that are not content (prefix, title).
    pub fn cast(element: SyntaxElement) -> Option<Self> {
        match element {
            rowan::NodeOrToken::Token(token) => match token.kind() {
                SyntaxKind::STANDALONE_BREAK => Some(Block::StandaloneBreak(StandaloneBreak(token))),
                SyntaxKind::PARAGRAPH_DELIMITER => {
                    Some(Block::ParagraphDelimiter(ParagraphDelimiter(token)))
                }
                _ => None,
            },
            rowan::NodeOrToken::Node(node) => match node.kind() {
                SyntaxKind::ESCAPE_SEQUENCE => Some(Block::Escape(Escape(node))),
                SyntaxKind::PARAGRAPH => Some(Block::Paragraph(Paragraph(node))),
                SyntaxKind::QUOTE => Some(Block::Quote(Quote(node))),
                SyntaxKind::UNORDERED_LIST_ITEM => {
                    Some(Block::UnorderedListItem(UnorderedListItem(node)))
                }
                _ => Heading::cast(node).map(Block::Heading),
            },
        }
    }

    /// The source text covered by this block, trivia included.
    pub fn text(&self) -> String {
        match self {
            Block::StandaloneBreak(b) => b.syntax().text().to_string(),
            Block::ParagraphDelimiter(d) => d.syntax().text().to_string(),
            Block::Escape(e) => e.syntax().text().to_string(),
            Block::Paragraph(p) => p.syntax().text().to_string(),
            Block::Heading(h) => h.syntax().text().to_string(),
            Block::Quote(q) => q.syntax().text().to_string(),
            Block::UnorderedListItem(i) => i.syntax().text().to_string(),
        }
    }
}

fn blocks_of(node: &SyntaxNode) -> impl Iterator<Item = Block> + use<> {
    node.children_with_tokens().filter_map(Block::cast)
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == kind)
}

impl Document {
    /// Top-level blocks in source order.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + use<> {
        blocks_of(&self.0)
    }

    /// Top-level headings in source order.
    pub fn headings(&self) -> impl Iterator<Item = Heading> + use<> {
        self.0.children().filter_map(Heading::cast)
    }
}

impl Heading {
    pub fn level(&self) -> u8 {
        self.0
            .kind()
            .heading_level()
            .expect("Heading only wraps heading nodes")
    }

    /// The title segment.
    pub fn title(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::PARAGRAPH_SEGMENT)
    }

    pub fn title_text(&self) -> Option<String> {
        self.title().map(|token| token.text().trim_end().to_string())
    }

    /// Blocks nested under this heading, in source order.
    pub fn content(&self) -> impl Iterator<Item = Block> + use<> {
        blocks_of(&self.0)
    }

    /// Headings nested directly under this one.
    pub fn subheadings(&self) -> impl Iterator<Item = Heading> + use<> {
        self.0.children().filter_map(Heading::cast)
    }
}

impl Paragraph {
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind() == SyntaxKind::PARAGRAPH_SEGMENT)
    }

    /// Segment texts joined by newlines, without indentation or line endings.
    pub fn text(&self) -> String {
        self.segments()
            .map(|token| token.text().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Quote {
    pub fn content(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::PARAGRAPH_SEGMENT)
    }
}

impl UnorderedListItem {
    pub fn content(&self) -> Option<Paragraph> {
        self.0.children().find_map(Paragraph::cast)
    }
}

impl Escape {
    /// The escaped character.
    pub fn target(&self) -> Option<char> {
        first_token(&self.0, SyntaxKind::ANY_CHAR).and_then(|token| token.text().chars().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn document(input: &str) -> Document {
        parse(input).unwrap().document()
    }

    #[test]
    fn document_blocks_cover_every_variant() {
        let doc = document("\\*\ntext\n\n===\n* H\n> q\n");
        let blocks: Vec<_> = doc.blocks().collect();
        assert!(matches!(blocks[0], Block::Escape(_)));
        assert!(matches!(blocks[1], Block::Paragraph(_)));
        assert!(matches!(blocks[2], Block::StandaloneBreak(_)));
        assert!(matches!(blocks[3], Block::ParagraphDelimiter(_)));
        let Block::Heading(heading) = &blocks[4] else {
            panic!("expected heading, got {:?}", blocks[4]);
        };
        assert_eq!(blocks.len(), 5);
        assert!(matches!(
            heading.content().collect::<Vec<_>>().as_slice(),
            [Block::Quote(_)]
        ));
    }

    #[test]
    fn heading_accessors() {
        let doc = document("** Title  \nbody\n*** Deeper\n");
        let heading = doc.headings().next().unwrap();
        assert_eq!(heading.level(), 2);
        assert_eq!(heading.title_text().as_deref(), Some("Title"));
        assert_eq!(heading.title().unwrap().text(), "Title  ");

        let content: Vec<_> = heading.content().collect();
        assert_eq!(content.len(), 2);
        assert!(matches!(content[0], Block::Paragraph(_)));
        let sub: Vec<_> = heading.subheadings().collect();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub[0].level(), 3);
    }

    #[test]
    fn title_is_not_content() {
        let doc = document("* Only a title\n");
        let heading = doc.headings().next().unwrap();
        assert_eq!(heading.content().count(), 0);
    }

    #[test]
    fn paragraph_text_joins_segments() {
        let doc = document("first line\n  second line\n");
        let Some(Block::Paragraph(para)) = doc.blocks().next() else {
            panic!("expected paragraph");
        };
        assert_eq!(para.segments().count(), 2);
        assert_eq!(para.text(), "first line\nsecond line");
    }

    #[test]
    fn quote_content() {
        let doc = document("> hello\n");
        let Some(Block::Quote(quote)) = doc.blocks().next() else {
            panic!("expected quote");
        };
        assert_eq!(quote.content().unwrap().text(), "hello");
    }

    #[test]
    fn list_item_content() {
        let doc = document("- a\n  b\n");
        let Some(Block::UnorderedListItem(item)) = doc.blocks().next() else {
            panic!("expected list item");
        };
        assert_eq!(item.content().unwrap().text(), "a\nb");
    }

    #[test]
    fn escape_target() {
        let doc = document("\\>");
        let Some(Block::Escape(escape)) = doc.blocks().next() else {
            panic!("expected escape");
        };
        assert_eq!(escape.target(), Some('>'));
    }

    #[test]
    fn block_text_is_verbatim() {
        let input = "* H\n  body\n\n- item\n";
        let doc = document(input);
        let text: String = doc.blocks().map(|block| block.text()).collect();
        assert_eq!(text, input);
    }

    #[test]
    fn cast_rejects_other_kinds() {
        let doc = document("text\n");
        let para = doc.syntax().first_child().unwrap();
        assert!(Heading::cast(para.clone()).is_none());
        assert!(Paragraph::cast(para).is_some());
        assert!(Document::can_cast(SyntaxKind::DOCUMENT));
        assert!(!Quote::can_cast(SyntaxKind::PARAGRAPH));
    }
}
