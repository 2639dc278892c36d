//! SyntaxKind enum for all tokens and nodes in the Norg CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// Deepest heading level the notation knows about.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// All syntax kinds for the Norg CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace before the first significant token of a line
    WHITESPACE,
    /// Line ending of a non-blank line
    LINE_ENDING,
    /// `*` heading marker plus trailing whitespace
    HEADING1_PREFIX,
    /// `**`
    HEADING2_PREFIX,
    /// `***`
    HEADING3_PREFIX,
    /// `****`
    HEADING4_PREFIX,
    /// `*****`
    HEADING5_PREFIX,
    /// `******` (and anything longer)
    HEADING6_PREFIX,
    /// `>` quote marker plus trailing whitespace
    QUOTE_PREFIX,
    /// `-` list marker plus trailing whitespace
    UNORDERED_LIST_PREFIX,
    /// Rest of a line with no structural meaning
    PARAGRAPH_SEGMENT,
    /// `\` at the start of a line
    ESCAPE_PREFIX,
    /// The single character directly after an escape prefix
    ANY_CHAR,
    /// `===` line
    PARAGRAPH_DELIMITER,
    /// A blank physical line, including its line ending
    STANDALONE_BREAK,
    /// End of file marker
    EOF,

    // === Composite Nodes (parser output) ===
    /// Root document node
    DOCUMENT,
    /// Run of contiguous paragraph segments
    PARAGRAPH,
    /// Escape prefix plus its target character
    ESCAPE_SEQUENCE,
    HEADING1,
    HEADING2,
    HEADING3,
    HEADING4,
    HEADING5,
    HEADING6,
    /// Quote (`> ...`), always a single segment
    QUOTE,
    /// Unordered list item (`- ...`) wrapping one paragraph
    UNORDERED_LIST_ITEM,
}

const HEADING_PREFIXES: [SyntaxKind; MAX_HEADING_LEVEL as usize] = [
    SyntaxKind::HEADING1_PREFIX,
    SyntaxKind::HEADING2_PREFIX,
    SyntaxKind::HEADING3_PREFIX,
    SyntaxKind::HEADING4_PREFIX,
    SyntaxKind::HEADING5_PREFIX,
    SyntaxKind::HEADING6_PREFIX,
];

const HEADINGS: [SyntaxKind; MAX_HEADING_LEVEL as usize] = [
    SyntaxKind::HEADING1,
    SyntaxKind::HEADING2,
    SyntaxKind::HEADING3,
    SyntaxKind::HEADING4,
    SyntaxKind::HEADING5,
    SyntaxKind::HEADING6,
];

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (indentation/line endings).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_ENDING)
    }

    /// Prefix token for a heading of the given level.
    ///
    /// Levels past [`MAX_HEADING_LEVEL`] collapse onto the deepest level;
    /// level 0 has no prefix.
    pub fn heading_prefix(level: u8) -> Option<SyntaxKind> {
        let index = level.min(MAX_HEADING_LEVEL).checked_sub(1)?;
        Some(HEADING_PREFIXES[index as usize])
    }

    /// Node kind for a heading of the given level.
    pub fn heading(level: u8) -> Option<SyntaxKind> {
        let index = level.min(MAX_HEADING_LEVEL).checked_sub(1)?;
        Some(HEADINGS[index as usize])
    }

    /// The level of a heading prefix token or heading node.
    pub fn heading_level(self) -> Option<u8> {
        HEADING_PREFIXES
            .iter()
            .position(|&k| k == self)
            .or_else(|| HEADINGS.iter().position(|&k| k == self))
            .map(|index| index as u8 + 1)
    }

    /// Prefixes of the non-heading detached modifiers.
    pub fn is_detached_modifier_prefix(self) -> bool {
        matches!(self, Self::QUOTE_PREFIX | Self::UNORDERED_LIST_PREFIX)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NorgLang {}

impl rowan::Language for NorgLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::UNORDERED_LIST_ITEM as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<NorgLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<NorgLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<NorgLang>;
