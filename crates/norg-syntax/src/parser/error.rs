//! Parse failures.
//!
//! Every error aborts the whole parse. Heading boundaries decide what nests
//! inside what, so a tree built around a bad token could put content under
//! the wrong heading; callers get an error with a position instead.

use rowan::TextSize;
use thiserror::Error;

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("level {level} heading at offset {offset:?} has no title, found {found:?}")]
    MalformedHeading {
        level: u8,
        offset: TextSize,
        found: SyntaxKind,
    },

    #[error("escape at offset {offset:?} is not followed by a character")]
    DanglingEscape { offset: TextSize },

    #[error("unexpected {kind:?} at offset {offset:?}")]
    UnrecognizedToken { kind: SyntaxKind, offset: TextSize },

    #[error("nesting depth {depth} at offset {offset:?} exceeds the limit of {limit}")]
    DepthLimitExceeded {
        depth: usize,
        limit: usize,
        offset: TextSize,
    },
}

impl ParseError {
    /// Byte offset into the source where the problem was detected.
    pub fn offset(&self) -> TextSize {
        match self {
            ParseError::MalformedHeading { offset, .. }
            | ParseError::DanglingEscape { offset }
            | ParseError::UnrecognizedToken { offset, .. }
            | ParseError::DepthLimitExceeded { offset, .. } => *offset,
        }
    }

    /// Zero-based line and column (in chars) of the error within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = usize::from(self.offset()).min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
        (line, before[line_start..].chars().count())
    }
}
