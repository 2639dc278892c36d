//! # Heading Hierarchy
//!
//! One rule serves every level. A heading of level L is
//!
//! ```text
//! HEADING{L}_PREFIX  PARAGRAPH_SEGMENT  content*
//! ```
//!
//! where `content` is a paragraph, a standalone break, a detached modifier,
//! or a heading of level L+1 and deeper. A prefix of level L or shallower is
//! never a content alternative, so it ends the heading and is handed back to
//! whichever enclosing construct can take it. That is how a `**` closes an
//! open `***` and `**` but stays inside a `*`.
//!
//! The deepest level has no heading alternatives at all, since no prefix is
//! deeper than it.

use crate::parser::{ParseError, Parser};
use crate::syntax_kind::SyntaxKind;

use super::{HEADING_CONTENT_RULES, ordered_choice};

/// Parse the heading whose prefix is the current token.
pub(super) fn heading(p: &mut Parser<'_, '_>) -> Result<(), ParseError> {
    let Some(level) = p.current().heading_level() else {
        return Err(p.unexpected());
    };
    let Some(kind) = SyntaxKind::heading(level) else {
        return Err(p.unexpected());
    };

    p.enter()?;
    let result = p.node(kind, |p| {
        let prefix_offset = p.offset();
        p.bump();

        if !p.at(SyntaxKind::PARAGRAPH_SEGMENT) {
            return Err(ParseError::MalformedHeading {
                level,
                offset: prefix_offset,
                found: p.current(),
            });
        }
        p.bump();

        while let Some(result) = ordered_choice(p, &HEADING_CONTENT_RULES, level) {
            result?;
        }
        Ok(())
    });
    p.leave();

    let completed = result?;
    log::trace!("closed {:?} before {:?}", completed.kind(), p.current());
    Ok(())
}
