//! Parenthesized sub-expressions.
use crate::CalcError;
use crate::expr::{NESTED_READ_LIMIT, Sequence};
use crate::term::Term;
use exprkit::Cursor;

/// A closed group: the run scanned between the parentheses and the term it
/// condensed into.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub scanned: Sequence,
    pub term: Term,
}

/// Reads `( expr )`, skipping whitespace around both parentheses.
///
/// A missing `(`, an empty group or a missing `)` rewind and report no match.
/// Errors from inside a closed group (a malformed numeral, an operator with no
/// operand) propagate unchanged.
pub fn parse(cursor: &mut Cursor) -> Result<Option<Group>, CalcError> {
    cursor.attempt(|cursor| {
        cursor.skip_whitespace()?;
        if cursor.next() != Some('(') {
            return Ok(None);
        }
        let Some(inner) = Sequence::scan(cursor, Some(NESTED_READ_LIMIT))? else {
            return Ok(None);
        };
        cursor.skip_whitespace()?;
        if cursor.next() != Some(')') {
            return Ok(None);
        }
        let term = inner.clone().condense()?;
        log::trace!("grouping ( {} )", term);
        Ok(Some(Group {
            scanned: inner,
            term: Term::Grouping(Box::new(term)),
        }))
    })
}
