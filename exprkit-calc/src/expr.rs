//! # Expressions
//!
//! An expression is parsed in two phases.
//!
//! ## Scanning
//! [`Sequence::scan`] reads a flat run of [`Element`]s. At each step it tries,
//! in order, a parenthesized group, the longest operator token, a constant,
//! and a numeral; the first that matches is appended. Scanning stops when
//! nothing matches or the read budget is spent. Operator tokens are stored
//! unresolved: at this point `-` may still be negation or subtraction.
//!
//! ## Condensation
//! [`Sequence::condense`] collapses the flat run into one [`Term`] by
//! repeating two steps until a single term remains:
//!
//! 1. **Disambiguation.** Each operator position gets the catalog entries
//!    spelled like its token. A leading position keeps only prefix entries.
//!    In every run of adjacent operator positions, the first keeps only infix
//!    entries (when it has any) and the rest keep only prefix entries.
//! 2. **Reduction.** Among operators whose operand slots all hold terms, the
//!    highest rank wins. Ties go to the leftmost, except that a
//!    negative-precedence operator takes over any tie it meets while scanning
//!    left to right, so those chains group right to left. The winner and its
//!    operands are spliced out and replaced by one [`Operation`] term.
//!
//! ```rust
//! # use exprkit_calc::parse;
//! assert_eq!(parse("3 - -5").unwrap().evaluate(), 8.0);
//! assert_eq!(parse("2 ^ 3 ^ 2").unwrap().evaluate(), 512.0);
//! assert_eq!(parse("8 - 4 - 2").unwrap().evaluate(), 2.0);
//! ```

use crate::constant::Constant;
use crate::grouping;
use crate::numeral::Numeral;
use crate::oper::{self, Operator};
use crate::term::{Operation, Term};
use crate::CalcError;
use exprkit::Cursor;
use std::fmt;

/// Successful reads allowed in one nested (parenthesized) expression: the
/// first read plus thirty more.
pub const NESTED_READ_LIMIT: usize = 31;

/// One entry of the flat sequence, with the offset it was read at.
///
/// A term read as a parenthesized group keeps the run scanned inside it in
/// `scanned`, for the tokenized form.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Term {
        term: Term,
        scanned: Option<Sequence>,
        offset: usize,
    },
    Token { token: &'static str, offset: usize },
    Oper { oper: &'static Operator, offset: usize },
}

impl Element {
    fn offset(&self) -> usize {
        match self {
            Element::Term { offset, .. }
            | Element::Token { offset, .. }
            | Element::Oper { offset, .. } => *offset,
        }
    }

    fn is_term(&self) -> bool {
        matches!(self, Element::Term { .. })
    }

    fn token(&self) -> Option<&'static str> {
        match self {
            Element::Term { .. } => None,
            Element::Token { token, .. } => Some(*token),
            Element::Oper { oper, .. } => Some(oper.token),
        }
    }

    /// Reads the next element, trying each kind in priority order.
    fn scan(cursor: &mut Cursor) -> Result<Option<Element>, CalcError> {
        let offset = cursor.content_offset();
        if let Some(group) = grouping::parse(cursor)? {
            return Ok(Some(Element::Term {
                term: group.term,
                scanned: Some(group.scanned),
                offset,
            }));
        }
        if let Some((token, offset)) = oper::match_token(cursor)? {
            log::trace!("operator {token:?} at {offset}");
            return Ok(Some(Element::Token { token, offset }));
        }
        if let Some(c) = Constant::parse(cursor)? {
            return Ok(Some(Element::Term {
                term: Term::Constant(c),
                scanned: None,
                offset,
            }));
        }
        if let Some(n) = Numeral::parse(cursor)? {
            return Ok(Some(Element::Term {
                term: Term::Numeral(n),
                scanned: None,
                offset,
            }));
        }
        log::trace!("nothing found, leaving {:?}", cursor.rest());
        Ok(None)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Term {
                scanned: Some(inner),
                ..
            } => write!(f, "( {inner} )"),
            Element::Term { term, .. } => write!(f, "{term}"),
            Element::Token { token, .. } => write!(f, "\"{token}\""),
            Element::Oper { oper, .. } => write!(f, "{oper}"),
        }
    }
}

/// A flat, not yet condensed run of terms and operators.
///
/// Its `Display` is the tokenized form: elements joined by `, `, unresolved
/// operator tokens in double quotes, and groups shown as their own scanned
/// runs inside `( … )`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    elements: Vec<Element>,
}

impl Sequence {
    /// Scans as many elements as possible, at most `limit` when given.
    ///
    /// Returns `Ok(None)` and rewinds when nothing could be read.
    pub fn scan(cursor: &mut Cursor, limit: Option<usize>) -> Result<Option<Sequence>, CalcError> {
        cursor.attempt(|cursor| {
            let mut elements = Vec::new();
            while limit.is_none_or(|limit| elements.len() < limit) {
                match Element::scan(cursor)? {
                    Some(element) => elements.push(element),
                    None => break,
                }
            }
            if elements.is_empty() {
                return Ok(None);
            }
            let seq = Sequence { elements };
            log::trace!("scanned {seq}, leaving {:?}", cursor.rest());
            Ok(Some(seq))
        })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Collapses the sequence into a single term.
    pub fn condense(mut self) -> Result<Term, CalcError> {
        loop {
            let positions: Vec<usize> = (0..self.elements.len())
                .filter(|&i| !self.elements[i].is_term())
                .collect();
            if positions.is_empty() {
                break;
            }
            let opers = self.disambiguate(&positions)?;
            for (&pos, &oper) in positions.iter().zip(&opers) {
                let offset = self.elements[pos].offset();
                self.elements[pos] = Element::Oper { oper, offset };
            }
            if log::log_enabled!(log::Level::Debug) {
                log::debug!("condensing {self}");
            }
            let pos = self.select(&positions, &opers)?;
            self.reduce(pos)?;
        }

        let mut terms = self.elements.into_iter();
        match (terms.next(), terms.next()) {
            (Some(Element::Term { term, .. }), None) => Ok(term),
            (Some(_), Some(next)) => Err(CalcError::MissingOperator {
                offset: next.offset(),
            }),
            _ => Err(CalcError::NoExpression { offset: 0 }),
        }
    }

    /// Picks one catalog entry for each operator position.
    fn disambiguate(&self, positions: &[usize]) -> Result<Vec<&'static Operator>, CalcError> {
        let mut opers = Vec::with_capacity(positions.len());
        for (i, &pos) in positions.iter().enumerate() {
            let element = &self.elements[pos];
            let mut cands: Vec<&'static Operator> = match element {
                Element::Oper { oper, .. } => vec![*oper],
                Element::Token { token, .. } => oper::candidates(token).to_vec(),
                Element::Term { .. } => unreachable!("term at operator position"),
            };
            let leading = pos == 0;
            let starts_run = i == 0 || positions[i - 1] + 1 != pos;
            if leading && cands.len() > 1 {
                cands.retain(|o| o.is_prefix());
            }
            if cands.len() > 1 {
                if starts_run {
                    cands.retain(|o| !o.is_prefix());
                } else {
                    cands.retain(|o| o.is_prefix());
                }
            }
            let token = element.token().unwrap_or_default();
            match cands.as_slice() {
                // Only a prefix operator can follow another operator or open
                // the sequence.
                [oper] if (leading || !starts_run) && !oper.is_prefix() => {
                    return Err(CalcError::UnexpectedOperator {
                        token,
                        offset: element.offset(),
                    });
                }
                [oper] => opers.push(*oper),
                [] => {
                    return Err(CalcError::UnexpectedOperator {
                        token,
                        offset: element.offset(),
                    });
                }
                _ => {
                    return Err(CalcError::AmbiguousOperator {
                        token,
                        offset: element.offset(),
                        count: cands.len(),
                    });
                }
            }
        }
        Ok(opers)
    }

    /// Can the operator at `pos` take its operands from its neighbours?
    fn is_ready(&self, pos: usize, oper: &Operator) -> bool {
        pos >= oper.left
            && pos + oper.right < self.elements.len()
            && self.elements[pos - oper.left..pos].iter().all(Element::is_term)
            && self.elements[pos + 1..=pos + oper.right]
                .iter()
                .all(Element::is_term)
    }

    /// Chooses the next operator position to reduce.
    fn select(&self, positions: &[usize], opers: &[&'static Operator]) -> Result<usize, CalcError> {
        let pick = |ready_only: bool| {
            let mut best: Option<(usize, u8)> = None;
            for (&pos, oper) in positions.iter().zip(opers) {
                if ready_only && !self.is_ready(pos, oper) {
                    continue;
                }
                let rank = oper.rank();
                best = match best {
                    None => Some((pos, rank)),
                    Some((_, max)) if rank > max => Some((pos, rank)),
                    Some((_, max)) if rank == max && oper.groups_right() => Some((pos, rank)),
                    keep => keep,
                };
            }
            best.map(|(pos, _)| pos)
        };
        match pick(true) {
            Some(pos) => Ok(pos),
            None => {
                let pos = pick(false).unwrap_or(positions[0]);
                let element = &self.elements[pos];
                Err(CalcError::MissingOperand {
                    token: element.token().unwrap_or_default(),
                    offset: element.offset(),
                })
            }
        }
    }

    /// Replaces the operator at `pos` and its operands with one term.
    fn reduce(&mut self, pos: usize) -> Result<(), CalcError> {
        let Element::Oper { oper, .. } = self.elements[pos] else {
            unreachable!("reduction target is a resolved operator");
        };
        let start = pos - oper.left;
        let end = pos + oper.right;
        let offset = self.elements[start].offset();
        let mut operands = Vec::with_capacity(oper.arity());
        for element in self.elements.drain(start..=end) {
            if let Element::Term { term, .. } = element {
                operands.push(term);
            }
        }
        let term = Term::Operation(Operation::new(oper, operands)?);
        log::debug!("reduced {:?} into {}", oper.token, term);
        self.elements.insert(
            start,
            Element::Term {
                term,
                scanned: None,
                offset,
            },
        );
        Ok(())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}
