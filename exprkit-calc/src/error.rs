//! # Calculator Error Type
//!
//! This module defines [`CalcError`], the single failure surface of the
//! expression pipeline. It separates three kinds of failure:
//!
//! - **Malformed literals**: the input began a numeral (a decimal point or
//!   exponent marker was seen) but never completed it. These abort the whole
//!   parse; see [`CalcError::is_malformed`].
//! - **Structural errors**: the flat sequence of terms and operators cannot be
//!   condensed into one tree (a missing operand, a stray operator, two terms
//!   with nothing between them, trailing input).
//! - **Internal errors**: broken invariants of the operator catalog or the
//!   cursor protocol. Valid input never produces these; see
//!   [`CalcError::is_internal`].
//!
//! A term parser that simply does not recognise its construct does **not**
//! return an error: it returns `Ok(None)` and rewinds the cursor.
use exprkit::{CursorError, Span};
use thiserror::Error;

/// Represents all possible errors that can occur within the calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A numeral started but could not be completed, e.g. `.` or `5.2e-`.
    #[error("malformed numeral at {span}: {message}")]
    Malformed {
        message: &'static str,
        span: Span,
    },

    /// Nothing at the start of the input could be read as a term or operator.
    #[error("no expression found at offset {offset}")]
    NoExpression { offset: usize },

    /// The expression ended before the input did.
    #[error("unexpected input at offset {offset}: {rest:?}")]
    TrailingInput { offset: usize, rest: String },

    /// An operator has no term where one of its operands should be.
    #[error("operator {token:?} at offset {offset} is missing an operand")]
    MissingOperand { token: &'static str, offset: usize },

    /// No catalog entry for the token fits its position, e.g. `*` directly
    /// after another operator.
    #[error("operator {token:?} at offset {offset} cannot appear here")]
    UnexpectedOperator { token: &'static str, offset: usize },

    /// Two terms follow each other with no operator between them.
    #[error("expected an operator before offset {offset}")]
    MissingOperator { offset: usize },

    /// More than one catalog entry survived disambiguation.
    #[error("operator {token:?} at offset {offset} is ambiguous ({count} candidates)")]
    AmbiguousOperator {
        token: &'static str,
        offset: usize,
        count: usize,
    },

    /// An operation was built with the wrong number of operands.
    #[error("operator {token:?} expects {expected} operand(s), got {got}")]
    ArityMismatch {
        token: &'static str,
        expected: usize,
        got: usize,
    },

    /// The float parser rejected the digits of a numeral. Numerals only hand
    /// it `-?digits(.digits)?`, so this marks a broken numeral scanner rather
    /// than bad input.
    #[error("unable to parse {0:?}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// The cursor mark protocol was violated.
    #[error("cursor error {0}")]
    Cursor(#[from] CursorError),
}

impl CalcError {
    /// Is this the unrecoverable "looked like a numeral but wasn't" failure?
    pub fn is_malformed(&self) -> bool {
        matches!(self, CalcError::Malformed { .. })
    }

    /// Does this error signal a programming or catalog bug rather than bad
    /// input?
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CalcError::AmbiguousOperator { .. }
                | CalcError::ArityMismatch { .. }
                | CalcError::ParseFloat(_)
                | CalcError::Cursor(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exprkit::span;

    fn _assert_error_trait_obj(e: &dyn std::error::Error) -> &dyn std::error::Error {
        e
    }

    #[test]
    fn malformed_is_classified() {
        let err = CalcError::Malformed {
            message: "no digits",
            span: span!(0, 1),
        };
        assert!(err.is_malformed());
        assert!(!err.is_internal());
        let _ = _assert_error_trait_obj(&err);
        assert!(err.to_string().contains("malformed numeral at 0..1"));
    }

    #[test]
    fn cursor_error_maps_to_internal() {
        let err: CalcError = CursorError::NoMark.into();
        assert!(matches!(err, CalcError::Cursor(_)));
        assert!(err.is_internal());
        assert!(!err.is_malformed());
    }

    #[test]
    fn parse_float_maps_to_calc_error() {
        let err = "1..".parse::<f64>().map_err(CalcError::from).unwrap_err();
        assert!(matches!(err, CalcError::ParseFloat(_)));
        assert!(err.to_string().contains("unable to parse"));
        assert!(err.is_internal());
    }

    #[test]
    fn structural_errors_are_user_errors() {
        let errs = [
            CalcError::NoExpression { offset: 0 },
            CalcError::MissingOperand {
                token: "+",
                offset: 2,
            },
            CalcError::UnexpectedOperator {
                token: "*",
                offset: 4,
            },
            CalcError::MissingOperator { offset: 2 },
        ];
        for err in errs {
            assert!(!err.is_internal(), "{err}");
            assert!(!err.is_malformed(), "{err}");
        }
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn calc_error_is_send_sync_static() {
        _assert_send_sync_static::<CalcError>();
    }
}
