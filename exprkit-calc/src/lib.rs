//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! # exprkit-calc
//!
//! A single-line expression calculator built on the backtracking
//! [`exprkit::Cursor`]. It reads signed decimal numerals with exponents, the
//! constants `pi` and `e`, parenthesized groups, prefix `+`/`-`, infix
//! `+ - * / %`, the keyword `mod`, `^`, and prefix `ln`/`log`, and evaluates
//! them with IEEE double arithmetic.
//!
//! ## Overview
//!
//! - [`numeral`], [`constant`], [`grouping`]: term parsers. Each returns
//!   `Ok(None)` and rewinds when its construct is absent.
//! - [`oper`]: the fixed operator catalog with signed precedences.
//! - [`expr`]: scanning into a flat [`Sequence`] and condensing it into a tree.
//! - [`term`]: the evaluable, renderable [`Term`] tree.
//! - [`error`]: [`CalcError`].
//!
//! ## Example
//!
//! ```rust
//! use exprkit_calc::evaluate;
//!
//! let ev = evaluate("(1 + 2) * -3").unwrap();
//! assert_eq!(ev.tokenized, r#"( 1, "+", 2 ), "*", "-", 3"#);
//! assert_eq!(ev.parsed, "(( ((1) + (2)) ) * (-(3)))");
//! assert_eq!(ev.pretty, "( 1 + 2 ) * -3");
//! assert_eq!(ev.value, -9.0);
//! ```
pub mod constant;
pub mod error;
pub mod expr;
pub mod grouping;
pub mod numeral;
pub mod oper;
pub mod term;

pub use error::CalcError;
pub use expr::{Element, Sequence};
pub use term::{Style, Term};

use exprkit::Cursor;

/// Everything the calculator reports for one input line.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The scanned sequence before condensation.
    pub tokenized: String,
    /// The tree in [`Style::Explicit`].
    pub parsed: String,
    /// The tree in [`Style::Pretty`].
    pub pretty: String,
    pub value: f64,
}

/// Scans the whole input into a flat sequence.
///
/// Fails with [`CalcError::NoExpression`] when nothing can be read and with
/// [`CalcError::TrailingInput`] when something other than whitespace is left
/// over.
pub fn scan(input: &str) -> Result<Sequence, CalcError> {
    let mut cursor = Cursor::new(input);
    let seq = Sequence::scan(&mut cursor, None)?.ok_or(CalcError::NoExpression {
        offset: cursor.content_offset(),
    })?;
    let offset = cursor.content_offset();
    if offset < cursor.len() {
        cursor.advance(offset - cursor.pos());
        return Err(CalcError::TrailingInput {
            offset,
            rest: cursor.rest(),
        });
    }
    debug_assert_eq!(cursor.depth(), 0);
    Ok(seq)
}

/// Parses the whole input into a condensed tree.
///
/// ```rust
/// # use exprkit_calc::{parse, CalcError};
/// assert_eq!(parse("10 mod 3").unwrap().evaluate(), 1.0);
/// assert!(matches!(parse("1 + 2)"), Err(CalcError::TrailingInput { offset: 5, .. })));
/// assert!(parse("5.2e-").unwrap_err().is_malformed());
/// ```
pub fn parse(input: &str) -> Result<Term, CalcError> {
    scan(input)?.condense()
}

/// Parses, renders and evaluates one input line.
pub fn evaluate(input: &str) -> Result<Evaluation, CalcError> {
    let seq = scan(input)?;
    let tokenized = seq.to_string();
    let term = seq.condense()?;
    let ev = Evaluation {
        tokenized,
        parsed: term.display(Style::Explicit).to_string(),
        pretty: term.display(Style::Pretty).to_string(),
        value: term.evaluate(),
    };
    log::debug!("{:?} => {:?}", input, ev);
    Ok(ev)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(s: &str) -> f64 {
        parse(s).unwrap().evaluate()
    }

    #[test]
    fn evaluates_the_documented_properties() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(value("3 - -5"), 8.0);
        assert_eq!(value("- -5"), 5.0);
        assert_eq!(value("2 + 3 * 4"), 14.0);
        assert_eq!(value("2 ^ 3 ^ 2"), 512.0);
        assert_eq!(value("10 mod 3"), 1.0);
        assert_eq!(value("( 1 + 2 ) * 3"), 9.0);
        assert_eq!(value("2 * pi"), 2.0 * std::f64::consts::PI);
        assert_eq!(value("55E-2"), 0.55);
    }

    #[test]
    fn unbalanced_parentheses_never_yield_a_value() {
        assert!(matches!(parse("(1+2"), Err(CalcError::NoExpression { offset: 0 })));
        assert!(matches!(
            parse("1+2)"),
            Err(CalcError::TrailingInput { offset: 3, .. })
        ));
        assert!(matches!(parse(""), Err(CalcError::NoExpression { .. })));
        assert!(matches!(parse("   "), Err(CalcError::NoExpression { .. })));
    }

    #[test]
    fn malformed_numerals_abort_everything() {
        for s in ["1 + .", "(2 * 3.e)", "4e", "1 - 5.2e- + 3"] {
            let err = parse(s).unwrap_err();
            assert!(err.is_malformed(), "{s:?}: {err}");
        }
    }

    #[test]
    fn trailing_whitespace_is_fine() {
        assert_eq!(value("  7 * 6  \t"), 42.0);
    }

    #[test]
    fn explicit_style_only_adds_parentheses() {
        for s in ["1 + 2 * 3", "-(4 - 1) ^ 2", "ln pi % 2", "2 ^ -3", "e mod 1.5e0"] {
            let ev = evaluate(s).unwrap();
            let stripped: String = ev.parsed.chars().filter(|c| !"() ".contains(*c)).collect();
            let pretty: String = ev.pretty.chars().filter(|c| !"() ".contains(*c)).collect();
            assert_eq!(stripped, pretty, "{s:?}");
            assert!(ev.parsed.matches('(').count() > ev.pretty.matches('(').count());
        }
    }

    #[test]
    fn pretty_form_reparses_to_the_same_value() {
        for s in [
            "3 - -5",
            "+3-+-5",
            "2^3^2",
            "(1 + 2) * 3",
            "-2 ^ 2",
            "2 ^ -3",
            "log 1000",
            "ln(pi)",
            "1.5e3 / 7 % 4",
            "10 mod 3 + 1",
            "-.5",
        ] {
            let first = evaluate(s).unwrap();
            let second = evaluate(&first.pretty).unwrap();
            assert_eq!(first.pretty, second.pretty, "{s:?}");
            assert_eq!(first.value.to_bits(), second.value.to_bits(), "{s:?}");
        }
    }

    #[test]
    fn non_finite_results_are_values() {
        assert_eq!(value("1 / 0"), f64::INFINITY);
        assert_eq!(value("-1 / 0"), f64::NEG_INFINITY);
        assert!(value("ln(-1)").is_nan());
        assert!(value("0 / 0 + 1").is_nan());
        assert_eq!(evaluate("1/0").unwrap().value.to_string(), "inf");
    }

    #[test]
    fn tokenized_form_shows_unresolved_tokens() {
        let ev = evaluate("3 - -5").unwrap();
        assert_eq!(ev.tokenized, r#"3, "-", "-", 5"#);
        assert_eq!(ev.pretty, "3 - -5");
        assert_eq!(ev.parsed, "((3) - (-(5)))");
    }

    #[test]
    fn tokenized_form_keeps_groups_unresolved() {
        let ev = evaluate("(1+2)*-3").unwrap();
        assert_eq!(ev.tokenized, r#"( 1, "+", 2 ), "*", "-", 3"#);
        assert_eq!(ev.pretty, "( 1 + 2 ) * -3");

        let ev = evaluate("2 * ((1 - -1) + 3)").unwrap();
        assert_eq!(ev.tokenized, r#"2, "*", ( ( 1, "-", "-", 1 ), "+", 3 )"#);
        assert_eq!(ev.value, 10.0);
    }

    #[test]
    fn long_top_level_expressions_are_not_capped() {
        let s = vec!["1"; 100].join(" + ");
        assert_eq!(value(&s), 100.0);
    }
}
