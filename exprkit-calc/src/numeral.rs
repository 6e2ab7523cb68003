//! # Numerals
//!
//! Signed decimal literals with an optional fraction and exponent, e.g.
//! `-123.456E+789`.
//!
//! [`Numeral::parse`] distinguishes two ways of not producing a value:
//!
//! - `Ok(None)`: the first non-whitespace character is neither a sign nor a
//!   digit nor the start of a fraction/exponent, so this is not a numeral.
//! - `Err(CalcError::Malformed)`: a decimal point or exponent marker was read
//!   but the digits it requires never came. Nothing else can claim those
//!   characters, so the failure aborts the parse.
//!
//! The exponent is applied by stepping the mantissa one power of ten at a
//! time rather than through `powi`; results must match that iteration bit for
//! bit.
use crate::CalcError;
use exprkit::{Cursor, Span, is_whitespace};
use smartstring::alias::String;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn from_char(c: Option<char>) -> Option<Sign> {
        match c {
            Some('+') => Some(Sign::Plus),
            Some('-') => Some(Sign::Minus),
            _ => None,
        }
    }
}

/// A numeric literal, kept as its digit groups so it renders as written.
#[derive(Debug, Clone, PartialEq)]
pub struct Numeral {
    pub sign: Sign,
    pub integer: Option<String>,
    pub decimal: Option<String>,
    pub exponent: Option<(Sign, String)>,
    mantissa: f64,
}

fn is_exponent_marker(c: Option<char>) -> bool {
    matches!(c, Some('e' | 'E'))
}

/// Reads a run of digits starting at `curr`, returning the run (if any) and
/// the first non-digit read.
fn read_digits(cursor: &mut Cursor, mut curr: Option<char>) -> (Option<String>, Option<char>) {
    let mut digits: Option<String> = None;
    while let Some(c) = curr.filter(|c| c.is_ascii_digit()) {
        digits.get_or_insert_with(String::new).push(c);
        curr = cursor.next();
    }
    (digits, curr)
}

impl Numeral {
    /// Attempts to read one numeral at the cursor, skipping leading whitespace.
    pub fn parse(cursor: &mut Cursor) -> Result<Option<Numeral>, CalcError> {
        cursor.attempt(|cursor| {
            let mut curr = cursor.next();
            while curr.is_some_and(is_whitespace) {
                curr = cursor.next();
            }
            let start = cursor.pos() - 1;

            let mut sign = Sign::Plus;
            if let Some(s) = Sign::from_char(curr) {
                sign = s;
                curr = cursor.next();
            }
            let (integer, next) = read_digits(cursor, curr);
            curr = next;

            if curr != Some('.') && !is_exponent_marker(curr) {
                if integer.is_none() {
                    return Ok(None);
                }
                cursor.push_back()?;
                return Numeral::new(sign, integer, None, None).map(Some);
            }

            let mut decimal = None;
            if curr == Some('.') {
                let first = cursor.next();
                let (digits, next) = read_digits(cursor, first);
                decimal = digits;
                curr = next;
            }
            if integer.is_none() && decimal.is_none() {
                return Err(malformed(
                    "found decimal point or exponent marker but no digits",
                    start,
                    cursor,
                ));
            }
            if !is_exponent_marker(curr) {
                cursor.push_back()?;
                return Numeral::new(sign, integer, decimal, None).map(Some);
            }

            curr = cursor.next();
            let mut exp_sign = Sign::Plus;
            if let Some(s) = Sign::from_char(curr) {
                exp_sign = s;
                curr = cursor.next();
            }
            let (exp_digits, _) = read_digits(cursor, curr);
            let Some(exp_digits) = exp_digits else {
                return Err(malformed(
                    "found exponent marker but no exponent digits",
                    start,
                    cursor,
                ));
            };
            cursor.push_back()?;
            Numeral::new(sign, integer, decimal, Some((exp_sign, exp_digits))).map(Some)
        })
    }

    fn new(
        sign: Sign,
        integer: Option<String>,
        decimal: Option<String>,
        exponent: Option<(Sign, String)>,
    ) -> Result<Self, CalcError> {
        let mut text = std::string::String::new();
        if sign == Sign::Minus {
            text.push('-');
        }
        text.push_str(integer.as_deref().unwrap_or("0"));
        if let Some(decimal) = &decimal {
            text.push('.');
            text.push_str(decimal);
        }
        let mantissa = text.parse::<f64>()?;
        let numeral = Numeral {
            sign,
            integer,
            decimal,
            exponent,
            mantissa,
        };
        log::trace!("numeral {} (mantissa {})", numeral, mantissa);
        Ok(numeral)
    }

    /// Number of exponent steps, saturating for absurdly long exponents.
    fn exponent_steps(&self) -> u64 {
        self.exponent.as_ref().map_or(0, |(_, digits)| {
            digits.bytes().fold(0u64, |acc, d| {
                acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
            })
        })
    }

    pub fn evaluate(&self) -> f64 {
        let factor = match self.exponent {
            Some((Sign::Minus, _)) => 0.1,
            _ => 10.0,
        };
        let mut value = self.mantissa;
        for _ in 0..self.exponent_steps() {
            if value == 0.0 || value.is_infinite() {
                break;
            }
            value *= factor;
        }
        value
    }
}

fn malformed(message: &'static str, start: usize, cursor: &Cursor) -> CalcError {
    let end = cursor.pos().min(cursor.len()).max(start);
    CalcError::Malformed {
        message,
        span: Span::new(start, end),
    }
}

impl fmt::Display for Numeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign == Sign::Minus {
            f.write_str("-")?;
        }
        if let Some(integer) = &self.integer {
            f.write_str(integer)?;
        }
        if let Some(decimal) = &self.decimal {
            write!(f, ".{decimal}")?;
        }
        if let Some((sign, digits)) = &self.exponent {
            f.write_str("E")?;
            if *sign == Sign::Minus {
                f.write_str("-")?;
            }
            f.write_str(digits)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: &str) -> f64 {
        Numeral::parse(&mut Cursor::new(s))
            .unwrap()
            .expect("expected a numeral")
            .evaluate()
    }

    fn no_match(s: &str) -> bool {
        let mut cursor = Cursor::new(s);
        let res = Numeral::parse(&mut cursor).unwrap();
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.depth(), 0);
        res.is_none()
    }

    fn fails(s: &str) -> bool {
        let mut cursor = Cursor::new(s);
        let res = Numeral::parse(&mut cursor);
        assert_eq!(cursor.pos(), 0);
        assert_eq!(cursor.depth(), 0);
        matches!(res, Err(CalcError::Malformed { .. }))
    }

    #[test]
    fn parses_plain_values() {
        let _ = env_logger::builder().is_test(true).try_init();
        assert_eq!(eval("55"), 55.0);
        assert_eq!(eval("55."), 55.0);
        assert_eq!(eval("55e1"), 550.0);
        assert_eq!(eval("55e+3"), 55000.0);
        assert_eq!(eval("55E-2"), 0.55);
        assert_eq!(eval("55e+2"), 5500.0);
        assert_eq!(eval("123.987"), 123.987);
        assert_eq!(eval(".1e1"), 1.0);
        assert_eq!(eval("  -7"), -7.0);
        assert!((eval("1.23456e5") / 1.23456e5 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn non_numerals_are_no_match() {
        assert!(no_match("()"));
        assert!(no_match("/ 5"));
        assert!(no_match("+"));
        assert!(no_match("-"));
        assert!(no_match(""));
        assert!(no_match("   "));
        assert!(no_match("pi"));
    }

    #[test]
    fn incomplete_numerals_fail() {
        assert!(fails("."));
        assert!(fails("e"));
        assert!(fails("e+"));
        assert!(fails("e10"));
        assert!(fails(".0e"));
        assert!(fails(".e0"));
        assert!(fails("5.2e-"));
        assert!(fails("-."));
    }

    #[test]
    fn malformed_span_covers_attempt() {
        let err = Numeral::parse(&mut Cursor::new("  5.2e-")).unwrap_err();
        assert_eq!(
            err,
            CalcError::Malformed {
                message: "found exponent marker but no exponent digits",
                span: Span::new(2, 7),
            }
        );
    }

    #[test]
    fn trailing_characters_are_left_unread() {
        let mut cursor = Cursor::new("123;");
        let n = Numeral::parse(&mut cursor).unwrap().unwrap();
        assert_eq!(n.evaluate(), 123.0);
        assert_eq!(cursor.rest(), ";");

        let mut cursor = Cursor::new(".123+456");
        let n = Numeral::parse(&mut cursor).unwrap().unwrap();
        assert_eq!(n.evaluate(), 0.123);
        assert_eq!(cursor.rest(), "+456");

        let mut cursor = Cursor::new(".123.456");
        let n = Numeral::parse(&mut cursor).unwrap().unwrap();
        assert_eq!(n.evaluate(), 0.123);
        assert_eq!(cursor.rest(), ".456");

        let mut cursor = Cursor::new("42");
        Numeral::parse(&mut cursor).unwrap().unwrap();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn renders_as_written() {
        let show = |s: &str| {
            Numeral::parse(&mut Cursor::new(s))
                .unwrap()
                .unwrap()
                .to_string()
        };
        assert_eq!(show("+5"), "5");
        assert_eq!(show("-5"), "-5");
        assert_eq!(show("55."), "55");
        assert_eq!(show(".5"), ".5");
        assert_eq!(show("1.5e+3"), "1.5E3");
        assert_eq!(show("2e-07"), "2E-07");
    }

    #[test]
    fn huge_exponents_terminate() {
        assert_eq!(eval("1e99999999999999999999999"), f64::INFINITY);
        assert_eq!(eval("1e-99999999999999999999999"), 0.0);
        assert_eq!(eval("0e999999999"), 0.0);
    }
}
