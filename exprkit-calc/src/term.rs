//! # Terms
//!
//! The evaluable tree produced by condensation. A [`Term`] is a numeral, a
//! constant, a parenthesized group, or an operator applied to its operands.
//! Trees are built bottom-up and never mutated afterwards; each node owns its
//! children.
//!
//! ## Rendering
//! [`Term::display`] renders in one of two [`Style`]s:
//!
//! - [`Style::Pretty`]: literals as written, operators through their shape
//!   templates, groups as `( inner )`.
//! - [`Style::Explicit`]: additionally wraps every numeral, constant and
//!   operation in its own pair of parentheses, so the tree structure is
//!   visible. Groups keep their own `( … )` as well, which doubles the
//!   parentheses around parenthesized input.
//!
//! `Display` for `Term` is the pretty style.
//!
//! ```rust
//! # use exprkit_calc::{parse, Style};
//! let t = parse("1 + 2 * 3").unwrap();
//! assert_eq!(t.to_string(), "1 + 2 * 3");
//! assert_eq!(t.display(Style::Explicit).to_string(), "((1) + ((2) * (3)))");
//! assert_eq!(t.evaluate(), 7.0);
//! ```
use crate::CalcError;
use crate::constant::Constant;
use crate::numeral::Numeral;
use crate::oper::Operator;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Pretty,
    Explicit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Numeral(Numeral),
    Constant(Constant),
    Grouping(Box<Term>),
    Operation(Operation),
}

/// An operator applied to exactly [`Operator::arity`] operands, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    oper: &'static Operator,
    operands: Vec<Term>,
}

impl Operation {
    pub fn new(oper: &'static Operator, operands: Vec<Term>) -> Result<Self, CalcError> {
        if operands.len() != oper.arity() {
            return Err(CalcError::ArityMismatch {
                token: oper.token,
                expected: oper.arity(),
                got: operands.len(),
            });
        }
        Ok(Self { oper, operands })
    }

    pub fn evaluate(&self) -> f64 {
        let values: Vec<f64> = self.operands.iter().map(Term::evaluate).collect();
        (self.oper.apply)(&values)
    }
}

impl Term {
    /// Computes the value. Infinities and NaN propagate; nothing here fails.
    pub fn evaluate(&self) -> f64 {
        match self {
            Term::Numeral(n) => n.evaluate(),
            Term::Constant(c) => c.evaluate(),
            Term::Grouping(inner) => inner.evaluate(),
            Term::Operation(op) => op.evaluate(),
        }
    }

    /// Returns a [`fmt::Display`] adapter rendering in `style`.
    pub fn display(&self, style: Style) -> TermDisplay<'_> {
        TermDisplay { term: self, style }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, style: Style) -> fmt::Result {
        let explicit = style == Style::Explicit;
        match self {
            Term::Numeral(n) if explicit => write!(f, "({n})"),
            Term::Numeral(n) => write!(f, "{n}"),
            Term::Constant(c) if explicit => write!(f, "({c})"),
            Term::Constant(c) => write!(f, "{c}"),
            Term::Grouping(inner) => {
                f.write_str("( ")?;
                inner.render(f, style)?;
                f.write_str(" )")
            }
            Term::Operation(op) => {
                if explicit {
                    f.write_str("(")?;
                }
                let mut operands = op.operands.iter();
                for part in op.oper.shape.split_inclusive('#') {
                    match part.strip_suffix('#') {
                        Some(text) => {
                            f.write_str(text)?;
                            if let Some(operand) = operands.next() {
                                operand.render(f, style)?;
                            }
                        }
                        None => f.write_str(part)?,
                    }
                }
                if explicit {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, Style::Pretty)
    }
}

/// Renders a [`Term`] in a chosen [`Style`]; see [`Term::display`].
pub struct TermDisplay<'a> {
    term: &'a Term,
    style: Style,
}

impl fmt::Display for TermDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.term.render(f, self.style)
    }
}
