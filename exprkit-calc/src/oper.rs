//! Operator definitions and precedence handling.
//!
//! This module holds the fixed operator catalog of the calculator. Each
//! [`Operator`] describes one *use* of a token: `-` appears twice, once as
//! prefix negation and once as infix subtraction. Which entry a token in the
//! input denotes is decided later, during condensation, from its position
//! among the surrounding terms.
//!
//! # Precedence
//! The magnitude of [`Operator::prec`] is the binding strength (the
//! *reduction rank*); higher binds tighter. The sign selects how ties are
//! broken:
//!
//! - **Negative** (prefix operators, `^`, `ln`, `log`): among equal ranks the
//!   rightmost wins, which groups chains right to left (`2 ^ 3 ^ 2` is
//!   `2 ^ (3 ^ 2)`).
//! - **Positive** (the arithmetic infix operators): the leftmost wins, which
//!   groups left to right (`8 - 4 - 2` is `(8 - 4) - 2`).
//!
//! # Shapes
//! [`Operator::shape`] is a rendering template in which each `#` is replaced,
//! left to right, by the rendering of one operand.
//!
//! # Lookup
//! [`candidates`] returns every catalog entry for a token, in declaration
//! order, from an index built once on first use. [`match_token`] finds the
//! longest token at the cursor.

use crate::CalcError;
use exprkit::Cursor;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use std::fmt;

/// One entry of the operator catalog.
pub struct Operator {
    /// Signed precedence; see the module docs.
    pub prec: i8,
    /// Text matched in the input.
    pub token: &'static str,
    /// Operands taken from the left. Zero means prefix (unary).
    pub left: usize,
    /// Operands taken from the right.
    pub right: usize,
    /// Rendering template; `#` marks an operand slot.
    pub shape: &'static str,
    /// Arithmetic rule applied to the evaluated operands, in order.
    pub apply: fn(&[f64]) -> f64,
}

impl Operator {
    /// Absolute precedence, used to pick the next reduction.
    #[inline]
    pub fn rank(&self) -> u8 {
        self.prec.unsigned_abs()
    }

    /// Total number of operands.
    #[inline]
    pub fn arity(&self) -> usize {
        self.left + self.right
    }

    #[inline]
    pub fn is_prefix(&self) -> bool {
        self.left == 0
    }

    #[inline]
    pub fn groups_right(&self) -> bool {
        self.prec < 0
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("prec", &self.prec)
            .field("token", &self.token)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.shape)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

/// The operator catalog. Order matters only for lookup order of shared tokens.
pub static OPERATORS: [Operator; 11] = [
    Operator {
        prec: -6,
        token: "ln",
        left: 0,
        right: 1,
        shape: "ln#",
        apply: |a| a[0].ln(),
    },
    Operator {
        prec: -6,
        token: "log",
        left: 0,
        right: 1,
        shape: "log#",
        apply: |a| a[0].log10(),
    },
    Operator {
        prec: -5,
        token: "^",
        left: 1,
        right: 1,
        shape: "#^#",
        apply: |a| a[0].powf(a[1]),
    },
    Operator {
        prec: -4,
        token: "+",
        left: 0,
        right: 1,
        shape: "+#",
        apply: |a| a[0],
    },
    Operator {
        prec: -4,
        token: "-",
        left: 0,
        right: 1,
        shape: "-#",
        apply: |a| -a[0],
    },
    Operator {
        prec: 3,
        token: "*",
        left: 1,
        right: 1,
        shape: "# * #",
        apply: |a| a[0] * a[1],
    },
    Operator {
        prec: 3,
        token: "/",
        left: 1,
        right: 1,
        shape: "# / #",
        apply: |a| a[0] / a[1],
    },
    Operator {
        prec: 3,
        token: "%",
        left: 1,
        right: 1,
        shape: "# % #",
        apply: |a| a[0] % a[1],
    },
    Operator {
        prec: 2,
        token: "+",
        left: 1,
        right: 1,
        shape: "# + #",
        apply: |a| a[0] + a[1],
    },
    Operator {
        prec: 2,
        token: "-",
        left: 1,
        right: 1,
        shape: "# - #",
        apply: |a| a[0] - a[1],
    },
    Operator {
        prec: 1,
        token: "mod",
        left: 1,
        right: 1,
        shape: "# mod #",
        apply: |a| a[0] % a[1],
    },
];

/// Token text to catalog entries, in declaration order.
static BY_TOKEN: Lazy<IndexMap<&'static str, Vec<&'static Operator>>> = Lazy::new(|| {
    let mut map: IndexMap<&'static str, Vec<&'static Operator>> = IndexMap::new();
    for op in OPERATORS.iter() {
        map.entry(op.token).or_default().push(op);
    }
    map
});

/// Every catalog entry spelled `token`.
pub fn candidates(token: &str) -> &'static [&'static Operator] {
    BY_TOKEN.get(token).map(Vec::as_slice).unwrap_or(&[])
}

/// All distinct tokens, in first-declaration order.
pub fn tokens() -> impl Iterator<Item = &'static str> {
    BY_TOKEN.keys().copied()
}

/// Consumes the longest operator token at the cursor, after whitespace.
///
/// Tokens are matched case-sensitively. Returns the token and the offset it
/// starts at.
pub fn match_token(cursor: &mut Cursor) -> Result<Option<(&'static str, usize)>, CalcError> {
    cursor.attempt(|cursor| {
        cursor.skip_whitespace()?;
        let offset = cursor.pos();
        let found = tokens()
            .filter(|t| cursor.starts_with(t))
            .max_by_key(|t| t.len());
        Ok(found.map(|t| {
            cursor.advance(t.chars().count());
            (t, offset)
        }))
    })
}
