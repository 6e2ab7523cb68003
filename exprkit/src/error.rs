//! Source-location and cursor error types shared by the term parsers.
//!
//! Input is a single line, so a location is a 0-based character offset and a
//! [`Span`] is a half-open range of offsets. The [`span!`] macro builds a
//! `Span` inline, which is handy when populating error values in tests.
//!
//! # Examples
//!
//! ```rust
//! # use exprkit::{Span, span};
//! let sp = Span::new(3, 8);
//! assert_eq!(span!(3, 8), sp);
//! assert_eq!(sp.to_string(), "3..8");
//! ```

use thiserror::Error;

/// A half-open range of character offsets: `[start, end)`.
///
/// Invariants are not enforced here, but it is conventional for
/// `start <= end`.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// First offset covered (inclusive).
    pub start: usize,
    /// Offset one past the last character covered.
    pub end: usize,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Misuse of the [`Cursor`](crate::Cursor) backtracking protocol.
///
/// These never come from user input: a balanced parser cannot trigger them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor mark stack is empty")]
    NoMark,
    #[error("cursor cannot retreat before offset 0")]
    UnexpectedRetreat,
}

/// Build a [`Span`] inline from 0-based character offsets.
///
/// # Examples
///
/// ```rust
/// # use exprkit::span;
/// let s = span!(1, 4);
/// assert_eq!(s.end, 4);
/// ```
#[macro_export]
macro_rules! span {
    ($start:expr, $end:expr) => {
        $crate::Span {
            start: $start,
            end: $end,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_displays_as_range() {
        assert_eq!(span!(1, 4), Span::new(1, 4));
        assert_eq!(span!(1, 4).to_string(), "1..4");
    }

    #[test]
    fn cursor_errors_display() {
        assert!(CursorError::NoMark.to_string().contains("empty"));
        assert!(CursorError::UnexpectedRetreat.to_string().contains("retreat"));
    }
}
