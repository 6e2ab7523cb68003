//! Backtracking read head over a line of input.
//!
//! [`Cursor`] hands out one character at a time and keeps a stack of saved
//! offsets ("marks"). A parser marks before consuming, then either commits
//! ([`Cursor::unmark`]) or rolls back ([`Cursor::restore`]). Marks nest, which
//! is what lets recursive-descent term parsers try an alternative and back out
//! cleanly.
//!
//! Prefer [`Cursor::attempt`] over calling `mark`/`unmark`/`restore` by hand:
//! it keeps the mark stack balanced on every exit path, including error
//! propagation.

use crate::CursorError;

/// Characters treated as insignificant between terms.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// A read head over the characters of one input line.
///
/// Reading past the end returns `None` but still advances the offset, so the
/// offset may exceed [`len`](Cursor::len) by the number of reads past the end.
/// A parser that over-reads one lookahead character un-reads it with
/// [`push_back`](Cursor::push_back).
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
    marks: Vec<usize>,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            marks: Vec::new(),
        }
    }

    /// Current offset, in characters.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Number of characters in the input.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` once every input character has been read.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Number of outstanding marks.
    #[inline]
    pub fn depth(&self) -> usize {
        self.marks.len()
    }

    /// Returns the character at the offset and advances past it.
    pub fn next(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied();
        self.pos += 1;
        c
    }

    /// Un-reads the last character.
    pub fn push_back(&mut self) -> Result<(), CursorError> {
        if self.pos == 0 {
            return Err(CursorError::UnexpectedRetreat);
        }
        self.pos -= 1;
        Ok(())
    }

    /// Moves the offset forward by `n` characters.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Saves the current offset.
    pub fn mark(&mut self) {
        self.marks.push(self.pos);
    }

    /// Discards the most recent mark, keeping the current offset.
    pub fn unmark(&mut self) -> Result<(), CursorError> {
        self.marks.pop().ok_or(CursorError::NoMark)?;
        Ok(())
    }

    /// Rewinds to the most recent mark and discards it.
    pub fn restore(&mut self) -> Result<(), CursorError> {
        let mark = self.marks.pop().ok_or(CursorError::NoMark)?;
        log::trace!("cursor restore {} -> {}", self.pos, mark);
        self.pos = mark;
        Ok(())
    }

    /// Runs `f` under a fresh mark.
    ///
    /// `Ok(Some(_))` commits whatever `f` consumed. `Ok(None)` (no match) and
    /// `Err(_)` both rewind to where `f` started. The mark is released exactly
    /// once either way.
    pub fn attempt<T, E, F>(&mut self, f: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&mut Self) -> Result<Option<T>, E>,
        E: From<CursorError>,
    {
        self.mark();
        match f(self) {
            Ok(Some(value)) => {
                self.unmark()?;
                Ok(Some(value))
            }
            Ok(None) => {
                self.restore()?;
                Ok(None)
            }
            Err(err) => {
                self.restore()?;
                Err(err)
            }
        }
    }

    /// Reads past whitespace, leaving the offset on the first other character.
    pub fn skip_whitespace(&mut self) -> Result<(), CursorError> {
        loop {
            match self.next() {
                Some(c) if is_whitespace(c) => continue,
                _ => return self.push_back(),
            }
        }
    }

    /// Offset of the first non-whitespace character at or after the current
    /// offset. Does not move the cursor.
    pub fn content_offset(&self) -> usize {
        let skipped = self
            .chars
            .get(self.pos..)
            .map_or(0, |rest| rest.iter().take_while(|&&c| is_whitespace(c)).count());
        self.pos + skipped
    }

    /// Does the unread input begin with `s`?
    pub fn starts_with(&self, s: &str) -> bool {
        match self.chars.get(self.pos..) {
            Some(rest) => {
                let mut rest = rest.iter();
                s.chars().all(|c| rest.next() == Some(&c))
            }
            None => false,
        }
    }

    /// Like [`starts_with`](Cursor::starts_with), ignoring ASCII case.
    pub fn starts_with_ignore_case(&self, s: &str) -> bool {
        match self.chars.get(self.pos..) {
            Some(rest) => {
                let mut rest = rest.iter();
                s.chars()
                    .all(|c| rest.next().is_some_and(|r| r.eq_ignore_ascii_case(&c)))
            }
            None => false,
        }
    }

    /// The unread input, for diagnostics.
    pub fn rest(&self) -> String {
        self.chars
            .get(self.pos..)
            .map(|r| r.iter().collect())
            .unwrap_or_default()
    }
}
