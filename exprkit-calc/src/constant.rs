//! Named constants (`pi`, `e`).
use crate::CalcError;
use exprkit::Cursor;
use std::fmt;

/// Known constants, in match order. Names are lowercase.
pub const CONSTANTS: &[(&str, f64)] = &[("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    pub name: &'static str,
    pub value: f64,
}

impl Constant {
    /// Reads the longest constant name at the cursor, ignoring case and
    /// leading whitespace. Earlier table entries win ties.
    pub fn parse(cursor: &mut Cursor) -> Result<Option<Constant>, CalcError> {
        cursor.attempt(|cursor| {
            cursor.skip_whitespace()?;
            let found = CONSTANTS
                .iter()
                .filter(|(name, _)| cursor.starts_with_ignore_case(name))
                .fold(None::<&(&str, f64)>, |best, c| match best {
                    Some(b) if b.0.len() >= c.0.len() => Some(b),
                    _ => Some(c),
                });
            Ok(found.map(|&(name, value)| {
                cursor.advance(name.chars().count());
                log::trace!("constant {name}");
                Constant { name, value }
            }))
        })
    }

    pub fn evaluate(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_names_case_insensitively() {
        let mut cursor = Cursor::new("  Pi*2");
        let c = Constant::parse(&mut cursor).unwrap().unwrap();
        assert_eq!(c.evaluate(), std::f64::consts::PI);
        assert_eq!(c.to_string(), "pi");
        assert_eq!(cursor.rest(), "*2");

        let mut cursor = Cursor::new("E");
        let c = Constant::parse(&mut cursor).unwrap().unwrap();
        assert_eq!(c.evaluate(), std::f64::consts::E);
        assert_eq!(c.to_string(), "e");
        assert!(cursor.is_at_end());
    }

    #[test]
    fn only_the_name_is_consumed() {
        let mut cursor = Cursor::new("e10");
        let c = Constant::parse(&mut cursor).unwrap().unwrap();
        assert_eq!(c.name, "e");
        assert_eq!(cursor.rest(), "10");
    }

    #[test]
    fn no_match_rewinds() {
        for s in ["", "  ", "p", "3", "(pi)", "ln"] {
            let mut cursor = Cursor::new(s);
            assert!(Constant::parse(&mut cursor).unwrap().is_none(), "{s:?}");
            assert_eq!(cursor.pos(), 0);
            assert_eq!(cursor.depth(), 0);
        }
    }
}
