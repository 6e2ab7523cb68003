//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Runtime primitives for hand-written backtracking parsers.
//!
//! - `cursor`: a character read head with a nested mark stack
//! - `error`: offset spans and cursor protocol errors

mod cursor;
mod error;

pub use crate::cursor::{Cursor, is_whitespace};
pub use crate::error::{CursorError, Span};
