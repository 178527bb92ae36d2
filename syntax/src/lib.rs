/* Description: AST generation from restricted token-shape pattern strings.

Copyright (C) 2024 Danny McClanahan <dmcC2@hypnicjerk.ai>
SPDX-License-Identifier: GPL-3.0-or-later

This file is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as
published by the Free Software Foundation; either version 3 of the
License, or (at your option) any later version.

This file is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>. */

#![warn(rustdoc::missing_crate_level_docs)]
// #![warn(missing_docs)]
#![deny(unsafe_code)]
/* Ensure any doctest warnings fails the doctest! */
#![doc(test(attr(deny(warnings))))]

//! AST generation from restricted token-shape pattern strings.
//!
//! The grammar is deliberately small: single-character literals, implicit
//! concatenation, top-level `|` alternation, and trailing `*`/`+` operators
//! which apply to the whole branch they end. There is no grouping and no
//! escaping.
//!
//! ```
//! use jwt_automata_syntax::{ast::Expr, parser::parse};
//!
//! let expr = parse("ab|c+").unwrap();
//! assert!(matches!(expr, Expr::Alternation { .. }));
//! assert_eq!(expr.to_string(), "ab|c+");
//! ```

pub mod ast;
pub mod parser;

pub use parser::{parse, ParseError, ParseErrorKind};

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn reexports() {
    let e = parse("a").unwrap();
    assert_eq!(e, ast::Expr::Literal('a'));
    assert_eq!(
      parse("").unwrap_err().kind,
      ParseErrorKind::EmptyExpression
    );
  }
}
