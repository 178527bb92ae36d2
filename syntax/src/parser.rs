/* Description: Parser for restricted token-shape patterns.

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

//! Parser for restricted token-shape patterns.

use displaydoc::Display;
use thiserror::Error;

use crate::ast::{
  expr::{Expr, ALTERNATOR},
  postfix_operators::PostfixOp,
};

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
  /// empty expression
  EmptyExpression,
  /// operator {0:?} has nothing to repeat
  DanglingOperator(char),
  /// operator {0:?} may only trail a branch
  MisplacedOperator(char),
}

#[derive(Debug, Display, Error, Copy, Clone, PartialEq, Eq, Hash)]
/// {kind} at offset {at}
pub struct ParseError {
  pub kind: ParseErrorKind,
  /// Offset in chars (not bytes) from the start of the pattern.
  pub at: usize,
}

/// Parse `pattern` into an [`Expr`].
///
/// The whole pattern is split on every `|` first. Each branch must then be a
/// non-empty run of literals, optionally followed by `*`/`+` operators which
/// wrap the entire run. A run of several operators reduces to one: `++` is
/// `+`, and any run containing `*` is `*`.
pub fn parse(pattern: &str) -> Result<Expr, ParseError> {
  let chars: Vec<char> = pattern.chars().collect();

  let mut cases: Vec<Expr> = Vec::new();
  let mut branch_start: usize = 0;
  for (i, c) in chars.iter().enumerate() {
    if *c == ALTERNATOR {
      cases.push(parse_branch(&chars[branch_start..i], branch_start)?);
      branch_start = i + 1;
    }
  }
  cases.push(parse_branch(&chars[branch_start..], branch_start)?);

  debug_assert!(!cases.is_empty());
  if cases.len() == 1 {
    Ok(cases.remove(0))
  } else {
    Ok(Expr::Alternation { cases })
  }
}

fn parse_branch(branch: &[char], offset: usize) -> Result<Expr, ParseError> {
  if branch.is_empty() {
    return Err(ParseError {
      kind: ParseErrorKind::EmptyExpression,
      at: offset,
    });
  }

  if let Some(op) = PostfixOp::from_char(branch[0]) {
    return Err(ParseError {
      kind: ParseErrorKind::DanglingOperator(op.as_char()),
      at: offset,
    });
  }

  /* Peel off the run of trailing operators. */
  let body_len = branch
    .iter()
    .rposition(|c| PostfixOp::from_char(*c).is_none())
    .map_or(0, |i| i + 1);
  let (body, ops) = branch.split_at(body_len);
  debug_assert!(!body.is_empty());
  if let Some(i) = body
    .iter()
    .position(|c| PostfixOp::from_char(*c).is_some())
  {
    return Err(ParseError {
      kind: ParseErrorKind::MisplacedOperator(body[i]),
      at: offset + i,
    });
  }

  let expr = if body.len() == 1 {
    Expr::Literal(body[0])
  } else {
    Expr::Concatenation {
      components: body.iter().copied().map(Expr::Literal).collect(),
    }
  };
  let op = ops
    .iter()
    .filter_map(|c| PostfixOp::from_char(*c))
    .reduce(PostfixOp::combine);
  Ok(match op {
    Some(op) => expr.postfix(op),
    None => expr,
  })
}
