/* Description: AST for restricted token-shape pattern strings.

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

//! AST for restricted token-shape pattern strings.

pub mod postfix_operators {
  use core::fmt;

  #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
  #[cfg_attr(
    any(test, feature = "proptest"),
    derive(proptest_derive::Arbitrary)
  )]
  pub enum PostfixOp {
    /// Zero or more repetitions.
    Star,
    /// One or more repetitions.
    Plus,
  }

  impl PostfixOp {
    pub const STAR: char = '*';
    pub const PLUS: char = '+';

    pub const fn from_char(c: char) -> Option<Self> {
      match c {
        Self::STAR => Some(Self::Star),
        Self::PLUS => Some(Self::Plus),
        _ => None,
      }
    }

    pub const fn as_char(self) -> char {
      match self {
        Self::Star => Self::STAR,
        Self::Plus => Self::PLUS,
      }
    }

    /// The single operator equivalent to applying `self` and `other` in
    /// either order: `++` is `+`, any pairing with `*` is `*`.
    pub const fn combine(self, other: Self) -> Self {
      match (self, other) {
        (Self::Plus, Self::Plus) => Self::Plus,
        _ => Self::Star,
      }
    }
  }

  impl fmt::Display for PostfixOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.as_char()) }
  }
}

pub mod expr {
  use core::fmt;

  use super::postfix_operators::PostfixOp;

  /// The separator between top-level cases.
  pub const ALTERNATOR: char = '|';

  /// A parsed pattern.
  ///
  /// `Display` renders the pattern text. For trees [`parse`](crate::parse)
  /// produces, that text parses back to an equal tree. Hand-built trees the
  /// restricted grammar cannot spell, such as a repeated literal followed by
  /// more literals, render text which `parse` rejects.
  #[derive(Debug, Clone, PartialEq, Eq, Hash)]
  pub enum Expr {
    /// A single input symbol.
    Literal(char),
    /// Adjacent sub-expressions, matched one after the other. The parser only
    /// produces this with >= 2 components.
    Concatenation { components: Vec<Expr> },
    /// Any one of several cases. The parser only produces this with >= 2
    /// cases.
    Alternation { cases: Vec<Expr> },
    /// A repetition operator applied to everything it trails.
    Postfix { inner: Box<Expr>, op: PostfixOp },
  }

  impl Expr {
    pub fn literal_string(s: &str) -> Self {
      let mut components: Vec<Self> = s.chars().map(Self::Literal).collect();
      if components.len() == 1 {
        components.remove(0)
      } else {
        Self::Concatenation { components }
      }
    }

    pub fn postfix(self, op: PostfixOp) -> Self {
      Self::Postfix {
        inner: Box::new(self),
        op,
      }
    }

    /// Strip every directly nested [`Self::Postfix`] layer, returning the
    /// innermost operand and the one operator the whole stack reduces to.
    pub fn collapse_postfix(&self) -> (&Self, Option<PostfixOp>) {
      let mut body = self;
      let mut collapsed: Option<PostfixOp> = None;
      while let Self::Postfix { inner, op } = body {
        collapsed = Some(collapsed.map_or(*op, |outer| outer.combine(*op)));
        body = inner.as_ref();
      }
      (body, collapsed)
    }
  }

  impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
      match self {
        Self::Literal(c) => write!(f, "{}", c),
        Self::Concatenation { components } => {
          for c in components.iter() {
            write!(f, "{}", c)?;
          }
          Ok(())
        },
        Self::Alternation { cases } => {
          let Some((first, rest)) = cases.split_first() else {
            return Ok(());
          };
          write!(f, "{}", first)?;
          for c in rest.iter() {
            write!(f, "{}{}", ALTERNATOR, c)?;
          }
          Ok(())
        },
        Self::Postfix { .. } => {
          /* Walk the operator stack without recursing, then print it
           * innermost first. */
          let mut ops: Vec<PostfixOp> = Vec::new();
          let mut body = self;
          while let Self::Postfix { inner, op } = body {
            ops.push(*op);
            body = inner.as_ref();
          }
          write!(f, "{}", body)?;
          for op in ops.iter().rev() {
            write!(f, "{}", op)?;
          }
          Ok(())
        },
      }
    }
  }

  cfg_if::cfg_if! {
    if #[cfg(any(test, feature = "proptest"))] {
      use proptest::{
        collection::vec,
        prelude::*,
        sample::select,
        strategy::BoxedStrategy,
      };

      /// Generates only the shapes the parser can produce: alternations of
      /// branches, where each branch is a literal run followed by at most one
      /// operator.
      impl Arbitrary for Expr {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_args: ()) -> Self::Strategy {
          let body = vec(select(vec!['a', 'b', 'c']), 1..=3).prop_map(|lits| {
            let s: String = lits.into_iter().collect();
            Self::literal_string(&s)
          });
          let branch = (body, proptest::option::of(any::<PostfixOp>()))
            .prop_map(|(body, op)| op.into_iter().fold(body, Self::postfix));
          vec(branch, 1..=3)
            .prop_map(|mut cases| {
              if cases.len() == 1 {
                cases.remove(0)
              } else {
                Self::Alternation { cases }
              }
            })
            .boxed()
        }
      }
    }
  }
}

pub use expr::Expr;
pub use postfix_operators::PostfixOp;

#[cfg(test)]
mod test {
  use super::{expr::*, postfix_operators::*};

  #[test]
  fn expr_display() {
    let e = Expr::Alternation {
      cases: vec![
        Expr::Concatenation {
          components: vec![Expr::Literal('a'), Expr::Literal('b')],
        },
        Expr::Postfix {
          inner: Box::new(Expr::Postfix {
            inner: Box::new(Expr::Literal('c')),
            op: PostfixOp::Star,
          }),
          op: PostfixOp::Plus,
        },
      ],
    };
    assert_eq!(&format!("{}", e), "ab|c*+");

    let e = Expr::literal_string("eyJ").postfix(PostfixOp::Plus);
    assert_eq!(&format!("{}", e), "eyJ+");
  }

  #[test]
  fn literal_string_single() {
    assert_eq!(Expr::literal_string("x"), Expr::Literal('x'));
    assert_eq!(Expr::literal_string("xy"), Expr::Concatenation {
      components: vec![Expr::Literal('x'), Expr::Literal('y')],
    });
  }

  #[test]
  fn collapse_postfix_stack() {
    let e = Expr::literal_string("ab")
      .postfix(PostfixOp::Plus)
      .postfix(PostfixOp::Plus);
    assert_eq!(
      e.collapse_postfix(),
      (&Expr::literal_string("ab"), Some(PostfixOp::Plus))
    );
    let e = Expr::Literal('a')
      .postfix(PostfixOp::Plus)
      .postfix(PostfixOp::Star);
    assert_eq!(
      e.collapse_postfix(),
      (&Expr::Literal('a'), Some(PostfixOp::Star))
    );
    assert_eq!(Expr::Literal('a').collapse_postfix(), (&Expr::Literal('a'), None));
  }

  #[test]
  fn deep_postfix_display() {
    let e = (0..1_000).fold(Expr::Literal('a'), |e, _| e.postfix(PostfixOp::Star));
    let rendered = e.to_string();
    assert_eq!(rendered.len(), 1_001);
    assert!(rendered.starts_with("a**"));
  }

  #[test]
  fn postfix_chars() {
    assert_eq!(PostfixOp::from_char('*'), Some(PostfixOp::Star));
    assert_eq!(PostfixOp::from_char('+'), Some(PostfixOp::Plus));
    assert_eq!(PostfixOp::from_char('?'), None);
    assert_eq!(PostfixOp::Plus.to_string(), "+");
    assert_eq!(PostfixOp::Plus.combine(PostfixOp::Plus), PostfixOp::Plus);
    assert_eq!(PostfixOp::Plus.combine(PostfixOp::Star), PostfixOp::Star);
    assert_eq!(PostfixOp::Star.combine(PostfixOp::Plus), PostfixOp::Star);
  }
}
