/* Description: Finite automata for validating the shape of token strings.

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

//! Finite automata for validating the shape of token strings.
//!
//! This crate ties the pattern parser and the automaton engine together:
//!
//! ```
//! use jwt_automata::{shapes, Automaton, Matcher};
//!
//! let m = Matcher::compile("ab+|c").unwrap();
//! assert!(m.is_match("abab"));
//! assert!(!m.is_match("abc"));
//!
//! let jwt = shapes::jwt_structure().unwrap();
//! assert!(jwt.accepts("eyJhbGc.eyJzdWI.SflKxw").is_accepted());
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
// #![warn(missing_docs)]
#![deny(unsafe_code)]
/* Ensure any doctest warnings fails the doctest! */
#![doc(test(attr(deny(warnings))))]

use core::fmt;

pub use jwt_automata_engine::{
  minimize, Alphabet, Automaton, ConstructionError, Dfa, Label, Nfa, Rejection, State, StateSet,
  ThompsonBuilder, Verdict,
};
pub use jwt_automata_syntax as syntax;
use jwt_automata_syntax::ParseError;
use tracing::debug;

pub mod shapes;

/// A compiled pattern, held both as its Thompson NFA and as the minimal DFA
/// derived from it.
#[derive(Debug, Clone)]
pub struct Matcher {
  pattern: String,
  nfa: Nfa,
  dfa: Dfa,
}

impl Matcher {
  pub fn compile(pattern: &str) -> Result<Self, ParseError> {
    let mut builder = ThompsonBuilder::new();
    let nfa = builder.compile(pattern)?;
    let dfa = nfa.to_dfa().minimize();
    debug!(
      pattern,
      nfa_states = nfa.num_states(),
      dfa_states = dfa.num_states(),
      "built matcher"
    );
    Ok(Self {
      pattern: pattern.to_string(),
      nfa,
      dfa,
    })
  }

  pub fn pattern(&self) -> &str { &self.pattern }

  pub fn nfa(&self) -> &Nfa { &self.nfa }

  pub fn dfa(&self) -> &Dfa { &self.dfa }

  /// Evaluate `input` against the minimal DFA.
  pub fn verdict(&self, input: &str) -> Verdict { self.dfa.accepts(input) }

  pub fn is_match(&self, input: &str) -> bool { self.verdict(input).is_accepted() }
}

impl fmt::Display for Matcher {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(
      f,
      "/{}/ ({} NFA states, {} DFA states)",
      self.pattern,
      self.nfa.num_states(),
      self.dfa.num_states()
    )
  }
}

#[cfg(test)]
mod test {
  use proptest::prelude::*;

  use super::*;
  use crate::syntax::ParseErrorKind;

  #[test]
  fn compile_and_match() {
    let m = Matcher::compile("a|b").unwrap();
    assert!(m.is_match("a"));
    assert!(m.is_match("b"));
    assert!(!m.is_match("c"));
    assert_eq!(m.pattern(), "a|b");
    /* The minimal DFA has one start state and one merged accepting state. */
    assert_eq!(m.dfa().num_states(), 2);
    assert!(m.nfa().num_states() > m.dfa().num_states());
  }

  #[test]
  fn verdict_reports_dfa_rejection() {
    let m = Matcher::compile("ab").unwrap();
    assert_eq!(
      m.verdict("ax"),
      Verdict::Rejected(Rejection::SymbolNotInAlphabet { symbol: 'x', at: 1 })
    );
    assert!(matches!(
      m.verdict("aa"),
      Verdict::Rejected(Rejection::NoTransition { symbol: 'a', at: 1, .. })
    ));
  }

  #[test]
  fn parse_errors_surface() {
    assert_eq!(
      Matcher::compile("").unwrap_err().kind,
      ParseErrorKind::EmptyExpression
    );
    assert_eq!(
      Matcher::compile("a*b").unwrap_err().kind,
      ParseErrorKind::MisplacedOperator('*')
    );
  }

  #[test]
  fn summary() {
    let m = Matcher::compile("a").unwrap();
    assert_eq!(m.to_string(), "/a/ (2 NFA states, 2 DFA states)");
  }

  proptest! {
    #[test]
    fn dfa_agrees_with_nfa(
      pattern in prop::sample::select(vec!["a", "ab", "a|b", "a*", "a+", "ab*|b+", "abc|ba+|c*"]),
      input in "[abc]{0,6}",
    ) {
      let m = Matcher::compile(pattern).unwrap();
      prop_assert_eq!(m.is_match(&input), m.nfa().accepts(&input).is_accepted());
    }
  }
}
