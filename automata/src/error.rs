/* Description: Errors for malformed automaton definitions.

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

//! Errors for malformed automaton definitions.
//!
//! These are precondition violations caught before any simulation happens.
//! Rejecting an input string is not an error: see [`crate::verdict`].

use displaydoc::Display;
use thiserror::Error;

use crate::{alphabet::Label, state::State};

#[derive(Debug, Display, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConstructionError {
  /// start state {0} is not a member of the state set
  InvalidStart(State),
  /// accepting state {0} is not a member of the state set
  InvalidAccepting(State),
  /// transition {from} -> {to} references a state outside the state set
  UnknownState { from: State, to: State },
  /// transition from {state} on {symbol} uses a symbol outside the alphabet
  UndeclaredSymbol { state: State, symbol: Label },
  /// state {state} has two destinations on {symbol:?}: {first} and {second}
  Nondeterministic {
    state: State,
    symbol: char,
    first: State,
    second: State,
  },
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn messages() {
    assert_eq!(
      ConstructionError::InvalidStart(State::new(9)).to_string(),
      "start state q9 is not a member of the state set"
    );
    assert_eq!(
      ConstructionError::UndeclaredSymbol {
        state: State::new(0),
        symbol: Label::Symbol('x'),
      }
      .to_string(),
      "transition from q0 on x uses a symbol outside the alphabet"
    );
    assert_eq!(
      ConstructionError::Nondeterministic {
        state: State::new(1),
        symbol: 'a',
        first: State::new(2),
        second: State::new(3),
      }
      .to_string(),
      "state q1 has two destinations on 'a': q2 and q3"
    );
  }
}
