/* Description: Acceptance outcomes and rejection diagnostics.

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

//! Acceptance outcomes and rejection diagnostics.

use core::fmt;

use displaydoc::Display;

use crate::state::{State, StateSet};

/// Why an input was rejected. This is an ordinary outcome, not an error.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub enum Rejection {
  /// symbol {symbol:?} at offset {at} is not in the alphabet
  SymbolNotInAlphabet { symbol: char, at: usize },
  /// no transition from state {state} on symbol {symbol:?} at offset {at}
  NoTransition {
    state: State,
    symbol: char,
    at: usize,
  },
  /// no active states remain after symbol {symbol:?} at offset {at}
  Stuck { symbol: char, at: usize },
  /// input consumed without reaching an accepting state; ended in {states}
  NotAccepting { states: StateSet },
}

impl Rejection {
  /// Offset of the symbol which caused the rejection, if the input was not
  /// fully consumed.
  pub fn offset(&self) -> Option<usize> {
    match self {
      Self::SymbolNotInAlphabet { at, .. }
      | Self::NoTransition { at, .. }
      | Self::Stuck { at, .. } => Some(*at),
      Self::NotAccepting { .. } => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
  /// The accepting states reached once input was exhausted.
  Accepted { states: StateSet },
  Rejected(Rejection),
}

impl Verdict {
  #[inline]
  pub fn is_accepted(&self) -> bool { matches!(self, Self::Accepted { .. }) }

  pub fn rejection(&self) -> Option<&Rejection> {
    match self {
      Self::Accepted { .. } => None,
      Self::Rejected(r) => Some(r),
    }
  }

  /// Human-readable description of the outcome.
  pub fn diagnostic(&self) -> String { self.to_string() }

  /// The `(bool, diagnostic)` pair form.
  pub fn into_pair(self) -> (bool, String) {
    let msg = self.diagnostic();
    (self.is_accepted(), msg)
  }
}

impl From<Result<StateSet, Rejection>> for Verdict {
  fn from(x: Result<StateSet, Rejection>) -> Self {
    match x {
      Ok(states) => Self::Accepted { states },
      Err(r) => Self::Rejected(r),
    }
  }
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Accepted { states } => write!(f, "accepted in {}", states),
      Self::Rejected(r) => write!(f, "rejected: {}", r),
    }
  }
}
