/* Description: Construction, simulation and minimization of finite automata.

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

//! Construction, simulation and minimization of finite automata.
//!
//! Automata are immutable once built. Every transformation ([`minimize`],
//! [`Nfa::to_dfa`], the [`ThompsonBuilder`] combinators) returns a new value.
//!
//! ```
//! use jwt_automata_engine::{Automaton, ThompsonBuilder};
//!
//! let mut builder = ThompsonBuilder::new();
//! let nfa = builder.compile("a|b").unwrap();
//! assert!(nfa.accepts("a").is_accepted());
//! assert!(!nfa.accepts("c").is_accepted());
//!
//! let dfa = nfa.to_dfa().minimize();
//! assert!(dfa.accepts("b").is_accepted());
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
// #![warn(missing_docs)]
#![deny(unsafe_code)]
/* Ensure any doctest warnings fails the doctest! */
#![doc(test(attr(deny(warnings))))]

use core::hash::BuildHasherDefault;

use hashbrown::hash_map::{Entry, HashMap};
use indexmap::IndexMap;
use rustc_hash::FxHasher;

pub mod alphabet;
pub mod dfa;
pub mod error;
pub mod minimize;
pub mod nfa;
pub mod simple_eval;
pub mod state;
pub mod subset;
pub mod thompson;
pub mod verdict;

pub use alphabet::{Alphabet, Label};
pub use dfa::Dfa;
pub use error::ConstructionError;
pub use minimize::minimize;
pub use nfa::Nfa;
pub use state::{State, StateSet};
pub use thompson::ThompsonBuilder;
pub use verdict::{Rejection, Verdict};

pub(crate) type FxBuildHasher = BuildHasherDefault<FxHasher>;
pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxHashMap<K, V> = HashMap<K, V, FxBuildHasher>;

/// The vocabulary shared by deterministic and nondeterministic automata.
pub trait Automaton {
  fn states(&self) -> &StateSet;

  fn alphabet(&self) -> &Alphabet;

  fn start(&self) -> State;

  fn accepting(&self) -> &StateSet;

  /// Every `(source, label, destination)` triple in the transition relation.
  fn edges(&self) -> impl Iterator<Item=(State, Label, State)>+'_;

  fn num_states(&self) -> usize { self.states().len() }

  /// Whether no `(state, symbol)` pair has more than one destination, and no
  /// epsilon transitions exist.
  fn is_deterministic(&self) -> bool { is_deterministic(self.edges()) }

  fn accepts_symbols(&self, input: impl IntoIterator<Item=char>) -> Verdict;

  fn accepts(&self, input: &str) -> Verdict { self.accepts_symbols(input.chars()) }
}

/// Check the determinism invariant over an arbitrary transition relation.
pub fn is_deterministic(edges: impl IntoIterator<Item=(State, Label, State)>) -> bool {
  let mut seen: FxHashMap<(State, char), State> = FxHashMap::default();
  for (from, label, to) in edges.into_iter() {
    let Label::Symbol(symbol) = label else {
      return false;
    };
    match seen.entry((from, symbol)) {
      Entry::Occupied(e) => {
        if *e.get() != to {
          return false;
        }
      },
      Entry::Vacant(e) => {
        e.insert(to);
      },
    }
  }
  true
}

/* Automata are plain immutable values, so they may be shared across threads
 * freely. The builder owns its counter and moves between threads, but must not
 * be shared without synchronization. */
static_assertions::assert_impl_all!(Dfa: Send, Sync, Clone);
static_assertions::assert_impl_all!(Nfa: Send, Sync, Clone);
static_assertions::assert_impl_all!(Verdict: Send, Sync);
static_assertions::assert_impl_all!(ThompsonBuilder: Send);
