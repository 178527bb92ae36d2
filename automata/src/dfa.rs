/* Description: Deterministic finite automaton structure.

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

//! Deterministic finite automaton structure.

use std::{collections::VecDeque, fmt};

use indexmap::map::Entry;

use crate::{
  alphabet::{Alphabet, Label},
  error::ConstructionError,
  simple_eval::{dfa::DfaCache, SimpleEvaluator},
  state::{State, StateSet},
  verdict::Verdict,
  Automaton, FxIndexMap,
};

/// A DFA with a partial transition function: a missing `(state, symbol)`
/// entry rejects rather than routing to a sink state.
#[derive(Clone, PartialEq, Eq)]
pub struct Dfa {
  states: StateSet,
  alphabet: Alphabet,
  transitions: FxIndexMap<(State, char), State>,
  start: State,
  accepting: StateSet,
}

impl Dfa {
  /// Validate and assemble a DFA.
  ///
  /// Fails if `start` or any accepting state is outside `states`, if a
  /// transition references an unknown state or a symbol outside `alphabet`,
  /// or if any `(state, symbol)` pair is given two different destinations.
  pub fn new(
    states: impl IntoIterator<Item=State>,
    alphabet: impl IntoIterator<Item=char>,
    transitions: impl IntoIterator<Item=(State, char, State)>,
    start: State,
    accepting: impl IntoIterator<Item=State>,
  ) -> Result<Self, ConstructionError> {
    let states: StateSet = states.into_iter().collect();
    let alphabet = Alphabet::new(alphabet);
    let accepting: StateSet = accepting.into_iter().collect();

    if !states.contains(start) {
      return Err(ConstructionError::InvalidStart(start));
    }
    if let Some(bad) = accepting.iter().find(|s| !states.contains(*s)) {
      return Err(ConstructionError::InvalidAccepting(bad));
    }

    let mut table: FxIndexMap<(State, char), State> = FxIndexMap::default();
    for (from, symbol, to) in transitions.into_iter() {
      if !states.contains(from) || !states.contains(to) {
        return Err(ConstructionError::UnknownState { from, to });
      }
      if !alphabet.contains(symbol) {
        return Err(ConstructionError::UndeclaredSymbol {
          state: from,
          symbol: Label::Symbol(symbol),
        });
      }
      match table.entry((from, symbol)) {
        Entry::Occupied(e) => {
          let first = *e.get();
          if first != to {
            return Err(ConstructionError::Nondeterministic {
              state: from,
              symbol,
              first,
              second: to,
            });
          }
        },
        Entry::Vacant(e) => {
          e.insert(to);
        },
      }
    }

    Ok(Self {
      states,
      alphabet,
      transitions: table,
      start,
      accepting,
    })
  }

  /// Assemble a DFA from parts which are already known to be consistent.
  pub(crate) fn from_parts(
    states: StateSet,
    alphabet: Alphabet,
    transitions: FxIndexMap<(State, char), State>,
    start: State,
    accepting: StateSet,
  ) -> Self {
    debug_assert!(states.contains(start));
    debug_assert!(accepting.is_subset(&states));
    debug_assert!(transitions
      .iter()
      .all(|(&(from, sym), &to)| states.contains(from)
        && states.contains(to)
        && alphabet.contains(sym)));
    Self {
      states,
      alphabet,
      transitions,
      start,
      accepting,
    }
  }

  #[inline]
  pub fn transition(&self, from: State, symbol: char) -> Option<State> {
    self.transitions.get(&(from, symbol)).copied()
  }

  pub fn num_transitions(&self) -> usize { self.transitions.len() }

  /// Transitions as `(source, symbol, destination)`, in insertion order.
  pub fn transitions(&self) -> impl Iterator<Item=(State, char, State)>+'_ {
    self
      .transitions
      .iter()
      .map(|(&(from, sym), &to)| (from, sym, to))
  }

  /// Every state reachable from the start state by any sequence of symbols,
  /// including the start state itself.
  pub fn reachable_states(&self) -> StateSet {
    let mut reachable = StateSet::singleton(self.start);
    let mut queue: VecDeque<State> = VecDeque::new();
    queue.push_back(self.start);

    while let Some(state) = queue.pop_front() {
      for symbol in self.alphabet.iter() {
        if let Some(next) = self.transition(state, symbol) {
          if reachable.insert(next) {
            queue.push_back(next);
          }
        }
      }
    }

    reachable
  }

  /// See [`crate::minimize::minimize`].
  pub fn minimize(&self) -> Self { crate::minimize::minimize(self) }
}

impl Automaton for Dfa {
  fn states(&self) -> &StateSet { &self.states }

  fn alphabet(&self) -> &Alphabet { &self.alphabet }

  fn start(&self) -> State { self.start }

  fn accepting(&self) -> &StateSet { &self.accepting }

  fn edges(&self) -> impl Iterator<Item=(State, Label, State)>+'_ {
    self
      .transitions()
      .map(|(from, sym, to)| (from, Label::Symbol(sym), to))
  }

  fn accepts_symbols(&self, input: impl IntoIterator<Item=char>) -> Verdict {
    let mut cache: DfaCache = self.create_cache(());
    self.evaluate(&mut cache, input.into_iter()).into()
  }
}

impl fmt::Debug for Dfa {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Dfa")
      .field("states", &self.states)
      .field("alphabet", &self.alphabet)
      .field("start", &self.start)
      .field("accepting", &self.accepting)
      .field("transitions", &self.transitions)
      .finish()
  }
}

impl fmt::Display for Dfa {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(f, "DFA:")?;
    writeln!(f, "  states: {}", self.states)?;
    writeln!(f, "  alphabet: {}", self.alphabet)?;
    writeln!(f, "  start: {}", self.start)?;
    writeln!(f, "  accepting: {}", self.accepting)?;
    write!(f, "  transitions: {}", self.transitions.len())
  }
}

#[cfg(test)]
mod test {
  use proptest::prelude::*;

  use super::*;
  use crate::{verdict::Rejection, FxHashMap};

  fn q(i: u32) -> State { State::new(i) }

  /// Strings over {a, b} ending in "ab".
  fn ends_in_ab() -> Dfa {
    Dfa::new(
      [q(0), q(1), q(2)],
      ['a', 'b'],
      [
        (q(0), 'a', q(1)),
        (q(0), 'b', q(0)),
        (q(1), 'a', q(1)),
        (q(1), 'b', q(2)),
        (q(2), 'a', q(1)),
        (q(2), 'b', q(0)),
      ],
      q(0),
      [q(2)],
    )
    .unwrap()
  }

  #[test]
  fn accepts_basic() {
    let dfa = ends_in_ab();
    assert!(dfa.accepts("ab").is_accepted());
    assert!(dfa.accepts("bbaab").is_accepted());
    assert_eq!(
      dfa.accepts("aba"),
      Verdict::Rejected(Rejection::NotAccepting {
        states: StateSet::singleton(q(1)),
      })
    );
    assert_eq!(dfa.accepts("ab"), Verdict::Accepted {
      states: StateSet::singleton(q(2)),
    });
  }

  #[test]
  fn empty_input_checks_start() {
    let dfa = ends_in_ab();
    assert!(!dfa.accepts("").is_accepted());

    let dfa = Dfa::new([q(0)], ['a'], [(q(0), 'a', q(0))], q(0), [q(0)]).unwrap();
    assert!(dfa.accepts("").is_accepted());
  }

  #[test]
  fn foreign_symbol_fails_fast() {
    let dfa = ends_in_ab();
    assert_eq!(
      dfa.accepts("abc"),
      Verdict::Rejected(Rejection::SymbolNotInAlphabet { symbol: 'c', at: 2 })
    );
  }

  #[test]
  fn missing_transition_rejects() {
    let dfa = Dfa::new([q(0), q(1)], ['a', 'b'], [(q(0), 'a', q(1))], q(0), [q(1)]).unwrap();
    assert!(dfa.accepts("a").is_accepted());
    assert_eq!(
      dfa.accepts("ab"),
      Verdict::Rejected(Rejection::NoTransition {
        state: q(1),
        symbol: 'b',
        at: 1,
      })
    );
  }

  #[test]
  fn construction_errors() {
    assert_eq!(
      Dfa::new([q(0)], ['a'], [], q(1), []).unwrap_err(),
      ConstructionError::InvalidStart(q(1))
    );
    assert_eq!(
      Dfa::new([q(0)], ['a'], [], q(0), [q(0), q(4)]).unwrap_err(),
      ConstructionError::InvalidAccepting(q(4))
    );
    assert_eq!(
      Dfa::new([q(0)], ['a'], [(q(0), 'a', q(3))], q(0), []).unwrap_err(),
      ConstructionError::UnknownState {
        from: q(0),
        to: q(3)
      }
    );
    assert_eq!(
      Dfa::new([q(0)], ['a'], [(q(0), 'b', q(0))], q(0), []).unwrap_err(),
      ConstructionError::UndeclaredSymbol {
        state: q(0),
        symbol: Label::Symbol('b'),
      }
    );
    assert_eq!(
      Dfa::new(
        [q(0), q(1), q(2)],
        ['a'],
        [(q(0), 'a', q(1)), (q(0), 'a', q(2))],
        q(0),
        []
      )
      .unwrap_err(),
      ConstructionError::Nondeterministic {
        state: q(0),
        symbol: 'a',
        first: q(1),
        second: q(2),
      }
    );
  }

  #[test]
  fn always_deterministic() {
    let dfa = ends_in_ab();
    assert!(dfa.is_deterministic());
    /* A repeated identical edge is accepted and stored once. */
    let dfa = Dfa::new(
      [q(0), q(1)],
      ['a'],
      [(q(0), 'a', q(1)), (q(0), 'a', q(1))],
      q(0),
      [q(1)],
    )
    .unwrap();
    assert!(dfa.is_deterministic());
    assert_eq!(dfa.num_transitions(), 1);
  }

  #[test]
  fn reachability() {
    let dfa = Dfa::new(
      [q(0), q(1), q(2), q(3)],
      ['a'],
      [(q(0), 'a', q(1)), (q(1), 'a', q(0)), (q(2), 'a', q(3))],
      q(0),
      [q(3)],
    )
    .unwrap();
    assert_eq!(dfa.reachable_states(), [q(0), q(1)].into_iter().collect::<StateSet>());
  }

  #[test]
  fn summary() {
    let dfa = ends_in_ab();
    assert_eq!(
      dfa.to_string(),
      "DFA:\n  states: {q0, q1, q2}\n  alphabet: {a, b}\n  start: q0\n  accepting: {q2}\n  transitions: 6"
    );
  }

  proptest! {
    #[test]
    fn conflicting_edges_rejected(
      edges in prop::collection::vec(
        (0u32..4, prop::sample::select(vec!['a', 'b']), 0u32..4),
        0..12,
      ),
    ) {
      let edges: Vec<(State, char, State)> = edges
        .into_iter()
        .map(|(from, sym, to)| (q(from), sym, q(to)))
        .collect();
      let mut first_seen: FxHashMap<(State, char), State> = FxHashMap::default();
      let conflict = edges.iter().find_map(|&(from, sym, to)| {
        let first = *first_seen.entry((from, sym)).or_insert(to);
        (first != to).then_some((from, sym, first, to))
      });

      let built = Dfa::new((0..4).map(State::new), ['a', 'b'], edges, q(0), [q(3)]);
      match (built, conflict) {
        (Err(e), Some((state, symbol, first, second))) => {
          prop_assert_eq!(e, ConstructionError::Nondeterministic {
            state,
            symbol,
            first,
            second,
          });
        },
        (Ok(dfa), None) => {
          prop_assert!(dfa.is_deterministic());
          prop_assert_eq!(dfa.num_transitions(), first_seen.len());
        },
        (result, conflict) => {
          prop_assert!(false, "unexpected {:?} for conflict {:?}", result, conflict);
        },
      }
    }
  }
}
