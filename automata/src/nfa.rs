/* Description: Non-deterministic finite automaton structure.

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

//! Non-deterministic finite automaton structure.

use core::fmt;

use crate::{
  alphabet::{Alphabet, Label},
  dfa::Dfa,
  error::ConstructionError,
  simple_eval::{nfa::NfaCache, SimpleEvaluator},
  state::{State, StateSet},
  verdict::Verdict,
  Automaton, FxIndexMap,
};

/// An NFA whose transition relation maps `(state, label)` to a set of
/// destinations. Absent entries are the empty set.
#[derive(Clone, PartialEq, Eq)]
pub struct Nfa {
  states: StateSet,
  alphabet: Alphabet,
  transitions: FxIndexMap<(State, Label), StateSet>,
  start: State,
  accepting: StateSet,
}

impl Nfa {
  /// Validate and assemble an NFA. Edges sharing a `(source, label)` are
  /// unioned into one destination set.
  ///
  /// Fails if `start` or any accepting state is outside `states`, if an edge
  /// references an unknown state, or if a non-epsilon edge uses a symbol
  /// outside `alphabet`.
  pub fn new(
    states: impl IntoIterator<Item=State>,
    alphabet: impl IntoIterator<Item=char>,
    transitions: impl IntoIterator<Item=(State, Label, State)>,
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

    let mut table: FxIndexMap<(State, Label), StateSet> = FxIndexMap::default();
    for (from, label, to) in transitions.into_iter() {
      if !states.contains(from) || !states.contains(to) {
        return Err(ConstructionError::UnknownState { from, to });
      }
      if let Label::Symbol(symbol) = label {
        if !alphabet.contains(symbol) {
          return Err(ConstructionError::UndeclaredSymbol { state: from, symbol: label });
        }
      }
      table.entry((from, label)).or_default().insert(to);
    }

    Ok(Self {
      states,
      alphabet,
      transitions: table,
      start,
      accepting,
    })
  }

  pub(crate) fn from_parts(
    states: StateSet,
    alphabet: Alphabet,
    transitions: FxIndexMap<(State, Label), StateSet>,
    start: State,
    accepting: StateSet,
  ) -> Self {
    debug_assert!(states.contains(start));
    debug_assert!(accepting.is_subset(&states));
    debug_assert!(transitions.iter().all(|(&(from, label), to)| {
      states.contains(from)
        && to.is_subset(&states)
        && label.symbol().map_or(true, |c| alphabet.contains(c))
    }));
    Self {
      states,
      alphabet,
      transitions,
      start,
      accepting,
    }
  }

  /// Destinations of `from` on `label`; empty if there is no such edge.
  pub fn destinations(&self, from: State, label: Label) -> &[State] {
    self
      .transitions
      .get(&(from, label))
      .map(StateSet::as_slice)
      .unwrap_or(&[])
  }

  /// Number of `(source, label, destination)` edges.
  pub fn num_transitions(&self) -> usize { self.transitions.values().map(StateSet::len).sum() }

  pub(crate) fn transition_table(&self) -> &FxIndexMap<(State, Label), StateSet> {
    &self.transitions
  }

  /// All states reachable from `states` by epsilon edges alone, including
  /// `states` themselves.
  pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
    let mut closure = states.clone();
    let mut pending: Vec<State> = states.iter().collect();

    while let Some(state) = pending.pop() {
      for &next in self.destinations(state, Label::Epsilon) {
        if closure.insert(next) {
          pending.push(next);
        }
      }
    }

    closure
  }

  /// States reachable from `states` by consuming exactly `symbol`. Epsilon
  /// edges are not followed.
  pub fn move_on(&self, states: &StateSet, symbol: char) -> StateSet {
    let mut ret = StateSet::new();
    for state in states.iter() {
      ret.extend(self.destinations(state, Label::Symbol(symbol)).iter().copied());
    }
    ret
  }

  /// Determinize by subset construction. See [`crate::subset::determinize`].
  pub fn to_dfa(&self) -> Dfa { crate::subset::determinize(self) }
}

impl Automaton for Nfa {
  fn states(&self) -> &StateSet { &self.states }

  fn alphabet(&self) -> &Alphabet { &self.alphabet }

  fn start(&self) -> State { self.start }

  fn accepting(&self) -> &StateSet { &self.accepting }

  fn edges(&self) -> impl Iterator<Item=(State, Label, State)>+'_ {
    self
      .transitions
      .iter()
      .flat_map(|(&(from, label), to)| to.iter().map(move |to| (from, label, to)))
  }

  fn accepts_symbols(&self, input: impl IntoIterator<Item=char>) -> Verdict {
    let mut cache: NfaCache = self.create_cache(());
    self.evaluate(&mut cache, input.into_iter()).into()
  }
}

impl fmt::Debug for Nfa {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Nfa")
      .field("states", &self.states)
      .field("alphabet", &self.alphabet)
      .field("start", &self.start)
      .field("accepting", &self.accepting)
      .field("transitions", &self.transitions)
      .finish()
  }
}

impl fmt::Display for Nfa {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(f, "NFA:")?;
    writeln!(f, "  states: {}", self.states)?;
    writeln!(f, "  alphabet: {}", self.alphabet)?;
    writeln!(f, "  start: {}", self.start)?;
    writeln!(f, "  accepting: {}", self.accepting)?;
    write!(f, "  transitions: {}", self.num_transitions())
  }
}
