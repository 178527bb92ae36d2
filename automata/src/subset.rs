/* Description: Powerset construction from NFAs to DFAs.

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

//! Powerset construction from NFAs to DFAs.

use tracing::debug;

use crate::{
  dfa::Dfa,
  nfa::Nfa,
  state::{State, StateSet},
  Automaton, FxIndexMap,
};

/// Build a DFA accepting the same strings as `nfa`.
///
/// Each DFA state stands for an epsilon-closed set of NFA states. States are
/// numbered `q0..` in breadth-first discovery order, visiting symbols in
/// alphabet order. A symbol leading to the empty set produces no transition.
pub fn determinize(nfa: &Nfa) -> Dfa {
  /* Insertion order doubles as the work queue: everything past `cursor` has
   * been discovered but not yet expanded. */
  let mut discovered: FxIndexMap<StateSet, State> = FxIndexMap::default();
  let mut transitions: FxIndexMap<(State, char), State> = FxIndexMap::default();

  let initial = nfa.epsilon_closure(&StateSet::singleton(nfa.start()));
  discovered.insert(initial, State::new(0));

  let mut cursor: usize = 0;
  while let Some((current, &from)) = discovered.get_index(cursor) {
    let current = current.clone();
    cursor += 1;

    for symbol in nfa.alphabet().iter() {
      let target = nfa.epsilon_closure(&nfa.move_on(&current, symbol));
      if target.is_empty() {
        continue;
      }
      let next_id = State::from_index(discovered.len());
      let to = *discovered.entry(target).or_insert(next_id);
      transitions.insert((from, symbol), to);
    }
  }

  let accepting: StateSet = discovered
    .iter()
    .filter(|(set, _)| set.intersects(nfa.accepting()))
    .map(|(_, &s)| s)
    .collect();
  let states: StateSet = discovered.values().copied().collect();

  debug!(
    nfa_states = nfa.num_states(),
    dfa_states = states.len(),
    "determinized"
  );

  Dfa::from_parts(
    states,
    nfa.alphabet().clone(),
    transitions,
    State::new(0),
    accepting,
  )
}
