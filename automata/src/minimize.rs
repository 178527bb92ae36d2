/* Description: DFA minimization by partition refinement.

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

//! DFA minimization by partition refinement.

use std::collections::VecDeque;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
  dfa::Dfa,
  state::{State, StateSet},
  Automaton, FxHashMap, FxIndexMap,
};

/// For each symbol in alphabet order, the group index the transition lands
/// in, or `None` when there is no transition.
type Signature = SmallVec<[Option<usize>; 8]>;

fn assign_groups(groups: &[Vec<State>]) -> FxHashMap<State, usize> {
  groups
    .iter()
    .enumerate()
    .flat_map(|(i, g)| g.iter().map(move |s| (*s, i)))
    .collect()
}

fn signature(
  dfa: &Dfa,
  symbols: &[char],
  group_of: &FxHashMap<State, usize>,
  s: State,
) -> Signature {
  symbols
    .iter()
    .map(|c| dfa.transition(s, *c).map(|t| group_of[&t]))
    .collect()
}

/// Produce the minimal DFA for the reachable part of `dfa`.
///
/// Unreachable states are dropped, then states are grouped by Moore's
/// algorithm until no group splits. The quotient automaton numbers its states
/// `q0..` in breadth-first order from the start group, taking symbols in
/// alphabet order, so minimizing an already-minimal DFA returns an equal DFA.
/// The alphabet is preserved and the result stays partial.
pub fn minimize(dfa: &Dfa) -> Dfa {
  let reachable = dfa.reachable_states();
  let symbols: Vec<char> = dfa.alphabet().iter().collect();

  let (accepting, rejecting): (Vec<State>, Vec<State>) =
    reachable.iter().partition(|s| dfa.accepting().contains(*s));
  let mut groups: Vec<Vec<State>> = [accepting, rejecting]
    .into_iter()
    .filter(|g| !g.is_empty())
    .collect();
  let mut group_of = assign_groups(&groups);

  let mut rounds: usize = 0;
  loop {
    rounds += 1;
    let mut refined: Vec<Vec<State>> = Vec::with_capacity(groups.len());
    for group in groups.iter() {
      if group.len() == 1 {
        refined.push(group.clone());
      } else {
        let mut buckets: FxIndexMap<Signature, Vec<State>> = FxIndexMap::default();
        for s in group.iter().copied() {
          buckets
            .entry(signature(dfa, &symbols, &group_of, s))
            .or_default()
            .push(s);
        }
        refined.extend(buckets.into_values());
      }
    }
    trace!(round = rounds, groups = refined.len(), "refined partition");

    let stable = refined.len() == groups.len();
    groups = refined;
    if stable {
      break;
    }
    group_of = assign_groups(&groups);
  }

  /* Every group is non-empty and homogeneous, so its smallest member stands
   * in for all of it. */
  let start_group = group_of[&dfa.start()];
  let mut renumbered: FxIndexMap<usize, State> = FxIndexMap::default();
  renumbered.insert(start_group, State::new(0));
  let mut queue: VecDeque<usize> = VecDeque::new();
  queue.push_back(start_group);

  let mut transitions: FxIndexMap<(State, char), State> = FxIndexMap::default();
  while let Some(g) = queue.pop_front() {
    let from = renumbered[&g];
    let representative = groups[g][0];
    for c in symbols.iter().copied() {
      let Some(t) = dfa.transition(representative, c) else {
        continue;
      };
      let target_group = group_of[&t];
      let next_id = State::from_index(renumbered.len());
      let to = *renumbered.entry(target_group).or_insert_with(|| {
        queue.push_back(target_group);
        next_id
      });
      transitions.insert((from, c), to);
    }
  }
  debug_assert_eq!(renumbered.len(), groups.len());

  let accepting: StateSet = renumbered
    .iter()
    .filter(|(g, _)| dfa.accepting().contains(groups[**g][0]))
    .map(|(_, s)| *s)
    .collect();
  let states: StateSet = renumbered.values().copied().collect();

  debug!(
    before = dfa.num_states(),
    reachable = reachable.len(),
    after = states.len(),
    rounds,
    "minimized"
  );

  Dfa::from_parts(
    states,
    dfa.alphabet().clone(),
    transitions,
    State::new(0),
    accepting,
  )
}

#[cfg(test)]
mod test {
  use proptest::prelude::*;

  use super::*;

  fn q(i: u32) -> State { State::new(i) }

  /// Strings over {a, b} ending in "ab", padded with three redundant states
  /// which nothing reaches.
  fn ends_in_ab_padded() -> Dfa {
    let mut edges = vec![
      (q(0), 'a', q(1)),
      (q(0), 'b', q(0)),
      (q(1), 'a', q(1)),
      (q(1), 'b', q(2)),
      (q(2), 'a', q(1)),
      (q(2), 'b', q(0)),
    ];
    for s in [q(3), q(4), q(5)] {
      edges.push((s, 'a', q(1)));
      edges.push((s, 'b', q(0)));
    }
    Dfa::new((0..6).map(State::new), ['a', 'b'], edges, q(0), [q(2)]).unwrap()
  }

  #[test]
  fn drops_unreachable() {
    let dfa = ends_in_ab_padded();
    let min = minimize(&dfa);
    assert_eq!(min.num_states(), 3);
    assert_eq!(min.num_transitions(), 6);
    for w in ["ab", "aab", "bab", "aaab"] {
      assert!(min.accepts(w).is_accepted(), "{}", w);
    }
    for w in ["", "a", "b", "aa", "aba"] {
      assert!(!min.accepts(w).is_accepted(), "{}", w);
    }
  }

  #[test]
  fn merges_equivalent() {
    /* q1 and q2 both accept and loop to themselves on 'a'. */
    let dfa = Dfa::new(
      [q(0), q(1), q(2)],
      ['a', 'b'],
      [
        (q(0), 'a', q(1)),
        (q(0), 'b', q(2)),
        (q(1), 'a', q(1)),
        (q(2), 'a', q(2)),
      ],
      q(0),
      [q(1), q(2)],
    )
    .unwrap();
    let min = dfa.minimize();
    assert_eq!(min.num_states(), 2);
    assert_eq!(min.transition(q(0), 'a'), Some(q(1)));
    assert_eq!(min.transition(q(0), 'b'), Some(q(1)));
    assert_eq!(min.transition(q(1), 'a'), Some(q(1)));
    assert_eq!(min.transition(q(1), 'b'), None);
    assert_eq!(min.accepting(), &StateSet::singleton(q(1)));
  }

  #[test]
  fn missing_edge_distinguishes() {
    /* Same acceptance, but only q1 can continue. */
    let dfa = Dfa::new(
      [q(0), q(1), q(2)],
      ['a'],
      [(q(0), 'a', q(1)), (q(1), 'a', q(2))],
      q(0),
      [],
    )
    .unwrap();
    assert_eq!(minimize(&dfa).num_states(), 3);
  }

  #[test]
  fn renumbers_from_start() {
    let dfa = Dfa::new([q(9)], ['x'], [(q(9), 'x', q(9))], q(9), [q(9)]).unwrap();
    let min = minimize(&dfa);
    assert_eq!(min.start(), q(0));
    assert_eq!(min.states(), &StateSet::singleton(q(0)));
    assert_eq!(min.transition(q(0), 'x'), Some(q(0)));
    assert_eq!(min.alphabet(), dfa.alphabet());
  }

  fn arb_dfa() -> impl Strategy<Value=Dfa> {
    (
      1u32..7,
      prop::collection::vec((0u32..7, 0usize..3, 0u32..7), 0..20),
      prop::collection::vec(0u32..7, 0..4),
    )
      .prop_map(|(n, edges, accepting)| {
        let symbols = ['a', 'b', 'c'];
        let mut seen: FxHashMap<(u32, char), ()> = FxHashMap::default();
        let edges: Vec<(State, char, State)> = edges
          .into_iter()
          .map(|(from, sym, to)| (from % n, symbols[sym], to % n))
          .filter(|(from, sym, _)| seen.insert((*from, *sym), ()).is_none())
          .map(|(from, sym, to)| (State::new(from), sym, State::new(to)))
          .collect();
        Dfa::new(
          (0..n).map(State::new),
          symbols,
          edges,
          q(0),
          accepting.into_iter().map(|s| State::new(s % n)),
        )
        .unwrap()
      })
  }

  fn strings_up_to(symbols: &[char], max_len: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
      let next: Vec<String> = frontier
        .iter()
        .flat_map(|s| {
          symbols.iter().map(move |c| {
            let mut t = s.clone();
            t.push(*c);
            t
          })
        })
        .collect();
      out.extend(next.iter().cloned());
      frontier = next;
    }
    out
  }

  proptest! {
    #[test]
    fn preserves_language(dfa in arb_dfa()) {
      let min = minimize(&dfa);
      prop_assert!(min.is_deterministic());
      for w in strings_up_to(&['a', 'b', 'c'], 5) {
        prop_assert_eq!(
          dfa.accepts(&w).is_accepted(),
          min.accepts(&w).is_accepted(),
          "{}", w
        );
      }
    }

    #[test]
    fn idempotent(dfa in arb_dfa()) {
      let once = minimize(&dfa);
      let twice = minimize(&once);
      prop_assert_eq!(once.num_states(), twice.num_states());
      prop_assert_eq!(once, twice);
    }

    #[test]
    fn never_exceeds_reachable(dfa in arb_dfa()) {
      let unreachable = dfa.num_states() - dfa.reachable_states().len();
      prop_assert!(minimize(&dfa).num_states() <= dfa.num_states() - unreachable);
    }
  }
}
