/* Description: Left-to-right evaluation (acceptance) methods.

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

//! Left-to-right evaluation (acceptance) methods.
//!
//! Each automaton kind pairs with a cache holding its in-progress simulation
//! state. A cache may be reused across inputs: [`SimpleEvaluator::evaluate`]
//! resets it before consuming any tokens.

pub trait SearchState<Eval: ?Sized> {
  type Args;

  fn create(args: Self::Args) -> Self;
  fn reset(&mut self, eval: &Eval);
}

pub trait SimpleEvaluator<Cache: SearchState<Self>> {
  type Tok;
  type Success;
  type Err;

  fn create_cache(&self, args: Cache::Args) -> Cache {
    let mut cache = Cache::create(args);
    cache.reset(self);
    cache
  }

  fn evaluate(
    &self,
    cache: &mut Cache,
    tokens: impl Iterator<Item=Self::Tok>,
  ) -> Result<Self::Success, Self::Err>;
}

pub mod dfa {
  use super::{SearchState, SimpleEvaluator};
  use crate::{
    dfa::Dfa,
    state::{State, StateSet},
    verdict::Rejection,
    Automaton,
  };

  /// The single current state of a DFA walk.
  #[derive(Debug, Clone, Default)]
  pub struct DfaCache {
    current: Option<State>,
  }

  impl DfaCache {
    pub fn current(&self) -> Option<State> { self.current }
  }

  impl SearchState<Dfa> for DfaCache {
    type Args = ();

    fn create(_args: ()) -> Self { Self::default() }

    fn reset(&mut self, eval: &Dfa) { self.current = Some(eval.start()); }
  }

  impl SimpleEvaluator<DfaCache> for Dfa {
    type Tok = char;
    type Success = StateSet;
    type Err = Rejection;

    fn evaluate(
      &self,
      cache: &mut DfaCache,
      tokens: impl Iterator<Item=char>,
    ) -> Result<StateSet, Rejection> {
      cache.reset(self);
      let mut current = self.start();

      for (at, symbol) in tokens.enumerate() {
        if !self.alphabet().contains(symbol) {
          return Err(Rejection::SymbolNotInAlphabet { symbol, at });
        }
        current = self
          .transition(current, symbol)
          .ok_or(Rejection::NoTransition {
            state: current,
            symbol,
            at,
          })?;
        cache.current = Some(current);
      }

      let end = StateSet::singleton(current);
      if self.accepting().contains(current) {
        Ok(end)
      } else {
        Err(Rejection::NotAccepting { states: end })
      }
    }
  }

  #[cfg(test)]
  mod test {
    use super::*;

    fn q(i: u32) -> State { State::new(i) }

    #[test]
    fn cache_reuse() {
      let dfa = Dfa::new(
        [q(0), q(1)],
        ['x'],
        [(q(0), 'x', q(1)), (q(1), 'x', q(0))],
        q(0),
        [q(1)],
      )
      .unwrap();
      let mut cache = dfa.create_cache(());
      assert_eq!(cache.current(), Some(q(0)));

      assert_eq!(
        dfa.evaluate(&mut cache, "xxx".chars()),
        Ok(StateSet::singleton(q(1)))
      );
      assert_eq!(cache.current(), Some(q(1)));

      /* The previous walk does not leak into the next one. */
      assert_eq!(
        dfa.evaluate(&mut cache, "xx".chars()),
        Err(Rejection::NotAccepting {
          states: StateSet::singleton(q(0))
        })
      );
      assert_eq!(
        dfa.evaluate(&mut cache, "".chars()),
        Err(Rejection::NotAccepting {
          states: StateSet::singleton(q(0))
        })
      );
    }
  }
}

pub mod nfa {
  use tracing::trace;

  use super::{SearchState, SimpleEvaluator};
  use crate::{nfa::Nfa, state::StateSet, verdict::Rejection, Automaton};

  /// The set of states an NFA simulation may currently occupy. This set is
  /// always epsilon-closed.
  #[derive(Debug, Clone, Default)]
  pub struct NfaCache {
    active: StateSet,
  }

  impl NfaCache {
    pub fn active(&self) -> &StateSet { &self.active }
  }

  impl SearchState<Nfa> for NfaCache {
    type Args = ();

    fn create(_args: ()) -> Self { Self::default() }

    fn reset(&mut self, eval: &Nfa) {
      self.active = eval.epsilon_closure(&StateSet::singleton(eval.start()));
      trace!(start = %eval.start(), closure = %self.active, "seeded active set");
    }
  }

  impl SimpleEvaluator<NfaCache> for Nfa {
    type Tok = char;
    type Success = StateSet;
    type Err = Rejection;

    fn evaluate(
      &self,
      cache: &mut NfaCache,
      tokens: impl Iterator<Item=char>,
    ) -> Result<StateSet, Rejection> {
      cache.reset(self);

      for (at, symbol) in tokens.enumerate() {
        if !self.alphabet().contains(symbol) {
          return Err(Rejection::SymbolNotInAlphabet { symbol, at });
        }
        let next = self.epsilon_closure(&self.move_on(&cache.active, symbol));
        if next.is_empty() {
          cache.active = next;
          return Err(Rejection::Stuck { symbol, at });
        }
        cache.active = next;
      }

      let reached = cache.active.intersection(self.accepting());
      if reached.is_empty() {
        Err(Rejection::NotAccepting {
          states: cache.active.clone(),
        })
      } else {
        Ok(reached)
      }
    }
  }

  #[cfg(test)]
  mod test {
    use super::*;
    use crate::{alphabet::Label, state::State};

    fn q(i: u32) -> State { State::new(i) }

    #[test]
    fn closure_seeds_cache() {
      /* q0 -ε-> q1 -a-> q2 */
      let nfa = Nfa::new(
        [q(0), q(1), q(2)],
        ['a'],
        [(q(0), Label::Epsilon, q(1)), (q(1), Label::Symbol('a'), q(2))],
        q(0),
        [q(2)],
      )
      .unwrap();
      let mut cache = nfa.create_cache(());
      assert_eq!(cache.active(), &[q(0), q(1)].into_iter().collect::<StateSet>());

      assert_eq!(
        nfa.evaluate(&mut cache, "a".chars()),
        Ok(StateSet::singleton(q(2)))
      );
      assert_eq!(
        nfa.evaluate(&mut cache, "aa".chars()),
        Err(Rejection::Stuck { symbol: 'a', at: 1 })
      );
      assert!(cache.active().is_empty());
      assert_eq!(
        nfa.evaluate(&mut cache, "".chars()),
        Err(Rejection::NotAccepting {
          states: [q(0), q(1)].into_iter().collect(),
        })
      );
    }
  }
}
