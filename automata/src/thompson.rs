/* Description: Thompson construction of NFAs from pattern expressions.

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

//! Thompson construction of NFAs from pattern expressions.
//!
//! Each combinator returns a new automaton and leaves its operands untouched,
//! so one sub-automaton may be reused across several compositions.

use std::borrow::Cow;

use jwt_automata_syntax::{
  ast::{expr::Expr, postfix_operators::PostfixOp},
  parser::{parse, ParseError},
};
use tracing::debug;

use crate::{
  alphabet::{Alphabet, Label},
  nfa::Nfa,
  state::{State, StateSet},
  Automaton, FxHashMap, FxIndexMap,
};

type Table = FxIndexMap<(State, Label), StateSet>;

fn link(table: &mut Table, from: State, label: Label, to: State) {
  table.entry((from, label)).or_default().insert(to);
}

fn absorb(table: &mut Table, nfa: &Nfa) {
  for (&key, to) in nfa.transition_table().iter() {
    table.entry(key).or_default().union_with(to);
  }
}

/// Owns the label counter for one construction session. Labels are never
/// reused, so every automaton returned by a single builder is disjoint from
/// every other one it returned.
#[derive(Debug, Default)]
pub struct ThompsonBuilder {
  next_state: u32,
}

impl ThompsonBuilder {
  pub const fn new() -> Self { Self { next_state: 0 } }

  /// How many labels have been handed out so far.
  pub fn states_allocated(&self) -> u32 { self.next_state }

  fn fresh(&mut self) -> State {
    let ret = State::new(self.next_state);
    self.next_state = self
      .next_state
      .checked_add(1)
      .expect("state label counter overflowed u32!");
    ret
  }

  /* Operands built elsewhere may use labels this builder has yet to hand out;
   * move those onto fresh labels before wiring in any new states. */
  fn adopt<'a>(&mut self, nfa: &'a Nfa) -> Cow<'a, Nfa> {
    match nfa.states().last() {
      Some(max) if max.id() >= self.next_state => Cow::Owned(self.relabel(nfa)),
      _ => Cow::Borrowed(nfa),
    }
  }

  /// Copy `nfa` onto fresh labels, preserving its structure.
  pub fn relabel(&mut self, nfa: &Nfa) -> Nfa {
    let mapping: FxHashMap<State, State> = nfa
      .states()
      .iter()
      .map(|s| (s, self.fresh()))
      .collect();
    let map = |s: State| mapping[&s];

    let mut table = Table::default();
    for (&(from, label), to) in nfa.transition_table().iter() {
      table.insert((map(from), label), to.iter().map(map).collect());
    }

    Nfa::from_parts(
      mapping.values().copied().collect(),
      nfa.alphabet().clone(),
      table,
      map(nfa.start()),
      nfa.accepting().iter().map(map).collect(),
    )
  }

  /// Accepts exactly the one-symbol string `symbol`.
  pub fn symbol(&mut self, symbol: char) -> Nfa {
    let start = self.fresh();
    let fin = self.fresh();
    let mut table = Table::default();
    link(&mut table, start, Label::Symbol(symbol), fin);
    Nfa::from_parts(
      [start, fin].into_iter().collect(),
      Alphabet::new([symbol]),
      table,
      start,
      StateSet::singleton(fin),
    )
  }

  /// Accepts only the empty string.
  pub fn epsilon(&mut self) -> Nfa {
    let start = self.fresh();
    let fin = self.fresh();
    let mut table = Table::default();
    link(&mut table, start, Label::Epsilon, fin);
    Nfa::from_parts(
      [start, fin].into_iter().collect(),
      Alphabet::empty(),
      table,
      start,
      StateSet::singleton(fin),
    )
  }

  /// `a` followed by `b`. Only `b`'s accepting states remain accepting.
  pub fn concatenate(&mut self, a: &Nfa, b: &Nfa) -> Nfa {
    let a = self.adopt(a);
    let b = self.adopt(b);
    let b = if a.states().intersects(b.states()) {
      Cow::Owned(self.relabel(&b))
    } else {
      b
    };

    let mut table = Table::default();
    absorb(&mut table, &a);
    absorb(&mut table, &b);
    for f in a.accepting().iter() {
      link(&mut table, f, Label::Epsilon, b.start());
    }

    let mut states = a.states().clone();
    states.union_with(b.states());
    Nfa::from_parts(
      states,
      a.alphabet().union(b.alphabet()),
      table,
      a.start(),
      b.accepting().clone(),
    )
  }

  /// Either `a` or `b`, joined through a new start and a new accepting state.
  pub fn union(&mut self, a: &Nfa, b: &Nfa) -> Nfa {
    let a = self.adopt(a);
    let b = self.adopt(b);
    let b = if a.states().intersects(b.states()) {
      Cow::Owned(self.relabel(&b))
    } else {
      b
    };
    let start = self.fresh();
    let fin = self.fresh();

    let mut table = Table::default();
    absorb(&mut table, &a);
    absorb(&mut table, &b);
    link(&mut table, start, Label::Epsilon, a.start());
    link(&mut table, start, Label::Epsilon, b.start());
    for f in a.accepting().iter().chain(b.accepting().iter()) {
      link(&mut table, f, Label::Epsilon, fin);
    }

    let mut states = a.states().clone();
    states.union_with(b.states());
    states.insert(start);
    states.insert(fin);
    Nfa::from_parts(
      states,
      a.alphabet().union(b.alphabet()),
      table,
      start,
      StateSet::singleton(fin),
    )
  }

  /// Zero or more repetitions of `a`.
  pub fn kleene_star(&mut self, a: &Nfa) -> Nfa {
    let a = self.adopt(a);
    let start = self.fresh();
    let fin = self.fresh();

    let mut table = Table::default();
    absorb(&mut table, &a);
    link(&mut table, start, Label::Epsilon, a.start());
    link(&mut table, start, Label::Epsilon, fin);
    for f in a.accepting().iter() {
      link(&mut table, f, Label::Epsilon, a.start());
      link(&mut table, f, Label::Epsilon, fin);
    }

    let mut states = a.states().clone();
    states.insert(start);
    states.insert(fin);
    Nfa::from_parts(
      states,
      a.alphabet().clone(),
      table,
      start,
      StateSet::singleton(fin),
    )
  }

  /// One or more repetitions of `a`: `a` concatenated with the star of a
  /// relabelled copy of `a`.
  pub fn positive_closure(&mut self, a: &Nfa) -> Nfa {
    let a = self.adopt(a);
    let copy = self.relabel(&a);
    let rest = self.kleene_star(&copy);
    self.concatenate(&a, &rest)
  }

  /// Build the NFA for an already-parsed expression.
  pub fn build_expr(&mut self, expr: &Expr) -> Nfa {
    match expr {
      Expr::Literal(c) => self.symbol(*c),
      Expr::Concatenation { components } => {
        let Some((first, rest)) = components.split_first() else {
          return self.epsilon();
        };
        let first = self.build_expr(first);
        rest.iter().fold(first, |acc, c| {
          let next = self.build_expr(c);
          self.concatenate(&acc, &next)
        })
      },
      Expr::Alternation { cases } => {
        let Some((first, rest)) = cases.split_first() else {
          return self.epsilon();
        };
        let first = self.build_expr(first);
        rest.iter().fold(first, |acc, c| {
          let next = self.build_expr(c);
          self.union(&acc, &next)
        })
      },
      Expr::Postfix { .. } => {
        /* A stack of operators repeats its operand once. */
        let (body, op) = expr.collapse_postfix();
        let body = self.build_expr(body);
        match op {
          Some(PostfixOp::Star) => self.kleene_star(&body),
          Some(PostfixOp::Plus) => self.positive_closure(&body),
          None => body,
        }
      },
    }
  }

  /// Parse `pattern` and compile it to an NFA.
  pub fn compile(&mut self, pattern: &str) -> Result<Nfa, ParseError> {
    let expr = parse(pattern)?;
    let nfa = self.build_expr(&expr);
    debug!(
      pattern,
      states = nfa.num_states(),
      transitions = nfa.num_transitions(),
      "compiled pattern"
    );
    Ok(nfa)
  }
}
