/* Description: State labels and normalized state sets.

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

//! State labels and normalized state sets.

use core::fmt;

use smallvec::SmallVec;

/// An opaque state label. Only identity matters; it is displayed as `q<n>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct State(u32);

static_assertions::assert_eq_size!(State, u32);

impl State {
  #[inline(always)]
  pub const fn new(id: u32) -> Self { Self(id) }

  #[inline(always)]
  pub const fn id(self) -> u32 { self.0 }

  #[inline(always)]
  pub(crate) fn from_index(index: usize) -> Self {
    Self(u32::try_from(index).expect("state index exceeded u32 range!"))
  }
}

impl From<u32> for State {
  fn from(x: u32) -> Self { Self(x) }
}

impl fmt::Display for State {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "q{}", self.0) }
}

/// A set of states kept sorted and deduplicated, so that structurally equal
/// sets always compare and hash the same.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet(SmallVec<[State; 4]>);

impl StateSet {
  pub fn new() -> Self { Self(SmallVec::new()) }

  pub fn singleton(state: State) -> Self {
    let mut v = SmallVec::new();
    v.push(state);
    Self(v)
  }

  /// Returns whether `state` was newly inserted.
  pub fn insert(&mut self, state: State) -> bool {
    match self.0.binary_search(&state) {
      Ok(_) => false,
      Err(i) => {
        self.0.insert(i, state);
        true
      },
    }
  }

  #[inline]
  pub fn contains(&self, state: State) -> bool { self.0.binary_search(&state).is_ok() }

  #[inline]
  pub fn len(&self) -> usize { self.0.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item=State>+'_ { self.0.iter().copied() }

  pub fn as_slice(&self) -> &[State] { &self.0 }

  /// The smallest member, if any.
  pub fn first(&self) -> Option<State> { self.0.first().copied() }

  /// The largest member, if any.
  pub fn last(&self) -> Option<State> { self.0.last().copied() }

  pub fn union_with(&mut self, other: &Self) {
    if other.is_empty() {
      return;
    }
    self.0.extend(other.iter());
    self.normalize();
  }

  pub fn intersects(&self, other: &Self) -> bool {
    let (small, large) = if self.len() <= other.len() {
      (self, other)
    } else {
      (other, self)
    };
    small.iter().any(|s| large.contains(s))
  }

  pub fn intersection(&self, other: &Self) -> Self {
    Self(self.iter().filter(|s| other.contains(*s)).collect())
  }

  pub fn is_subset(&self, other: &Self) -> bool { self.iter().all(|s| other.contains(s)) }

  fn normalize(&mut self) {
    self.0.sort_unstable();
    self.0.dedup();
  }
}

impl FromIterator<State> for StateSet {
  fn from_iter<T: IntoIterator<Item=State>>(iter: T) -> Self {
    let mut ret = Self(iter.into_iter().collect());
    ret.normalize();
    ret
  }
}

impl Extend<State> for StateSet {
  fn extend<T: IntoIterator<Item=State>>(&mut self, iter: T) {
    self.0.extend(iter);
    self.normalize();
  }
}

impl<'a> IntoIterator for &'a StateSet {
  type Item = State;
  type IntoIter = core::iter::Copied<core::slice::Iter<'a, State>>;

  fn into_iter(self) -> Self::IntoIter { self.0.iter().copied() }
}

impl fmt::Debug for StateSet {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

impl fmt::Display for StateSet {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{{")?;
    for (i, s) in self.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", s)?;
    }
    write!(f, "}}")
  }
}
