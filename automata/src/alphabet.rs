/* Description: Input alphabets and transition labels.

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

//! Input alphabets and transition labels.

use core::{fmt, hash::BuildHasherDefault};

use indexmap::IndexSet;
use rustc_hash::FxHasher;

pub(crate) type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// The set of admissible input symbols, kept in sorted order.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Alphabet(FxIndexSet<char>);

impl Alphabet {
  pub fn new(symbols: impl IntoIterator<Item=char>) -> Self {
    let mut set: FxIndexSet<char> = symbols.into_iter().collect();
    set.sort_unstable();
    Self(set)
  }

  pub fn empty() -> Self { Self::default() }

  #[inline]
  pub fn contains(&self, symbol: char) -> bool { self.0.contains(&symbol) }

  #[inline]
  pub fn len(&self) -> usize { self.0.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Symbols in ascending order.
  pub fn iter(&self) -> impl Iterator<Item=char>+'_ { self.0.iter().copied() }

  pub fn union(&self, other: &Self) -> Self { Self::new(self.iter().chain(other.iter())) }
}

impl FromIterator<char> for Alphabet {
  fn from_iter<T: IntoIterator<Item=char>>(iter: T) -> Self { Self::new(iter) }
}

impl fmt::Debug for Alphabet {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_set().entries(self.iter()).finish()
  }
}

impl fmt::Display for Alphabet {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{{")?;
    for (i, c) in self.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", c)?;
    }
    write!(f, "}}")
  }
}

/// What an NFA transition consumes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
  /// Taken without reading any input.
  Epsilon,
  Symbol(char),
}

impl Label {
  pub const EPSILON_CHAR: char = 'ε';

  #[inline]
  pub const fn symbol(self) -> Option<char> {
    match self {
      Self::Epsilon => None,
      Self::Symbol(c) => Some(c),
    }
  }

  #[inline]
  pub const fn is_epsilon(self) -> bool { matches!(self, Self::Epsilon) }
}

impl From<char> for Label {
  fn from(c: char) -> Self { Self::Symbol(c) }
}

impl fmt::Display for Label {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Epsilon => write!(f, "{}", Self::EPSILON_CHAR),
      Self::Symbol(c) => write!(f, "{}", c),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn sorted_and_deduped() {
    let a = Alphabet::new("cabba".chars());
    assert_eq!(a.iter().collect::<String>(), "abc");
    assert_eq!(a.len(), 3);
    assert!(a.contains('b'));
    assert!(!a.contains('.'));
  }

  #[test]
  fn union_resorts() {
    let a = Alphabet::new(['z', 'a']);
    let b = Alphabet::new(['m']);
    assert_eq!(a.union(&b).iter().collect::<String>(), "amz");
    assert_eq!(a.to_string(), "{a, z}");
  }

  #[test]
  fn labels() {
    assert_eq!(Label::from('a'), Label::Symbol('a'));
    assert_eq!(Label::Symbol('a').symbol(), Some('a'));
    assert!(Label::Epsilon.is_epsilon());
    assert_eq!(Label::Epsilon.to_string(), "ε");
  }
}
