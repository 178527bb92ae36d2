/* Description: Predefined automata for common token shapes.

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

//! Predefined automata for common token shapes.
//!
//! These only check the surface shape of a string. Nothing here decodes
//! segments or interprets their contents.

use jwt_automata_engine::{ConstructionError, Dfa, Label, Nfa, State};

/// Characters of the URL-safe base64 alphabet, without padding.
pub const BASE64URL: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

pub const SEGMENT_SEPARATOR: char = '.';

const DIGITS: &str = "0123456789";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

fn q(i: u32) -> State { State::new(i) }

/// Three non-empty base64url runs separated by dots, as in
/// `header.payload.signature`.
///
/// `q0`, `q2` and `q4` wait for the first character of a segment; `q1`, `q3`
/// and `q5` consume the rest of it. Only `q5` accepts.
pub fn jwt_structure() -> Result<Dfa, ConstructionError> {
  let mut edges: Vec<(State, char, State)> = Vec::new();
  for (enter, within) in [(q(0), q(1)), (q(2), q(3)), (q(4), q(5))] {
    for c in BASE64URL.chars() {
      edges.push((enter, c, within));
      edges.push((within, c, within));
    }
  }
  edges.push((q(1), SEGMENT_SEPARATOR, q(2)));
  edges.push((q(3), SEGMENT_SEPARATOR, q(4)));

  Dfa::new(
    (0..6).map(State::new),
    BASE64URL.chars().chain([SEGMENT_SEPARATOR]),
    edges,
    q(0),
    [q(5)],
  )
}

/// One or more base64url characters.
pub fn base64url() -> Result<Dfa, ConstructionError> {
  let edges = BASE64URL
    .chars()
    .flat_map(|c| [(q(0), c, q(1)), (q(1), c, q(1))]);
  Dfa::new([q(0), q(1)], BASE64URL.chars(), edges, q(0), [q(1)])
}

/// Either a run of digits (Unix seconds) or an ISO `YYYY-MM-DD` date.
///
/// The start state branches by epsilon into both shapes and lets the input
/// decide which survives.
pub fn timestamp_formats() -> Result<Nfa, ConstructionError> {
  const DASH: char = '-';
  let mut edges: Vec<(State, Label, State)> = vec![
    (q(0), Label::Epsilon, q(1)),
    (q(0), Label::Epsilon, q(3)),
    (q(7), Label::Symbol(DASH), q(8)),
    (q(10), Label::Symbol(DASH), q(11)),
  ];
  /* Digit steps: unix seconds at q1-q2, then YYYY, MM and DD. */
  let digit_steps = [
    (1, 2),
    (2, 2),
    (3, 4),
    (4, 5),
    (5, 6),
    (6, 7),
    (8, 9),
    (9, 10),
    (11, 12),
    (12, 13),
  ];
  for (from, to) in digit_steps {
    for d in DIGITS.chars() {
      edges.push((q(from), Label::Symbol(d), q(to)));
    }
  }

  Nfa::new(
    (0..14).map(State::new),
    DIGITS.chars().chain([DASH]),
    edges,
    q(0),
    [q(2), q(13)],
  )
}

/// `local@domain.tld` over lowercase letters and digits. The top-level domain
/// is letters only, and every part must be non-empty.
pub fn email() -> Result<Nfa, ConstructionError> {
  const AT: char = '@';
  let alnum = || LOWERCASE.chars().chain(DIGITS.chars());

  let mut edges: Vec<(State, Label, State)> = Vec::new();
  for c in alnum() {
    edges.push((q(0), Label::Symbol(c), q(1)));
    edges.push((q(1), Label::Symbol(c), q(1)));
    edges.push((q(2), Label::Symbol(c), q(3)));
    edges.push((q(3), Label::Symbol(c), q(3)));
  }
  edges.push((q(1), Label::Symbol(AT), q(2)));
  edges.push((q(3), Label::Symbol(SEGMENT_SEPARATOR), q(4)));
  for c in LOWERCASE.chars() {
    edges.push((q(4), Label::Symbol(c), q(5)));
    edges.push((q(5), Label::Symbol(c), q(5)));
  }

  Nfa::new(
    (0..6).map(State::new),
    alnum().chain([AT, SEGMENT_SEPARATOR]),
    edges,
    q(0),
    [q(5)],
  )
}
