/*
  Minuet, a chess rules engine.
  Copyright (C) 2025 The Minuet Authors.

  Minuet is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Minuet is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]

//! The rules core of a chess engine: compact board representation,
//! per-piece move generation, attack detection, and a reversible
//! apply/undo protocol used to filter pseudo-legal moves down to
//! strictly legal ones.

// Many module elements are re-exported to make names more ergonomic to
// access.

mod bitboard;
pub use bitboard::Bitboard;

mod board;
pub use board::{Board, MoveError};

mod color;
pub use color::Color;

mod direction;
use direction::Direction;

pub mod movegen;

mod moves;
pub use moves::Move;

pub mod perft;

mod piece;
pub use piece::Piece;

mod square;
pub use square::Square;
