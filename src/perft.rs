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

//! Performance testing, or "perft". Perft counts the leaves of the legal
//! move tree to a fixed depth, which verifies move generation and the
//! make/unmake process against independently known values.

use super::movegen::legal_moves;
use super::Board;

#[must_use]
/// Count the nodes at depth `depth` of the legal move tree rooted at the
/// current position. Every visited move is unwound afterward, leaving the
/// board exactly as it was found.
pub fn perft(board: &mut Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut total = 0;
    for m in legal_moves(board) {
        board.apply(m).expect("legal move must apply");
        total += perft(board, depth - 1);
        board.undo();
    }

    total
}
