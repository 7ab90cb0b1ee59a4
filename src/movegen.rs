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

//! Generation of moves and detection of attacked squares.

use once_cell::sync::Lazy;

use super::{Bitboard, Board, Color, Direction, Move, Piece, Square};

/// The initialized capacity of a vector of moves. No reachable position
/// is known to exceed this many moves.
const MAX_MOVES: usize = 218;

/// A bitboard of all the squares a king can move to, indexed by the
/// king's position.
static KING_ATTACKS: Lazy<[Bitboard; 64]> =
    Lazy::new(|| create_step_attacks(&Direction::KING_STEPS, 1));

/// A bitboard of all the squares a knight can move to, indexed by the
/// knight's position.
static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> =
    Lazy::new(|| create_step_attacks(&Direction::KNIGHT_STEPS, 2));

/// A bitboard of all the squares which a pawn on the given square can
/// attack. The first index is for White's pawn attacks, the second is for
/// Black's.
static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        create_step_attacks(&[Direction::NORTHEAST, Direction::NORTHWEST], 1),
        create_step_attacks(&[Direction::SOUTHEAST, Direction::SOUTHWEST], 1),
    ]
});

#[must_use]
/// Get all the legal moves for the side to move: the pseudo-legal moves,
/// minus those that would leave the mover's own king attacked.
///
/// Each candidate is tried on the board through the apply/undo protocol,
/// so the board must be mutable; it is returned to its argument state
/// before this function returns. Generation order is deterministic:
/// pawns, king, knights, rooks, bishops, then queens, with origins and
/// destinations each visited in ascending square order.
///
/// # Panics
///
/// Panics if the side to move has no king, which cannot happen under
/// legal play.
///
/// # Examples
///
/// ```
/// use minuet::{movegen, Board};
///
/// // 16 pawn moves and 4 knight moves are available at the start.
/// let mut board = Board::new();
/// assert_eq!(movegen::legal_moves(&mut board).len(), 20);
/// ```
pub fn legal_moves(board: &mut Board) -> Vec<Move> {
    let player = board.player();
    let opponent = !player;
    let candidates = pseudolegal_moves(board, player);
    let mut legal = Vec::with_capacity(candidates.len());
    for m in candidates {
        board
            .apply(m)
            .expect("generated move starts from an occupied square");
        if !is_square_attacked(board, board.king_square(player), opponent) {
            legal.push(m);
        }
        board.undo();
    }
    legal
}

#[must_use]
/// Enumerate the pseudo-legal moves that the pieces of the given color
/// could make, ignoring king safety: every move obeys piece movement and
/// occupancy rules, but may leave the mover's king attacked.
pub fn pseudolegal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(MAX_MOVES);
    pawn_moves(board, color, &mut moves);
    king_moves(board, color, &mut moves);
    knight_moves(board, color, &mut moves);
    rook_moves(board, color, &mut moves);
    bishop_moves(board, color, &mut moves);
    queen_moves(board, color, &mut moves);
    moves
}

#[must_use]
/// Determine whether any piece of the given color attacks `sq`,
/// regardless of whose turn it is. Checks each attacker class in turn and
/// stops at the first hit.
pub fn is_square_attacked(board: &Board, sq: Square, color: Color) -> bool {
    // a pawn of `color` attacks `sq` if it stands where a pawn of the
    // *other* color standing on `sq` would attack
    let pawn_vision = PAWN_ATTACKS[(!color) as usize][sq.index()];
    if !(pawn_vision & board.pieces(color, Piece::Pawn)).is_empty() {
        return true;
    }
    if !(KNIGHT_ATTACKS[sq.index()] & board.pieces(color, Piece::Knight)).is_empty() {
        return true;
    }
    if !(KING_ATTACKS[sq.index()] & board.pieces(color, Piece::King)).is_empty() {
        return true;
    }

    // for sliders, walk outward from the target; the first occupied
    // square on each ray decides it and blocks the rest of the ray
    let occupancy = board.occupied();
    let queens = board.pieces(color, Piece::Queen);
    let straight_vision = ray_attacks(sq, &Direction::ROOK_DIRECTIONS, occupancy);
    if !(straight_vision & (board.pieces(color, Piece::Rook) | queens)).is_empty() {
        return true;
    }
    let diagonal_vision = ray_attacks(sq, &Direction::BISHOP_DIRECTIONS, occupancy);
    !(diagonal_vision & (board.pieces(color, Piece::Bishop) | queens)).is_empty()
}

/// Generate the moves that the pawns of the given color could make:
/// single pushes to an empty square, double pushes from the start rank
/// through two empty squares, and diagonal captures of enemy pieces.
fn pawn_moves(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let dir = color.pawn_direction();
    let start_rank = color.pawn_start_rank();
    let occupancy = board.occupied();
    let enemies = board.side(!color);
    for sq in board.pieces(color, Piece::Pawn) {
        let mut targets = PAWN_ATTACKS[color as usize][sq.index()] & enemies;
        let push = sq + dir;
        if push.is_inbounds() && !occupancy.contains(push) {
            targets.insert(push);
            // a double push from the start rank never leaves the board
            if start_rank.contains(sq) && !occupancy.contains(push + dir) {
                targets.insert(push + dir);
            }
        }
        bitboard_to_moves(sq, targets, moves);
    }
}

/// Generate the moves that the king of the given color could make,
/// ignoring whether the destination is defended.
fn king_moves(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let allies = board.side(color);
    for sq in board.pieces(color, Piece::King) {
        bitboard_to_moves(sq, KING_ATTACKS[sq.index()] & !allies, moves);
    }
}

/// Generate the moves that the knights of the given color could make.
fn knight_moves(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let allies = board.side(color);
    for sq in board.pieces(color, Piece::Knight) {
        bitboard_to_moves(sq, KNIGHT_ATTACKS[sq.index()] & !allies, moves);
    }
}

/// Generate the moves that the rooks of the given color could make.
fn rook_moves(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let allies = board.side(color);
    let occupancy = board.occupied();
    for sq in board.pieces(color, Piece::Rook) {
        let targets = ray_attacks(sq, &Direction::ROOK_DIRECTIONS, occupancy) & !allies;
        bitboard_to_moves(sq, targets, moves);
    }
}

/// Generate the moves that the bishops of the given color could make.
fn bishop_moves(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let allies = board.side(color);
    let occupancy = board.occupied();
    for sq in board.pieces(color, Piece::Bishop) {
        let targets = ray_attacks(sq, &Direction::BISHOP_DIRECTIONS, occupancy) & !allies;
        bitboard_to_moves(sq, targets, moves);
    }
}

/// Generate the moves that the queens of the given color could make.
fn queen_moves(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let allies = board.side(color);
    let occupancy = board.occupied();
    for sq in board.pieces(color, Piece::Queen) {
        let targets = (ray_attacks(sq, &Direction::ROOK_DIRECTIONS, occupancy)
            | ray_attacks(sq, &Direction::BISHOP_DIRECTIONS, occupancy))
            & !allies;
        bitboard_to_moves(sq, targets, moves);
    }
}

/// Construct the squares reachable from `sq` along each direction in
/// `dirs`, walking one square at a time while the board is occupied by
/// the pieces in `occupancy`. Each ray stops at the board edge, and the
/// first occupied square along a ray is included and ends it.
fn ray_attacks(sq: Square, dirs: &[Direction], occupancy: Bitboard) -> Bitboard {
    let mut result = Bitboard::EMPTY;
    for &dir in dirs {
        let mut current = sq;
        for _ in 0..7 {
            if !is_valid_step(current, dir) {
                break;
            }
            current += dir;
            result.insert(current);
            if occupancy.contains(current) {
                break;
            }
        }
    }
    result
}

/// Return whether stepping from `sq` along `dir` stays on the board
/// without wrapping around an edge.
fn is_valid_step(sq: Square, dir: Direction) -> bool {
    let dest = sq + dir;
    dest.is_inbounds() && sq.chebyshev_to(dest) <= 1
}

#[allow(clippy::cast_possible_truncation)]
/// Get the attacks that could be made by moving in `dirs` from each
/// square on the board. Discards the steps whose Chebyshev length exceeds
/// `max_dist`, which rejects both off-board destinations and wraparound
/// across the A/H file boundary.
fn create_step_attacks(dirs: &[Direction], max_dist: u8) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (i, item) in attacks.iter_mut().enumerate() {
        let from = Square::from_index(i as u8);
        for &dir in dirs {
            let to = from + dir;
            if to.is_inbounds() && from.chebyshev_to(to) <= max_dist {
                item.insert(to);
            }
        }
    }
    attacks
}

#[inline(always)]
/// Given a bitboard of possible to-squares and a fixed from-square, push
/// the corresponding normal moves onto `moves`.
fn bitboard_to_moves(from_sq: Square, bb: Bitboard, moves: &mut Vec<Move>) {
    for to_sq in bb {
        moves.push(Move::normal(from_sq, to_sq));
    }
}
