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

//! Board representation: piece placement, side to move, and the
//! reversible move-application protocol.

use super::{Bitboard, Color, Move, Piece, Square};

use std::fmt::{Display, Formatter};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
/// The ways that applying a move can violate the caller's contract.
/// `Board::apply` performs no mutation when it returns one of these.
pub enum MoveError {
    /// The origin square of the move holds no piece of the side to move.
    /// The caller should have chosen the move from `legal_moves`.
    #[error("no {player} piece on {square}")]
    VacantOrigin {
        /// The side that was to move.
        player: Color,
        /// The empty (or wrongly-occupied) origin square.
        square: Square,
    },
}

/// Everything needed to reverse one applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Undo {
    /// The move that was applied.
    m: Move,
    /// The type of the piece the move captured, if any.
    capture: Option<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A representation of a position, and the history of how it was reached.
///
/// A `Board` can only be mutated through [`Board::apply`] and
/// [`Board::undo`], which keeps its masks consistent: each square is
/// occupied by at most one piece, and the occupancy masks are always the
/// union of the per-piece masks.
///
/// # Examples
///
/// ```
/// use minuet::{movegen, Board, Move, Square};
///
/// let mut board = Board::new();
/// let opening = Move::normal(Square::E2, Square::E4);
/// assert!(movegen::legal_moves(&mut board).contains(&opening));
///
/// board.apply(opening)?;
/// board.undo();
/// assert_eq!(board, Board::new());
/// # Ok::<(), minuet::MoveError>(())
/// ```
pub struct Board {
    /// The squares occupied by each piece type, indexed first by color
    /// and then by piece type.
    pieces: [[Bitboard; Piece::NUM]; 2],
    /// The squares occupied by White and Black, respectively. Always the
    /// union of the corresponding six entries of `pieces`.
    sides: [Bitboard; 2],
    /// The squares occupied by any piece. Always the union of `sides`.
    occupied: Bitboard,
    /// The color of the player to move.
    player: Color,
    /// The applied moves that have not been undone, oldest first.
    history: Vec<Undo>,
}

impl Board {
    #[must_use]
    /// Construct a board in the conventional starting position, with
    /// White to move.
    pub fn new() -> Board {
        let pieces = [
            [
                Bitboard::new(0x0000_0000_0000_0042), // knights
                Bitboard::new(0x0000_0000_0000_0024), // bishops
                Bitboard::new(0x0000_0000_0000_0081), // rooks
                Bitboard::new(0x0000_0000_0000_0008), // queen
                Bitboard::new(0x0000_0000_0000_FF00), // pawns
                Bitboard::new(0x0000_0000_0000_0010), // king
            ],
            [
                Bitboard::new(0x4200_0000_0000_0000),
                Bitboard::new(0x2400_0000_0000_0000),
                Bitboard::new(0x8100_0000_0000_0000),
                Bitboard::new(0x0800_0000_0000_0000),
                Bitboard::new(0x00FF_0000_0000_0000),
                Bitboard::new(0x1000_0000_0000_0000),
            ],
        ];
        Board {
            pieces,
            sides: [
                Bitboard::new(0x0000_0000_0000_FFFF),
                Bitboard::new(0xFFFF_0000_0000_0000),
            ],
            occupied: Bitboard::new(0xFFFF_0000_0000_FFFF),
            player: Color::White,
            history: Vec::new(),
        }
    }

    /// Construct a board with no pieces on it and White to move. Only
    /// used to stage positions in tests; the public way to obtain a board
    /// is [`Board::new`].
    pub(crate) fn empty() -> Board {
        Board {
            pieces: [[Bitboard::EMPTY; Piece::NUM]; 2],
            sides: [Bitboard::EMPTY; 2],
            occupied: Bitboard::EMPTY,
            player: Color::White,
            history: Vec::new(),
        }
    }

    /// Put a piece onto an empty square. The square must actually be
    /// empty.
    pub(crate) fn add_piece(&mut self, sq: Square, pt: Piece, color: Color) {
        let bb = Bitboard::from(sq);
        debug_assert!(!self.occupied.contains(sq));
        self.pieces[color as usize][pt as usize] |= bb;
        self.sides[color as usize] |= bb;
        self.occupied |= bb;
    }

    /// Flip the side to move. Only used to stage positions in tests.
    #[cfg(test)]
    pub(crate) fn set_player(&mut self, color: Color) {
        self.player = color;
    }

    #[inline(always)]
    #[must_use]
    /// Get the squares occupied by pieces of a given type and color.
    pub const fn pieces(&self, color: Color, pt: Piece) -> Bitboard {
        self.pieces[color as usize][pt as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the squares occupied by pieces of a given color.
    pub const fn side(&self, color: Color) -> Bitboard {
        self.sides[color as usize]
    }

    #[inline(always)]
    #[must_use]
    /// Get the squares occupied by any piece.
    pub const fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline(always)]
    #[must_use]
    /// Get the color of the player to move.
    pub const fn player(&self) -> Color {
        self.player
    }

    #[must_use]
    /// Get the type of the piece of color `color` occupying `sq`, if any.
    pub fn piece_on(&self, color: Color, sq: Square) -> Option<Piece> {
        for pt in Piece::ALL {
            if self.pieces[color as usize][pt as usize].contains(sq) {
                return Some(pt);
            }
        }
        None
    }

    #[must_use]
    /// Get the type of the piece occupying `sq`, if any.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.color_at(sq).and_then(|c| self.piece_on(c, sq))
    }

    #[inline(always)]
    #[must_use]
    /// Get the color of the piece occupying `sq`, if any.
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        if self.sides[Color::White as usize].contains(sq) {
            Some(Color::White)
        } else if self.sides[Color::Black as usize].contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::missing_panics_doc)]
    /// Get the square of the king of the given color.
    ///
    /// A missing king means a king was captured, which legal play cannot
    /// produce, so this treats an empty king mask as a fatal invariant
    /// violation rather than returning a wrong answer.
    pub fn king_square(&self, color: Color) -> Square {
        let kings = self.pieces[color as usize][Piece::King as usize];
        assert!(!kings.is_empty(), "no {color} king on the board");
        Square::from_index(kings.trailing_zeros() as u8)
    }

    /// Apply the given move to the board: move the piece standing on the
    /// origin square to the destination square, removing any opposing
    /// piece standing there, then give the turn to the opponent. The
    /// applied move is recorded so that [`Board::undo`] can reverse it
    /// exactly.
    ///
    /// The move should come from the current output of
    /// [`crate::movegen::legal_moves`]; behavior is unspecified (though
    /// memory-safe) for other moves, since only the origin square is
    /// validated here.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::VacantOrigin`] without changing any state if
    /// the origin square holds no piece of the side to move.
    pub fn apply(&mut self, m: Move) -> Result<(), MoveError> {
        let from = m.from_square();
        let to = m.to_square();
        let player = self.player;

        let Some(mover) = self.piece_on(player, from) else {
            return Err(MoveError::VacantOrigin {
                player,
                square: from,
            });
        };

        let capture = self.piece_on(!player, to);
        if let Some(victim) = capture {
            let to_bb = Bitboard::from(to);
            self.pieces[(!player) as usize][victim as usize] ^= to_bb;
            self.sides[(!player) as usize] ^= to_bb;
        }

        let move_bb = Bitboard::from(from) ^ Bitboard::from(to);
        self.pieces[player as usize][mover as usize] ^= move_bb;
        self.sides[player as usize] ^= move_bb;
        self.occupied = self.sides[0] | self.sides[1];

        self.history.push(Undo { m, capture });
        self.player = !player;
        Ok(())
    }

    #[allow(clippy::missing_panics_doc)]
    /// Reverse the most recently applied move, restoring the board to the
    /// state it had before the matching [`Board::apply`] call. Does
    /// nothing if no moves have been applied, so it is always safe to
    /// call.
    pub fn undo(&mut self) {
        let Some(Undo { m, capture }) = self.history.pop() else {
            return;
        };
        // the mover currently stands on the destination square
        let player = !self.player;
        let from = m.from_square();
        let to = m.to_square();
        let mover = self
            .piece_on(player, to)
            .expect("undo record does not match the board");

        let move_bb = Bitboard::from(from) ^ Bitboard::from(to);
        self.pieces[player as usize][mover as usize] ^= move_bb;
        self.sides[player as usize] ^= move_bb;

        if let Some(victim) = capture {
            let to_bb = Bitboard::from(to);
            self.pieces[(!player) as usize][victim as usize] |= to_bb;
            self.sides[(!player) as usize] |= to_bb;
        }

        self.occupied = self.sides[0] | self.sides[1];
        self.player = player;
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Display for Board {
    /// Render this board in a console-ready format: eight rows of piece
    /// codes with rank 8 at the top, uppercase for White and lowercase
    /// for Black, and a file legend at the bottom.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} | ", rank + 1)?;
            for file in 0..8 {
                let sq = Square::new(rank, file);
                let chr = match (self.piece_at(sq), self.color_at(sq)) {
                    (Some(p), Some(Color::White)) => p.code(),
                    (Some(p), Some(Color::Black)) => p.code().to_ascii_lowercase(),
                    _ => '.',
                };
                write!(f, "{chr} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   ----------------")?;
        writeln!(f, "    a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that the starting position has its pieces where the rules put
    /// them.
    fn starting_position() {
        let b = Board::new();
        assert_eq!(b.player(), Color::White);
        assert_eq!(b.piece_at(Square::E1), Some(Piece::King));
        assert_eq!(b.piece_at(Square::D8), Some(Piece::Queen));
        assert_eq!(b.color_at(Square::A1), Some(Color::White));
        assert_eq!(b.color_at(Square::H8), Some(Color::Black));
        assert_eq!(b.piece_at(Square::E4), None);
        assert_eq!(b.pieces(Color::White, Piece::Pawn).len(), 8);
        assert_eq!(b.pieces(Color::Black, Piece::Pawn).len(), 8);
        assert_eq!(b.occupied().len(), 32);
    }

    #[test]
    /// Test that the derived masks of the starting position are the
    /// unions of their constituents.
    fn derived_masks_are_unions() {
        let b = Board::new();
        for color in [Color::White, Color::Black] {
            let mut union = Bitboard::EMPTY;
            for pt in Piece::ALL {
                union |= b.pieces(color, pt);
            }
            assert_eq!(union, b.side(color));
        }
        assert_eq!(b.side(Color::White) | b.side(Color::Black), b.occupied());
    }

    #[test]
    fn apply_moves_the_piece_and_flips_the_turn() {
        let mut b = Board::new();
        b.apply(Move::normal(Square::E2, Square::E4)).unwrap();
        assert_eq!(b.piece_at(Square::E2), None);
        assert_eq!(b.piece_at(Square::E4), Some(Piece::Pawn));
        assert_eq!(b.color_at(Square::E4), Some(Color::White));
        assert_eq!(b.player(), Color::Black);
    }

    #[test]
    fn apply_records_and_undo_restores_a_capture() {
        let mut b = Board::empty();
        b.add_piece(Square::D4, Piece::Rook, Color::White);
        b.add_piece(Square::D6, Piece::Pawn, Color::Black);
        let before = b.clone();

        b.apply(Move::normal(Square::D4, Square::D6)).unwrap();
        assert_eq!(b.piece_at(Square::D6), Some(Piece::Rook));
        assert_eq!(b.color_at(Square::D6), Some(Color::White));
        assert!(b.pieces(Color::Black, Piece::Pawn).is_empty());

        b.undo();
        assert_eq!(b, before);
    }

    #[test]
    /// Test that applying a move with an empty origin reports an error
    /// and leaves the board untouched.
    fn apply_rejects_vacant_origin() {
        let mut b = Board::new();
        let before = b.clone();
        let m = Move::normal(Square::E4, Square::E5);
        assert_eq!(
            b.apply(m),
            Err(MoveError::VacantOrigin {
                player: Color::White,
                square: Square::E4,
            })
        );
        assert_eq!(b, before);
    }

    #[test]
    /// Test that the origin must hold a piece of the side to move, not
    /// just any piece.
    fn apply_rejects_moving_the_opponent() {
        let mut b = Board::new();
        let before = b.clone();
        assert!(b.apply(Move::normal(Square::E7, Square::E5)).is_err());
        assert_eq!(b, before);
    }

    #[test]
    fn undo_with_no_history_is_a_no_op() {
        let mut b = Board::new();
        b.undo();
        assert_eq!(b, Board::new());
    }

    #[test]
    fn undo_unwinds_in_reverse_order() {
        let mut b = Board::new();
        let start = b.clone();
        b.apply(Move::normal(Square::E2, Square::E4)).unwrap();
        let after_one = b.clone();
        b.apply(Move::normal(Square::E7, Square::E5)).unwrap();
        b.apply(Move::normal(Square::G1, Square::F3)).unwrap();

        b.undo();
        b.undo();
        assert_eq!(b, after_one);
        b.undo();
        assert_eq!(b, start);
    }

    #[test]
    fn vacant_origin_message_names_the_square() {
        let err = MoveError::VacantOrigin {
            player: Color::White,
            square: Square::E4,
        };
        assert_eq!(err.to_string(), "no white piece on e4");
    }

    #[test]
    #[should_panic(expected = "no white king on the board")]
    fn missing_king_is_fatal() {
        let b = Board::empty();
        let _ = b.king_square(Color::White);
    }

    #[test]
    fn renders_the_starting_position() {
        let rendered = Board::new().to_string();
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("8 | r n b q k b n r "));
        assert_eq!(lines.next(), Some("7 | p p p p p p p p "));
        assert_eq!(lines.next(), Some("6 | . . . . . . . . "));
    }
}
