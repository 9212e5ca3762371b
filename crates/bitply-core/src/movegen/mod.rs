//! Legal move generation driven by the masks from [`analyze`](crate::analyze()).

mod king;
mod pawns;
mod pieces;

use std::ops::Index;

use crate::analyze::StateTables;
use crate::bitboard::Bitboard;
use crate::chess_move::{Move, MoveFlag};
use crate::position::Position;
use crate::square::Square;

use self::king::{gen_castling, gen_king};
use self::pawns::{gen_en_passant, gen_pawns};
use self::pieces::gen_pieces;

/// Upper bound on list length. No legal position has more than 218 moves.
pub const MAX_MOVES: usize = 256;

/// Fixed-capacity, stack-allocated move buffer.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: u16,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::INVALID; MAX_MOVES],
            len: 0,
        }
    }

    /// Append a move.
    ///
    /// # Panics
    ///
    /// Debug-asserts that the list is not full.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!((self.len as usize) < MAX_MOVES);
        self.moves[self.len as usize] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    /// Push one move per destination in `targets`, flagged as a capture where
    /// the destination holds an enemy piece.
    #[inline]
    pub(crate) fn push_targets(&mut self, from: Square, targets: Bitboard, enemy: Bitboard) {
        for to in targets {
            let flag = if enemy.contains(to) { MoveFlag::CAPTURE } else { MoveFlag::QUIET };
            self.push(Move::new(from, to, flag));
        }
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Generate every legal move for the side to move.
///
/// `state` must come from [`analyze`](crate::analyze()) on the same position.
/// Moves come out grouped as pawn moves, other pieces, king, castling, then en passant.
pub fn generate(pos: &Position, state: &StateTables) -> MoveList {
    let mut list = MoveList::new();

    // In double check only the king may move.
    if !state.is_double_check() {
        gen_pawns(pos, state, &mut list);
        gen_pieces(pos, state, &mut list);
    }
    gen_king(pos, state, &mut list);
    gen_castling(pos, state, &mut list);
    gen_en_passant(pos, &mut list);

    list
}
