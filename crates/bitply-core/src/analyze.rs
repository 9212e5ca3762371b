//! Per-position legality masks: threats, checkers, check blocks, and pin rays.

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::direction::Direction;
use crate::piece_type::PieceType;
use crate::position::Position;

/// Transient masks the move generator filters against.
///
/// Recomputed from scratch for each position; nothing here is cached on the
/// position itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTables {
    /// Every square the side not to move attacks, with our king removed from
    /// the occupancy so sliders see through it.
    pub threats: Bitboard,
    /// Enemy pieces giving check.
    pub checks: Bitboard,
    /// Destinations that resolve a single check. Full when not in check, empty
    /// in double check.
    pub check_blocks: Bitboard,
    /// Pin rays indexed by [`Direction`] from the king, plus the union slot.
    /// Each ray runs from beside the king up to and including the pinner.
    pub pins: [Bitboard; Direction::PIN_SLOTS],
}

impl StateTables {
    /// Pin ray leaving the king in `dir`, or the union for [`Direction::Union`].
    #[inline]
    pub fn pin(&self, dir: Direction) -> Bitboard {
        debug_assert!(dir != Direction::None, "no pin slot for Direction::None");
        self.pins[dir.index()]
    }

    /// Squares covered by any pin ray. A friendly piece on one of them is pinned.
    #[inline]
    pub fn pin_rays(&self) -> Bitboard {
        self.pins[Direction::Union.index()]
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        self.checks.is_nonempty()
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.more_than_one()
    }
}

/// Compute the legality masks for the side to move.
///
/// A board without a king for the side to move gets no checks, no pins, and a
/// full check-block mask.
pub fn analyze(pos: &Position) -> StateTables {
    let tables = pos.tables();
    let us = pos.side_to_move();
    let them = us.flip();
    let ours = pos.color_bb(us);
    let occupied = pos.occupied();

    let their_pawns = pos.pieces(them, PieceType::Pawn);
    let their_knights = pos.pieces(them, PieceType::Knight);
    let their_queens = pos.pieces(them, PieceType::Queen);
    let their_diagonal = pos.pieces(them, PieceType::Bishop) | their_queens;
    let their_orthogonal = pos.pieces(them, PieceType::Rook) | their_queens;

    let king_bb = pos.pieces(us, PieceType::King);
    let see_through = occupied ^ king_bb;

    let mut threats = pawn_smear(their_pawns, them);
    for sq in their_knights {
        threats |= tables.knight_attacks(sq);
    }
    for sq in their_diagonal {
        threats |= tables.bishop_attacks(sq, see_through);
    }
    for sq in their_orthogonal {
        threats |= tables.rook_attacks(sq, see_through);
    }
    for sq in pos.pieces(them, PieceType::King) {
        threats |= tables.king_attacks(sq);
    }

    let mut state = StateTables {
        threats,
        checks: Bitboard::EMPTY,
        check_blocks: Bitboard::FULL,
        pins: [Bitboard::EMPTY; Direction::PIN_SLOTS],
    };
    let Some(king) = king_bb.lsb() else {
        return state;
    };

    if threats.contains(king) {
        state.checks = (tables.pawn_attacks(us, king) & their_pawns)
            | (tables.knight_attacks(king) & their_knights)
            | (tables.bishop_attacks(king, occupied) & their_diagonal)
            | (tables.rook_attacks(king, occupied) & their_orthogonal);
        state.check_blocks = match state.checks.lsb() {
            Some(_) if state.checks.more_than_one() => Bitboard::EMPTY,
            Some(checker) => tables.between(checker, king).with(checker),
            None => Bitboard::FULL,
        };
    }

    // X-ray through the first layer of our own pieces; an enemy slider that
    // appears only then is a pinner.
    let diagonal = tables.bishop_attacks(king, occupied);
    let diagonal_xray = diagonal ^ tables.bishop_attacks(king, occupied ^ (diagonal & ours));
    let orthogonal = tables.rook_attacks(king, occupied);
    let orthogonal_xray = orthogonal ^ tables.rook_attacks(king, occupied ^ (orthogonal & ours));
    let pinners = (diagonal_xray & their_diagonal) | (orthogonal_xray & their_orthogonal);

    for pinner in pinners {
        let ray = tables.between(king, pinner).with(pinner);
        let dir = tables.direction(king, pinner);
        state.pins[dir.index()] |= ray;
        state.pins[Direction::Union.index()] |= ray;
    }

    state
}

/// Both capture diagonals of every pawn in `pawns`.
fn pawn_smear(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => pawns.shift(Direction::NorthEast) | pawns.shift(Direction::NorthWest),
        Color::Black => pawns.shift(Direction::SouthEast) | pawns.shift(Direction::SouthWest),
    }
}
