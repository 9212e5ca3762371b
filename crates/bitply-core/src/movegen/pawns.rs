//! Pawn pushes, captures, promotions, and en passant.

use crate::analyze::StateTables;
use crate::bitboard::Bitboard;
use crate::chess_move::{Move, MoveFlag, PromotionPiece};
use crate::color::Color;
use crate::direction::Direction;
use crate::piece_type::PieceType;
use crate::position::Position;

use super::MoveList;

/// Capture directions for `color`, each paired with the opposite end of its pin axis.
const fn capture_axes(color: Color) -> [(Direction, Direction); 2] {
    match color {
        Color::White => [
            (Direction::NorthWest, Direction::SouthEast),
            (Direction::NorthEast, Direction::SouthWest),
        ],
        Color::Black => [
            (Direction::SouthWest, Direction::NorthEast),
            (Direction::SouthEast, Direction::NorthWest),
        ],
    }
}

/// Generate pawn pushes and captures.
///
/// A pinned pawn only contributes to the direction whose pin axis it sits on,
/// so no per-move legality check is needed.
pub(super) fn gen_pawns(pos: &Position, state: &StateTables, list: &mut MoveList) {
    let us = pos.side_to_move();
    let them = us.flip();
    let pawns = pos.pieces(us, PieceType::Pawn);
    let enemy = pos.color_bb(them);
    let empty = !pos.occupied();
    let free = pawns & !state.pin_rays();

    let forward = us.forward();
    let (double_rank, promo_rank) = match us {
        Color::White => (Bitboard::RANK_3, Bitboard::RANK_8),
        Color::Black => (Bitboard::RANK_6, Bitboard::RANK_1),
    };

    // Pushes
    let pushers = free | (pawns & (state.pin(Direction::North) | state.pin(Direction::South)));
    let single = pushers.shift(forward) & empty;
    let double = (single & double_rank).shift(forward) & empty & state.check_blocks;
    let single = single & state.check_blocks;

    push_moves(list, single & !promo_rank, forward, 1, MoveFlag::QUIET);
    push_promotions(list, single & promo_rank, forward, false);
    push_moves(list, double, forward, 2, MoveFlag::DOUBLE_PUSH);

    // Captures
    for (dir, axis_back) in capture_axes(us) {
        let capturers = free | (pawns & (state.pin(dir) | state.pin(axis_back)));
        let targets = capturers.shift(dir) & enemy & state.check_blocks;
        push_moves(list, targets & !promo_rank, dir, 1, MoveFlag::CAPTURE);
        push_promotions(list, targets & promo_rank, dir, true);
    }
}

/// Generate en passant captures.
///
/// Each candidate is tried on a scratch occupancy with both pawns lifted and
/// the destination filled; it is kept only if no enemy slider then reaches the king.
pub(super) fn gen_en_passant(pos: &Position, list: &mut MoveList) {
    let Some(target) = pos.en_passant_square() else {
        return;
    };
    let Some(king) = pos.king_square(pos.side_to_move()) else {
        return;
    };
    let tables = pos.tables();
    let us = pos.side_to_move();
    let them = us.flip();
    let captured = target.offset(-us.forward().offset());

    let their_queens = pos.pieces(them, PieceType::Queen);
    let diagonal = pos.pieces(them, PieceType::Bishop) | their_queens;
    let orthogonal = pos.pieces(them, PieceType::Rook) | their_queens;

    let candidates = tables.pawn_attacks(them, target) & pos.pieces(us, PieceType::Pawn);
    for from in candidates {
        let occupied = pos.occupied().without(from).without(captured).with(target);
        let exposed = (tables.bishop_attacks(king, occupied) & diagonal).is_nonempty()
            || (tables.rook_attacks(king, occupied) & orthogonal).is_nonempty();
        if !exposed {
            list.push(Move::new(from, target, MoveFlag::EN_PASSANT));
        }
    }
}

/// Push one move per target, with the source `steps` squares back along `dir`.
fn push_moves(list: &mut MoveList, targets: Bitboard, dir: Direction, steps: i8, flag: MoveFlag) {
    let back = -dir.offset() * steps;
    for to in targets {
        list.push(Move::new(to.offset(back), to, flag));
    }
}

fn push_promotions(list: &mut MoveList, targets: Bitboard, dir: Direction, capture: bool) {
    let back = -dir.offset();
    for to in targets {
        let from = to.offset(back);
        for piece in PromotionPiece::ALL {
            list.push(Move::new(from, to, MoveFlag::promotion(piece, capture)));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::analyze::analyze;
    use crate::chess_move::{Move, MoveFlag};
    use crate::movegen::MoveList;
    use crate::position::Position;
    use crate::square::Square;

    use super::{gen_en_passant, gen_pawns};

    fn pawn_moves(fen: &str) -> MoveList {
        let pos: Position = fen.parse().unwrap();
        let mut list = MoveList::new();
        gen_pawns(&pos, &analyze(&pos), &mut list);
        gen_en_passant(&pos, &mut list);
        list
    }

    #[test]
    fn blocked_pawn_cannot_push() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn double_push_needs_both_squares() {
        let moves = pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        assert_eq!(moves.as_slice(), &[Move::new(Square::E2, Square::E3, MoveFlag::QUIET)]);
    }

    #[test]
    fn diagonally_pinned_pawn_captures_pinner_only() {
        // Bishop c3 pins the d2 pawn against the e1 king.
        let moves = pawn_moves("4k3/8/8/8/8/2b5/3P4/4K3 w - - 0 1");
        assert_eq!(moves.as_slice(), &[Move::new(Square::D2, Square::C3, MoveFlag::CAPTURE)]);
    }

    #[test]
    fn vertically_pinned_pawn_pushes_but_cannot_capture() {
        let moves = pawn_moves("4r2k/8/8/8/8/3b1b2/4P3/4K3 w - - 0 1");
        assert!(moves.contains(Move::new(Square::E2, Square::E3, MoveFlag::QUIET)));
        assert!(moves.contains(Move::new(Square::E2, Square::E4, MoveFlag::DOUBLE_PUSH)));
        assert!(!moves.iter().any(|m| m.is_capture()));
    }

    #[test]
    fn horizontally_pinned_pawn_is_frozen() {
        let moves = pawn_moves("7k/8/8/8/8/8/K3P2r/8 w - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn captures_do_not_wrap_edges() {
        let moves = pawn_moves("4k3/8/8/8/8/7p/P6P/4K3 w - - 0 1");
        assert!(!moves.iter().any(|m| m.is_capture()));
    }

    #[test]
    fn en_passant_diagonal_pin_rejected() {
        // The e5 pawn is pinned on the a1-h8 diagonal; capturing on d6 leaves it.
        let moves = pawn_moves("7K/8/8/3pP3/8/8/8/b3k3 w - d6 0 1");
        assert!(!moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn black_en_passant() {
        let moves = pawn_moves("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1");
        assert!(moves.contains(Move::new(Square::E4, Square::D3, MoveFlag::EN_PASSANT)));
    }
}
