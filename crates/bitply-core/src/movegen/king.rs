//! King steps and castling.

use crate::analyze::StateTables;
use crate::castle_rights::{CastlePath, CastleSide};
use crate::chess_move::{Move, MoveFlag};
use crate::position::Position;

use super::MoveList;

/// Generate king steps onto squares the enemy does not attack.
///
/// `threats` already treats the king as transparent, so stepping back along a
/// checking ray is excluded too.
pub(super) fn gen_king(pos: &Position, state: &StateTables, list: &mut MoveList) {
    let us = pos.side_to_move();
    let Some(king) = pos.king_square(us) else {
        return;
    };
    let targets = pos.tables().king_attacks(king) & !pos.color_bb(us) & !state.threats;
    list.push_targets(king, targets, pos.color_bb(us.flip()));
}

/// Generate castling moves.
///
/// Each side needs its right, an empty path between king and rook, and no
/// attacked square among the king's start, crossing, and landing squares.
pub(super) fn gen_castling(pos: &Position, state: &StateTables, list: &mut MoveList) {
    let us = pos.side_to_move();
    let rights = pos.castling_rights(us);
    if rights.is_empty() {
        return;
    }
    for side in CastleSide::ALL {
        if !rights.has(us, side) {
            continue;
        }
        let path = CastlePath::new(us, side);
        if (path.empty & pos.occupied()).is_empty() && (path.safe & state.threats).is_empty() {
            let flag = match side {
                CastleSide::KingSide => MoveFlag::KING_CASTLE,
                CastleSide::QueenSide => MoveFlag::QUEEN_CASTLE,
            };
            list.push(Move::new(path.king_from, path.king_to, flag));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{gen_castling, gen_king};
    use crate::analyze::analyze;
    use crate::chess_move::{Move, MoveFlag};
    use crate::movegen::MoveList;
    use crate::position::Position;
    use crate::square::Square;

    fn castles(fen: &str) -> Vec<Move> {
        let pos: Position = fen.parse().unwrap();
        let mut list = MoveList::new();
        gen_castling(&pos, &analyze(&pos), &mut list);
        list.as_slice().to_vec()
    }

    const KS: Move = Move::new(Square::E1, Square::G1, MoveFlag::KING_CASTLE);
    const QS: Move = Move::new(Square::E1, Square::C1, MoveFlag::QUEEN_CASTLE);

    #[test]
    fn both_sides_available() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"), vec![KS, QS]);
    }

    #[test]
    fn black_castles_on_rank_eight() {
        let moves = castles("r3k2r/8/8/8/8/8/8/4K3 b kq - 0 1");
        assert!(moves.contains(&Move::new(Square::E8, Square::G8, MoveFlag::KING_CASTLE)));
        assert!(moves.contains(&Move::new(Square::E8, Square::C8, MoveFlag::QUEEN_CASTLE)));
    }

    #[test]
    fn no_castling_out_of_check() {
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
    }

    #[test]
    fn attacked_b_file_does_not_block_queen_side() {
        // The rook crosses b1 but the king does not.
        assert_eq!(castles("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"), vec![KS, QS]);
    }

    #[test]
    fn occupied_b1_blocks_queen_side() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1"), vec![KS]);
    }

    #[test]
    fn king_avoids_attacked_squares() {
        let pos: Position = "4k3/8/8/8/8/8/3r4/4K3 w - - 0 1".parse().unwrap();
        let mut list = MoveList::new();
        gen_king(&pos, &analyze(&pos), &mut list);
        let targets: Vec<Square> = list.iter().map(|m| m.to()).collect();
        // Only the capture on d2 and the escape to f1.
        assert_eq!(targets.len(), 2);
        assert!(list.contains(Move::new(Square::E1, Square::D2, MoveFlag::CAPTURE)));
        assert!(targets.contains(&Square::F1));
    }
}
