//! Knight, bishop, rook, and queen moves.

use crate::analyze::StateTables;
use crate::piece_type::PieceType;
use crate::position::Position;

use super::MoveList;

const PIECES: [PieceType; 4] = [PieceType::Knight, PieceType::Bishop, PieceType::Rook, PieceType::Queen];

/// Generate legal moves for every non-pawn, non-king piece.
///
/// A piece on a pin ray may only move along the ray it sits on.
pub(super) fn gen_pieces(pos: &Position, state: &StateTables, list: &mut MoveList) {
    let tables = pos.tables();
    let us = pos.side_to_move();
    let friendly = pos.color_bb(us);
    let enemy = pos.color_bb(us.flip());
    let occupied = pos.occupied();
    let king = pos.king_square(us);

    for piece in PIECES {
        for from in pos.pieces(us, piece) {
            let mut targets = tables.attacks(piece, us, from, occupied) & !friendly & state.check_blocks;
            if let Some(king) = king
                && state.pin_rays().contains(from)
            {
                targets &= state.pin(tables.direction(king, from));
            }
            list.push_targets(from, targets, enemy);
        }
    }
}
