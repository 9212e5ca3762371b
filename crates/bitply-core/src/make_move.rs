//! Move execution: make/unmake against the history stack.

use crate::castle_rights::{CastlePath, CastleRights, CastleSide};
use crate::chess_move::{Move, MoveFlag};
use crate::color::Color;
use crate::piece_type::PieceType;
use crate::position::Position;
use crate::square::Square;
use crate::state::{IrreversibleState, MAX_HALFMOVE_CLOCK};

/// Maps each square index to the castling rights that must be removed when
/// that square is the source or destination of any move.
const CASTLE_RIGHTS_REVOKE: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    table[Square::A1.index()] = CastleRights::WHITE_QUEEN;
    table[Square::H1.index()] = CastleRights::WHITE_KING;
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    table[Square::A8.index()] = CastleRights::BLACK_QUEEN;
    table[Square::H8.index()] = CastleRights::BLACK_KING;
    table
};

fn castle_side(flag: MoveFlag) -> CastleSide {
    if flag == MoveFlag::KING_CASTLE { CastleSide::KingSide } else { CastleSide::QueenSide }
}

/// Square of the pawn removed by an en passant capture landing on `to`.
fn en_passant_victim(us: Color, to: Square) -> Square {
    to.offset(-us.forward().offset())
}

impl Position {
    /// Play `mv`, which must be legal in this position.
    ///
    /// # Panics
    ///
    /// Panics if the history has no reserved slot left (see [`reserve`](Self::reserve)),
    /// or if `mv` does not fit the board (empty source square, missing victim).
    pub fn make(&mut self, mv: Move) {
        let us = self.side_to_move();
        let them = us.flip();
        let (from, to, flag) = (mv.from(), mv.to(), mv.flag());
        let prev = self.state();

        let Some(piece) = self.ptype_at(from) else {
            panic!("make {mv:?}: no piece on {from}");
        };

        let mut next = IrreversibleState {
            castling: prev
                .castling
                .remove(CASTLE_RIGHTS_REVOKE[from.index()])
                .remove(CASTLE_RIGHTS_REVOKE[to.index()]),
            en_passant: None,
            captured: None,
            halfmove_clock: if piece == PieceType::Pawn || flag.is_capture() {
                0
            } else {
                prev.halfmove_clock.saturating_add(1).min(MAX_HALFMOVE_CLOCK)
            },
        };

        match flag {
            MoveFlag::QUIET => self.move_piece(from, to, us, piece),
            MoveFlag::DOUBLE_PUSH => {
                self.move_piece(from, to, us, PieceType::Pawn);
                next.en_passant = Some(from.file());
            }
            MoveFlag::KING_CASTLE | MoveFlag::QUEEN_CASTLE => {
                let path = CastlePath::new(us, castle_side(flag));
                self.move_piece(path.king_from, path.king_to, us, PieceType::King);
                self.move_piece(path.rook_from, path.rook_to, us, PieceType::Rook);
            }
            MoveFlag::EN_PASSANT => {
                self.delete_piece(en_passant_victim(us, to), them, PieceType::Pawn);
                self.move_piece(from, to, us, PieceType::Pawn);
                next.captured = Some(PieceType::Pawn);
            }
            _ => {
                let landed = flag.promotion_piece().map_or(piece, |promo| promo.piece_type());
                self.delete_piece(from, us, piece);
                if flag.is_capture() {
                    let Some(victim) = self.ptype_at(to) else {
                        panic!("make {mv:?}: nothing to capture on {to}");
                    };
                    self.replace_piece(to, (them, victim), (us, landed));
                    next.captured = Some(victim);
                } else {
                    self.write_piece(to, us, landed);
                }
            }
        }

        self.set_side_to_move(them);
        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number().saturating_add(1));
        }
        self.history_mut().push(next, mv);
    }

    /// Take back the last played move and return it.
    ///
    /// # Panics
    ///
    /// Panics if no move has been played since setup.
    pub fn unmake(&mut self) -> Move {
        let Some((state, mv)) = self.history_mut().pop() else {
            panic!("unmake with no played moves");
        };
        let them = self.side_to_move();
        let us = them.flip();
        let (from, to, flag) = (mv.from(), mv.to(), mv.flag());

        self.set_side_to_move(us);
        if us == Color::Black {
            self.set_fullmove_number(self.fullmove_number().saturating_sub(1));
        }

        match flag {
            MoveFlag::KING_CASTLE | MoveFlag::QUEEN_CASTLE => {
                let path = CastlePath::new(us, castle_side(flag));
                self.move_piece(path.rook_to, path.rook_from, us, PieceType::Rook);
                self.move_piece(path.king_to, path.king_from, us, PieceType::King);
            }
            MoveFlag::EN_PASSANT => {
                self.move_piece(to, from, us, PieceType::Pawn);
                self.write_piece(en_passant_victim(us, to), them, PieceType::Pawn);
            }
            _ => {
                let Some(landed) = self.ptype_at(to) else {
                    panic!("unmake {mv:?}: no piece on {to}");
                };
                let moved = if flag.is_promotion() { PieceType::Pawn } else { landed };
                if flag.is_capture() {
                    let Some(victim) = state.captured else {
                        panic!("unmake {mv:?}: capture without a recorded victim");
                    };
                    self.replace_piece(to, (us, landed), (them, victim));
                } else {
                    self.delete_piece(to, us, landed);
                }
                self.write_piece(from, us, moved);
            }
        }
        mv
    }
}
