//! Knight, king, and pawn attack sets derived from square-index offsets.

use crate::bitboard::Bitboard;
use crate::square::Square;

pub(super) const KNIGHT_OFFSETS: [i8; 8] = [17, 15, 10, 6, -6, -10, -15, -17];
pub(super) const KING_OFFSETS: [i8; 8] = [9, 8, 7, 1, -1, -7, -8, -9];
pub(super) const WHITE_PAWN_OFFSETS: [i8; 2] = [7, 9];
pub(super) const BLACK_PAWN_OFFSETS: [i8; 2] = [-7, -9];

/// A step of at most two files wrapped around the board edge exactly when it
/// starts in one outer file pair and lands in the opposite one.
#[inline]
fn wraps(origin: Bitboard, dest: Bitboard) -> bool {
    let east_wrap = (origin & Bitboard::RIGHT_TWO).is_nonempty() && (dest & Bitboard::LEFT_TWO).is_nonempty();
    let west_wrap = (origin & Bitboard::LEFT_TWO).is_nonempty() && (dest & Bitboard::RIGHT_TWO).is_nonempty();
    east_wrap || west_wrap
}

/// Build a 64-entry table of the squares reachable by one of `offsets`.
pub(super) fn leaper_table(offsets: &[i8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for sq in Square::all() {
        let origin = sq.bitboard();
        for &off in offsets {
            let target = sq.index() as i16 + i16::from(off);
            let Some(dest) = u8::try_from(target).ok().and_then(Square::from_index) else {
                continue;
            };
            if !wraps(origin, dest.bitboard()) {
                table[sq.index()] |= dest.bitboard();
            }
        }
    }
    table
}
