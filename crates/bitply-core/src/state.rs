//! Position attributes that cannot be recovered from the board alone.

use crate::castle_rights::CastleRights;
use crate::piece_type::PieceType;

/// Largest value the 6-bit halfmove clock can hold; the clock saturates here.
pub const MAX_HALFMOVE_CLOCK: u8 = 63;

const CASTLING_MASK: u16 = 0x000F;
const EP_FLAG: u16 = 0x0010;
const LOW3_SHIFT: u32 = 5;
const LOW3_MASK: u16 = 0x00E0;
const CLOCK_SHIFT: u32 = 8;
const CLOCK_MASK: u16 = 0x3F00;

/// Value stored in bits 5-7 when neither an en passant file nor a captured piece is present.
const NO_PIECE: u16 = 6;

/// Irreversible state after a ply.
///
/// Packs into 16 bits at the history boundary:
///
/// ```text
/// bits  0-3:  castling rights
/// bit   4:    en passant available
/// bits  5-7:  en passant file when bit 4 is set, otherwise captured piece type (6 = none)
/// bits  8-13: halfmove clock
/// ```
///
/// A capturing move never enables en passant, so the two uses of bits 5-7 never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IrreversibleState {
    pub castling: CastleRights,
    /// File (0 = a) of a pawn that just advanced two squares.
    pub en_passant: Option<u8>,
    /// Piece removed by the ply that produced this state.
    pub captured: Option<PieceType>,
    pub halfmove_clock: u8,
}

impl IrreversibleState {
    /// Pack into the 16-bit history word.
    #[inline]
    pub fn pack(self) -> u16 {
        debug_assert!(
            !(self.en_passant.is_some() && self.captured.is_some()),
            "en passant file and captured piece share bits 5-7"
        );
        let low3 = match (self.en_passant, self.captured) {
            (Some(file), _) => EP_FLAG | (u16::from(file & 7) << LOW3_SHIFT),
            (None, Some(pt)) => (pt.index() as u16) << LOW3_SHIFT,
            (None, None) => NO_PIECE << LOW3_SHIFT,
        };
        let clock = u16::from(self.halfmove_clock.min(MAX_HALFMOVE_CLOCK)) << CLOCK_SHIFT;
        u16::from(self.castling.bits()) | low3 | clock
    }

    /// Unpack a word produced by [`pack`](Self::pack).
    #[inline]
    pub fn unpack(word: u16) -> IrreversibleState {
        let low3 = ((word & LOW3_MASK) >> LOW3_SHIFT) as u8;
        let (en_passant, captured) = if word & EP_FLAG != 0 {
            (Some(low3), None)
        } else {
            (None, PieceType::from_index(low3))
        };
        IrreversibleState {
            castling: CastleRights::new((word & CASTLING_MASK) as u8),
            en_passant,
            captured,
            halfmove_clock: ((word & CLOCK_MASK) >> CLOCK_SHIFT) as u8,
        }
    }
}
