//! Moves packed into 16 bits, plus their coordinate-text form.

use std::fmt;

use crate::error::MoveError;
use crate::piece_type::PieceType;
use crate::square::Square;

const FROM_MASK: u16 = 0x003F;
const TO_SHIFT: u32 = 6;
const TO_MASK: u16 = 0x0FC0;
const FLAG_SHIFT: u32 = 12;

/// The 4-bit move flag.
///
/// Bit 2 marks a capture, bit 3 a promotion; for promotions the low two bits
/// select the piece. Values 6 and 7 are never generated.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveFlag(u8);

impl MoveFlag {
    pub const QUIET: MoveFlag = MoveFlag(0);
    pub const DOUBLE_PUSH: MoveFlag = MoveFlag(1);
    pub const KING_CASTLE: MoveFlag = MoveFlag(2);
    pub const QUEEN_CASTLE: MoveFlag = MoveFlag(3);
    pub const CAPTURE: MoveFlag = MoveFlag(4);
    pub const EN_PASSANT: MoveFlag = MoveFlag(5);
    pub const KNIGHT_PROMO: MoveFlag = MoveFlag(8);
    pub const BISHOP_PROMO: MoveFlag = MoveFlag(9);
    pub const ROOK_PROMO: MoveFlag = MoveFlag(10);
    pub const QUEEN_PROMO: MoveFlag = MoveFlag(11);
    pub const KNIGHT_PROMO_CAPTURE: MoveFlag = MoveFlag(12);
    pub const BISHOP_PROMO_CAPTURE: MoveFlag = MoveFlag(13);
    pub const ROOK_PROMO_CAPTURE: MoveFlag = MoveFlag(14);
    pub const QUEEN_PROMO_CAPTURE: MoveFlag = MoveFlag(15);

    const RESERVED: MoveFlag = MoveFlag(6);

    const CAPTURE_BIT: u8 = 0b0100;
    const PROMO_BIT: u8 = 0b1000;

    /// Flag for a promotion to `piece`, with or without a capture.
    #[inline]
    pub const fn promotion(piece: PromotionPiece, capture: bool) -> MoveFlag {
        let cap = if capture { Self::CAPTURE_BIT } else { 0 };
        MoveFlag(Self::PROMO_BIT | cap | piece as u8)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.0 & Self::CAPTURE_BIT != 0 && self.0 != Self::RESERVED.0 && self.0 != 7
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.0 & Self::PROMO_BIT != 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.0 == Self::KING_CASTLE.0 || self.0 == Self::QUEEN_CASTLE.0
    }

    /// Promotion piece encoded in the low two bits, for promotion flags only.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PromotionPiece> {
        if !self.is_promotion() {
            return None;
        }
        Some(match self.0 & 0b11 {
            0 => PromotionPiece::Knight,
            1 => PromotionPiece::Bishop,
            2 => PromotionPiece::Rook,
            _ => PromotionPiece::Queen,
        })
    }
}

impl fmt::Debug for MoveFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.0 {
            0 => "Quiet",
            1 => "DoublePush",
            2 => "KingCastle",
            3 => "QueenCastle",
            4 => "Capture",
            5 => "EnPassant",
            8..=11 => "Promotion",
            12..=15 => "PromotionCapture",
            _ => "Reserved",
        };
        write!(f, "{name}({})", self.0)
    }
}

/// A piece a pawn may promote to, in flag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotionPiece {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl PromotionPiece {
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Knight,
        PromotionPiece::Bishop,
        PromotionPiece::Rook,
        PromotionPiece::Queen,
    ];

    #[inline]
    pub const fn piece_type(self) -> PieceType {
        match self {
            PromotionPiece::Knight => PieceType::Knight,
            PromotionPiece::Bishop => PieceType::Bishop,
            PromotionPiece::Rook => PieceType::Rook,
            PromotionPiece::Queen => PieceType::Queen,
        }
    }

    /// Lowercase suffix used in coordinate notation.
    #[inline]
    pub const fn uci_char(self) -> char {
        match self {
            PromotionPiece::Knight => 'n',
            PromotionPiece::Bishop => 'b',
            PromotionPiece::Rook => 'r',
            PromotionPiece::Queen => 'q',
        }
    }

    pub const fn from_uci_char(c: char) -> Option<PromotionPiece> {
        match c {
            'n' => Some(PromotionPiece::Knight),
            'b' => Some(PromotionPiece::Bishop),
            'r' => Some(PromotionPiece::Rook),
            'q' => Some(PromotionPiece::Queen),
            _ => None,
        }
    }
}

/// A move in 16 bits.
///
/// ```text
/// bits  0-5:  source square
/// bits  6-11: destination square
/// bits 12-15: flag (see MoveFlag)
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Sentinel that no generator produces: its flag is the reserved value 6.
    pub const INVALID: Move = Move((MoveFlag::RESERVED.0 as u16) << FLAG_SHIFT);

    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Move {
        Move(from.index() as u16 | (to.index() as u16) << TO_SHIFT | (flag.0 as u16) << FLAG_SHIFT)
    }

    /// Reinterpret a raw 16-bit value.
    #[inline]
    pub const fn from_raw(raw: u16) -> Move {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_unchecked((self.0 & FROM_MASK) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_unchecked(((self.0 & TO_MASK) >> TO_SHIFT) as u8)
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag((self.0 >> FLAG_SHIFT) as u8)
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        let f = self.flag().0;
        f != 6 && f != 7
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flag().is_capture()
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flag().is_promotion()
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flag().is_castle()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flag().0 == MoveFlag::EN_PASSANT.0
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<PromotionPiece> {
        self.flag().promotion_piece()
    }

    /// Coordinate notation such as `e2e4` or `a7a8q`.
    pub fn to_uci(self) -> String {
        self.to_string()
    }

    /// Return `true` if this move has the squares and promotion of `text`.
    #[inline]
    pub fn matches(self, text: &UciMove) -> bool {
        self.from() == text.from && self.to() == text.to && self.promotion_piece() == text.promotion
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("0000");
        }
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion_piece() {
            write!(f, "{}", promo.uci_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} {:?})", self.flag())
    }
}

/// Coordinate-notation move text, parsed without reference to any position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PromotionPiece>,
}

impl UciMove {
    /// Parse 4 or 5 characters: two squares and an optional promotion letter.
    pub fn parse(text: &str) -> Result<UciMove, MoveError> {
        let malformed = |reason| MoveError::Malformed { text: text.to_string(), reason };
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(malformed("expected 4 or 5 ascii characters"));
        }
        let from = Square::from_algebraic(&text[0..2]).ok_or_else(|| malformed("bad source square"))?;
        let to = Square::from_algebraic(&text[2..4]).ok_or_else(|| malformed("bad destination square"))?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => Some(PromotionPiece::from_uci_char(c).ok_or_else(|| malformed("bad promotion piece"))?),
        };
        Ok(UciMove { from, to, promotion })
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.uci_char())?;
        }
        Ok(())
    }
}
