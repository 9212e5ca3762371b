//! 64-bit square sets, one bit per square with bit 0 on a1.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::direction::Direction;
use crate::square::Square;

/// A set of squares packed into a `u64` (little-endian rank-file order).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// No squares.
    pub const EMPTY: Bitboard = Bitboard(0);

    /// Every square.
    pub const FULL: Bitboard = Bitboard(!0);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00FF);
    pub const RANK_3: Bitboard = Bitboard(0x0000_0000_00FF_0000);
    pub const RANK_6: Bitboard = Bitboard(0x0000_FF00_0000_0000);
    pub const RANK_8: Bitboard = Bitboard(0xFF00_0000_0000_0000);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    /// The two leftmost files (a and b).
    pub const LEFT_TWO: Bitboard = Bitboard(0x0303_0303_0303_0303);

    /// The two rightmost files (g and h).
    pub const RIGHT_TWO: Bitboard = Bitboard(0xC0C0_C0C0_C0C0_C0C0);

    /// Create a bitboard from raw bits.
    #[inline]
    pub const fn new(bits: u64) -> Bitboard {
        Bitboard(bits)
    }

    /// Return the raw bits.
    #[inline]
    pub const fn inner(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_nonempty(self) -> bool {
        self.0 != 0
    }

    /// Return `true` if two or more squares are set.
    #[inline]
    pub const fn more_than_one(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    /// Number of squares in the set.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        self.0 & (1u64 << sq.index()) != 0
    }

    /// Return a copy with `sq` added.
    #[inline]
    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | (1u64 << sq.index()))
    }

    /// Return a copy with `sq` removed.
    #[inline]
    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !(1u64 << sq.index()))
    }

    /// Lowest set square, if any.
    #[inline]
    pub const fn lsb(self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(self.0.trailing_zeros() as u8))
        }
    }

    /// Shift every square one step in `dir`, dropping squares that would wrap
    /// around the left or right edge.
    ///
    /// `Union` and `None` return the bitboard unchanged.
    #[inline]
    pub const fn shift(self, dir: Direction) -> Bitboard {
        let b = self.0;
        let moved = match dir {
            Direction::East => (b << 1) & !Self::FILE_A.0,
            Direction::NorthEast => (b << 9) & !Self::FILE_A.0,
            Direction::North => b << 8,
            Direction::NorthWest => (b << 7) & !Self::FILE_H.0,
            Direction::West => (b >> 1) & !Self::FILE_H.0,
            Direction::SouthWest => (b >> 9) & !Self::FILE_H.0,
            Direction::South => b >> 8,
            Direction::SouthEast => (b >> 7) & !Self::FILE_A.0,
            Direction::Union | Direction::None => b,
        };
        Bitboard(moved)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}

/// Iterating a bitboard yields its squares from a1 upward, consuming the set.
impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Bitboard {}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitboard(0x{:016x})", self.0)?;
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let c = if self.contains(Square::new(rank, file)) { 'x' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Bitboard;
    use crate::direction::Direction;
    use crate::square::Square;

    #[test]
    fn iterator_yields_ascending_squares() {
        let bb = Bitboard::EMPTY.with(Square::H8).with(Square::A1).with(Square::E4);
        let squares: Vec<Square> = bb.collect();
        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
    }

    #[test]
    fn more_than_one() {
        assert!(!Bitboard::EMPTY.more_than_one());
        assert!(!Square::D4.bitboard().more_than_one());
        assert!(Square::D4.bitboard().with(Square::D5).more_than_one());
    }

    #[test]
    fn shift_drops_wrapped_squares() {
        let h_file = Bitboard::FILE_H;
        assert!(h_file.shift(Direction::East).is_empty());
        assert!(h_file.shift(Direction::NorthEast).is_empty());
        assert!(h_file.shift(Direction::SouthEast).is_empty());

        let a_file = Bitboard::FILE_A;
        assert!(a_file.shift(Direction::West).is_empty());
        assert!(a_file.shift(Direction::NorthWest).is_empty());
        assert!(a_file.shift(Direction::SouthWest).is_empty());
    }

    #[test]
    fn shift_moves_one_step() {
        let e4 = Square::E4.bitboard();
        assert_eq!(e4.shift(Direction::North), Square::E5.bitboard());
        assert_eq!(e4.shift(Direction::SouthWest), Square::D3.bitboard());
        assert_eq!(e4.shift(Direction::NorthWest), Square::D5.bitboard());
        assert_eq!(e4.shift(Direction::Union), e4);
    }

    #[test]
    fn edge_file_masks() {
        assert_eq!(Bitboard::LEFT_TWO.count(), 16);
        assert_eq!(Bitboard::RIGHT_TWO.count(), 16);
        assert!(Bitboard::LEFT_TWO.contains(Square::B7));
        assert!(Bitboard::RIGHT_TWO.contains(Square::G2));
        assert!((Bitboard::LEFT_TWO & Bitboard::RIGHT_TWO).is_empty());
    }
}
