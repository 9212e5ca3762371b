//! Compass directions shared by the ray tables, the pin slots, and bitboard shifts.

/// One of the eight ray directions, plus the pin-union slot and a "no relation" sentinel.
///
/// The discriminants index the pin array in [`StateTables`](crate::StateTables) and
/// the direction table in [`AttackTables`](crate::AttackTables), so the order is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    East = 0,
    NorthEast = 1,
    North = 2,
    NorthWest = 3,
    West = 4,
    SouthWest = 5,
    South = 6,
    SouthEast = 7,
    /// Aggregate slot: the union of every pin ray.
    Union = 8,
    /// Two squares that share no rank, file, or diagonal.
    None = 9,
}

impl Direction {
    /// The eight real ray directions, in discriminant order.
    pub const RAYS: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Number of pin slots (eight rays plus the union).
    pub const PIN_SLOTS: usize = 9;

    /// Return the discriminant as an index.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the square-index offset of one step in this direction.
    ///
    /// `Union` and `None` have no geometric meaning and return 0.
    #[inline]
    pub const fn offset(self) -> i8 {
        match self {
            Direction::East => 1,
            Direction::NorthEast => 9,
            Direction::North => 8,
            Direction::NorthWest => 7,
            Direction::West => -1,
            Direction::SouthWest => -9,
            Direction::South => -8,
            Direction::SouthEast => -7,
            Direction::Union | Direction::None => 0,
        }
    }

    /// Return the (rank, file) step of this direction.
    #[inline]
    pub const fn step(self) -> (i8, i8) {
        match self {
            Direction::East => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::North => (1, 0),
            Direction::NorthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::South => (-1, 0),
            Direction::SouthEast => (-1, 1),
            Direction::Union | Direction::None => (0, 0),
        }
    }

    /// Return the opposite ray direction. The two sentinels map to themselves.
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::NorthEast => Direction::SouthWest,
            Direction::North => Direction::South,
            Direction::NorthWest => Direction::SouthEast,
            Direction::West => Direction::East,
            Direction::SouthWest => Direction::NorthEast,
            Direction::South => Direction::North,
            Direction::SouthEast => Direction::NorthWest,
            other => other,
        }
    }

    /// Return `true` for the four diagonal rays.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::NorthWest | Direction::SouthWest | Direction::SouthEast
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Direction;

    #[test]
    fn opposite_is_involution() {
        for dir in Direction::RAYS {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().offset(), -dir.offset());
        }
    }

    #[test]
    fn offset_matches_step() {
        for dir in Direction::RAYS {
            let (dr, df) = dir.step();
            assert_eq!(dir.offset(), dr * 8 + df, "{dir:?}");
        }
    }

    #[test]
    fn rays_in_discriminant_order() {
        for (i, dir) in Direction::RAYS.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
        assert_eq!(Direction::Union.index(), 8);
        assert_eq!(Direction::None.index(), 9);
    }
}
