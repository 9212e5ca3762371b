//! Magic-hashed attack tables for bishops and rooks.

use tracing::{debug, warn};

use crate::bitboard::Bitboard;
use crate::direction::Direction;
use crate::error::TableError;
use crate::square::Square;

use super::magic_data::{BISHOP_BITS, BISHOP_MAGICS, ROOK_BITS, ROOK_MAGICS};
use super::rays::walk;

/// The two sliding movement patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    pub(super) const fn directions(self) -> [Direction; 4] {
        match self {
            Slider::Bishop => [
                Direction::NorthEast,
                Direction::NorthWest,
                Direction::SouthWest,
                Direction::SouthEast,
            ],
            Slider::Rook => [Direction::East, Direction::North, Direction::West, Direction::South],
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Slider::Bishop => "bishop",
            Slider::Rook => "rook",
        }
    }

    fn bits(self) -> &'static [u8; 64] {
        match self {
            Slider::Bishop => &BISHOP_BITS,
            Slider::Rook => &ROOK_BITS,
        }
    }

    fn magics(self) -> &'static [u64; 64] {
        match self {
            Slider::Bishop => &BISHOP_MAGICS,
            Slider::Rook => &ROOK_MAGICS,
        }
    }

    /// Blocker squares that can change the attack set from `sq`: every ray, minus its edge square.
    pub(super) fn relevant_mask(self, sq: Square) -> Bitboard {
        self.directions()
            .into_iter()
            .fold(Bitboard::EMPTY, |mask, dir| mask | walk(sq, dir, Bitboard::EMPTY, false))
    }

    /// Attack set computed by walking each ray. Used to fill and to check the tables.
    pub(super) fn attacks_slow(self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.directions()
            .into_iter()
            .fold(Bitboard::EMPTY, |acc, dir| acc | walk(sq, dir, occupied, true))
    }
}

/// All attack sets for one slider, stored back to back with per-square offsets.
#[derive(Debug)]
pub(super) struct SliderTable {
    masks: [Bitboard; 64],
    magics: [u64; 64],
    shifts: [u8; 64],
    offsets: [usize; 64],
    attacks: Vec<Bitboard>,
}

impl SliderTable {
    /// Build the table for `slider`. On allocation failure nothing is kept.
    pub(super) fn build(slider: Slider) -> Result<SliderTable, TableError> {
        let bits = slider.bits();
        let magics = *slider.magics();
        let mut masks = [Bitboard::EMPTY; 64];
        let mut shifts = [0u8; 64];
        let mut offsets = [0usize; 64];
        let mut total = 0usize;
        for sq in Square::all() {
            let i = sq.index();
            masks[i] = slider.relevant_mask(sq);
            debug_assert_eq!(masks[i].count(), u32::from(bits[i]), "{} mask width on {sq}", slider.name());
            shifts[i] = 64 - bits[i];
            offsets[i] = total;
            total += 1usize << bits[i];
        }

        let mut attacks = Vec::new();
        if let Err(e) = attacks.try_reserve_exact(total) {
            warn!(table = slider.name(), entries = total, error = %e, "attack table allocation failed");
            return Err(TableError::OutOfMemory { table: slider.name(), entries: total });
        }
        attacks.resize(total, Bitboard::EMPTY);

        let mut table = SliderTable { masks, magics, shifts, offsets, attacks };
        for sq in Square::all() {
            let mask = table.masks[sq.index()].inner();
            // Carry-rippler: visit every subset of the mask, starting from the empty set.
            let mut subset = 0u64;
            loop {
                let occupied = Bitboard::new(subset);
                let attack = slider.attacks_slow(sq, occupied);
                let slot = table.index(sq, occupied);
                debug_assert!(
                    table.attacks[slot].is_empty() || table.attacks[slot] == attack,
                    "{} magic collision on {sq}",
                    slider.name()
                );
                table.attacks[slot] = attack;
                subset = subset.wrapping_sub(mask) & mask;
                if subset == 0 {
                    break;
                }
            }
        }
        debug!(table = slider.name(), entries = total, "built sliding attack table");
        Ok(table)
    }

    #[inline]
    fn index(&self, sq: Square, occupied: Bitboard) -> usize {
        let i = sq.index();
        let relevant = (occupied & self.masks[i]).inner();
        self.offsets[i] + (relevant.wrapping_mul(self.magics[i]) >> self.shifts[i]) as usize
    }

    /// Attack set from `sq` against `occupied`, blocker squares included.
    #[inline]
    pub(super) fn attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.attacks[self.index(sq, occupied)]
    }

    /// Total number of stored attack sets.
    pub(super) fn len(&self) -> usize {
        self.attacks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_widths_match_masks() {
        for slider in [Slider::Bishop, Slider::Rook] {
            for sq in Square::all() {
                assert_eq!(
                    slider.relevant_mask(sq).count(),
                    u32::from(slider.bits()[sq.index()]),
                    "{slider:?} on {sq}"
                );
            }
        }
    }

    #[test]
    fn table_sizes() {
        assert_eq!(SliderTable::build(Slider::Rook).unwrap().len(), 102_400);
        assert_eq!(SliderTable::build(Slider::Bishop).unwrap().len(), 5_248);
    }

    /// Every occupancy subset of every mask must hash to its own attack set.
    #[test]
    fn no_destructive_collisions() {
        for slider in [Slider::Bishop, Slider::Rook] {
            let table = SliderTable::build(slider).unwrap();
            for sq in Square::all() {
                let mask = slider.relevant_mask(sq).inner();
                let mut subset = 0u64;
                loop {
                    let occupied = Bitboard::new(subset);
                    assert_eq!(
                        table.attacks(sq, occupied),
                        slider.attacks_slow(sq, occupied),
                        "{slider:?} on {sq} with {subset:016x}"
                    );
                    subset = subset.wrapping_sub(mask) & mask;
                    if subset == 0 {
                        break;
                    }
                }
            }
        }
    }

    #[test]
    fn irrelevant_occupancy_is_ignored() {
        let rook = SliderTable::build(Slider::Rook).unwrap();
        let edge_blockers = Square::E8.bitboard().with(Square::A4).with(Square::H4).with(Square::E1);
        assert_eq!(rook.attacks(Square::E4, edge_blockers), rook.attacks(Square::E4, Bitboard::EMPTY));
        assert_eq!(rook.attacks(Square::E4, Bitboard::EMPTY).count(), 14);
    }
}
