//! Precomputed attack tables, built once and shared read-only.

mod leapers;
mod magic;
mod magic_data;
mod rays;

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::direction::Direction;
use crate::error::TableError;
use crate::piece_type::PieceType;
use crate::square::Square;

use self::leapers::{BLACK_PAWN_OFFSETS, KING_OFFSETS, KNIGHT_OFFSETS, WHITE_PAWN_OFFSETS, leaper_table};
use self::magic::{Slider, SliderTable};
use self::rays::build_ray_tables;

static SHARED: OnceLock<Arc<AttackTables>> = OnceLock::new();

/// Every lookup table the analyzer and move generator need.
///
/// Immutable once built. Positions hold an `Arc` to the tables they were set up
/// with; the memory is released when the last holder drops it.
pub struct AttackTables {
    pawn: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    /// Indexed `from * 64 + to`.
    between: Vec<Bitboard>,
    /// Indexed `from * 64 + to`.
    direction: Vec<Direction>,
    bishop: SliderTable,
    rook: SliderTable,
}

impl AttackTables {
    /// Build a fresh, private set of tables.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::OutOfMemory`] if any table cannot be allocated.
    /// Tables built before the failure are dropped.
    pub fn build() -> Result<Arc<AttackTables>, TableError> {
        let (between, direction) = build_ray_tables()?;
        let bishop = SliderTable::build(Slider::Bishop)?;
        let rook = SliderTable::build(Slider::Rook)?;
        Ok(Arc::new(AttackTables {
            pawn: [leaper_table(&WHITE_PAWN_OFFSETS), leaper_table(&BLACK_PAWN_OFFSETS)],
            knight: leaper_table(&KNIGHT_OFFSETS),
            king: leaper_table(&KING_OFFSETS),
            between,
            direction,
            bishop,
            rook,
        }))
    }

    /// Return the process-wide tables, building them on first use.
    ///
    /// Threads racing on the first call may each build a copy, but exactly one
    /// copy is published and every caller receives that one. Losing copies are
    /// dropped without ever being handed out.
    pub fn shared() -> Result<Arc<AttackTables>, TableError> {
        if let Some(tables) = SHARED.get() {
            return Ok(Arc::clone(tables));
        }
        let built = AttackTables::build()?;
        match SHARED.set(Arc::clone(&built)) {
            Ok(()) => debug!("published shared attack tables"),
            Err(_) => debug!("discarded attack tables from a racing build"),
        }
        Ok(Arc::clone(SHARED.get().unwrap_or(&built)))
    }

    /// Squares a pawn of `color` on `sq` captures on.
    #[inline]
    pub fn pawn_attacks(&self, color: Color, sq: Square) -> Bitboard {
        self.pawn[color.index()][sq.index()]
    }

    #[inline]
    pub fn knight_attacks(&self, sq: Square) -> Bitboard {
        self.knight[sq.index()]
    }

    #[inline]
    pub fn king_attacks(&self, sq: Square) -> Bitboard {
        self.king[sq.index()]
    }

    /// Diagonal attacks from `sq`, stopping on (and including) blockers in `occupied`.
    #[inline]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop.attacks(sq, occupied)
    }

    /// Orthogonal attacks from `sq`, stopping on (and including) blockers in `occupied`.
    #[inline]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook.attacks(sq, occupied)
    }

    #[inline]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop_attacks(sq, occupied) | self.rook_attacks(sq, occupied)
    }

    /// Attack set of a `piece` of `color` on `sq`. Pawns report captures only.
    #[inline]
    pub fn attacks(&self, piece: PieceType, color: Color, sq: Square, occupied: Bitboard) -> Bitboard {
        match piece {
            PieceType::Pawn => self.pawn_attacks(color, sq),
            PieceType::Knight => self.knight_attacks(sq),
            PieceType::Bishop => self.bishop_attacks(sq, occupied),
            PieceType::Rook => self.rook_attacks(sq, occupied),
            PieceType::Queen => self.queen_attacks(sq, occupied),
            PieceType::King => self.king_attacks(sq),
        }
    }

    /// Squares strictly between `a` and `b`; empty unless they share a line.
    #[inline]
    pub fn between(&self, a: Square, b: Square) -> Bitboard {
        self.between[a.index() * Square::COUNT + b.index()]
    }

    /// Ray leading from `a` toward `b`, or [`Direction::None`] if they share no line.
    #[inline]
    pub fn direction(&self, a: Square, b: Square) -> Direction {
        self.direction[a.index() * Square::COUNT + b.index()]
    }
}

impl fmt::Debug for AttackTables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackTables")
            .field("bishop_entries", &self.bishop.len())
            .field("rook_entries", &self.rook.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::AttackTables;
    use crate::bitboard::Bitboard;
    use crate::color::Color;
    use crate::direction::Direction;
    use crate::piece_type::PieceType;
    use crate::square::Square;

    fn tables() -> Arc<AttackTables> {
        AttackTables::shared().unwrap()
    }

    #[test]
    fn shared_is_a_single_instance() {
        let a = AttackTables::shared().unwrap();
        let b = AttackTables::shared().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn concurrent_first_use_publishes_one_instance() {
        let handles: Vec<_> = (0..8).map(|_| std::thread::spawn(AttackTables::shared)).collect();
        let all: Vec<Arc<AttackTables>> = handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect();
        for t in &all {
            assert!(Arc::ptr_eq(t, &all[0]));
        }
    }

    #[test]
    fn private_build_is_independent() {
        let private = AttackTables::build().unwrap();
        assert!(!Arc::ptr_eq(&private, &tables()));
        assert_eq!(
            private.rook_attacks(Square::D4, Bitboard::EMPTY),
            tables().rook_attacks(Square::D4, Bitboard::EMPTY)
        );
    }

    #[test]
    fn sliders_on_empty_board() {
        let t = tables();
        for sq in Square::all() {
            assert_eq!(t.rook_attacks(sq, Bitboard::EMPTY).count(), 14, "{sq}");
        }
        assert_eq!(t.bishop_attacks(Square::D4, Bitboard::EMPTY).count(), 13);
        assert_eq!(t.bishop_attacks(Square::A1, Bitboard::EMPTY).count(), 7);
        assert_eq!(t.queen_attacks(Square::D4, Bitboard::EMPTY).count(), 27);
    }

    #[test]
    fn blockers_are_included() {
        let t = tables();
        let occ = Square::E6.bitboard().with(Square::C4);
        let rook = t.rook_attacks(Square::E4, occ);
        assert!(rook.contains(Square::E6));
        assert!(!rook.contains(Square::E7));
        assert!(rook.contains(Square::C4));
        assert!(!rook.contains(Square::B4));
    }

    #[test]
    fn random_occupancies_match_slow_walk() {
        use super::magic::Slider;
        let t = tables();
        let mut rng: u64 = 0x9E37_79B9_7F4A_7C15;
        for sq in Square::all() {
            for _ in 0..64 {
                rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let occ = Bitboard::new(rng);
                assert_eq!(t.rook_attacks(sq, occ), Slider::Rook.attacks_slow(sq, occ), "rook {sq}");
                assert_eq!(t.bishop_attacks(sq, occ), Slider::Bishop.attacks_slow(sq, occ), "bishop {sq}");
            }
        }
    }

    #[test]
    fn pawn_attacks_reverse_lookup() {
        let t = tables();
        // White pawns that attack d6 sit where a black pawn on d6 would capture.
        let from_d6 = t.pawn_attacks(Color::Black, Square::D6);
        assert_eq!(from_d6, Square::C5.bitboard().with(Square::E5));
        assert!(t.pawn_attacks(Color::White, Square::C5).contains(Square::D6));
    }

    #[test]
    fn generic_attacks_dispatch() {
        let t = tables();
        assert_eq!(t.attacks(PieceType::Knight, Color::White, Square::G1, Bitboard::FULL).count(), 3);
        assert_eq!(t.attacks(PieceType::King, Color::Black, Square::E8, Bitboard::EMPTY).count(), 5);
        assert_eq!(t.attacks(PieceType::Pawn, Color::Black, Square::A7, Bitboard::EMPTY), Square::B6.bitboard());
    }

    #[test]
    fn between_and_direction() {
        let t = tables();
        assert_eq!(t.between(Square::E1, Square::E4), Square::E2.bitboard().with(Square::E3));
        assert!(t.between(Square::A1, Square::B3).is_empty());
        assert_eq!(t.direction(Square::E1, Square::A5), Direction::NorthWest);
        assert_eq!(t.direction(Square::H1, Square::A1), Direction::West);
        assert_eq!(t.direction(Square::A1, Square::B3), Direction::None);
    }
}
