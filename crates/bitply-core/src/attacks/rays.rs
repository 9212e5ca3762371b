//! Ray walking and the square-pair tables (squares between, direction between).

use tracing::warn;

use crate::bitboard::Bitboard;
use crate::direction::Direction;
use crate::error::TableError;
use crate::square::Square;

/// Walk from `sq` along `dir`, collecting squares up to and including the first
/// occupied one. With `keep_edge` false the last square before the board edge is
/// left out, which yields the relevant-occupancy ray for magic hashing.
pub(super) fn walk(sq: Square, dir: Direction, occupied: Bitboard, keep_edge: bool) -> Bitboard {
    let (dr, df) = dir.step();
    let on_board = |r: i8, f: i8| (0..8).contains(&r) && (0..8).contains(&f);
    let mut ray = Bitboard::EMPTY;
    let (mut r, mut f) = (sq.rank() as i8 + dr, sq.file() as i8 + df);
    while on_board(r, f) {
        if !keep_edge && !on_board(r + dr, f + df) {
            break;
        }
        let here = Square::new(r as u8, f as u8);
        ray |= here.bitboard();
        if occupied.contains(here) {
            break;
        }
        r += dr;
        f += df;
    }
    ray
}

/// Fallibly allocate a 64x64 table filled with `fill`.
pub(super) fn square_pair_table<T: Copy>(table: &'static str, fill: T) -> Result<Vec<T>, TableError> {
    let entries = Square::COUNT * Square::COUNT;
    let mut v = Vec::new();
    if let Err(e) = v.try_reserve_exact(entries) {
        warn!(table, entries, error = %e, "attack table allocation failed");
        return Err(TableError::OutOfMemory { table, entries });
    }
    v.resize(entries, fill);
    Ok(v)
}

/// Build the between table and the direction table, both indexed `from * 64 + to`.
///
/// `between[a][b]` holds the squares strictly between two aligned squares and is
/// empty otherwise. `direction[a][b]` is the ray leading from `a` to `b`, or
/// [`Direction::None`].
pub(super) fn build_ray_tables() -> Result<(Vec<Bitboard>, Vec<Direction>), TableError> {
    let mut between = square_pair_table("between", Bitboard::EMPTY)?;
    let mut direction = square_pair_table("direction", Direction::None)?;
    for from in Square::all() {
        for dir in Direction::RAYS {
            // The ray iterates in square order, not outward, so each gap is
            // walked separately with `to` as the stopping blocker.
            for to in walk(from, dir, Bitboard::EMPTY, true) {
                let idx = from.index() * Square::COUNT + to.index();
                between[idx] = walk(from, dir, to.bitboard(), true).without(to);
                direction[idx] = dir;
            }
        }
    }
    Ok((between, direction))
}
