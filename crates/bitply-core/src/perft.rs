//! Perft (performance test) for move generation correctness verification.

use tracing::trace;

use crate::error::HistoryError;
use crate::position::Position;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Leaves are bulk-counted: the
/// last ply returns the length of the legal move list without playing it.
///
/// # Errors
///
/// Fails only if `depth` plies of history cannot be reserved up front.
pub fn perft(pos: &mut Position, depth: usize) -> Result<u64, HistoryError> {
    pos.reserve(depth)?;
    Ok(count(pos, depth))
}

/// Per-root-move breakdown of [`perft`], sorted by move text.
///
/// Depth 0 has no root moves to split by, so the list is empty.
pub fn divide(pos: &mut Position, depth: usize) -> Result<Vec<(String, u64)>, HistoryError> {
    let mut results: Vec<(String, u64)> = Vec::new();
    if depth == 0 {
        return Ok(results);
    }
    pos.reserve(depth)?;
    for &mv in &pos.legal_moves() {
        pos.make(mv);
        let nodes = count(pos, depth - 1);
        pos.unmake();
        trace!(%mv, nodes, "divide");
        results.push((mv.to_uci(), nodes));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

fn count(pos: &mut Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for &mv in &moves {
        pos.make(mv);
        nodes += count(pos, depth - 1);
        pos.unmake();
    }
    nodes
}
