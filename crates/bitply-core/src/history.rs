//! Reversible-move history: one packed state word and move per played ply.

use tracing::{debug, warn};

use crate::chess_move::Move;
use crate::error::HistoryError;
use crate::state::IrreversibleState;

/// One played ply: the state it produced and the move itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    state: u16,
    mv: Move,
}

/// Growable stack of played plies with caller-managed capacity.
///
/// [`push`](Self::push) never allocates. Callers grow the stack ahead of time
/// with [`reserve`](Self::reserve), so slices into the history stay valid for
/// the whole bounded sequence of moves that follows.
#[derive(Debug, PartialEq, Eq)]
pub struct History {
    /// State of the position before any ply was played.
    root: u16,
    entries: Vec<Entry>,
}

impl History {
    /// Plies reserved when a history is created.
    pub const INITIAL_CAPACITY: usize = 1024;

    /// Create an empty history rooted at `root`, pre-reserving
    /// [`INITIAL_CAPACITY`](Self::INITIAL_CAPACITY) plies.
    pub fn new(root: IrreversibleState) -> Result<History, HistoryError> {
        let mut history = History { root: root.pack(), entries: Vec::new() };
        history.reserve(Self::INITIAL_CAPACITY)?;
        Ok(history)
    }

    /// Ensure at least `extra` more plies can be pushed. Never shrinks.
    ///
    /// On failure the stack is left exactly as it was.
    pub fn reserve(&mut self, extra: usize) -> Result<(), HistoryError> {
        let old = self.entries.capacity();
        if old - self.entries.len() >= extra {
            return Ok(());
        }
        if let Err(e) = self.entries.try_reserve(extra) {
            warn!(requested = extra, error = %e, "history reservation failed");
            return Err(HistoryError::OutOfMemory { requested: extra });
        }
        debug!(old, new = self.entries.capacity(), "history grew");
        Ok(())
    }

    /// Push a ply.
    ///
    /// # Panics
    ///
    /// Panics if no capacity was reserved for it.
    #[inline]
    pub fn push(&mut self, state: IrreversibleState, mv: Move) {
        assert!(
            self.entries.len() < self.entries.capacity(),
            "history push without reserved capacity ({} plies)",
            self.entries.len()
        );
        self.entries.push(Entry { state: state.pack(), mv });
    }

    /// Remove and return the most recent ply. Capacity is left untouched.
    #[inline]
    pub fn pop(&mut self) -> Option<(IrreversibleState, Move)> {
        self.entries.pop().map(|e| (IrreversibleState::unpack(e.state), e.mv))
    }

    /// State after the last played ply, or the root state if none were played.
    #[inline]
    pub fn top(&self) -> IrreversibleState {
        IrreversibleState::unpack(self.entries.last().map_or(self.root, |e| e.state))
    }

    /// The most recently played move.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.entries.last().map(|e| e.mv)
    }

    /// Played moves, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.entries.iter().map(|e| e.mv)
    }

    /// Number of plies played since setup.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plies that fit without further reservation, counting those already played.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}

/// Clones keep the reserved capacity, so a copy handed to another search
/// can push as far as the original could.
impl Clone for History {
    fn clone(&self) -> History {
        let mut entries = Vec::with_capacity(self.entries.capacity());
        entries.extend_from_slice(&self.entries);
        History { root: self.root, entries }
    }
}
