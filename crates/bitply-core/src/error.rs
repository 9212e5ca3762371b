//! Error types. Every error reports one of three [`ErrorKind`]s.

use crate::square::Square;

/// Coarse classification shared by every error in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An allocation failed; the operation had no effect.
    OutOfMemory,
    /// Input text could not be parsed.
    Malformed,
    /// Input was well formed but names a move that is not legal here.
    Illegal,
}

/// Attack table construction failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("out of memory allocating {entries} entries for the {table} table")]
    OutOfMemory {
        /// Which table was being built.
        table: &'static str,
        /// Number of entries requested.
        entries: usize,
    },
}

impl TableError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::OutOfMemory
    }
}

/// The history stack could not grow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("out of memory reserving {requested} more history plies")]
    OutOfMemory {
        /// Additional plies requested.
        requested: usize,
    },
}

impl HistoryError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::OutOfMemory
    }
}

/// Structural problems found by [`Position::validate`](crate::Position::validate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("expected 1 {color} king, found {count}")]
    InvalidKingCount { color: &'static str, count: u32 },
    #[error("pawns found on a back rank")]
    PawnsOnBackRank,
    #[error("white and black occupancy overlap")]
    OverlappingColors,
    #[error("two piece bitboards claim the same square")]
    OverlappingPieces,
    #[error("occupancy is not the union of both colors")]
    InconsistentOccupancy,
    #[error("square index disagrees with the bitboards on {square}")]
    MailboxMismatch { square: Square },
}

/// A FEN string could not be turned into a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 4 to 6 FEN fields, found {found}")]
    WrongFieldCount { found: usize },
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount { found: usize },
    /// `rank_index` counts from the top of the FEN (0 = eighth rank).
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength { rank_index: usize, length: usize },
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar { character: char },
    #[error("invalid side to move: \"{found}\"")]
    InvalidColor { found: String },
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar { character: char },
    /// A castling right whose king or rook is not on its starting square.
    #[error("castling right '{character}' without king and rook on their home squares")]
    InconsistentCastling { character: char },
    /// Not a square, wrong rank for the side to move, or no pawn that just advanced past it.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant { found: String },
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter { field: &'static str, found: String },
    #[error("invalid position: {source}")]
    InvalidPosition {
        #[from]
        source: PositionError,
    },
    #[error(transparent)]
    Tables(#[from] TableError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

impl FenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FenError::Tables(_) | FenError::History(_) => ErrorKind::OutOfMemory,
            _ => ErrorKind::Malformed,
        }
    }
}

/// Move text that could not be resolved against the current position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("malformed move \"{text}\": {reason}")]
    Malformed { text: String, reason: &'static str },
    #[error("illegal move \"{text}\"")]
    Illegal { text: String },
}

impl MoveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MoveError::Malformed { .. } => ErrorKind::Malformed,
            MoveError::Illegal { .. } => ErrorKind::Illegal,
        }
    }
}

/// Failure while building a position from a FEN followed by a move list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Fen(#[from] FenError),
    #[error("move {ply}: {source}")]
    Move { ply: usize, source: MoveError },
    #[error(transparent)]
    History(#[from] HistoryError),
}

impl SetupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SetupError::Fen(e) => e.kind(),
            SetupError::Move { source, .. } => source.kind(),
            SetupError::History(e) => e.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_error_display() {
        let err = FenError::WrongFieldCount { found: 2 };
        assert_eq!(err.to_string(), "expected 4 to 6 FEN fields, found 2");
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn position_error_converts_into_fen_error() {
        let err: FenError = PositionError::PawnsOnBackRank.into();
        assert!(matches!(err, FenError::InvalidPosition { .. }));
        assert_eq!(err.to_string(), "invalid position: pawns found on a back rank");
    }

    #[test]
    fn allocation_failures_are_out_of_memory() {
        let err: FenError = HistoryError::OutOfMemory { requested: 8 }.into();
        assert_eq!(err.kind(), ErrorKind::OutOfMemory);
        let err = TableError::OutOfMemory { table: "rook", entries: 102_400 };
        assert_eq!(err.kind(), ErrorKind::OutOfMemory);
    }

    #[test]
    fn move_error_kinds_are_distinct() {
        let malformed = MoveError::Malformed { text: "e9e4".into(), reason: "bad square" };
        let illegal = MoveError::Illegal { text: "e2e5".into() };
        assert_eq!(malformed.kind(), ErrorKind::Malformed);
        assert_eq!(illegal.kind(), ErrorKind::Illegal);
        let setup = SetupError::Move { ply: 3, source: illegal };
        assert_eq!(setup.kind(), ErrorKind::Illegal);
        assert_eq!(setup.to_string(), "move 3: illegal move \"e2e5\"");
    }
}
