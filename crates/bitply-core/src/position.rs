//! The position: bitboards and a square index kept in lockstep, plus move history.

use std::fmt;
use std::sync::Arc;

use crate::analyze::analyze;
use crate::attacks::AttackTables;
use crate::bitboard::Bitboard;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::{HistoryError, PositionError};
use crate::history::History;
use crate::movegen::{MoveList, generate};
use crate::piece_type::PieceType;
use crate::square::Square;
use crate::state::IrreversibleState;

/// A chess position.
///
/// Piece placement is held twice: as per-color and per-type bitboards and as a
/// 64-entry square index. Every mutation goes through the private
/// `write_piece` / `delete_piece` / `replace_piece` helpers, which update both.
#[derive(Clone)]
pub struct Position {
    colors: [Bitboard; Color::COUNT],
    pieces: [[Bitboard; PieceType::COUNT]; Color::COUNT],
    occupied: Bitboard,
    mailbox: [Option<PieceType>; Square::COUNT],
    side_to_move: Color,
    fullmove: u32,
    history: History,
    tables: Arc<AttackTables>,
}

impl Position {
    /// An empty board, white to move, no castling rights, sharing `tables`.
    pub fn empty(tables: Arc<AttackTables>) -> Result<Position, HistoryError> {
        Self::empty_with_state(tables, IrreversibleState::default())
    }

    pub(crate) fn empty_with_state(
        tables: Arc<AttackTables>,
        root: IrreversibleState,
    ) -> Result<Position, HistoryError> {
        Ok(Position {
            colors: [Bitboard::EMPTY; Color::COUNT],
            pieces: [[Bitboard::EMPTY; PieceType::COUNT]; Color::COUNT],
            occupied: Bitboard::EMPTY,
            mailbox: [None; Square::COUNT],
            side_to_move: Color::White,
            fullmove: 1,
            history: History::new(root)?,
            tables,
        })
    }

    // --- Queries ---

    /// Piece type on `sq`, if any.
    #[inline]
    pub fn ptype_at(&self, sq: Square) -> Option<PieceType> {
        self.mailbox[sq.index()]
    }

    /// Color of the piece on `sq`, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        if self.colors[Color::White.index()].contains(sq) {
            Some(Color::White)
        } else if self.colors[Color::Black.index()].contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Bitboard of `color`'s pieces of type `piece`.
    #[inline]
    pub fn pieces(&self, color: Color, piece: PieceType) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Bitboard of every piece of `color`.
    #[inline]
    pub fn color_bb(&self, color: Color) -> Bitboard {
        self.colors[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Square of `color`'s king, or `None` on a board without one.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color, PieceType::King).lsb()
    }

    /// Irreversible state after the last played ply.
    #[inline]
    pub fn state(&self) -> IrreversibleState {
        self.history.top()
    }

    /// Castling rights still held by `color`.
    #[inline]
    pub fn castling_rights(&self, color: Color) -> CastleRights {
        self.state().castling.of_color(color)
    }

    #[inline]
    pub fn is_en_passant_available(&self) -> bool {
        self.state().en_passant.is_some()
    }

    /// Square a pawn of the side to move would land on when capturing en passant.
    pub fn en_passant_square(&self) -> Option<Square> {
        let file = self.state().en_passant?;
        let rank = match self.side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        Some(Square::new(rank, file))
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u8 {
        self.state().halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove
    }

    /// Plies played since setup.
    #[inline]
    pub fn plies(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The attack tables this position uses.
    #[inline]
    pub fn tables(&self) -> &AttackTables {
        &self.tables
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        generate(self, &analyze(self))
    }

    /// Make room for `extra_plies` more moves without reallocating during play.
    pub fn reserve(&mut self, extra_plies: usize) -> Result<(), HistoryError> {
        self.history.reserve(extra_plies)
    }

    // --- Mutation (crate-internal, both representations at once) ---

    #[inline]
    pub(crate) fn write_piece(&mut self, sq: Square, color: Color, piece: PieceType) {
        debug_assert!(self.mailbox[sq.index()].is_none(), "write onto occupied {sq}");
        let bb = sq.bitboard();
        self.colors[color.index()] |= bb;
        self.pieces[color.index()][piece.index()] |= bb;
        self.occupied |= bb;
        self.mailbox[sq.index()] = Some(piece);
    }

    #[inline]
    pub(crate) fn delete_piece(&mut self, sq: Square, color: Color, piece: PieceType) {
        debug_assert_eq!(self.mailbox[sq.index()], Some(piece), "delete mismatch on {sq}");
        debug_assert!(self.colors[color.index()].contains(sq), "delete wrong color on {sq}");
        let bb = sq.bitboard();
        self.colors[color.index()] ^= bb;
        self.pieces[color.index()][piece.index()] ^= bb;
        self.occupied ^= bb;
        self.mailbox[sq.index()] = None;
    }

    /// Swap the piece on `sq` for another one, leaving occupancy unchanged.
    #[inline]
    pub(crate) fn replace_piece(
        &mut self,
        sq: Square,
        old: (Color, PieceType),
        new: (Color, PieceType),
    ) {
        debug_assert_eq!(self.mailbox[sq.index()], Some(old.1), "replace mismatch on {sq}");
        let bb = sq.bitboard();
        self.colors[old.0.index()] ^= bb;
        self.pieces[old.0.index()][old.1.index()] ^= bb;
        self.colors[new.0.index()] |= bb;
        self.pieces[new.0.index()][new.1.index()] |= bb;
        self.mailbox[sq.index()] = Some(new.1);
    }

    #[inline]
    pub(crate) fn move_piece(&mut self, from: Square, to: Square, color: Color, piece: PieceType) {
        self.delete_piece(from, color, piece);
        self.write_piece(to, color, piece);
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, n: u32) {
        self.fullmove = n;
    }

    #[inline]
    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Check that bitboards, occupancy, and square index agree, and that the
    /// placement is a plausible chess position (one king each, no back-rank pawns).
    pub fn validate(&self) -> Result<(), PositionError> {
        let [white, black] = self.colors;
        if (white & black).is_nonempty() {
            return Err(PositionError::OverlappingColors);
        }
        if self.occupied != (white | black) {
            return Err(PositionError::InconsistentOccupancy);
        }

        for color in Color::ALL {
            let mut union = Bitboard::EMPTY;
            for piece in PieceType::ALL {
                let bb = self.pieces(color, piece);
                if (union & bb).is_nonempty() {
                    return Err(PositionError::OverlappingPieces);
                }
                union |= bb;
            }
            if union != self.color_bb(color) {
                return Err(PositionError::InconsistentOccupancy);
            }
        }

        for sq in Square::all() {
            let from_bitboards = self.color_at(sq).and_then(|color| {
                PieceType::ALL.into_iter().find(|&p| self.pieces(color, p).contains(sq))
            });
            if from_bitboards != self.mailbox[sq.index()] {
                return Err(PositionError::MailboxMismatch { square: sq });
            }
        }

        for color in Color::ALL {
            let count = self.pieces(color, PieceType::King).count();
            if count != 1 {
                return Err(PositionError::InvalidKingCount { color: color.name(), count });
            }
        }

        let pawns = self.pieces(Color::White, PieceType::Pawn) | self.pieces(Color::Black, PieceType::Pawn);
        if (pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).is_nonempty() {
            return Err(PositionError::PawnsOnBackRank);
        }
        Ok(())
    }

    /// Wrapper that prints the board as an 8x8 grid.
    pub fn pretty(&self) -> PrettyPosition<'_> {
        PrettyPosition(self)
    }

    /// FEN letter for the piece on `sq`, uppercase for white.
    pub(crate) fn piece_char(&self, sq: Square) -> Option<char> {
        let piece = self.ptype_at(sq)?;
        Some(match self.color_at(sq)? {
            Color::White => piece.fen_char().to_ascii_uppercase(),
            Color::Black => piece.fen_char(),
        })
    }
}

/// Positions compare by placement, side to move, counters, and history.
/// The attack tables they share are not part of the comparison.
impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        self.colors == other.colors
            && self.pieces == other.pieces
            && self.occupied == other.occupied
            && self.mailbox == other.mailbox
            && self.side_to_move == other.side_to_move
            && self.fullmove == other.fullmove
            && self.history == other.history
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

/// Board grid for debugging output.
pub struct PrettyPosition<'a>(&'a Position);

impl fmt::Display for PrettyPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.0;
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = pos.piece_char(Square::new(rank, file)).unwrap_or('.');
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    writeln!(f, "{c}")?;
                }
            }
        }
        write!(f, "   a b c d e f g h")
    }
}
