//! Text input and output: FEN positions and coordinate-notation moves.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::attacks::AttackTables;
use crate::castle_rights::{CastlePath, CastleRights, CastleSide};
use crate::chess_move::{Move, UciMove};
use crate::color::Color;
use crate::error::{FenError, MoveError, SetupError};
use crate::piece_type::PieceType;
use crate::position::Position;
use crate::square::Square;
use crate::state::{IrreversibleState, MAX_HALFMOVE_CLOCK};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// The standard starting position on the shared attack tables.
    pub fn startpos() -> Result<Position, FenError> {
        Position::from_fen(STARTING_FEN)
    }

    /// Parse a FEN string using the shared attack tables.
    ///
    /// The halfmove clock and fullmove number are optional and default to 0 and 1.
    /// Halfmove clocks above 63 are clamped to 63.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        Position::from_fen_with_tables(AttackTables::shared()?, fen)
    }

    /// Parse a FEN string into a position that uses `tables`.
    pub fn from_fen_with_tables(tables: Arc<AttackTables>, fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount { found: fields.len() });
        }

        let placement = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidColor { found: other.to_string() }),
        };

        let castling = CastleRights::from_fen(fields[2])?;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if castling.has(color, side) && !castle_pieces_home(&placement, color, side) {
                    return Err(FenError::InconsistentCastling { character: castle_char(color, side) });
                }
            }
        }

        let en_passant = parse_en_passant(fields[3], side_to_move, &placement)?;

        let halfmove_clock = match fields.get(4) {
            None => 0,
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidMoveCounter { field: "halfmove clock", found: s.to_string() })?
                .min(u32::from(MAX_HALFMOVE_CLOCK)) as u8,
        };
        let fullmove = match fields.get(5) {
            None => 1,
            Some(s) => s
                .parse::<u32>()
                .map_err(|_| FenError::InvalidMoveCounter { field: "fullmove number", found: s.to_string() })?,
        };

        let root = IrreversibleState { castling, en_passant, captured: None, halfmove_clock };
        let mut pos = Position::empty_with_state(tables, root)?;
        for (i, cell) in placement.iter().enumerate() {
            if let Some((color, piece)) = *cell {
                pos.write_piece(Square::from_index_unchecked(i as u8), color, piece);
            }
        }
        pos.set_side_to_move(side_to_move);
        pos.set_fullmove_number(fullmove);
        pos.validate()?;
        Ok(pos)
    }

    /// Parse a FEN and then play a whitespace-separated list of coordinate moves.
    pub fn from_fen_with_moves(fen: &str, moves: &str) -> Result<Position, SetupError> {
        let mut pos = Position::from_fen(fen)?;
        for (i, text) in moves.split_whitespace().enumerate() {
            let mv = pos.parse_move(text).map_err(|source| SetupError::Move { ply: i + 1, source })?;
            pos.reserve(1)?;
            pos.make(mv);
        }
        Ok(pos)
    }

    /// Resolve coordinate text such as `e2e4` or `e7e8q` against the legal moves.
    ///
    /// Unparseable text, a missing promotion letter, or a promotion letter on a
    /// non-promotion move is [`MoveError::Malformed`]. Well-formed text that names
    /// no legal move is [`MoveError::Illegal`].
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveError> {
        let wanted = UciMove::parse(text)?;
        let moves = self.legal_moves();
        if let Some(&mv) = moves.iter().find(|mv| mv.matches(&wanted)) {
            return Ok(mv);
        }
        let same_squares = moves.iter().find(|mv| mv.from() == wanted.from && mv.to() == wanted.to);
        let malformed = |reason| MoveError::Malformed { text: text.to_string(), reason };
        match (same_squares, wanted.promotion) {
            (Some(mv), None) if mv.is_promotion() => Err(malformed("missing promotion piece")),
            (Some(_), Some(_)) => Err(malformed("promotion letter on a non-promotion move")),
            _ => Err(MoveError::Illegal { text: text.to_string() }),
        }
    }

    /// Serialize to a six-field FEN string.
    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

type Placement = [Option<(Color, PieceType)>; Square::COUNT];

fn parse_placement(field: &str) -> Result<Placement, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }
    let mut placement: Placement = [None; Square::COUNT];
    for (rank_index, text) in ranks.iter().enumerate() {
        let rank = 7 - rank_index as u8;
        let mut file = 0usize;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                file += skip as usize;
                continue;
            }
            let piece = PieceType::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
            if file >= 8 {
                return Err(FenError::BadRankLength { rank_index, length: file + 1 });
            }
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            placement[Square::new(rank, file as u8).index()] = Some((color, piece));
            file += 1;
        }
        if file != 8 {
            return Err(FenError::BadRankLength { rank_index, length: file });
        }
    }
    Ok(placement)
}

fn castle_char(color: Color, side: CastleSide) -> char {
    match (color, side) {
        (Color::White, CastleSide::KingSide) => 'K',
        (Color::White, CastleSide::QueenSide) => 'Q',
        (Color::Black, CastleSide::KingSide) => 'k',
        (Color::Black, CastleSide::QueenSide) => 'q',
    }
}

fn castle_pieces_home(placement: &Placement, color: Color, side: CastleSide) -> bool {
    let path = CastlePath::new(color, side);
    placement[path.king_from.index()] == Some((color, PieceType::King))
        && placement[path.rook_from.index()] == Some((color, PieceType::Rook))
}

/// Parse the en passant field into a file, checking that an enemy pawn just
/// advanced two squares past the target from an origin that is now empty.
fn parse_en_passant(field: &str, side_to_move: Color, placement: &Placement) -> Result<Option<u8>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    let invalid = || FenError::InvalidEnPassant { found: field.to_string() };
    let target = Square::from_algebraic(field).ok_or_else(invalid)?;
    let (target_rank, pushed_dir) = match side_to_move {
        Color::White => (5, -8),
        Color::Black => (2, 8),
    };
    if target.rank() != target_rank {
        return Err(invalid());
    }
    let pushed_pawn = target.offset(pushed_dir);
    let origin = target.offset(-pushed_dir);
    if placement[pushed_pawn.index()] != Some((side_to_move.flip(), PieceType::Pawn))
        || placement[target.index()].is_some()
        || placement[origin.index()].is_some()
    {
        return Err(invalid());
    }
    Ok(Some(target.file()))
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Position, FenError> {
        Position::from_fen(fen)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            let mut gap = 0;
            for file in 0u8..8 {
                match self.piece_char(Square::new(rank, file)) {
                    Some(c) => {
                        if gap > 0 {
                            write!(f, "{gap}")?;
                            gap = 0;
                        }
                        write!(f, "{c}")?;
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                write!(f, "{gap}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }
        let state = self.state();
        write!(f, " {} {} ", self.side_to_move(), state.castling)?;
        match self.en_passant_square() {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", state.halfmove_clock, self.fullmove_number())
    }
}
