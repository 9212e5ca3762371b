//! Chess position core: magic-bitboard attack tables, a dual-representation
//! position, legality analysis, legal move generation, and reversible make/unmake.

mod analyze;
mod attacks;
mod bitboard;
mod castle_rights;
mod chess_move;
mod color;
mod direction;
mod error;
mod fen;
mod history;
mod make_move;
mod movegen;
mod perft;
mod piece_type;
mod position;
mod square;
mod state;

pub use analyze::{StateTables, analyze};
pub use attacks::AttackTables;
pub use bitboard::Bitboard;
pub use castle_rights::{CastleRights, CastleSide};
pub use chess_move::{Move, MoveFlag, PromotionPiece, UciMove};
pub use color::Color;
pub use direction::Direction;
pub use error::{ErrorKind, FenError, HistoryError, MoveError, PositionError, SetupError, TableError};
pub use fen::STARTING_FEN;
pub use history::History;
pub use movegen::{MAX_MOVES, MoveList, generate};
pub use perft::{divide, perft};
pub use piece_type::PieceType;
pub use position::{Position, PrettyPosition};
pub use square::Square;
pub use state::{IrreversibleState, MAX_HALFMOVE_CLOCK};
