pub mod game;
pub mod pgn;
pub mod position;
mod zobrist;

pub use game::{GameSession, GameStatus, MoveError};
pub use pgn::PgnHeaders;
pub use position::{Color, Move, MoveList, Piece, Position, Square};
