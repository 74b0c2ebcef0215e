pub mod board;
pub mod moves;
pub mod pieces;
pub mod save;
pub mod setup;

pub use board::{Board, KingState, MadeMove, ScopedMove};
pub use moves::{Move, MovePool};
pub use pieces::{Color, Piece, PieceType};
