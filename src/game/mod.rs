pub mod board;
pub mod piece;
pub mod spawner;
pub mod state;

pub use board::{Board, Cell};
pub use piece::{Color, Piece, Shape, Tetromino};
pub use spawner::Spawner;
pub use state::{Game, GameEvent, GameStatus};
