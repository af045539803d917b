pub mod board;
pub mod config;
pub mod game;
pub mod gravity;
pub mod piece;

pub use board::{Board, Cell};
pub use config::Config;
pub use game::{Game, GameEvent, SpawnPolicy};
pub use gravity::Gravity;
pub use piece::{
    Color, PieceProvider, Position, RandomPieceProvider, SequencePieceProvider, Shape, Tetromino,
    TetrominoKind,
};
