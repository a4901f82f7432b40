pub use gambit_types::*;

/// The attack oracle: is a square attacked by a given side.
pub mod attacks;
/// A mailbox chessboard and the cells it is made of.
pub mod board;
/// High-level abstraction of the game of chess: applying moves, history, check detection.
///
/// You probably want to look here.
pub mod game;
/// All code related to generating pseudo-legal moves for pieces on a board.
pub mod movegen;
/// Enums and structs for modeling the movement of a piece on a chessboard.
pub mod moves;
/// Utility functions for performance testing.
pub mod perft;
/// A chessboard plus turn, castling and en passant state.
pub mod position;

pub use attacks::*;
pub use board::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use position::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::attacks::*;
    pub use crate::board::*;
    pub use crate::game::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::position::*;
    pub use gambit_types::prelude::*;
}
