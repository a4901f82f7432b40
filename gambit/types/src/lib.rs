/// The error type shared by every crate in the workspace.
pub mod error;
/// Enums for piece kinds, colors, and a struct for a chess piece.
pub mod piece;
/// Squares on a chessboard, addressed by row and column.
pub mod square;
/// Misc constants: board dimensions, movement deltas, home rows.
pub mod utils;

pub use error::*;
pub use piece::*;
pub use square::*;
pub use utils::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::error::*;
    pub use crate::piece::*;
    pub use crate::square::*;
    pub use crate::utils::*;
}
