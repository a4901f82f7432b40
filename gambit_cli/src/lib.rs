/// The command loop standing in for a graphical board.
pub mod session;

pub use session::*;
