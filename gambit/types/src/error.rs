use std::{error::Error, fmt};

use super::Square;

/// Alias for results whose error is a [`ChessError`].
pub type Result<T> = std::result::Result<T, ChessError>;

/// Everything that can go wrong when talking to the rules engine.
///
/// [`ChessError::IllegalMove`] is an everyday outcome (most drags land on illegal squares).
/// The other variants indicate a caller or engine bug.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum ChessError {
    OutOfBounds { row: usize, col: usize },
    IllegalMove { from: Square, to: Square },
    InvariantViolation(String),
    InvalidSquareNotation { val: String },
    InvalidMoveNotation { val: String },
    InvalidPieceChar { val: char },
    InvalidColorChar { val: char },
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { row, col } => {
                write!(f, "square ({row}, {col}) is off the board. rows and columns must be within 0..8")
            }
            Self::IllegalMove { from, to } => write!(f, "{from}{to} is not a legal move"),
            Self::InvariantViolation(msg) => write!(f, "engine invariant violated: {msg}"),
            Self::InvalidSquareNotation { val } => write!(
                f,
                "square is not valid notation. notation must be <file><rank>. found {val:?}"
            ),
            Self::InvalidMoveNotation { val } => write!(
                f,
                "move is not valid notation. notation must be <from><to>[q], such as e2e4. found {val:?}"
            ),
            Self::InvalidPieceChar { val } => write!(
                f,
                "pieces must be [p | n | b | r | q | k] or uppercase equivalent. found {val}"
            ),
            Self::InvalidColorChar { val } => {
                write!(f, "color chars must be `w` or `b`. found {val}")
            }
        }
    }
}

impl Error for ChessError {
    //
}
