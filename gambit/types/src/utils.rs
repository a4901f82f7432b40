/// Number of rows (and columns) on a chessboard.
pub const BOARD_SIZE: usize = 8;

/// Capacity of a `MoveList`.
///
/// The most legal moves in a reachable position is 218
/// (<https://www.chessprogramming.org/Chess_Position#cite_note-4>). Moves that leave the
/// King in check are not filtered out here, so the bound is padded well past that.
pub const MAX_NUM_MOVES: usize = 320;

/// Column the King starts on, for both colors.
pub const KING_START_COL: usize = 4;

/// Column of the Rook that castles King-side.
pub const KINGSIDE_ROOK_COL: usize = 7;

/// Column of the Rook that castles Queen-side.
pub const QUEENSIDE_ROOK_COL: usize = 0;

/// Deltas for the movement of the Queen, as `(row, col)`.
pub const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Rook.
pub const ROOK_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[0],
    QUEEN_DELTAS[1],
    QUEEN_DELTAS[2],
    QUEEN_DELTAS[3],
];

/// Deltas for the movement of the Bishop.
pub const BISHOP_DELTAS: [(i8, i8); 4] = [
    QUEEN_DELTAS[4],
    QUEEN_DELTAS[5],
    QUEEN_DELTAS[6],
    QUEEN_DELTAS[7],
];

/// Deltas for the movement of the King. Same directions as the Queen, but a single step.
pub const KING_DELTAS: [(i8, i8); 8] = QUEEN_DELTAS;

/// Deltas for the movement of the Knight.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (1, -2),
    (-1, -2),
    (1, 2),
    (-1, 2),
];

/// Pawns have no generic template; see [`crate::Color::forward`].
pub const PAWN_DELTAS: [(i8, i8); 0] = [];
