use std::fmt;

use super::{Color, Piece, PieceKind, Result, Square, BOARD_SIZE};

/// The contents of a single square: nothing, or a [`Piece`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Cell {
    /// Fetches the [`Piece`] in this cell, if there is one.
    pub const fn piece(&self) -> Option<Piece> {
        match self {
            Self::Empty => None,
            Self::Occupied(piece) => Some(*piece),
        }
    }

    /// Returns `true` if there is no piece in this cell.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Option<Piece>> for Cell {
    fn from(value: Option<Piece>) -> Self {
        value.map_or(Self::Empty, Self::Occupied)
    }
}

impl From<Piece> for Cell {
    fn from(value: Piece) -> Self {
        Self::Occupied(value)
    }
}

impl fmt::Display for Cell {
    /// A piece displays as its FEN letter, an empty cell as `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "."),
            Self::Occupied(piece) => write!(f, "{piece}"),
        }
    }
}

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of castling rights, en passant, or whose turn it is. If you need those, see [`Position`](crate::Position).
///
/// Internally a mailbox: one [`Cell`] per square, row by row starting at `a8`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; Square::COUNT],
}

impl Board {
    /// Piece kinds along each back row, from the a-file to the h-file.
    const BACK_ROW: [PieceKind; BOARD_SIZE] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use gambit::Board;
    /// let board = Board::new();
    /// assert_eq!(board.iter().count(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            cells: [Cell::Empty; Square::COUNT],
        }
    }

    /// Creates a [`Board`] with all 32 pieces on their starting squares.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, PieceKind, Square};
    /// let board = Board::standard();
    /// assert_eq!(board.iter().count(), 32);
    ///
    /// let e1 = board.piece_at("e1".parse().unwrap()).unwrap();
    /// assert_eq!(e1.parts(), (Color::White, PieceKind::King));
    /// ```
    pub fn standard() -> Self {
        let mut board = Self::new();

        for color in Color::iter() {
            for (col, kind) in Self::BACK_ROW.into_iter().enumerate() {
                let square = Square::new_unchecked(color.back_row() as u8, col as u8);
                board.put(Piece::new(color, kind, square));

                let square = Square::new_unchecked(color.pawn_row() as u8, col as u8);
                board.put(Piece::new(color, PieceKind::Pawn, square));
            }
        }

        board
    }

    /// Fetches the [`Cell`] at the provided [`Square`].
    pub const fn cell_at(&self, square: Square) -> Cell {
        self.cells[square.index()]
    }

    /// Fetches the [`Cell`] at `(row, col)`, failing if either index is off the board.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, ChessError};
    /// let board = Board::standard();
    /// assert!(board.cell(7, 4).unwrap().piece().is_some());
    /// assert_eq!(board.cell(0, 8), Err(ChessError::OutOfBounds { row: 0, col: 8 }));
    /// ```
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell> {
        Ok(self.cell_at(Square::new(row, col)?))
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cell_at(square).piece()
    }

    /// Returns `true` if there is a piece at the given [`Square`].
    pub const fn has(&self, square: Square) -> bool {
        !self.cell_at(square).is_empty()
    }

    /// Places `cell` at `square`, replacing whatever was there.
    ///
    /// A placed piece is relocated to `square`, so its stored square always matches the
    /// square it occupies.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Cell, Color, Piece, PieceKind, Square};
    /// let mut board = Board::new();
    /// let c4: Square = "c4".parse().unwrap();
    /// let knight = Piece::new(Color::White, PieceKind::Knight, Square::default());
    /// board.place(c4, Cell::Occupied(knight));
    /// assert_eq!(board.piece_at(c4).unwrap().square(), c4);
    /// ```
    pub fn place(&mut self, square: Square, cell: Cell) {
        self.cells[square.index()] = match cell {
            Cell::Empty => Cell::Empty,
            Cell::Occupied(piece) => Cell::Occupied(piece.relocated(square)),
        };
    }

    /// Places `piece` on the square it claims to stand on.
    pub fn put(&mut self, piece: Piece) {
        self.place(piece.square(), Cell::Occupied(piece));
    }

    /// Clears the supplied [`Square`] of any pieces.
    pub fn clear(&mut self, square: Square) {
        self.place(square, Cell::Empty);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Square};
    /// let mut board = Board::standard();
    /// let b1: Square = "b1".parse().unwrap();
    /// let knight = board.take(b1);
    /// assert!(knight.is_some());
    /// assert!(board.piece_at(b1).is_none());
    /// ```
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        let piece = self.piece_at(square)?;
        self.clear(square);
        Some(piece)
    }

    /// Returns `true` if `square` holds a piece of `color`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Board, Color, Square};
    /// let board = Board::standard();
    /// let a2: Square = "a2".parse().unwrap();
    /// assert!(board.is_friendly(a2, Color::White));
    /// assert!(!board.is_friendly(a2, Color::Black));
    /// ```
    pub const fn is_friendly(&self, square: Square, color: Color) -> bool {
        match self.cell_at(square) {
            Cell::Occupied(piece) => piece.is(color),
            Cell::Empty => false,
        }
    }

    /// Returns `true` if `square` holds a piece of `color`'s opponent.
    pub const fn is_enemy(&self, square: Square, color: Color) -> bool {
        self.is_friendly(square, color.opponent())
    }

    /// Returns an iterator over every piece on the board, row by row starting at `a8`.
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().filter_map(Cell::piece)
    }

    /// Returns an iterator over all of the pieces of `color` on this board.
    pub fn all_for(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.iter().filter(move |piece| piece.is(color))
    }

    /// Returns an iterator over the squares holding `color`'s King(s).
    pub fn kings(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.all_for(color)
            .filter(Piece::is_king)
            .map(|king| king.square())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for row in 0..BOARD_SIZE {
            board += &format!("{}| ", BOARD_SIZE - row);

            for col in 0..BOARD_SIZE {
                let square = Square::new_unchecked(row as u8, col as u8);
                board += &format!("{} ", self.cell_at(square));
            }

            board += "\n"
        }
        board += " +";
        for _ in 0..BOARD_SIZE {
            board += "--";
        }
        board += "\n   ";
        for file in 'a'..='h' {
            board += &format!("{file} ");
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout() {
        let board = Board::standard();
        let expected = [
            "rnbqkbnr", "pppppppp", "........", "........", "........", "........",
            "PPPPPPPP", "RNBQKBNR",
        ];

        for (row, line) in expected.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                let cell = board.cell(row, col).unwrap();
                assert_eq!(cell.to_string(), c.to_string(), "mismatch at ({row}, {col})");
            }
        }
    }

    #[test]
    fn every_piece_knows_its_square() {
        let board = Board::standard();
        for square in Square::iter() {
            if let Some(piece) = board.piece_at(square) {
                assert_eq!(piece.square(), square);
            }
        }
    }

    #[test]
    fn kings_are_found() {
        let board = Board::standard();
        let white: Vec<_> = board.kings(Color::White).collect();
        let black: Vec<_> = board.kings(Color::Black).collect();
        assert_eq!(white, vec![Square::new(7, 4).unwrap()]);
        assert_eq!(black, vec![Square::new(0, 4).unwrap()]);
    }

    #[test]
    fn out_of_bounds_cells_are_errors() {
        let board = Board::new();
        assert!(board.cell(8, 8).is_err());
        assert!(board.cell(7, 7).unwrap().is_empty());
    }
}
