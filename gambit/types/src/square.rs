use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use super::{ChessError, Result, BOARD_SIZE};

/// Represents a single square on an `8x8` chess board, addressed as `(row, col)`.
///
/// Row `0` is Black's back rank and row `7` is White's, matching the way the board is
/// drawn on screen (top to bottom). Columns run from the a-file (`0`) to the h-file (`7`).
///
/// ```text
///      a  b  c  d  e  f  g  h
///   +------------------------
/// 0 | a8 b8 c8 d8 e8 f8 g8 h8
/// 1 | a7 .. .. .. .. .. .. h7
/// ...
/// 7 | a1 b1 c1 d1 e1 f1 g1 h1
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const COUNT: usize = BOARD_SIZE * BOARD_SIZE;

    /// Creates a new [`Square`] from a row and a column.
    ///
    /// Both must be within `[0, 8)`, or else [`ChessError::OutOfBounds`] is returned.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{ChessError, Square};
    /// let e2 = Square::new(6, 4).unwrap();
    /// assert_eq!(e2.to_string(), "e2");
    ///
    /// let err = Square::new(8, 0);
    /// assert_eq!(err, Err(ChessError::OutOfBounds { row: 8, col: 0 }));
    /// ```
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(ChessError::OutOfBounds { row, col });
        }

        Ok(Self::new_unchecked(row as u8, col as u8))
    }

    /// Creates a new [`Square`] without bounds checking.
    ///
    /// # Panics
    /// If `row` or `col` is `8` or greater and debug assertions are enabled.
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        debug_assert!(
            (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE,
            "Row and col must be between [0,8)"
        );
        Self { row, col }
    }

    /// Creates a [`Square`] from an index in `[0, 64)`, counting row by row from `a8`.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// assert_eq!(Square::from_index(0).unwrap().to_string(), "a8");
    /// assert_eq!(Square::from_index(63).unwrap().to_string(), "h1");
    /// assert!(Square::from_index(64).is_err());
    /// ```
    pub fn from_index(index: usize) -> Result<Self> {
        Self::new(index / BOARD_SIZE, index % BOARD_SIZE)
    }

    /// Returns an iterator over all 64 squares, row by row, starting at `a8`.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap().to_string(), "a8");
    /// assert_eq!(iter.last().unwrap().to_string(), "h1");
    /// ```
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(|i| Self::new_unchecked(i / 8, i % 8))
    }

    /// The row of this square, `0` being Black's back rank.
    pub const fn row(&self) -> usize {
        self.row as usize
    }

    /// The column of this square, `0` being the a-file.
    pub const fn col(&self) -> usize {
        self.col as usize
    }

    /// Fetches this square as `(row, col)`.
    pub const fn parts(&self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// Index of this square in `[0, 64)`. Useful for indexing into lists.
    pub const fn index(&self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    /// Shifts this square by `(d_row, d_col)`, yielding `None` if that walks off the board.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// let e2: Square = "e2".parse().unwrap();
    /// assert_eq!(e2.offset(-2, 0).unwrap().to_string(), "e4");
    /// assert!(e2.offset(2, 0).is_none());
    /// ```
    pub const fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;

        if row < 0 || col < 0 || row >= BOARD_SIZE as i8 || col >= BOARD_SIZE as i8 {
            None
        } else {
            Some(Self::new_unchecked(row as u8, col as u8))
        }
    }

    /// Returns the square on the same row as `self` but in column `col`.
    pub fn with_col(&self, col: usize) -> Result<Self> {
        Self::new(self.row(), col)
    }

    /// Creates a [`Square`] from algebraic notation, such as `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// let e4 = Square::from_uci("e4").unwrap();
    /// assert_eq!(e4.parts(), (4, 4));
    /// assert!(Square::from_uci("i9").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let err = || ChessError::InvalidSquareNotation {
            val: square.to_string(),
        };

        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(err());
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(err());
        }

        let col = file as usize - 'a' as usize;
        let row = BOARD_SIZE - (rank as usize - '0' as usize);

        Self::new(row, col)
    }

    /// Converts this [`Square`] to algebraic notation.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Square;
    /// assert_eq!(Square::new(7, 0).unwrap().to_uci(), "a1");
    /// ```
    pub fn to_uci(&self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = BOARD_SIZE - self.row();
        format!("{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = ChessError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = ChessError;
    fn try_from((row, col): (usize, usize)) -> std::result::Result<Self, Self::Error> {
        Self::new(row, col)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// [`Square`] can be used to index into a list of 64 elements.
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    /// [`Square`] can be used to mutably index into a list of 64 elements.
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Square {
    /// Debug formatting displays a square as its name and `(row, col)` pair.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_matches_rows_and_cols() {
        for square in Square::iter() {
            let parsed: Square = square.to_uci().parse().unwrap();
            assert_eq!(parsed, square);
        }

        assert_eq!(Square::from_uci("a8").unwrap().parts(), (0, 0));
        assert_eq!(Square::from_uci("h1").unwrap().parts(), (7, 7));
        assert_eq!(Square::from_uci("E2").unwrap().parts(), (6, 4));
    }

    #[test]
    fn bad_notation_is_rejected() {
        for bad in ["", "e", "e22", "z1", "a0", "a9", "11"] {
            assert!(Square::from_uci(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn offsets_stop_at_the_edge() {
        let a8 = Square::new(0, 0).unwrap();
        assert!(a8.offset(-1, 0).is_none());
        assert!(a8.offset(0, -1).is_none());
        assert_eq!(a8.offset(7, 7), Square::new(7, 7).ok());
    }

    #[test]
    fn out_of_bounds_never_clamps() {
        assert_eq!(
            Square::new(3, 8),
            Err(ChessError::OutOfBounds { row: 3, col: 8 })
        );
        assert!(Square::try_from((usize::MAX, 0)).is_err());
    }
}
