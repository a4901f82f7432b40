use std::{
    fmt,
    ops::{Index, IndexMut, Neg},
    str::FromStr,
};

use super::{
    ChessError, Result, Square, BISHOP_DELTAS, KING_DELTAS, KNIGHT_DELTAS, PAWN_DELTAS,
    QUEEN_DELTAS, ROOK_DELTAS,
};

/// Represents the color of a player or piece.
///
/// In Western chess, White traditionally moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// An iterator over both colors, starting with White.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::all().into_iter()
    }

    /// Returns this [`Color`]'s opposite / inverse / enemy.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `usize`: `0` for White, `1` for Black.
    ///
    /// Useful for indexing into lists.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Row delta of a single step "forward" for this color's pawns.
    ///
    /// White moves toward row `0`, Black toward row `7`.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Color;
    /// assert_eq!(Color::White.forward(), -1);
    /// assert_eq!(Color::Black.forward(), 1);
    /// ```
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// The row this color's pieces start on (and castle along).
    pub const fn back_row(&self) -> usize {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// The row this color's pawns start on, from which they may advance two squares.
    pub const fn pawn_row(&self) -> usize {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// The row on which this color's pawns are promoted.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Color;
    /// assert_eq!(Color::White.promotion_row(), 0);
    /// assert_eq!(Color::Black.promotion_row(), 7);
    /// ```
    pub const fn promotion_row(&self) -> usize {
        self.opponent().back_row()
    }

    /// Creates a [`Color`] from a `char`: `'w'` or `'b'` (case-insensitive).
    pub fn from_uci(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => Err(ChessError::InvalidColorChar { val: color }),
        }
    }

    /// Converts this [`Color`] to a char: `'w'` or `'b'`.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    ///
    /// # Example
    /// ```
    /// # use gambit_types::Color;
    /// assert_eq!(Color::Black.name(), "black");
    /// ```
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl Neg for Color {
    type Output = Self;
    /// Negating [`Color::White`] yields [`Color::Black`] and vice versa.
    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

/// Represents the kind (or "class") that a chess piece can be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Movement template of each [`PieceKind`], indexed by [`PieceKind::index`].
///
/// The `bool` is `true` for sliders, which repeat a direction until blocked.
const MOVEMENT: [(&[(i8, i8)], bool); PieceKind::COUNT] = [
    (&PAWN_DELTAS, false),
    (&KNIGHT_DELTAS, false),
    (&BISHOP_DELTAS, true),
    (&ROOK_DELTAS, true),
    (&QUEEN_DELTAS, true),
    (&KING_DELTAS, false),
];

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// Returns this [`PieceKind`] as a `usize` in `[0,5]`.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Direction vectors this kind moves along, as `(row, col)` deltas.
    ///
    /// Empty for pawns, whose moves depend on their color.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::PieceKind;
    /// assert_eq!(PieceKind::Rook.directions().len(), 4);
    /// assert_eq!(PieceKind::Knight.directions().len(), 8);
    /// assert!(PieceKind::Pawn.directions().is_empty());
    /// ```
    pub const fn directions(&self) -> &'static [(i8, i8)] {
        MOVEMENT[self.index()].0
    }

    /// Returns `true` if this kind slides (repeats its directions until blocked)
    /// rather than stepping once.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::PieceKind;
    /// assert!(PieceKind::Queen.slides());
    /// assert!(!PieceKind::King.slides());
    /// ```
    pub const fn slides(&self) -> bool {
        MOVEMENT[self.index()].1
    }

    /// Creates a new [`PieceKind`] from a character, case-insensitive.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::PieceKind;
    /// assert_eq!(PieceKind::from_uci('Q').unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_uci('x').is_err());
    /// ```
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => Err(ChessError::InvalidPieceChar { val: kind }),
        }
    }

    /// Converts this [`PieceKind`] to a lowercase character.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

/// Represents a chess piece on the game board: a [`Color`], a [`PieceKind`], and the
/// [`Square`] it currently stands on.
///
/// A [`Piece`] is a plain value. Copies held by moves are snapshots; the board owns the
/// authoritative copy and keeps its square in sync whenever the piece is placed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    square: Square,
}

impl Piece {
    /// Creates a new [`Piece`] standing on `square`.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Piece, Color, PieceKind, Square};
    /// let knight = Piece::new(Color::White, PieceKind::Knight, "g1".parse().unwrap());
    /// assert_eq!(knight.to_string(), "N");
    /// assert_eq!(knight.square().to_string(), "g1");
    /// ```
    pub const fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Self {
            color,
            kind,
            square,
        }
    }

    /// Fetches the [`Color`] of this [`Piece`].
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Fetches the [`Square`] this [`Piece`] stands on.
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Fetches the [`Color`] and [`PieceKind`] of this [`Piece`].
    pub const fn parts(&self) -> (Color, PieceKind) {
        (self.color, self.kind)
    }

    /// Returns `true` if this piece belongs to `color`.
    pub const fn is(&self, color: Color) -> bool {
        self.color.index() == color.index()
    }

    /// Returns `true` if this [`Piece`] is a Pawn.
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if this [`Piece`] is a Rook.
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    /// Returns `true` if this [`Piece`] is a King.
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns `true` if this [`Piece`] is a slider (Rook, Bishop, Queen).
    pub const fn is_slider(&self) -> bool {
        self.kind.slides()
    }

    /// Shorthand for [`PieceKind::directions`].
    pub const fn directions(&self) -> &'static [(i8, i8)] {
        self.kind.directions()
    }

    /// Returns this [`Piece`] moved to `square`, consuming `self`.
    pub const fn relocated(self, square: Square) -> Self {
        Self::new(self.color, self.kind, square)
    }

    /// Promotes this [`Piece`] to a new [`PieceKind`], consuming `self` and returning the promoted [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Color, Piece, PieceKind, Square};
    /// let pawn = Piece::new(Color::Black, PieceKind::Pawn, "e1".parse().unwrap());
    /// let queen = pawn.promoted(PieceKind::Queen);
    /// assert_eq!(queen.kind(), PieceKind::Queen);
    /// assert_eq!(queen.color(), Color::Black);
    /// assert_eq!(queen.square(), pawn.square());
    /// ```
    pub const fn promoted(self, promotion: PieceKind) -> Self {
        Self::new(self.color, promotion, self.square)
    }

    /// Converts this [`Piece`] into its FEN letter: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use gambit_types::{Piece, Color, PieceKind, Square};
    /// let rook = Piece::new(Color::Black, PieceKind::Rook, Square::default());
    /// assert_eq!(rook.to_uci(), 'r');
    /// ```
    pub const fn to_uci(&self) -> char {
        match self.color {
            Color::White => self.kind.to_uci().to_ascii_uppercase(),
            Color::Black => self.kind.to_uci(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} on {}",
            self.color.name(),
            self.kind.name(),
            self.square
        )
    }
}

macro_rules! impl_common_traits {
    ($type:ty, $err:ident) => {
        impl<T> Index<$type> for [T; <$type>::COUNT] {
            type Output = T;
            /// [`$type`] can be used to index into a list of [`<$type>::COUNT`] elements.
            fn index(&self, index: $type) -> &Self::Output {
                &self[index.index()]
            }
        }

        impl<T> IndexMut<$type> for [T; <$type>::COUNT] {
            /// [`$type`] can be used to mutably index into a list of [`<$type>::COUNT`] elements.
            fn index_mut(&mut self, index: $type) -> &mut Self::Output {
                &mut self[index.index()]
            }
        }

        impl FromStr for $type {
            type Err = ChessError;
            /// Does the same as [`Self::from_uci`], but only if `s` is one character in length.
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_uci(c),
                    _ => Err(ChessError::$err {
                        val: s.chars().next().unwrap_or(' '),
                    }),
                }
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_uci())
            }
        }

        impl fmt::Debug for $type {
            /// Debug formatting displays a $type as its UCI char and index value.
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "\"{self}\" ({})", self.index())
            }
        }
    };
}

impl_common_traits!(PieceKind, InvalidPieceChar);
impl_common_traits!(Color, InvalidColorChar);
