use std::{fmt, hash};

use super::{Piece, PieceKind, Square};

/// Represents the different kinds of moves that can be made during a chess game.
///
/// Promotion is not a kind of its own: any pawn move landing on the far back row
/// promotes (always to a Queen) when it is applied.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum MoveKind {
    /// A piece moves from one square to another, capturing whatever enemy stood there.
    #[default]
    Normal,

    /// A Pawn captures a Pawn that just advanced two squares, landing behind it.
    EnPassant,

    /// The King moves two squares toward a Rook, which hops over it.
    Castle,
}

/// Represents a move made on a chess board.
///
/// A [`Move`] carries snapshots of the moving piece and of the captured piece (if any),
/// taken when the move was generated.
///
/// Two moves compare equal when their source and destination squares are equal. Within
/// a single move set no two moves share both endpoints, so endpoints identify a move.
#[derive(Clone, Copy)]
pub struct Move {
    piece: Piece,
    to: Square,
    captured: Option<Piece>,
    kind: MoveKind,
}

impl Move {
    /// Creates a new [`Move`] of `piece` to `to`, capturing `captured`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Move, Piece, PieceKind, Square};
    /// let pawn = Piece::new(Color::White, PieceKind::Pawn, "e2".parse().unwrap());
    /// let e2e4 = Move::new(pawn, "e4".parse().unwrap(), None);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// assert!(e2e4.is_pawn_double_push());
    /// ```
    pub const fn new(piece: Piece, to: Square, captured: Option<Piece>) -> Self {
        Self {
            piece,
            to,
            captured,
            kind: MoveKind::Normal,
        }
    }

    /// Creates an en passant capture of `captured` by `pawn`, landing on `to`.
    pub const fn en_passant(pawn: Piece, to: Square, captured: Option<Piece>) -> Self {
        Self {
            piece: pawn,
            to,
            captured,
            kind: MoveKind::EnPassant,
        }
    }

    /// Creates a castling move of `king` to `to`.
    pub const fn castle(king: Piece, to: Square) -> Self {
        Self {
            piece: king,
            to,
            captured: None,
            kind: MoveKind::Castle,
        }
    }

    /// Fetches the source (or "from") square of this [`Move`].
    pub const fn from(&self) -> Square {
        self.piece.square()
    }

    /// Fetches the destination (or "to") square of this [`Move`].
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Fetches the snapshot of the moving piece, as it stood before the move.
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// Fetches the snapshot of the captured piece, if any.
    ///
    /// For en passant this is the Pawn behind `to`, not the (empty) destination.
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Fetches the [`MoveKind`] of this [`Move`].
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns `true` if this [`Move`] is an en passant capture.
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant)
    }

    /// Returns `true` if this [`Move`] is a castle (either side).
    pub const fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::Castle)
    }

    /// Returns `true` if this [`Move`] captures a piece.
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns `true` if this [`Move`] is a Pawn advancing two squares.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Move, Piece, PieceKind};
    /// let pawn = Piece::new(Color::Black, PieceKind::Pawn, "d7".parse().unwrap());
    /// assert!(Move::new(pawn, "d5".parse().unwrap(), None).is_pawn_double_push());
    /// assert!(!Move::new(pawn, "d6".parse().unwrap(), None).is_pawn_double_push());
    /// ```
    pub const fn is_pawn_double_push(&self) -> bool {
        self.piece.is_pawn() && self.from().row().abs_diff(self.to.row()) == 2
    }

    /// Returns `true` if this [`Move`] puts a Pawn on its promotion row.
    pub const fn is_promotion(&self) -> bool {
        self.piece.is_pawn() && self.to.row() == self.piece.color().promotion_row()
    }

    /// Returns `true` if this [`Move`] is a castle toward the h-file.
    pub const fn is_kingside_castle(&self) -> bool {
        self.is_castling() && self.to.col() > self.from().col()
    }

    /// The square between `from` and `to` of a two-square Pawn advance.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Move, Piece, PieceKind};
    /// let pawn = Piece::new(Color::White, PieceKind::Pawn, "e2".parse().unwrap());
    /// let e2e4 = Move::new(pawn, "e4".parse().unwrap(), None);
    /// assert_eq!(e2e4.skipped_square().unwrap().to_string(), "e3");
    /// ```
    pub fn skipped_square(&self) -> Option<Square> {
        if !self.is_pawn_double_push() {
            return None;
        }

        let row = (self.from().row() + self.to.row()) / 2;
        Square::new(row, self.to.col()).ok()
    }

    /// Converts this [`Move`] to a string, according to the [Universal Chess Interface](https://en.wikipedia.org//wiki/Universal_Chess_Interface) notation.
    ///
    /// A promoting move carries a trailing `q`, since promotion is always to a Queen.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Move, Piece, PieceKind};
    /// let pawn = Piece::new(Color::White, PieceKind::Pawn, "b7".parse().unwrap());
    /// let b7b8 = Move::new(pawn, "b8".parse().unwrap(), None);
    /// assert_eq!(b7b8.to_uci(), "b7b8q");
    /// ```
    pub fn to_uci(&self) -> String {
        if self.is_promotion() {
            format!("{}{}{}", self.from(), self.to, PieceKind::Queen)
        } else {
            format!("{}{}", self.from(), self.to)
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from() == other.from() && self.to == other.to
    }
}

impl Eq for Move {}

impl hash::Hash for Move {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.from().hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for Move {
    /// A [`Move`] is displayed in its UCI format.
    ///
    /// See [`Move::to_uci`] for more.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}", self.to_uci(), self.kind)?;
        if let Some(captured) = self.captured {
            write!(f, ", takes {captured:?}")?;
        }
        write!(f, ")")
    }
}
