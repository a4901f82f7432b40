use super::{Color, MoveGen, Position, Square};

/// Returns `true` if any of `by`'s pieces could move onto `square`.
///
/// This generates `by`'s full pseudo-legal move set as if it were `by`'s turn, with
/// castling suppressed, and looks for a destination equal to `square`. A consequence is
/// that a Pawn "attacks" the squares it could push to, and does not attack an empty square
/// diagonally in front of it.
///
/// Never mutates `position`. Castling generation calls this, and this never generates
/// castling, so the two cannot recurse into each other more than once.
///
/// # Example
/// ```
/// # use gambit::{is_attacked, Color, Position};
/// let pos = Position::standard();
/// // The g1 knight covers f3
/// assert!(is_attacked(&pos, "f3".parse().unwrap(), Color::White));
/// assert!(!is_attacked(&pos, "e5".parse().unwrap(), Color::White));
/// ```
pub fn is_attacked(position: &Position, square: Square, by: Color) -> bool {
    MoveGen::new(position, by)
        .without_castling()
        .generate()
        .iter()
        .any(|mv| mv.to() == square)
}

/// Returns the squares of every piece of `by` that could move onto `square`.
///
/// Uses the same reasoning as [`is_attacked`].
pub fn attackers_of(position: &Position, square: Square, by: Color) -> Vec<Square> {
    MoveGen::new(position, by)
        .without_castling()
        .generate()
        .iter()
        .filter(|mv| mv.to() == square)
        .map(|mv| mv.from())
        .collect()
}
