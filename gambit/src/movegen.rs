use arrayvec::ArrayVec;

use super::{
    is_attacked, king_home, rook_home, Color, Move, Piece, Position, Square, MAX_NUM_MOVES,
};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = ArrayVec<Move, MAX_NUM_MOVES>;

/// Generates the pseudo-legal moves of one side in a [`Position`].
///
/// "Pseudo-legal" means every move obeys how its piece moves, and castling obeys the
/// castling rules, but a move may still leave the mover's own King in check.
///
/// The generating side need not be the side to move: the attack oracle asks for the
/// moves of the side that is waiting, with castling turned off.
///
/// # Example
/// ```
/// # use gambit::{Color, MoveGen, Position};
/// let pos = Position::standard();
/// assert_eq!(MoveGen::new(&pos, Color::White).generate().len(), 20);
/// assert_eq!(MoveGen::new(&pos, Color::Black).generate().len(), 20);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MoveGen<'a> {
    /// The [`Position`] to generate moves in.
    position: &'a Position,

    /// The side whose pieces are moved.
    side: Color,

    /// Whether castling moves are produced.
    castling: bool,
}

impl<'a> MoveGen<'a> {
    /// Creates a [`MoveGen`] for `side`'s pieces in `position`, castling included.
    pub const fn new(position: &'a Position, side: Color) -> Self {
        Self {
            position,
            side,
            castling: true,
        }
    }

    /// Consumes `self`, returning a [`MoveGen`] that never produces castling moves.
    pub const fn without_castling(mut self) -> Self {
        self.castling = false;
        self
    }

    /// Generates every pseudo-legal move of the side, piece by piece from `a8` to `h1`.
    pub fn generate(&self) -> MoveList {
        let mut moves = MoveList::new();

        for piece in self.position.board().all_for(self.side) {
            self.generate_for(piece, &mut moves);
        }

        moves
    }

    /// Appends the pseudo-legal moves of `piece` to `moves`.
    ///
    /// `piece` must belong to the generating side.
    pub fn generate_for(&self, piece: Piece, moves: &mut MoveList) {
        debug_assert!(piece.is(self.side), "{piece:?} is not a {} piece", self.side.name());

        if piece.is_pawn() {
            self.pawn_moves(piece, moves);
        } else if piece.is_slider() {
            self.sliding_moves(piece, moves);
        } else {
            self.stepping_moves(piece, moves);
        }

        if piece.is_king() && self.castling {
            self.castling_moves(piece, moves);
        }
    }

    /// Knights and Kings: one step in each direction, onto anything but a friendly piece.
    fn stepping_moves(&self, piece: Piece, moves: &mut MoveList) {
        let board = self.position.board();
        let from = piece.square();

        for &(d_row, d_col) in piece.directions() {
            let Some(to) = from.offset(d_row, d_col) else {
                continue;
            };

            if !board.is_friendly(to, self.side) {
                moves.push(Move::new(piece, to, board.piece_at(to)));
            }
        }
    }

    /// Rooks, Bishops and Queens: walk each direction until the edge or a piece.
    ///
    /// The first piece met is captured if it is an enemy; the walk stops there either way.
    fn sliding_moves(&self, piece: Piece, moves: &mut MoveList) {
        let board = self.position.board();
        let from = piece.square();

        for &(d_row, d_col) in piece.directions() {
            let mut current = from.offset(d_row, d_col);

            while let Some(to) = current {
                match board.piece_at(to) {
                    None => moves.push(Move::new(piece, to, None)),
                    Some(occupant) => {
                        if !occupant.is(self.side) {
                            moves.push(Move::new(piece, to, Some(occupant)));
                        }
                        break;
                    }
                }

                current = to.offset(d_row, d_col);
            }
        }
    }

    fn pawn_moves(&self, pawn: Piece, moves: &mut MoveList) {
        let board = self.position.board();
        let from = pawn.square();
        let forward = self.side.forward();

        // Pushes never capture
        if let Some(one) = from.offset(forward, 0).filter(|&sq| !board.has(sq)) {
            moves.push(Move::new(pawn, one, None));

            if from.row() == self.side.pawn_row() {
                if let Some(two) = from.offset(2 * forward, 0).filter(|&sq| !board.has(sq)) {
                    moves.push(Move::new(pawn, two, None));
                }
            }
        }

        for d_col in [-1, 1] {
            let Some(to) = from.offset(forward, d_col) else {
                continue;
            };

            if board.is_enemy(to, self.side) {
                moves.push(Move::new(pawn, to, board.piece_at(to)));
            } else if self.is_ep_target(to) {
                // The captured pawn sits beside us, not on `to`
                let victim = from
                    .offset(0, d_col)
                    .and_then(|sq| board.piece_at(sq))
                    .filter(|p| p.is_pawn() && !p.is(self.side));

                if victim.is_some() {
                    moves.push(Move::en_passant(pawn, to, victim));
                }
            }
        }
    }

    /// Returns `true` if `square` is an en passant target the generating side may capture onto.
    ///
    /// Only the real side to move gets en passant, so the attack oracle never counts it for the
    /// waiting side. The target is always an empty square behind a pawn, so no King or castling
    /// square is affected.
    fn is_ep_target(&self, square: Square) -> bool {
        self.position.side_to_move() == self.side && self.position.ep_square() == Some(square)
    }

    /// Castling for a King on its home square.
    ///
    /// The rights and the empty squares are checked first, so the attack oracle only runs
    /// when a castle is otherwise possible.
    fn castling_moves(&self, king: Piece, moves: &mut MoveList) {
        let from = king.square();
        if from != king_home(self.side) {
            return;
        }

        let board = self.position.board();
        let rights = self.position.castling_rights();
        let enemy = self.side.opponent();

        for kingside in [true, false] {
            if !rights.get(self.side, kingside) {
                continue;
            }

            let corner = rook_home(self.side, kingside);
            let has_rook = board
                .piece_at(corner)
                .is_some_and(|p| p.is_rook() && p.is(self.side));
            if !has_rook {
                continue;
            }

            // Squares between the King and the Rook, and the two the King crosses
            let between: &[i8] = if kingside { &[1, 2] } else { &[-1, -2, -3] };
            let crossed: [i8; 2] = if kingside { [1, 2] } else { [-1, -2] };

            let path_is_clear = between
                .iter()
                .all(|&d_col| from.offset(0, d_col).is_some_and(|sq| !board.has(sq)));
            if !path_is_clear {
                continue;
            }

            let is_safe = !is_attacked(self.position, from, enemy)
                && crossed.iter().all(|&d_col| {
                    from.offset(0, d_col)
                        .is_some_and(|sq| !is_attacked(self.position, sq, enemy))
                });

            if is_safe {
                if let Some(to) = from.offset(0, crossed[1]) {
                    moves.push(Move::castle(king, to));
                }
            }
        }
    }
}

/// Shorthand for generating `side`'s pseudo-legal moves in `position`, castling included.
pub fn pseudo_legal_moves(position: &Position, side: Color) -> MoveList {
    MoveGen::new(position, side).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CastlingRights, PieceKind};

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn lists_match(moves: &MoveList, expected: &[&str]) {
        let mut moves = moves.iter().map(Move::to_uci).collect::<Vec<_>>();
        let mut expected = expected.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        moves.sort();
        expected.sort();
        assert_eq!(moves, expected);
    }

    #[test]
    fn knight_in_corner() {
        let knight = Piece::new(Color::White, PieceKind::Knight, square("a1"));
        let pos = Position::new().with_piece(knight);
        lists_match(&pseudo_legal_moves(&pos, Color::White), &["a1b3", "a1c2"]);
    }

    #[test]
    fn rook_stops_at_first_piece() {
        let rook = Piece::new(Color::White, PieceKind::Rook, square("d4"));
        let friend = Piece::new(Color::White, PieceKind::Pawn, square("d6"));
        let foe = Piece::new(Color::Black, PieceKind::Pawn, square("f4"));
        let pos = Position::new()
            .with_piece(rook)
            .with_piece(friend)
            .with_piece(foe);

        let mut moves = MoveList::new();
        MoveGen::new(&pos, Color::White).generate_for(rook, &mut moves);
        lists_match(
            &moves,
            &[
                "d4d5", "d4d3", "d4d2", "d4d1", "d4c4", "d4b4", "d4a4", "d4e4", "d4f4",
            ],
        );
        assert!(moves.iter().find(|m| m.to() == square("f4")).unwrap().is_capture());
    }

    #[test]
    fn castling_can_be_suppressed() {
        let king = Piece::new(Color::White, PieceKind::King, square("e1"));
        let rook = Piece::new(Color::White, PieceKind::Rook, square("h1"));
        let pos = Position::new()
            .with_piece(king)
            .with_piece(rook)
            .with_castling_rights(CastlingRights::all());

        let with = MoveGen::new(&pos, Color::White).generate();
        let without = MoveGen::new(&pos, Color::White).without_castling().generate();
        assert_eq!(with.len(), without.len() + 1);
        assert!(with.iter().any(Move::is_castling));
        assert!(!without.iter().any(Move::is_castling));
    }
}
