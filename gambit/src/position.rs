use std::fmt;

use super::{
    Board, Cell, ChessError, Color, Move, Piece, PieceKind, Result, Square, BOARD_SIZE,
    KINGSIDE_ROOK_COL, KING_START_COL, QUEENSIDE_ROOK_COL,
};

/// Castling rights for both players: whether each may still castle toward the h-file
/// (King-side) and toward the a-file (Queen-side).
///
/// Rights only ever go away during a game; nothing in the engine grants them back.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CastlingRights {
    kingside: [bool; Color::COUNT],
    queenside: [bool; Color::COUNT],
}

impl CastlingRights {
    /// Creates a [`CastlingRights`] where neither side may castle.
    pub const fn new() -> Self {
        Self {
            kingside: [false; Color::COUNT],
            queenside: [false; Color::COUNT],
        }
    }

    /// Creates a [`CastlingRights`] where both sides may castle either way.
    ///
    /// # Example
    /// ```
    /// # use gambit::CastlingRights;
    /// assert_eq!(CastlingRights::all().to_uci(), "KQkq");
    /// assert_eq!(CastlingRights::new().to_uci(), "-");
    /// ```
    pub const fn all() -> Self {
        Self {
            kingside: [true; Color::COUNT],
            queenside: [true; Color::COUNT],
        }
    }

    /// Returns `true` if `color` may still castle King-side.
    pub const fn kingside(&self, color: Color) -> bool {
        self.kingside[color.index()]
    }

    /// Returns `true` if `color` may still castle Queen-side.
    pub const fn queenside(&self, color: Color) -> bool {
        self.queenside[color.index()]
    }

    /// Returns `true` if `color` may still castle toward the given side.
    pub const fn get(&self, color: Color, kingside: bool) -> bool {
        if kingside {
            self.kingside(color)
        } else {
            self.queenside(color)
        }
    }

    /// Grants `color` the right to castle toward the given side.
    ///
    /// Meant for building positions; a game in progress only ever revokes rights.
    pub fn grant(&mut self, color: Color, kingside: bool) {
        if kingside {
            self.kingside[color] = true;
        } else {
            self.queenside[color] = true;
        }
    }

    /// Removes `color`'s right to castle King-side.
    pub fn revoke_kingside(&mut self, color: Color) {
        self.kingside[color] = false;
    }

    /// Removes `color`'s right to castle Queen-side.
    pub fn revoke_queenside(&mut self, color: Color) {
        self.queenside[color] = false;
    }

    /// Removes both of `color`'s castling rights.
    pub fn revoke_all(&mut self, color: Color) {
        self.revoke_kingside(color);
        self.revoke_queenside(color);
    }

    /// Returns `true` if every right held by `self` is also held by `other`.
    ///
    /// # Example
    /// ```
    /// # use gambit::{CastlingRights, Color};
    /// let mut rights = CastlingRights::all();
    /// rights.revoke_queenside(Color::Black);
    /// assert!(rights.is_subset_of(&CastlingRights::all()));
    /// assert!(!CastlingRights::all().is_subset_of(&rights));
    /// ```
    pub const fn is_subset_of(&self, other: &Self) -> bool {
        self.index() & !other.index() == 0
    }

    /// Creates a `usize` in `[0, 16)` with one bit set per right held.
    pub const fn index(&self) -> usize {
        (self.kingside[0] as usize)
            | (self.kingside[1] as usize) << 1
            | (self.queenside[0] as usize) << 2
            | (self.queenside[1] as usize) << 3
    }

    /// Formats these rights the way FEN does: some subset of `KQkq`, or `-` for none.
    pub fn to_uci(&self) -> String {
        let mut castling = String::with_capacity(4);

        if self.kingside[Color::White] {
            castling.push('K');
        }
        if self.queenside[Color::White] {
            castling.push('Q');
        }
        if self.kingside[Color::Black] {
            castling.push('k');
        }
        if self.queenside[Color::Black] {
            castling.push('q')
        }

        if castling.is_empty() {
            String::from("-")
        } else {
            castling
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

/// The square `color`'s King starts on.
pub const fn king_home(color: Color) -> Square {
    Square::new_unchecked(color.back_row() as u8, KING_START_COL as u8)
}

/// The corner `color`'s Rook castles from.
pub const fn rook_home(color: Color, kingside: bool) -> Square {
    let col = if kingside {
        KINGSIDE_ROOK_COL
    } else {
        QUEENSIDE_ROOK_COL
    };
    Square::new_unchecked(color.back_row() as u8, col as u8)
}

/// Represents the current state of the game: the board, whose turn it is, castling
/// rights, and the en passant target.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Mailbox representation of the game board.
    board: Board,

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// Castling rights for each player.
    castling_rights: CastlingRights,

    /// The square a Pawn skipped over on the previous move, if that move was a two-square advance.
    ep_square: Option<Square>,
}

impl Position {
    /// Creates a new, empty [`Position`] with the following properties:
    /// * No pieces on the board
    /// * White moves first
    /// * No castling rights
    /// * No en passant square available
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Position};
    /// let pos = Position::new();
    /// assert_eq!(pos.board().iter().count(), 0);
    /// assert_eq!(pos.side_to_move(), Color::White);
    /// assert_eq!(pos.castling_rights().to_uci(), "-");
    /// ```
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::new(),
            ep_square: None,
        }
    }

    /// Creates the standard starting position: all 32 pieces, White to move, full castling rights.
    pub fn standard() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            ep_square: None,
        }
    }

    /// Consumes `self` and returns a [`Position`] with `piece` placed on its square.
    pub fn with_piece(mut self, piece: Piece) -> Self {
        self.board.put(piece);
        self
    }

    /// Consumes `self` and returns a [`Position`] with `color` to move.
    pub fn with_side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Consumes `self` and returns a [`Position`] with the provided castling rights.
    pub fn with_castling_rights(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Consumes `self` and returns a [`Position`] with the provided en passant square.
    pub fn with_ep_square(mut self, ep_square: Option<Square>) -> Self {
        self.ep_square = ep_square;
        self
    }

    /// Returns the current player as a [`Color`].
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// If en passant can be performed, returns the en passant [`Square`].
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the [`CastlingRights`] of the current position.
    pub const fn castling_rights(&self) -> &CastlingRights {
        &self.castling_rights
    }

    /// Fetches this position's [`Board`]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Toggles the current player from White to Black (or vice versa).
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Applies the move to the board. No enforcement of legality.
    ///
    /// In order:
    /// 1. The moving piece leaves `from` and lands on `to`, replacing whatever was there.
    /// 2. An en passant capture removes the Pawn beside `from`, on `to`'s column.
    /// 3. The en passant square is set if a Pawn advanced two squares, and cleared otherwise.
    /// 4. A Pawn on its promotion row becomes a Queen.
    /// 5. A castle brings the Rook from its corner to the square the King passed over.
    /// 6. Castling rights are revoked for King moves, Rook moves from their corners, and
    ///    Rooks captured on their corners.
    /// 7. The side to move flips.
    ///
    /// Fails with [`ChessError::InvariantViolation`] if `from` is empty, or if a castling
    /// Rook is missing. The position may be partially updated in that case.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Move, Position};
    /// let mut pos = Position::standard();
    /// let pawn = pos.board().piece_at("e2".parse().unwrap()).unwrap();
    /// pos.make_move(Move::new(pawn, "e4".parse().unwrap(), None)).unwrap();
    ///
    /// assert_eq!(pos.ep_square().unwrap().to_string(), "e3");
    /// assert_eq!(pos.side_to_move(), Color::Black);
    /// ```
    pub fn make_move(&mut self, mv: Move) -> Result<()> {
        let from = mv.from();
        let to = mv.to();

        let Some(piece) = self.board.take(from) else {
            return Err(ChessError::InvariantViolation(format!(
                "no piece on {from} to make {mv}"
            )));
        };

        let mut captured = self.board.take(to);
        self.board.put(piece.relocated(to));

        if mv.is_en_passant() {
            let victim = Square::new(from.row(), to.col())?;
            captured = self.board.take(victim);
        }

        self.ep_square = mv.skipped_square();

        if piece.is_pawn() && to.row() == piece.color().promotion_row() {
            self.board
                .put(piece.relocated(to).promoted(PieceKind::Queen));
        }

        if mv.is_castling() {
            self.move_castling_rook(mv)?;
        }

        self.update_castling_rights(piece, captured);
        self.toggle_side_to_move();

        Ok(())
    }

    /// Draws the board one rank per line, with the side to move, castling rights and en
    /// passant square beside it.
    ///
    /// `draw_cell` turns each square and its contents into the text drawn for it.
    ///
    /// # Example
    /// ```
    /// # use gambit::Position;
    /// let text = Position::standard().render(|_, cell| cell.to_string());
    /// assert!(text.starts_with("8| r n b q k b n r"));
    /// assert!(text.contains("Castling: KQkq"));
    /// ```
    pub fn render(&self, mut draw_cell: impl FnMut(Square, Cell) -> String) -> String {
        let mut board_str = String::with_capacity(320);
        for row in 0..BOARD_SIZE {
            board_str += &format!("{}|", BOARD_SIZE - row);
            for col in 0..BOARD_SIZE {
                let square = Square::new_unchecked(row as u8, col as u8);
                board_str += &format!(" {}", draw_cell(square, self.board.cell_at(square)));
            }

            if let Some(panel) = self.panel_line(row) {
                board_str += &panel;
            }
            board_str += "\n";
        }
        board_str += " +";
        for _ in 0..BOARD_SIZE {
            board_str += "--";
        }
        board_str += "\n   ";
        for file in 'a'..='h' {
            board_str += &format!("{file} ");
        }

        board_str
    }

    /// Text drawn to the right of `row` by [`Position::render`], if any.
    fn panel_line(&self, row: usize) -> Option<String> {
        match row {
            1 => Some(format!("          Side: {}", self.side_to_move.name())),
            2 => Some(format!("      Castling: {}", self.castling_rights)),
            3 => {
                let ep = self
                    .ep_square
                    .map(|square| square.to_uci())
                    .unwrap_or(String::from("-"));
                Some(format!("            EP: {ep}"))
            }
            _ => None,
        }
    }

    /// Consumes `self` and returns a [`Position`] after having applied the provided [`Move`].
    pub fn with_move_made(mut self, mv: Move) -> Result<Self> {
        self.make_move(mv)?;
        Ok(self)
    }

    /// Moves the Rook of a castle from its corner to the square beside the King.
    fn move_castling_rook(&mut self, mv: Move) -> Result<()> {
        let kingside = mv.is_kingside_castle();
        let color = mv.piece().color();
        let corner = rook_home(color, kingside);

        let rook_col = if kingside {
            mv.to().col() - 1
        } else {
            mv.to().col() + 1
        };
        let rook_dest = mv.to().with_col(rook_col)?;

        let Some(rook) = self.board.take(corner).filter(|p| p.is_rook() && p.is(color)) else {
            return Err(ChessError::InvariantViolation(format!(
                "{mv} castles, but there is no {} rook on {corner}",
                color.name()
            )));
        };
        self.board.put(rook.relocated(rook_dest));

        Ok(())
    }

    /// Revokes castling rights after `mover` moved and (possibly) captured `captured`.
    fn update_castling_rights(&mut self, mover: Piece, captured: Option<Piece>) {
        let color = mover.color();

        if mover.is_king() {
            self.castling_rights.revoke_all(color);
        }

        if mover.is_rook() {
            self.revoke_for_corner(mover.square(), color);
        }

        if let Some(captured) = captured.filter(Piece::is_rook) {
            self.revoke_for_corner(captured.square(), captured.color());
        }
    }

    /// Revokes `color`'s right on whichever side `square` is the Rook's corner for, if either.
    fn revoke_for_corner(&mut self, square: Square, color: Color) {
        if square == rook_home(color, true) {
            self.castling_rights.revoke_kingside(color);
        } else if square == rook_home(color, false) {
            self.castling_rights.revoke_queenside(color);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(|_, cell| cell.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn piece(color: Color, kind: PieceKind, s: &str) -> Piece {
        Piece::new(color, kind, square(s))
    }

    #[test]
    fn homes_are_on_back_rows() {
        assert_eq!(king_home(Color::White), square("e1"));
        assert_eq!(king_home(Color::Black), square("e8"));
        assert_eq!(rook_home(Color::White, true), square("h1"));
        assert_eq!(rook_home(Color::White, false), square("a1"));
        assert_eq!(rook_home(Color::Black, true), square("h8"));
        assert_eq!(rook_home(Color::Black, false), square("a8"));
    }

    #[test]
    fn rook_leaving_corner_revokes_one_side() {
        let rook = piece(Color::White, PieceKind::Rook, "h1");
        let mut pos = Position::new()
            .with_piece(rook)
            .with_castling_rights(CastlingRights::all());

        pos.make_move(Move::new(rook, square("h4"), None)).unwrap();
        assert_eq!(pos.castling_rights().to_uci(), "Qkq");
    }

    #[test]
    fn capturing_rook_in_corner_revokes_its_right() {
        let bishop = piece(Color::White, PieceKind::Bishop, "b7");
        let rook = piece(Color::Black, PieceKind::Rook, "a8");
        let mut pos = Position::new()
            .with_piece(bishop)
            .with_piece(rook)
            .with_castling_rights(CastlingRights::all());

        pos.make_move(Move::new(bishop, square("a8"), Some(rook)))
            .unwrap();
        assert_eq!(pos.castling_rights().to_uci(), "KQk");
        assert_eq!(pos.board().piece_at(square("a8")), Some(bishop.relocated(square("a8"))));
    }

    #[test]
    fn queenside_castle_moves_rook_to_d_file() {
        let king = piece(Color::Black, PieceKind::King, "e8");
        let rook = piece(Color::Black, PieceKind::Rook, "a8");
        let mut pos = Position::new()
            .with_piece(king)
            .with_piece(rook)
            .with_side_to_move(Color::Black)
            .with_castling_rights(CastlingRights::all());

        pos.make_move(Move::castle(king, square("c8"))).unwrap();

        assert!(pos.board().piece_at(square("a8")).is_none());
        assert!(pos.board().piece_at(square("e8")).is_none());
        assert!(pos.board().piece_at(square("c8")).unwrap().is_king());
        assert!(pos.board().piece_at(square("d8")).unwrap().is_rook());
        assert_eq!(pos.castling_rights().to_uci(), "KQ");
        assert_eq!(pos.side_to_move(), Color::White);
    }

    #[test]
    fn double_pushes_chain_through_with_move_made() {
        let start = Position::standard();
        let e2 = start.board().piece_at(square("e2")).unwrap();
        let after_e4 = start.with_move_made(Move::new(e2, square("e4"), None)).unwrap();
        assert_eq!(after_e4.ep_square(), Some(square("e3")));

        let d7 = after_e4.board().piece_at(square("d7")).unwrap();
        let after_d5 = after_e4
            .with_move_made(Move::new(d7, square("d5"), None))
            .unwrap();
        assert_eq!(after_d5.ep_square(), Some(square("d6")));
        assert_eq!(after_d5.side_to_move(), Color::White);

        let e4 = after_d5.board().piece_at(square("e4")).unwrap();
        let d5 = after_d5.board().piece_at(square("d5")).unwrap();
        let after_exd5 = after_d5
            .with_move_made(Move::new(e4, square("d5"), Some(d5)))
            .unwrap();
        assert_eq!(after_exd5.ep_square(), None);
        assert_eq!(after_exd5.board().iter().count(), 31);
        assert_eq!(
            after_exd5.board().piece_at(square("d5")).map(|p| p.parts()),
            Some((Color::White, PieceKind::Pawn))
        );
        assert_eq!(*after_exd5.castling_rights(), CastlingRights::all());
    }

    #[test]
    fn render_shows_state_beside_the_board() {
        let e2 = piece(Color::White, PieceKind::Pawn, "e2");
        let pos = Position::standard()
            .with_move_made(Move::new(e2, square("e4"), None))
            .unwrap();

        let lines: Vec<String> = format!("{pos:?}").lines().map(String::from).collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "7| p p p p p p p p          Side: black");
        assert_eq!(lines[2], "6| . . . . . . . .      Castling: KQkq");
        assert_eq!(lines[3], "5| . . . . . . . .            EP: e3");
        assert_eq!(lines[4], "4| . . . . P . . .");

        let marked = pos.render(|sq, cell| {
            if sq == square("e4") {
                String::from("*")
            } else {
                cell.to_string()
            }
        });
        assert!(marked.contains("4| . . . . * . . ."));
    }

    #[test]
    fn castling_without_rook_is_an_invariant_violation() {
        let king = piece(Color::White, PieceKind::King, "e1");
        let mut pos = Position::new().with_piece(king);

        let err = pos.make_move(Move::castle(king, square("g1")));
        assert!(matches!(err, Err(ChessError::InvariantViolation(_))));
    }

    #[test]
    fn moving_from_empty_square_is_an_invariant_violation() {
        let ghost = piece(Color::White, PieceKind::Knight, "b1");
        let mut pos = Position::new();
        let err = pos.make_move(Move::new(ghost, square("c3"), None));
        assert!(matches!(err, Err(ChessError::InvariantViolation(_))));
    }
}
