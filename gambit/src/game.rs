use std::{fmt, ops::Deref};

use log::{debug, trace};

use super::{
    is_attacked, ChessError, Color, Move, MoveGen, MoveList, Piece, Position, Result, Square,
};

/// The game-state controller: owns a [`Position`] and everything derived from it.
///
/// After every applied move the legal move set of the side to move is rebuilt from scratch,
/// so [`Game::legal_moves`] always describes the current position.
///
/// # Example
/// ```
/// # use gambit::{Color, Game};
/// let mut game = Game::new();
/// assert_eq!(game.legal_moves().len(), 20);
///
/// let e2e4 = game.parse_move("e2e4").unwrap();
/// game.apply(e2e4).unwrap();
/// assert_eq!(game.side_to_move(), Color::Black);
/// assert_eq!(game.ep_square().unwrap().to_string(), "e3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    position: Position,

    /// Where each color's King stands, or `None` if that color has no King.
    kings: [Option<Square>; Color::COUNT],

    /// Every move applied since the game started, oldest first.
    history: Vec<Move>,

    /// Square of the piece the player has picked up, if any.
    selected: Option<Square>,

    /// Pseudo-legal moves of the side to move.
    moves: MoveList,
}

impl Game {
    /// Starts a new game from the standard starting position.
    pub fn new() -> Self {
        let position = Position::standard();
        let kings = Color::all().map(|color| position.board().kings(color).next());

        let mut game = Self {
            position,
            kings,
            history: Vec::with_capacity(128),
            selected: None,
            moves: MoveList::new(),
        };
        game.regenerate();
        game
    }

    /// Creates a [`Game`] around an arbitrary [`Position`].
    ///
    /// Fails with [`ChessError::InvariantViolation`] if either color has more than one King.
    /// A color with no King is accepted; it simply can never be in check.
    ///
    /// # Example
    /// ```
    /// # use gambit::{ChessError, Color, Game, Piece, PieceKind, Position};
    /// let king = |sq: &str| Piece::new(Color::White, PieceKind::King, sq.parse().unwrap());
    ///
    /// let one = Position::new().with_piece(king("e1"));
    /// assert!(Game::from_position(one).is_ok());
    ///
    /// let two = Position::new().with_piece(king("e1")).with_piece(king("e2"));
    /// assert!(matches!(Game::from_position(two), Err(ChessError::InvariantViolation(_))));
    /// ```
    pub fn from_position(position: Position) -> Result<Self> {
        let mut kings = [None; Color::COUNT];

        for color in Color::iter() {
            let mut found = position.board().kings(color);
            kings[color] = found.next();

            if let Some(extra) = found.next() {
                return Err(ChessError::InvariantViolation(format!(
                    "{} has more than one king: {} and {extra}",
                    color.name(),
                    kings[color].map(|sq| sq.to_uci()).unwrap_or_default(),
                )));
            }
        }

        let mut game = Self {
            position,
            kings,
            history: Vec::with_capacity(128),
            selected: None,
            moves: MoveList::new(),
        };
        game.regenerate();
        Ok(game)
    }

    /// Discards the current game and starts over from the standard starting position.
    pub fn reset(&mut self) {
        debug!("Starting a new game");
        *self = Self::new();
    }

    /// Fetches the current [`Position`].
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// The moves the side to move may make.
    ///
    /// These are pseudo-legal: a move that leaves the mover's King attacked is still listed.
    pub fn legal_moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns an iterator over the legal moves of the piece on `square`.
    ///
    /// Empty if `square` is empty or holds a piece of the side that is waiting.
    pub fn moves_from(&self, square: Square) -> impl Iterator<Item = Move> + '_ {
        self.moves
            .iter()
            .copied()
            .filter(move |mv| mv.from() == square)
    }

    /// The squares the piece on `square` may move to.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Game, Square};
    /// let game = Game::new();
    /// let mut targets = game.destinations_from("g1".parse().unwrap());
    /// targets.sort();
    /// let names: Vec<String> = targets.iter().map(Square::to_uci).collect();
    /// assert_eq!(names, ["f3", "h3"]);
    /// ```
    pub fn destinations_from(&self, square: Square) -> Vec<Square> {
        self.moves_from(square).map(|mv| mv.to()).collect()
    }

    /// Picks up the piece on `square`, if it belongs to the side to move.
    ///
    /// Returns `true` if the square is now selected. Selecting anything else does nothing.
    pub fn select(&mut self, square: Square) -> bool {
        if self.position.board().is_friendly(square, self.side_to_move()) {
            self.selected = Some(square);
            true
        } else {
            false
        }
    }

    /// The square of the piece picked up with [`Game::select`], if any.
    pub const fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Puts down whatever piece was picked up.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Every move applied since the game started, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The square `color`'s King stands on, or `None` if it has no King.
    pub const fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// Returns `true` if any piece of `by` could move onto `square`.
    ///
    /// See [`is_attacked`] for exactly what counts as an attack.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        is_attacked(&self.position, square, by)
    }

    /// Returns `true` if `color`'s King is attacked. Always `false` for a color without a King.
    ///
    /// # Example
    /// ```
    /// # use gambit::{Color, Game};
    /// let mut game = Game::new();
    /// for uci in ["e2e4", "f7f6", "d1h5"] {
    ///     game.apply(game.parse_move(uci).unwrap()).unwrap();
    /// }
    /// assert!(game.in_check(Color::Black));
    /// assert!(!game.in_check(Color::White));
    /// ```
    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_attacked(king, color.opponent()))
    }

    /// Looks a move up in the legal set by its UCI text, such as `e2e4`.
    ///
    /// A trailing `q` is accepted on promotions, since every promotion is to a Queen.
    pub fn parse_move(&self, uci: &str) -> Result<Move> {
        let uci = uci.trim();
        let bad_notation = || ChessError::InvalidMoveNotation {
            val: uci.to_string(),
        };

        let from = uci.get(0..2).ok_or_else(bad_notation)?;
        let to = uci.get(2..4).ok_or_else(bad_notation)?;
        match uci.get(4..) {
            Some("" | "q" | "Q") => {}
            _ => return Err(bad_notation()),
        }

        self.find_move(Square::from_uci(from)?, Square::from_uci(to)?)
    }

    /// Looks up the legal move from `from` to `to`.
    pub fn find_move(&self, from: Square, to: Square) -> Result<Move> {
        self.moves
            .iter()
            .find(|mv| mv.from() == from && mv.to() == to)
            .copied()
            .ok_or(ChessError::IllegalMove { from, to })
    }

    /// Applies the legal move from `from` to `to`, the way a dropped piece is submitted.
    ///
    /// Returns the move that was made, or [`ChessError::IllegalMove`] if there is no such move.
    pub fn submit(&mut self, from: Square, to: Square) -> Result<Move> {
        match self.find_move(from, to) {
            Ok(mv) => self.apply(mv),
            Err(err) => {
                debug!("Rejected {from}{to}: not a legal move");
                Err(err)
            }
        }
    }

    /// Applies `mv` and hands the turn to the other side.
    ///
    /// `mv` is matched against the legal set by its squares alone, and the legal set's copy is
    /// what gets applied, so a caller may pass a bare `{from, to}` move. The applied move is
    /// returned.
    ///
    /// Fails with [`ChessError::IllegalMove`] if no legal move matches, leaving the game
    /// untouched. Fails with [`ChessError::InvariantViolation`] if the position turns out
    /// inconsistent, in which case the game should be discarded.
    pub fn apply(&mut self, mv: Move) -> Result<Move> {
        let Some(legal) = self.moves.iter().find(|&&legal| legal == mv).copied() else {
            debug!("Rejected {mv}: not a legal move");
            return Err(ChessError::IllegalMove {
                from: mv.from(),
                to: mv.to(),
            });
        };

        self.position.make_move(legal)?;
        self.history.push(legal);

        let mover = legal.piece();
        if mover.is_king() {
            self.kings[mover.color()] = Some(legal.to());
        }
        if let Some(king) = legal.captured().filter(Piece::is_king) {
            self.kings[king.color()] = None;
        }

        debug!("Applied {legal:?}");

        self.verify_kings()?;
        self.selected = None;
        self.regenerate();

        Ok(legal)
    }

    /// Checks that each recorded King square holds that color's King.
    fn verify_kings(&self) -> Result<()> {
        for color in Color::iter() {
            let Some(square) = self.kings[color] else {
                continue;
            };

            let holds_king = self
                .position
                .board()
                .piece_at(square)
                .is_some_and(|p| p.is_king() && p.is(color));

            if !holds_king {
                return Err(ChessError::InvariantViolation(format!(
                    "{} king recorded on {square}, but found {}",
                    color.name(),
                    self.position.board().cell_at(square)
                )));
            }
        }

        Ok(())
    }

    /// Rebuilds the legal move set for the side to move.
    fn regenerate(&mut self) {
        let side = self.side_to_move();
        self.moves = MoveGen::new(&self.position, side).generate();
        trace!("{} has {} moves", side.name(), self.moves.len());
    }
}

impl Deref for Game {
    type Target = Position;
    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}
