use gambit::{CastlingRights, Color, Game, Move, MoveGen, Piece, PieceKind, Position, Square};

/// Builds a game from pieces written as `<letter><square>`, such as `"Ke1"` or `"pd7"`.
///
/// Uppercase letters are White, lowercase are Black. `rights` is a subset of `KQkq`.
fn setup_game(pieces: &[&str], side: Color, rights: &str) -> Game {
    let mut castling = CastlingRights::new();
    for c in rights.chars() {
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        castling.grant(color, c.eq_ignore_ascii_case(&'k'));
    }

    let mut position = Position::new()
        .with_side_to_move(side)
        .with_castling_rights(castling);

    for token in pieces {
        let letter = token.chars().next().unwrap();
        let color = if letter.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = PieceKind::from_uci(letter).unwrap();
        let square: Square = token[1..].parse().unwrap();
        position = position.with_piece(Piece::new(color, kind, square));
    }

    Game::from_position(position).unwrap()
}

fn square(s: &str) -> Square {
    s.parse().unwrap()
}

fn play(game: &mut Game, moves: &[&str]) {
    for uci in moves {
        let mv = game.parse_move(uci).unwrap();
        game.apply(mv).unwrap();
    }
}

/// Checks if `moves` and `legal_moves` contain all the same elements, ignoring order
fn lists_match<'a>(
    game: &Game,
    moves: impl IntoIterator<Item = Move>,
    legal_moves: impl IntoIterator<Item = &'a str>,
) {
    let mut moves = moves
        .into_iter()
        .map(|m| format!("{m}"))
        .collect::<Vec<String>>();
    let mut legal_moves = legal_moves
        .into_iter()
        .map(|m| m.to_string())
        .collect::<Vec<String>>();

    moves.sort();
    legal_moves.sort();

    let extra: Vec<_> = moves.iter().filter(|m| !legal_moves.contains(m)).collect();
    let missing: Vec<_> = legal_moves.iter().filter(|m| !moves.contains(m)).collect();

    assert!(
        extra.is_empty() && missing.is_empty(),
        "Extra: {extra:?}\nMissing: {missing:?}\nPosition:\n{:?}",
        game.position()
    );
}

fn moves_from(game: &Game, s: &str) -> Vec<Move> {
    game.moves_from(square(s)).collect()
}

#[test]
#[rustfmt::skip]
fn starting_position_has_twenty_moves() {
    let game = Game::new();
    let legal_moves = [ "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4", "e2e3", "e2e4", "f2f3", "f2f4", "g2g3", "g2g4", "h2h3", "h2h4", "b1a3", "b1c3", "g1f3", "g1h3" ];

    lists_match(&game, game.legal_moves().iter().copied(), legal_moves);
}

#[test]
fn black_replies_mirror_white() {
    let mut game = Game::new();
    play(&mut game, &["e2e4"]);

    assert_eq!(game.legal_moves().len(), 20);
    assert!(game.legal_moves().iter().all(|mv| mv.piece().is(Color::Black)));
}

#[test]
fn blocked_pawn_cannot_move() {
    let game = setup_game(&["Ke1", "ke8", "Pe2", "ne3"], Color::White, "");
    lists_match(&game, moves_from(&game, "e2"), Vec::<&str>::new());
}

#[test]
fn double_step_needs_both_squares_empty() {
    let game = setup_game(&["Ke1", "ke8", "Pe2", "be4"], Color::White, "");
    lists_match(&game, moves_from(&game, "e2"), ["e2e3"]);
}

#[test]
fn double_step_only_from_home_row() {
    let game = setup_game(&["Ke1", "ke8", "Pe3", "pd7"], Color::White, "");
    lists_match(&game, moves_from(&game, "e3"), ["e3e4"]);

    let game = setup_game(&["Ke1", "ke8", "Pe3", "pd7"], Color::Black, "");
    lists_match(&game, moves_from(&game, "d7"), ["d7d6", "d7d5"]);
}

#[test]
fn pawns_capture_only_diagonally_forward() {
    // A piece straight ahead blocks; pieces on the diagonals behind are ignored
    let game = setup_game(
        &["Ke1", "ke8", "Pd4", "pd5", "pc5", "ne5", "pc3", "pe3"],
        Color::White,
        "",
    );
    let moves = moves_from(&game, "d4");
    lists_match(&game, moves.clone(), ["d4c5", "d4e5"]);
    assert!(moves.iter().all(Move::is_capture));
}

#[test]
fn pawn_on_seventh_lists_plain_promotion() {
    let game = setup_game(&["Ke1", "ke8", "Pb7", "na8"], Color::White, "");
    lists_match(&game, moves_from(&game, "b7"), ["b7b8q", "b7a8q"]);
}

#[test]
fn knight_skips_friendly_squares() {
    let game = setup_game(&["Ke1", "ke8", "Nb1", "Pd2", "pc3"], Color::White, "");
    lists_match(&game, moves_from(&game, "b1"), ["b1a3", "b1c3"]);
}

#[test]
fn queen_in_open_board() {
    let game = setup_game(&["Ka2", "kh8", "Qd4"], Color::White, "");
    assert_eq!(moves_from(&game, "d4").len(), 27);
}

#[test]
fn king_steps_one_square() {
    let game = setup_game(&["Kd4", "ke8"], Color::White, "");
    lists_match(
        &game,
        moves_from(&game, "d4"),
        [
            "d4c3", "d4c4", "d4c5", "d4d3", "d4d5", "d4e3", "d4e4", "d4e5",
        ],
    );
}

#[test]
fn en_passant_is_offered_right_after_double_step() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);

    assert_eq!(game.ep_square(), Some(square("d6")));
    let ep = game.find_move(square("e5"), square("d6")).unwrap();
    assert!(ep.is_en_passant());
    assert_eq!(ep.captured().unwrap().square(), square("d5"));

    lists_match(&game, moves_from(&game, "e5"), ["e5e6", "e5d6"]);
}

#[test]
fn en_passant_window_closes_after_one_move() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "b1c3", "a6a5"]);

    assert_eq!(game.ep_square(), None);
    assert!(game.find_move(square("e5"), square("d6")).is_err());
}

#[test]
fn en_passant_requires_side_to_move() {
    // Black's d4 pawn sits beside the e4 pawn, but the target is only White's to use
    let position = Position::new()
        .with_piece(Piece::new(Color::White, PieceKind::King, square("e1")))
        .with_piece(Piece::new(Color::Black, PieceKind::King, square("e8")))
        .with_piece(Piece::new(Color::White, PieceKind::Pawn, square("e4")))
        .with_piece(Piece::new(Color::Black, PieceKind::Pawn, square("d4")))
        .with_side_to_move(Color::White)
        .with_ep_square(Some(square("e3")));

    let black = MoveGen::new(&position, Color::Black).generate();
    assert!(black.iter().all(|mv| !mv.is_en_passant()));

    let as_black = position.with_side_to_move(Color::Black);
    let black = MoveGen::new(&as_black, Color::Black).generate();
    assert!(black.iter().any(|mv| mv.is_en_passant() && mv.to() == square("e3")));
}

#[test]
fn castling_both_ways_when_clear() {
    let game = setup_game(&["Ke1", "Ra1", "Rh1", "ke8"], Color::White, "KQkq");

    let kingside = game.find_move(square("e1"), square("g1")).unwrap();
    let queenside = game.find_move(square("e1"), square("c1")).unwrap();
    assert!(kingside.is_castling());
    assert!(queenside.is_castling());
}

#[test]
fn castling_needs_the_right() {
    let game = setup_game(&["Ke1", "Ra1", "Rh1", "ke8"], Color::White, "Qkq");

    assert!(game.find_move(square("e1"), square("g1")).is_err());
    assert!(game.find_move(square("e1"), square("c1")).is_ok());
}

#[test]
fn castling_needs_empty_squares() {
    let game = setup_game(&["Ke1", "Ra1", "Nb1", "Rh1", "Bf1", "ke8"], Color::White, "KQ");

    assert!(game.find_move(square("e1"), square("g1")).is_err());
    assert!(game.find_move(square("e1"), square("c1")).is_err());
}

#[test]
fn no_castling_out_of_or_through_attack() {
    // In check
    let game = setup_game(&["Ke1", "Ra1", "Rh1", "ka8", "re7"], Color::White, "KQ");
    assert!(!game.legal_moves().iter().any(Move::is_castling));

    // f1 is covered
    let game = setup_game(&["Ke1", "Ra1", "Rh1", "ka8", "rf7"], Color::White, "KQ");
    assert!(game.find_move(square("e1"), square("g1")).is_err());
    assert!(game.find_move(square("e1"), square("c1")).is_ok());

    // d1 is covered
    let game = setup_game(&["Ke1", "Ra1", "Rh1", "ka8", "rd7"], Color::White, "KQ");
    assert!(game.find_move(square("e1"), square("g1")).is_ok());
    assert!(game.find_move(square("e1"), square("c1")).is_err());
}

#[test]
fn queenside_castling_ignores_attacks_on_b_file() {
    let game = setup_game(&["Ke1", "Ra1", "ka8", "rb7"], Color::White, "Q");
    assert!(game.find_move(square("e1"), square("c1")).unwrap().is_castling());
}

#[test]
fn pawn_pushes_count_as_attacks_for_castling() {
    // The g2 pawn could push to g1, so g1 counts as attacked
    let game = setup_game(&["Ke1", "Rh1", "ka8", "pg2"], Color::White, "K");
    assert!(game.find_move(square("e1"), square("g1")).is_err());

    // The e2 pawn's diagonals are empty, so f1 does not count as attacked
    let game = setup_game(&["Ke1", "Rh1", "ka8", "pe2"], Color::White, "K");
    assert!(game.find_move(square("e1"), square("g1")).is_ok());
}

#[test]
fn castling_needs_a_rook_in_the_corner() {
    let game = setup_game(&["Ke1", "ka8"], Color::White, "KQ");
    assert!(!game.legal_moves().iter().any(Move::is_castling));
}

#[test]
fn moves_into_check_are_not_filtered() {
    // Moving the pinned rook exposes the King; the generator still lists it
    let game = setup_game(&["Ke1", "Re2", "ka8", "re8"], Color::White, "");
    assert!(game.find_move(square("e2"), square("a2")).is_ok());
    assert!(game.find_move(square("e1"), square("f1")).is_ok());
}
