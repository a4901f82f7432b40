use gambit::{is_attacked, CastlingRights, Color, Game, Square};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

const GAMES: u64 = 24;
const MAX_PLIES: usize = 150;

/// Checks everything that must hold between any two moves.
fn check_invariants(game: &Game) {
    let board = game.board();

    for square in Square::iter() {
        if let Some(piece) = board.piece_at(square) {
            assert_eq!(piece.square(), square, "{piece:?} is out of sync\n{:?}", game.position());

            let promotion_row = piece.color().promotion_row();
            assert!(
                !(piece.is_pawn() && square.row() == promotion_row),
                "unpromoted pawn on {square}\n{:?}",
                game.position()
            );
        }
    }

    for color in Color::iter() {
        let kings: Vec<_> = board.kings(color).collect();
        assert!(kings.len() <= 1);
        assert_eq!(game.king_square(color), kings.first().copied());
    }

    assert!(game
        .legal_moves()
        .iter()
        .all(|mv| mv.piece().is(game.side_to_move())));
}

#[test]
fn random_playouts_keep_invariants() {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();
        let mut rights = CastlingRights::all();

        for ply in 0..MAX_PLIES {
            let Some(&mv) = game.legal_moves().choose(&mut rng) else {
                break;
            };
            let side = game.side_to_move();

            // Asking the oracle about a random square changes nothing
            let probe = Square::from_index(rng.gen_range(0..Square::COUNT)).unwrap();
            let before = game.clone();
            game.is_attacked(probe, Color::White);
            is_attacked(game.position(), probe, Color::Black);
            assert_eq!(game, before);

            let applied = game.apply(mv).unwrap();
            assert_eq!(applied, mv);

            assert_eq!(game.side_to_move(), side.opponent(), "seed {seed}, ply {ply}");
            assert_eq!(game.history().len(), ply + 1);
            assert_eq!(game.ep_square(), applied.skipped_square());
            assert!(game.castling_rights().is_subset_of(&rights));
            rights = *game.castling_rights();

            check_invariants(&game);
        }
    }
}

#[test]
fn every_listed_move_can_be_applied() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut game = Game::new();

    for _ in 0..60 {
        for &mv in game.legal_moves() {
            let mut child = game.clone();
            child.apply(mv).unwrap();
            check_invariants(&child);
        }

        let Some(&mv) = game.legal_moves().choose(&mut rng) else {
            break;
        };
        game.apply(mv).unwrap();
    }
}
