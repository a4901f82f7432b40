use gambit::{perft, splitperft, Game};

fn test_perft_nodes(depth: usize, expected: u64) {
    let game = Game::new();
    let nodes = perft(&game, depth).unwrap();
    assert_eq!(
        nodes, expected,
        "\nPerft({depth}) failed\nExpected: {expected}\nGot: {nodes}"
    );
}

#[test]
fn startpos_perft_1() {
    test_perft_nodes(1, 20);
}

#[test]
fn startpos_perft_2() {
    test_perft_nodes(2, 400);
}

#[test]
fn startpos_perft_3() {
    test_perft_nodes(3, 8902);
}

#[test]
fn startpos_splitperft_3() {
    let game = Game::new();
    let split = splitperft(&game, 3).unwrap();

    let find = |uci: &str| {
        split
            .iter()
            .find(|(mv, _)| mv.to_uci() == uci)
            .map(|&(_, nodes)| nodes)
            .unwrap()
    };

    // Known per-move counts at depth 3 from the start
    assert_eq!(find("a2a3"), 380);
    assert_eq!(find("b1c3"), 440);
    assert_eq!(find("e2e4"), 600);
    assert_eq!(find("g1h3"), 400);
}
