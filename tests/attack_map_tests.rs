
use ironrook::movegen::MoveList;
use test_utils::{play_moves, position_from_fen};

/// The incremental attack update must produce bit-identical maps to a
/// full regeneration after every move. This is the property that keeps
/// the affected-slider sweep honest at diagonal and rank boundaries.

fn assert_attacks_match_full_regeneration(fen: &str, moves: &[&str]) {
    let mut position = position_from_fen(fen);

    for move_str in moves {
        play_moves(&mut position, &[move_str]);

        let incremental_map = position.attack_map;
        let incremental_union = position.attack_union;

        position.regenerate_attacks();

        assert_eq!(
            incremental_map, position.attack_map,
            "per-square attack maps diverged after {} in {}",
            move_str, fen
        );
        assert_eq!(
            incremental_union, position.attack_union,
            "attack unions diverged after {} in {}",
            move_str, fen
        );
    }
}

#[test]
fn incremental_matches_full_in_open_play() {
    assert_attacks_match_full_regeneration(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[
            "e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "g8f6", "e1g1", "f6e4", "f1e1", "e4d6",
            "f3e5", "f8e7", "b5f1", "c6e5", "e1e5", "e8g8",
        ],
    );
}

#[test]
fn incremental_matches_full_through_en_passant() {
    assert_attacks_match_full_regeneration(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &["e2e4", "a7a6", "e4e5", "d7d5", "e5d6", "c7d6"],
    );
}

#[test]
fn incremental_matches_full_through_castling() {
    assert_attacks_match_full_regeneration(
        "r3k2r/pppqpppp/2n2n2/3p4/3P4/2N2N2/PPPQPPPP/R3K2R w KQkq - 0 1",
        &["e1c1", "e8g8", "h1e1", "a8e8"],
    );
}

#[test]
fn incremental_matches_full_through_promotions() {
    assert_attacks_match_full_regeneration(
        "8/P5k1/8/8/8/8/1p4K1/8 w - - 0 1",
        &["a7a8q", "b2b1r", "a8b8", "b1b8"],
    );
}

#[test]
fn incremental_matches_full_when_sliders_open_and_close() {
    // Pieces repeatedly vacate and block long diagonals and files
    assert_attacks_match_full_regeneration(
        "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 0 1",
        &["d2d3", "d7d6", "c1g5", "c8g4", "c3d5", "c6d4", "g5f6", "g4f3", "d1f3", "d8f6"],
    );
}

#[test]
fn every_legal_move_preserves_equivalence_one_ply_deep() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ];

    for fen in fens {
        let mut position = position_from_fen(fen);

        let mut moves = MoveList::new();
        position.generate_moves(&mut moves);

        for i in 0..moves.len() {
            position.make_move(moves.get(i));

            let incremental_map = position.attack_map;
            position.regenerate_attacks();
            assert_eq!(
                incremental_map,
                position.attack_map,
                "diverged after {:?} in {}",
                moves.get(i),
                fen
            );

            position.take_back_move();
        }
    }
}

#[test]
fn unmake_restores_attack_maps_verbatim() {
    let mut position = position_from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );

    let map_before = position.attack_map;
    let union_before = position.attack_union;

    let mut moves = MoveList::new();
    position.generate_moves(&mut moves);

    for i in 0..moves.len() {
        position.make_move(moves.get(i));
        position.take_back_move();

        assert_eq!(map_before, position.attack_map);
        assert_eq!(union_before, position.attack_union);
    }
}
