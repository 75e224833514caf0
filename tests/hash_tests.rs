
use test_utils::{play_moves, position_from_fen};

/// The incrementally maintained key must equal a from-scratch computation
/// at every point in a game. These sequences cover every hash-relevant
/// event: captures, castling (both colors), en passant, promotion, and
/// castling-rights loss by rook moves.

fn assert_hash_consistent(fen: &str, moves: &[&str]) {
    let mut position = position_from_fen(fen);

    assert_eq!(
        position.hash,
        position.zobrist.compute(&position),
        "fresh load disagrees for {}",
        fen
    );

    for move_str in moves {
        play_moves(&mut position, &[move_str]);

        assert_eq!(
            position.hash,
            position.zobrist.compute(&position),
            "incremental hash drifted after {} in {}",
            move_str,
            fen
        );
    }
}

#[test]
fn hash_consistent_through_opening_play() {
    assert_hash_consistent(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[
            "e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "a7a6",
        ],
    );
}

#[test]
fn hash_consistent_through_castling() {
    assert_hash_consistent(
        "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
        &["e1g1", "e8c8", "a1e1", "d8e8"],
    );
}

#[test]
fn hash_consistent_through_en_passant() {
    assert_hash_consistent(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &["e2e4", "g8f6", "e4e5", "d7d5", "e5d6"],
    );
}

#[test]
fn hash_consistent_through_promotion() {
    assert_hash_consistent("8/P6k/8/8/8/8/6pK/8 w - - 0 1", &["a7a8q", "g2g1n"]);
}

#[test]
fn hash_consistent_when_rook_moves_drop_rights() {
    assert_hash_consistent(
        "r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1",
        &["h1g1", "a8b8", "a1b1", "h8g8"],
    );
}

#[test]
fn make_unmake_restores_the_exact_hash() {
    let mut position = position_from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );

    let before = position.hash;

    let mut moves = ironrook::movegen::MoveList::new();
    position.generate_moves(&mut moves);

    for i in 0..moves.len() {
        position.make_move(moves.get(i));
        position.take_back_move();

        assert_eq!(
            position.hash,
            before,
            "hash not restored after {:?}",
            moves.get(i)
        );
    }
}

#[test]
fn side_to_move_changes_the_hash() {
    let white = position_from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let black = position_from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1");

    assert_ne!(white.hash, black.hash);
}

#[test]
fn en_passant_file_changes_the_hash() {
    let plain = position_from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
    let with_target =
        position_from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");

    assert_ne!(plain.hash, with_target.hash);
}

#[test]
fn castling_rights_change_the_hash() {
    let full = position_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let none = position_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");

    assert_ne!(full.hash, none.hash);
}

#[test]
fn transpositions_reach_the_same_hash() {
    let mut a = position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let mut b = position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");

    play_moves(&mut a, &["g1f3", "b8c6", "b1c3", "g8f6"]);
    play_moves(&mut b, &["b1c3", "g8f6", "g1f3", "b8c6"]);

    assert_eq!(a.hash, b.hash);
}
