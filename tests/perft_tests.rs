
use ironrook::perft::perft;
use test_utils::position_from_fen;

/// Reference node counts from the standard perft positions. An exact
/// match exercises generation, legality filtering, and make/unmake all
/// at once; any drift is a bug somewhere in that chain.

#[test]
fn perft_startpos() {
    let mut position = position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");

    assert_eq!(perft(&mut position, 1), 20);
    assert_eq!(perft(&mut position, 2), 400);
    assert_eq!(perft(&mut position, 3), 8_902);
    assert_eq!(perft(&mut position, 4), 197_281);
}

#[test]
#[ignore] // expensive; run with --ignored
fn perft_startpos_depth_5() {
    let mut position = position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");

    assert_eq!(perft(&mut position, 5), 4_865_609);
}

#[test]
fn perft_kiwipete() {
    // Castling, en passant, pins, and checks all in one position
    let mut position = position_from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );

    assert_eq!(perft(&mut position, 1), 48);
    assert_eq!(perft(&mut position, 2), 2_039);
    assert_eq!(perft(&mut position, 3), 97_862);
}

#[test]
fn perft_rook_endgame_with_en_passant() {
    let mut position = position_from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1");

    assert_eq!(perft(&mut position, 1), 14);
    assert_eq!(perft(&mut position, 2), 191);
    assert_eq!(perft(&mut position, 3), 2_812);
    assert_eq!(perft(&mut position, 4), 43_238);
}

#[test]
fn perft_promotion_heavy() {
    let mut position = position_from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1");

    assert_eq!(perft(&mut position, 1), 24);
    assert_eq!(perft(&mut position, 2), 496);
    assert_eq!(perft(&mut position, 3), 9_483);
}

#[test]
fn perft_mirrored_tactical() {
    let mut position = position_from_fen(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    );

    assert_eq!(perft(&mut position, 1), 6);
    assert_eq!(perft(&mut position, 2), 264);
    assert_eq!(perft(&mut position, 3), 9_467);
}

#[test]
fn perft_talkchess_position() {
    // Catches en-passant discovered-check and castling-rights bugs
    let mut position =
        position_from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8");

    assert_eq!(perft(&mut position, 1), 44);
    assert_eq!(perft(&mut position, 2), 1_486);
    assert_eq!(perft(&mut position, 3), 62_379);
}

#[test]
fn perft_depth_zero_is_one() {
    let mut position = position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");

    assert_eq!(perft(&mut position, 0), 1);
}
