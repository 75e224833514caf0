
use ironrook::{
    position::Position,
    types::{Piece, Side, Square},
};
use test_utils::position_from_fen;

#[test]
fn start_position_round_trips_exactly() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let position = position_from_fen(fen);

    assert_eq!(position.to_fen(), fen);
}

#[test]
fn start_position_loads_the_expected_board() {
    let position = position_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");

    assert_eq!(position.piece_on[Square::E1 as usize], Piece::King);
    assert_eq!(position.piece_on[Square::D8 as usize], Piece::Queen);
    assert_eq!(position.piece_on[Square::A2 as usize], Piece::Pawn);
    assert_eq!(position.side_on(Square::E1), Some(Side::White));
    assert_eq!(position.side_on(Square::D8), Some(Side::Black));
    assert_eq!(position.side, Side::White);
    assert_eq!(position.castling, 0b1111);
    assert_eq!(position.en_passant, None);
    assert_eq!(position.bit_all.count(), 32);
}

#[test]
fn tactical_position_round_trips() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let position = position_from_fen(fen);

    assert_eq!(position.to_fen(), fen);
}

#[test]
fn en_passant_target_round_trips() {
    let fen = "rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
    let position = position_from_fen(fen);

    assert_eq!(position.en_passant, Some(Square::E3));
    assert_eq!(position.to_fen(), fen);
}

#[test]
fn partial_castling_rights_round_trip() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 3 17";
    let position = position_from_fen(fen);

    assert_eq!(position.to_fen(), fen);
    assert_eq!(position.fifty, 3);
}

#[test]
fn black_to_move_fullmove_round_trips() {
    let fen = "4k3/8/8/8/8/8/8/4K3 b - - 12 34";
    let position = position_from_fen(fen);

    assert_eq!(position.to_fen(), fen);
}

#[test]
fn counters_are_optional() {
    let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - -");

    assert!(position.is_ok());
    assert_eq!(position.unwrap().fifty, 0);
}

#[test]
fn malformed_fens_error_instead_of_panicking() {
    for bad in [
        "",
        "only-one-field",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1", // bad side
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1", // bad castling
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1", // bad ep square
        "rnbqkbnZ/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", // bad piece
        "rnbqkbnr/pppppppp/8/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", // nine ranks
    ] {
        assert!(
            Position::from_fen(bad).is_err(),
            "expected an error for {:?}",
            bad
        );
    }
}

#[test]
fn loaded_position_matches_computed_hash() {
    let position = position_from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );

    assert_eq!(position.hash, position.zobrist.compute(&position));
}
