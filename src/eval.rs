use crate::{
    bitboard::BitBoard,
    constants::NUM_SQUARES,
    position::Position,
    types::{Piece, Side, Square},
};

/// A1 - H8, from white's point of view. Black mirrors vertically.
#[rustfmt::skip]
const PAWN_PST: [i32; NUM_SQUARES] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   0,   0, -10,  -5,   5,
      0,   0,   0,  20,  20,   0,   0,   0,
      5,   5,  10,  25,  25,  10,   5,   5,
     10,  10,  20,  30,  30,  20,  10,  10,
     50,  50,  50,  50,  50,  50,  50,  50,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; NUM_SQUARES] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; NUM_SQUARES] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; NUM_SQUARES] = [
      0,   0,   0,   5,   5,   0,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
      5,  10,  10,  10,  10,  10,  10,   5,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; NUM_SQUARES] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_PST: [i32; NUM_SQUARES] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

fn piece_square_score(piece: Piece, square: usize) -> i32 {
    match piece {
        Piece::Pawn => PAWN_PST[square],
        Piece::Knight => KNIGHT_PST[square],
        Piece::Bishop => BISHOP_PST[square],
        Piece::Rook => ROOK_PST[square],
        Piece::Queen => QUEEN_PST[square],
        Piece::King => KING_PST[square],
        Piece::Empty => 0,
    }
}

/// Material plus piece-square evaluation, positive for the side to move.
/// Pure and bounded far below mate magnitude; the search treats it as an
/// opaque scoring function and makes no other assumptions.
pub fn evaluate(position: &Position) -> i32 {
    let mut score = 0;
    let mut occupied = BitBoard(position.bit_all.0);

    while !occupied.is_empty() {
        let square = Square::try_from(occupied.next_bit()).expect("bit index is a square");
        let piece = position.piece_on[square as usize];
        let side = position
            .side_on(square)
            .expect("occupied square without a side");

        let table_square = match side {
            Side::White => square as usize,
            Side::Black => square as usize ^ 56, // vertical mirror
        };

        let value = piece.value() + piece_square_score(piece, table_square);

        match side {
            Side::White => score += value,
            Side::Black => score -= value,
        }
    }

    match position.side {
        Side::White => score,
        Side::Black => -score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let position = Position::startpos();
        assert_eq!(evaluate(&position), 0);
    }

    #[test]
    fn material_advantage_shows_for_side_to_move() {
        // White is up a rook
        let position =
            Position::from_fen("k7/8/8/8/8/8/8/KR6 w - - 0 1").expect("valid FEN");
        assert!(evaluate(&position) > 400);

        let position =
            Position::from_fen("k7/8/8/8/8/8/8/KR6 b - - 0 1").expect("valid FEN");
        assert!(evaluate(&position) < -400);
    }
}
