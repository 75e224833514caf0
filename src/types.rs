use crate::bitboard::BitBoard;
use crate::constants::{NUM_SIDES, NUM_SQUARES};

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Square {
  A1 = 0, B1, C1, D1, E1, F1, G1, H1,
  A2, B2, C2, D2, E2, F2, G2, H2,
  A3, B3, C3, D3, E3, F3, G3, H3,
  A4, B4, C4, D4, E4, F4, G4, H4,
  A5, B5, C5, D5, E5, F5, G5, H5,
  A6, B6, C6, D6, E6, F6, G6, H6,
  A7, B7, C7, D7, E7, F7, G7, H7,
  A8, B8, C8, D8, E8, F8, G8, H8,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Piece {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Empty,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    pub const fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

pub const FLAG_CAPTURE: u8 = 1;
pub const FLAG_EN_PASSANT: u8 = 1 << 1;
pub const FLAG_DOUBLE_PUSH: u8 = 1 << 2;
pub const FLAG_CASTLE: u8 = 1 << 3;

/// A move is a plain value; the generator creates them and the search
/// discards them after use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promote: Option<Piece>,
    pub flags: u8,
}

impl Move {
    pub const fn new(from: Square, to: Square, promote: Option<Piece>, flags: u8) -> Self {
        Self {
            from,
            to,
            promote,
            flags,
        }
    }

    /// Placeholder used to initialize move tables. `from == to` never
    /// occurs in a real move.
    pub const fn null() -> Self {
        Self {
            from: Square::A1,
            to: Square::A1,
            promote: None,
            flags: 0,
        }
    }

    pub fn is_null(&self) -> bool {
        self.from == self.to
    }

    pub fn is_capture(&self) -> bool {
        self.flags & FLAG_CAPTURE != 0
    }

    pub fn is_en_passant(&self) -> bool {
        self.flags & FLAG_EN_PASSANT != 0
    }

    pub fn is_double_push(&self) -> bool {
        self.flags & FLAG_DOUBLE_PUSH != 0
    }

    pub fn is_castle(&self) -> bool {
        self.flags & FLAG_CASTLE != 0
    }
}

/// Snapshot pushed onto the history arena by `make_move` and popped by
/// `take_back_move`. Attack maps are restored verbatim on unmake.
#[derive(Copy, Clone)]
pub struct State {
    pub move_: Move,
    pub captured: Piece,
    pub castling: u8,
    pub en_passant: Option<Square>,
    pub fifty: u8,
    pub hash: u64,
    pub attack_map: [[BitBoard; NUM_SQUARES]; NUM_SIDES],
    pub attack_union: [BitBoard; NUM_SIDES],
}

impl State {
    pub const fn empty() -> Self {
        Self {
            move_: Move::null(),
            captured: Piece::Empty,
            castling: 0,
            en_passant: None,
            fifty: 0,
            hash: 0,
            attack_map: [[BitBoard(0); NUM_SQUARES]; NUM_SIDES],
            attack_union: [BitBoard(0); NUM_SIDES],
        }
    }
}
