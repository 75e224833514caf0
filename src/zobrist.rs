use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    constants::{NUM_PIECE_TYPES, NUM_SIDES, NUM_SQUARES, ZOBRIST_SEED},
    position::Position,
    types::{Piece, Side, Square},
};

/// Random keys for incremental position hashing: one per
/// (side, piece, square), one per castling-rights state, one per
/// en-passant file, and one for the side to move. Generated from a fixed
/// seed so hashes reproduce across runs.
#[derive(Clone)]
pub struct ZobristKeys {
    pub pieces: [[[u64; NUM_SQUARES]; NUM_PIECE_TYPES]; NUM_SIDES],
    pub castling: [u64; 16],
    pub en_passant: [u64; 8],
    pub side: u64,
}

impl ZobristKeys {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

        let mut pieces = [[[0u64; NUM_SQUARES]; NUM_PIECE_TYPES]; NUM_SIDES];

        for side in 0..NUM_SIDES {
            for piece in 0..NUM_PIECE_TYPES {
                for square in 0..NUM_SQUARES {
                    pieces[side][piece][square] = rng.gen();
                }
            }
        }

        let mut castling = [0u64; 16];
        castling.iter_mut().for_each(|key| *key = rng.gen());

        let mut en_passant = [0u64; 8];
        en_passant.iter_mut().for_each(|key| *key = rng.gen());

        Self {
            pieces,
            castling,
            en_passant,
            side: rng.gen(),
        }
    }

    /// From-scratch hash of a position. The incrementally maintained key
    /// must equal this at every point; tests hold both to that.
    pub fn compute(&self, position: &Position) -> u64 {
        let mut hash = 0u64;

        for square in Square::iter() {
            let piece = position.piece_on[square as usize];

            if piece == Piece::Empty {
                continue;
            }

            let side = position
                .side_on(square)
                .expect("occupied square without a side");

            hash ^= self.pieces[side as usize][piece as usize][square as usize];
        }

        hash ^= self.castling[position.castling as usize];

        if let Some(square) = position.en_passant {
            hash ^= self.en_passant[square.file() as usize];
        }

        if position.side == Side::Black {
            hash ^= self.side;
        }

        hash
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}
