use crate::{
    bitboard::BitBoard,
    constants::{
        BLACK_KINGSIDE, BLACK_QUEENSIDE, MAX_MOVES, RANK_1, RANK_2, RANK_7, RANK_8,
        WHITE_KINGSIDE, WHITE_QUEENSIDE,
    },
    position::Position,
    tables::tables,
    types::{
        Move, Piece, Side, Square, FLAG_CAPTURE, FLAG_CASTLE, FLAG_DOUBLE_PUSH, FLAG_EN_PASSANT,
    },
};

/// Fixed-capacity move buffer. Pushing past capacity drops the move;
/// no legal position generates anywhere near the limit.
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            moves: [Move::null(); MAX_MOVES],
            count: 0,
        }
    }

    pub fn push(&mut self, m: Move) {
        if self.count < MAX_MOVES {
            self.moves[self.count] = m;
            self.count += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn get(&self, index: usize) -> Move {
        self.moves[index]
    }

    pub fn set(&mut self, index: usize, m: Move) {
        self.moves[index] = m;
    }

    pub fn truncate(&mut self, len: usize) {
        self.count = len.min(self.count);
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.count]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// All legal moves for the side to move.
    pub fn generate_moves(&mut self, moves: &mut MoveList) {
        self.generate_legal(moves, false);
    }

    /// Capturing moves only, for the quiescence search.
    pub fn generate_captures(&mut self, moves: &mut MoveList) {
        self.generate_legal(moves, true);
    }

    /// Pseudo-legal generation followed by the make/test/unmake legality
    /// filter: any move leaving the mover's own king attacked is dropped.
    fn generate_legal(&mut self, moves: &mut MoveList, only_captures: bool) {
        moves.clear();
        self.generate_pseudo_moves(moves, only_captures);

        let mut legal = 0;

        for i in 0..moves.len() {
            let m = moves.get(i);

            self.make_move(m);

            if !self.in_check(self.side.opponent()) {
                moves.set(legal, m);
                legal += 1;
            }

            self.take_back_move();
        }

        moves.truncate(legal);
    }

    pub fn generate_pseudo_moves(&self, moves: &mut MoveList, only_captures: bool) {
        self.generate_pawn_moves(moves, only_captures);
        self.generate_leaper_moves(moves, Piece::Knight, only_captures);
        self.generate_leaper_moves(moves, Piece::King, only_captures);
        self.generate_slider_moves(moves, Piece::Bishop, only_captures);
        self.generate_slider_moves(moves, Piece::Rook, only_captures);
        self.generate_slider_moves(moves, Piece::Queen, only_captures);

        if !only_captures {
            self.generate_castle_moves(moves);
        }
    }

    fn push_promotions(moves: &mut MoveList, from: Square, to: Square, flags: u8) {
        for piece in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
            moves.push(Move::new(from, to, Some(piece), flags));
        }
    }

    fn generate_pawn_moves(&self, moves: &mut MoveList, only_captures: bool) {
        let t = tables();
        let side = self.side;
        let opponent_units = self.bit_units[side.opponent() as usize].0;
        let all = self.bit_all.0;

        let (push, promote_rank, start_rank) = match side {
            Side::White => (8i32, RANK_8, RANK_2),
            Side::Black => (-8i32, RANK_1, RANK_7),
        };

        let mut pawns = self.bit_pieces[side as usize][Piece::Pawn as usize];

        while !pawns.is_empty() {
            let from = Square::try_from(pawns.next_bit()).expect("bit index is a square");

            if !only_captures {
                // The off-board check only matters for corrupt positions
                // with a pawn on its own back rank
                if let Ok(to) = Square::try_from(from as i32 + push) {
                    if to.as_bit() & all == 0 {
                        if to.as_bit() & promote_rank != 0 {
                            Self::push_promotions(moves, from, to, 0);
                        } else {
                            moves.push(Move::new(from, to, None, 0));

                            if from.as_bit() & start_rank != 0 {
                                let double = Square::try_from(from as i32 + 2 * push)
                                    .expect("double push from the start rank stays on the board");

                                if double.as_bit() & all == 0 {
                                    moves.push(Move::new(from, double, None, FLAG_DOUBLE_PUSH));
                                }
                            }
                        }
                    }
                }
            }

            // Diagonal captures come from the precomputed table, which
            // already discards file-wrapping targets
            let mut attacks =
                BitBoard(t.pawn_attacks[side as usize][from as usize] & opponent_units);

            while !attacks.is_empty() {
                let to = Square::try_from(attacks.next_bit()).expect("bit index is a square");

                if to.as_bit() & promote_rank != 0 {
                    Self::push_promotions(moves, from, to, FLAG_CAPTURE);
                } else {
                    moves.push(Move::new(from, to, None, FLAG_CAPTURE));
                }
            }

            if let Some(target) = self.en_passant {
                if t.pawn_attacks[side as usize][from as usize] & target.as_bit() != 0 {
                    moves.push(Move::new(
                        from,
                        target,
                        None,
                        FLAG_CAPTURE | FLAG_EN_PASSANT,
                    ));
                }
            }
        }
    }

    fn generate_leaper_moves(&self, moves: &mut MoveList, piece: Piece, only_captures: bool) {
        let t = tables();
        let side = self.side;
        let own_units = self.bit_units[side as usize].0;
        let opponent_units = self.bit_units[side.opponent() as usize].0;

        let attack_table = match piece {
            Piece::Knight => &t.knight_attacks,
            Piece::King => &t.king_attacks,
            _ => return,
        };

        let mut pieces = self.bit_pieces[side as usize][piece as usize];

        while !pieces.is_empty() {
            let from = Square::try_from(pieces.next_bit()).expect("bit index is a square");

            let mut attacks = BitBoard(attack_table[from as usize] & !own_units);

            if only_captures {
                attacks.0 &= opponent_units;
            }

            while !attacks.is_empty() {
                let to = Square::try_from(attacks.next_bit()).expect("bit index is a square");
                let flags = if to.as_bit() & opponent_units != 0 {
                    FLAG_CAPTURE
                } else {
                    0
                };

                moves.push(Move::new(from, to, None, flags));
            }
        }
    }

    fn generate_slider_moves(&self, moves: &mut MoveList, piece: Piece, only_captures: bool) {
        let t = tables();
        let side = self.side;
        let own_units = self.bit_units[side as usize].0;
        let opponent_units = self.bit_units[side.opponent() as usize].0;
        let all = self.bit_all.0;

        let mut pieces = self.bit_pieces[side as usize][piece as usize];

        while !pieces.is_empty() {
            let from = Square::try_from(pieces.next_bit()).expect("bit index is a square");

            let mut attacks = BitBoard(t.attacks_for(piece, side, from, all) & !own_units);

            if only_captures {
                attacks.0 &= opponent_units;
            }

            while !attacks.is_empty() {
                let to = Square::try_from(attacks.next_bit()).expect("bit index is a square");
                let flags = if to.as_bit() & opponent_units != 0 {
                    FLAG_CAPTURE
                } else {
                    0
                };

                moves.push(Move::new(from, to, None, flags));
            }
        }
    }

    /// Castling needs the rights bit, the king on its home square, empty
    /// transit squares that the opponent does not attack, and a king not
    /// currently in check. The queenside b-file square only needs to be
    /// empty. The king's arrival square is covered by the legality filter
    /// like any other move.
    fn generate_castle_moves(&self, moves: &mut MoveList) {
        let side = self.side;
        let opponent = side.opponent();
        let occupied = self.bit_all.0;
        let enemy_attacks = self.attack_union[opponent as usize].0;

        let (kingside, queenside, king_home) = match side {
            Side::White => (WHITE_KINGSIDE, WHITE_QUEENSIDE, Square::E1),
            Side::Black => (BLACK_KINGSIDE, BLACK_QUEENSIDE, Square::E8),
        };

        if self.castling & (kingside | queenside) == 0 {
            return;
        }

        if !self.bit_pieces[side as usize][Piece::King as usize].is_bit_set(king_home) {
            return;
        }

        if enemy_attacks & king_home.as_bit() != 0 {
            return;
        }

        let transit_clear =
            |square: Square| square.as_bit() & occupied == 0 && square.as_bit() & enemy_attacks == 0;

        if self.castling & kingside != 0 {
            let (f, g) = match side {
                Side::White => (Square::F1, Square::G1),
                Side::Black => (Square::F8, Square::G8),
            };

            if transit_clear(f) && transit_clear(g) {
                moves.push(Move::new(king_home, g, None, FLAG_CASTLE));
            }
        }

        if self.castling & queenside != 0 {
            let (d, c, b) = match side {
                Side::White => (Square::D1, Square::C1, Square::B1),
                Side::Black => (Square::D8, Square::C8, Square::B8),
            };

            if transit_clear(d) && transit_clear(c) && b.as_bit() & occupied == 0 {
                moves.push(Move::new(king_home, c, None, FLAG_CASTLE));
            }
        }
    }
}
