use crate::{
    bitboard::BitBoard,
    constants::{
        BLACK_KINGSIDE, BLACK_QUEENSIDE, HISTORY_STACK, NUM_PIECE_TYPES, NUM_SIDES, NUM_SQUARES,
        START_FEN, WHITE_KINGSIDE, WHITE_QUEENSIDE,
    },
    repetition::RepetitionTable,
    tables::tables,
    types::{Move, Piece, Side, Square, State},
    zobrist::ZobristKeys,
};

pub struct Position {
    pub bit_pieces: [[BitBoard; NUM_PIECE_TYPES]; NUM_SIDES],
    pub bit_units: [BitBoard; NUM_SIDES],
    pub bit_all: BitBoard,
    /// Dense piece lookup, kept in sync with the bitboards on every
    /// mutation. The owning side is recovered from `bit_units`.
    pub piece_on: [Piece; NUM_SQUARES],
    pub side: Side,
    pub castling: u8,
    pub en_passant: Option<Square>,
    pub hash: u64,
    /// Per-square attack sets for each side, plus their unions. Maintained
    /// incrementally by `make_move` and restored verbatim on unmake.
    pub attack_map: [[BitBoard; NUM_SQUARES]; NUM_SIDES],
    pub attack_union: [BitBoard; NUM_SIDES],
    history: Box<[State]>,
    history_count: usize,
    pub repetition: RepetitionTable,
    pub fifty: u8,
    pub game_ply: usize,
    pub zobrist: ZobristKeys,
}

impl Position {
    pub fn empty() -> Self {
        Self {
            bit_pieces: [[BitBoard(0); NUM_PIECE_TYPES]; NUM_SIDES],
            bit_units: [BitBoard(0); NUM_SIDES],
            bit_all: BitBoard(0),
            piece_on: [Piece::Empty; NUM_SQUARES],
            side: Side::White,
            castling: 0,
            en_passant: None,
            hash: 0,
            attack_map: [[BitBoard(0); NUM_SQUARES]; NUM_SIDES],
            attack_union: [BitBoard(0); NUM_SIDES],
            history: vec![State::empty(); HISTORY_STACK].into_boxed_slice(),
            history_count: 0,
            repetition: RepetitionTable::new(),
            fifty: 0,
            game_ply: 0,
            zobrist: ZobristKeys::new(),
        }
    }

    pub fn startpos() -> Self {
        Self::from_fen(START_FEN).expect("start position FEN is valid")
    }

    pub fn side_on(&self, square: Square) -> Option<Side> {
        if self.bit_units[Side::White as usize].is_bit_set(square) {
            Some(Side::White)
        } else if self.bit_units[Side::Black as usize].is_bit_set(square) {
            Some(Side::Black)
        } else {
            None
        }
    }

    /// Panics if `side` has no king; searching such a position would
    /// produce illegal play, so continuing is not an option.
    pub fn king_square(&self, side: Side) -> Square {
        let king = self.bit_pieces[side as usize][Piece::King as usize];

        if king.is_empty() {
            panic!("No {:?} king on the board", side);
        }

        Square::from(king)
    }

    pub fn in_check(&self, side: Side) -> bool {
        self.is_square_attacked_by(side.opponent(), self.king_square(side))
    }

    pub fn history_len(&self) -> usize {
        self.history_count
    }

    pub fn put_piece(&mut self, side: Side, piece: Piece, square: Square) {
        if piece == Piece::Empty {
            return;
        }

        self.piece_on[square as usize] = piece;
        self.bit_pieces[side as usize][piece as usize].set_bit(square);
        self.bit_units[side as usize].set_bit(square);
        self.bit_all.set_bit(square);
    }

    pub fn clear_square(&mut self, square: Square) {
        let piece = self.piece_on[square as usize];

        if piece == Piece::Empty {
            return;
        }

        let side = self
            .side_on(square)
            .expect("occupied square without a side");

        self.piece_on[square as usize] = Piece::Empty;
        self.bit_pieces[side as usize][piece as usize].clear_bit(square);
        self.bit_units[side as usize].clear_bit(square);
        self.bit_all.clear_bit(square);
    }

    pub(crate) fn castle_rook_squares(to: Square) -> (Square, Square) {
        match to {
            Square::G1 => (Square::H1, Square::F1),
            Square::C1 => (Square::A1, Square::D1),
            Square::G8 => (Square::H8, Square::F8),
            Square::C8 => (Square::A8, Square::D8),
            _ => panic!("Castle move with invalid destination {:?}", to),
        }
    }

    /// Applies a pseudo-legal move. The caller is responsible for the
    /// legality test (king safety) afterwards; `take_back_move` reverses
    /// everything either way.
    pub fn make_move(&mut self, m: Move) {
        let from = m.from;
        let to = m.to;
        let side = self.side;
        let opponent = side.opponent();
        let piece = self.piece_on[from as usize];

        let capture_square = if m.is_en_passant() {
            to.pawn_behind(side)
        } else {
            to
        };
        let captured = if m.is_en_passant() {
            Piece::Pawn
        } else {
            self.piece_on[to as usize]
        };

        if self.history_count >= self.history.len() {
            panic!("History stack overflow: make without matching take-back");
        }

        let state = &mut self.history[self.history_count];
        state.move_ = m;
        state.captured = captured;
        state.castling = self.castling;
        state.en_passant = self.en_passant;
        state.fifty = self.fifty;
        state.hash = self.hash;
        state.attack_map = self.attack_map;
        state.attack_union = self.attack_union;
        self.history_count += 1;

        let placed = m.promote.unwrap_or(piece);

        self.hash ^= self.zobrist.pieces[side as usize][piece as usize][from as usize];
        self.hash ^= self.zobrist.pieces[side as usize][placed as usize][to as usize];

        if captured != Piece::Empty {
            self.hash ^=
                self.zobrist.pieces[opponent as usize][captured as usize][capture_square as usize];
        }

        self.clear_square(from);
        if captured != Piece::Empty {
            self.clear_square(capture_square);
        }
        self.put_piece(side, placed, to);

        if m.is_castle() {
            let (rook_from, rook_to) = Self::castle_rook_squares(to);

            self.clear_square(rook_from);
            self.put_piece(side, Piece::Rook, rook_to);

            self.hash ^= self.zobrist.pieces[side as usize][Piece::Rook as usize][rook_from as usize];
            self.hash ^= self.zobrist.pieces[side as usize][Piece::Rook as usize][rook_to as usize];
        }

        let old_castling = self.castling;
        self.castling &= tables().castling[from as usize][to as usize];
        self.hash ^= self.zobrist.castling[old_castling as usize];
        self.hash ^= self.zobrist.castling[self.castling as usize];

        if let Some(square) = self.en_passant {
            self.hash ^= self.zobrist.en_passant[square.file() as usize];
        }
        self.en_passant = if m.is_double_push() {
            Some(to.pawn_behind(side))
        } else {
            None
        };
        if let Some(square) = self.en_passant {
            self.hash ^= self.zobrist.en_passant[square.file() as usize];
        }

        self.update_attacks(m, side, placed, capture_square);

        self.side = opponent;
        self.hash ^= self.zobrist.side;

        self.fifty = if piece == Piece::Pawn || captured != Piece::Empty {
            0
        } else {
            self.fifty.saturating_add(1)
        };
        self.game_ply += 1;

        self.repetition.push(self.hash);
    }

    /// Reverses the most recent `make_move`. Calling this without a
    /// matching make is a bug in the caller, not a recoverable state.
    pub fn take_back_move(&mut self) {
        if self.history_count == 0 {
            panic!("take_back_move with empty history");
        }

        self.history_count -= 1;
        let state = self.history[self.history_count];
        let m = state.move_;
        let from = m.from;
        let to = m.to;

        // Side is restored first; everything below is from the mover's view
        self.side = self.side.opponent();
        let side = self.side;

        let piece_at_destination = self.piece_on[to as usize];
        self.clear_square(to);

        if m.promote.is_some() {
            self.put_piece(side, Piece::Pawn, from);
        } else {
            self.put_piece(side, piece_at_destination, from);
        }

        if state.captured != Piece::Empty {
            let capture_square = if m.is_en_passant() {
                to.pawn_behind(side)
            } else {
                to
            };

            self.put_piece(side.opponent(), state.captured, capture_square);
        }

        if m.is_castle() {
            let (rook_from, rook_to) = Self::castle_rook_squares(to);

            self.clear_square(rook_to);
            self.put_piece(side, Piece::Rook, rook_from);
        }

        self.castling = state.castling;
        self.en_passant = state.en_passant;
        self.fifty = state.fifty;
        self.hash = state.hash;
        self.attack_map = state.attack_map;
        self.attack_union = state.attack_union;

        self.repetition.pop();
        self.game_ply -= 1;
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let mut position = Self::empty();
        let fields: Vec<&str> = fen.split_whitespace().collect();

        if fields.len() < 2 {
            return Err(format!(
                "FEN needs at least placement and side fields: {}",
                fen
            ));
        }

        let mut rank: i32 = 7;
        let mut file: i32 = 0;

        for c in fields[0].chars() {
            match c {
                '/' => {
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => file += c as i32 - '0' as i32,
                _ => {
                    let (piece, side) = Piece::from_fen_char(c)
                        .ok_or_else(|| format!("Invalid piece character '{}' in FEN", c))?;

                    if !(0..8).contains(&rank) || !(0..8).contains(&file) {
                        return Err(format!("FEN placement runs off the board: {}", fen));
                    }

                    let square = Square::try_from((rank * 8 + file) as u8)
                        .map_err(|e| e.to_string())?;

                    position.put_piece(side, piece, square);
                    file += 1;
                }
            }
        }

        position.side = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(format!("Invalid side to move: {}", other)),
        };

        if let Some(&rights) = fields.get(2) {
            if rights != "-" {
                for c in rights.chars() {
                    position.castling |= match c {
                        'K' => WHITE_KINGSIDE,
                        'Q' => WHITE_QUEENSIDE,
                        'k' => BLACK_KINGSIDE,
                        'q' => BLACK_QUEENSIDE,
                        other => return Err(format!("Invalid castling character: {}", other)),
                    };
                }
            }
        }

        if let Some(&target) = fields.get(3) {
            if target != "-" {
                position.en_passant = Some(Square::from_name(target)?);
            }
        }

        if let Some(&halfmove) = fields.get(4) {
            position.fifty = halfmove.parse().unwrap_or(0);
        }

        if let Some(&fullmove) = fields.get(5) {
            let fullmove: usize = fullmove.parse().unwrap_or(1);
            position.game_ply =
                (fullmove.max(1) - 1) * 2 + (position.side == Side::Black) as usize;
        }

        position.regenerate_attacks();

        let hash = position.zobrist.compute(&position);
        position.hash = hash;

        position.repetition.clear();
        position.repetition.push(position.hash);

        Ok(position)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty_run = 0;

            for file in 0..8 {
                let square = Square::try_from((rank * 8 + file) as u8)
                    .expect("rank/file loop stays on the board");
                let piece = self.piece_on[square as usize];

                if piece == Piece::Empty {
                    empty_run += 1;
                    continue;
                }

                if empty_run > 0 {
                    fen.push((b'0' + empty_run) as char);
                    empty_run = 0;
                }

                let side = self
                    .side_on(square)
                    .expect("occupied square without a side");
                fen.push(piece.to_fen_char(side));
            }

            if empty_run > 0 {
                fen.push((b'0' + empty_run) as char);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side == Side::White { 'w' } else { 'b' });
        fen.push(' ');

        if self.castling == 0 {
            fen.push('-');
        } else {
            if self.castling & WHITE_KINGSIDE != 0 {
                fen.push('K');
            }
            if self.castling & WHITE_QUEENSIDE != 0 {
                fen.push('Q');
            }
            if self.castling & BLACK_KINGSIDE != 0 {
                fen.push('k');
            }
            if self.castling & BLACK_QUEENSIDE != 0 {
                fen.push('q');
            }
        }

        fen.push(' ');
        match self.en_passant {
            Some(square) => fen.push_str(&square.name()),
            None => fen.push('-'),
        }

        // Fullmove number is derived from the game ply
        fen.push_str(&format!(" {} {}", self.fifty, self.game_ply / 2 + 1));

        fen
    }

    pub fn display(&self) {
        println!();

        for rank in (0..8).rev() {
            println!(" +---+---+---+---+---+---+---+---+");
            print!(" ");

            for file in 0..8 {
                let square = Square::try_from((rank * 8 + file) as u8)
                    .expect("rank/file loop stays on the board");
                let piece = self.piece_on[square as usize];

                if piece == Piece::Empty {
                    print!("|   ");
                } else {
                    let side = self
                        .side_on(square)
                        .expect("occupied square without a side");
                    print!("| {} ", piece.to_fen_char(side));
                }
            }

            println!("| {}", rank + 1);
        }

        println!(" +---+---+---+---+---+---+---+---+");
        println!("   a   b   c   d   e   f   g   h");
        println!();
        println!("FEN: {}", self.to_fen());
        println!("Hash: {:#018x}", self.hash);
        println!();
    }
}
