use crate::{
    movegen::MoveList,
    position::Position,
    search::{DepthSummary, SearchReport, SearchSettings, Searcher},
    types::{Move, Piece, Square},
};

/// Ties one game together: the position, the search worker, and the
/// settings the front-end last configured.
pub struct Engine {
    pub position: Position,
    pub searcher: Searcher,
    pub settings: SearchSettings,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            position: Position::startpos(),
            searcher: Searcher::new(),
            settings: SearchSettings::default(),
        }
    }

    pub fn new_game(&mut self) {
        self.position = Position::startpos();
        self.searcher.tt.clear();
    }

    /// Loads a FEN and plays out a list of coordinate-notation moves.
    /// Every move must be legal in the position it is played from.
    pub fn set_position(&mut self, fen: &str, moves: &[&str]) -> Result<(), String> {
        self.position = Position::from_fen(fen)?;

        for move_str in moves {
            let m = Self::move_from_uci(&mut self.position, move_str)?;
            self.position.make_move(m);
        }

        Ok(())
    }

    pub fn go(&mut self, on_depth: Option<&mut dyn FnMut(&DepthSummary)>) -> SearchReport {
        let settings = self.settings;
        self.searcher.search(&mut self.position, &settings, on_depth)
    }

    /// Parse a move string (e.g. "e2e4", "e7e8q") against the legal moves
    /// of the given position.
    pub fn move_from_uci(position: &mut Position, move_str: &str) -> Result<Move, String> {
        if !move_str.is_ascii() || !(4..=5).contains(&move_str.len()) {
            return Err(format!("Invalid move string: {}", move_str));
        }

        let from = Square::from_name(&move_str[0..2])?;
        let to = Square::from_name(&move_str[2..4])?;

        let promote = if move_str.len() == 5 {
            match move_str.as_bytes()[4] {
                b'q' => Some(Piece::Queen),
                b'r' => Some(Piece::Rook),
                b'b' => Some(Piece::Bishop),
                b'n' => Some(Piece::Knight),
                other => return Err(format!("Invalid promotion piece: {}", other as char)),
            }
        } else {
            None
        };

        let mut moves = MoveList::new();
        position.generate_moves(&mut moves);

        moves
            .iter()
            .find(|m| m.from == from && m.to == to && m.promote == promote)
            .copied()
            .ok_or_else(|| format!("Move not found in legal moves: {}", move_str))
    }

    /// Convert a move to coordinate notation (e.g. "e2e4", "e7e8q")
    pub fn move_to_uci(m: Move) -> String {
        let mut result = format!("{}{}", m.from.name(), m.to.name());

        if let Some(piece) = m.promote {
            result.push(piece.promotion_char());
        }

        result
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_from_uci_string() {
        let mut position = Position::startpos();
        let m = Engine::move_from_uci(&mut position, "e2e4").expect("legal opening move");

        assert_eq!(m.from, Square::E2);
        assert_eq!(m.to, Square::E4);
        assert_eq!(m.promote, None);
        assert!(m.is_double_push());
    }

    #[test]
    fn move_from_uci_rejects_illegal() {
        let mut position = Position::startpos();

        assert!(Engine::move_from_uci(&mut position, "e2e5").is_err());
        assert!(Engine::move_from_uci(&mut position, "e9e4").is_err());
        assert!(Engine::move_from_uci(&mut position, "e2").is_err());
    }

    #[test]
    fn move_to_uci_includes_promotion() {
        let m = Move::new(Square::E7, Square::E8, Some(Piece::Queen), 0);
        assert_eq!(Engine::move_to_uci(m), "e7e8q");
    }

    #[test]
    fn set_position_plays_move_list() {
        let mut engine = Engine::new();

        engine
            .set_position(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                &["e2e4", "e7e5", "g1f3"],
            )
            .expect("legal move sequence");

        assert_eq!(engine.position.piece_on[Square::F3 as usize], Piece::Knight);
        assert_eq!(engine.position.piece_on[Square::E5 as usize], Piece::Pawn);
    }
}
