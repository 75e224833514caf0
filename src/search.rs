use crate::{
    constants::{
        CAPTURE_ORDER_SCORE, CHECK_ORDER_BONUS, DEFAULT_MAX_DEPTH, DEFAULT_MOVETIME_MS,
        HASH_MOVE_ORDER_SCORE, INFINITY_SCORE, KILLER_FIRST_SCORE, KILLER_SECOND_SCORE,
        MATE_SCORE, MATE_THRESHOLD, MAX_MOVES, MAX_PLY, MAX_QUIESCENCE_DEPTH, MVV_LVA,
        NUM_SQUARES, PROMOTION_ORDER_BONUS,
    },
    eval,
    movegen::MoveList,
    position::Position,
    tables::tables,
    time::TimeManager,
    transposition::{Bound, TranspositionTable},
    types::{Move, Piece, Side},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchSettings {
    pub depth: Option<u16>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub moves_to_go: Option<u64>,
}

/// Handed to the per-depth callback after each completed iteration.
pub struct DepthSummary {
    pub depth: u16,
    pub score: i32,
    pub best_move: Move,
    pub nodes: usize,
    pub time_ms: u64,
}

pub struct SearchReport {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u16,
    pub nodes: usize,
    pub qnodes: usize,
    pub time_ms: u64,
}

/// One search worker: owns the transposition table, the killer and
/// history heuristics, and the clock. Reused across searches; heuristic
/// state resets at the start of each one.
pub struct Searcher {
    pub tt: TranspositionTable,
    pub use_tt: bool,
    pub nodes: usize,
    pub qnodes: usize,
    killers: [[Move; 2]; MAX_PLY],
    history_table: [[i32; NUM_SQUARES]; NUM_SQUARES],
    time_manager: TimeManager,
    stop: bool,
    eval_fn: fn(&Position) -> i32,
}

impl Searcher {
    pub fn new() -> Self {
        Self::with_evaluator(eval::evaluate)
    }

    /// The evaluation is an opaque collaborator: any deterministic
    /// function bounded below mate magnitude works.
    pub fn with_evaluator(eval_fn: fn(&Position) -> i32) -> Self {
        Self {
            tt: TranspositionTable::default(),
            use_tt: true,
            nodes: 0,
            qnodes: 0,
            killers: [[Move::null(); 2]; MAX_PLY],
            history_table: [[0; NUM_SQUARES]; NUM_SQUARES],
            time_manager: TimeManager::infinite(),
            stop: false,
            eval_fn,
        }
    }

    fn time_manager_for(settings: &SearchSettings, side: Side) -> TimeManager {
        if let Some(movetime) = settings.movetime {
            return TimeManager::fixed(movetime);
        }

        if settings.wtime.is_some() || settings.btime.is_some() {
            let (remaining, increment) = match side {
                Side::White => (settings.wtime, settings.winc),
                Side::Black => (settings.btime, settings.binc),
            };

            return TimeManager::from_clock(remaining, increment, settings.moves_to_go);
        }

        if settings.depth.is_some() {
            // Fixed depth runs to completion on its own
            return TimeManager::infinite();
        }

        TimeManager::fixed(DEFAULT_MOVETIME_MS)
    }

    /// Iterative deepening driver. Only fully completed depths update the
    /// returned best move; an aborted depth contributes nothing.
    pub fn search(
        &mut self,
        position: &mut Position,
        settings: &SearchSettings,
        mut on_depth: Option<&mut dyn FnMut(&DepthSummary)>,
    ) -> SearchReport {
        self.nodes = 0;
        self.qnodes = 0;
        self.stop = false;
        self.killers = [[Move::null(); 2]; MAX_PLY];
        self.history_table = [[0; NUM_SQUARES]; NUM_SQUARES];
        self.time_manager = Self::time_manager_for(settings, position.side);

        let max_depth = settings
            .depth
            .unwrap_or(DEFAULT_MAX_DEPTH)
            .min(MAX_PLY as u16 - 1);

        let mut root_moves = MoveList::new();
        position.generate_moves(&mut root_moves);

        if root_moves.is_empty() {
            // Mated or stalemated before the search even starts
            let score = if position.in_check(position.side) {
                -MATE_SCORE
            } else {
                0
            };

            return SearchReport {
                best_move: None,
                score,
                depth: 0,
                nodes: 0,
                qnodes: 0,
                time_ms: self.time_manager.elapsed().as_millis() as u64,
            };
        }

        // Whatever happens with the clock, a legal move goes back
        let mut best_move = root_moves.get(0);
        let mut best_score = 0;
        let mut completed_depth = 0;

        if root_moves.len() == 1 {
            return SearchReport {
                best_move: Some(best_move),
                score: best_score,
                depth: 0,
                nodes: self.nodes,
                qnodes: self.qnodes,
                time_ms: self.time_manager.elapsed().as_millis() as u64,
            };
        }

        for depth in 1..=max_depth {
            if depth > 1 && self.time_manager.is_soft_limit_reached() {
                break;
            }

            let (score, move_, completed) = self.search_root(position, &mut root_moves, depth);

            if !completed {
                break;
            }

            best_move = move_;
            best_score = score;
            completed_depth = depth;

            if let Some(callback) = on_depth.as_mut() {
                callback(&DepthSummary {
                    depth,
                    score,
                    best_move,
                    nodes: self.nodes,
                    time_ms: self.time_manager.elapsed().as_millis() as u64,
                });
            }

            if score.abs() > MATE_THRESHOLD {
                break;
            }
        }

        SearchReport {
            best_move: Some(best_move),
            score: best_score,
            depth: completed_depth,
            nodes: self.nodes,
            qnodes: self.qnodes,
            time_ms: self.time_manager.elapsed().as_millis() as u64,
        }
    }

    fn search_root(
        &mut self,
        position: &mut Position,
        moves: &mut MoveList,
        depth: u16,
    ) -> (i32, Move, bool) {
        let hash_move = self.hash_move(position);
        self.order_moves(position, moves, 0, hash_move);

        let mut alpha = -INFINITY_SCORE;
        let beta = INFINITY_SCORE;
        let mut best_move = moves.get(0);

        for i in 0..moves.len() {
            self.check_time();
            if self.stop {
                return (alpha, best_move, false);
            }

            let m = moves.get(i);

            position.make_move(m);
            let score = -self.negamax(position, depth - 1, -beta, -alpha, 1);
            position.take_back_move();

            if self.stop {
                return (alpha, best_move, false);
            }

            if score > alpha {
                alpha = score;
                best_move = m;
            }
        }

        (alpha, best_move, true)
    }

    fn negamax(
        &mut self,
        position: &mut Position,
        depth: u16,
        mut alpha: i32,
        beta: i32,
        ply: usize,
    ) -> i32 {
        // A third occurrence of this position is a draw, before anything else
        if position.repetition.is_threefold(position.hash) {
            return 0;
        }

        if depth == 0 {
            return self.quiescence(position, alpha, beta, 0, ply);
        }

        self.nodes += 1;

        if self.use_tt {
            if let Some(score) = self.tt.probe(position.hash, depth, ply, alpha, beta) {
                return score;
            }
        }

        let mut moves = MoveList::new();
        position.generate_moves(&mut moves);

        if moves.is_empty() {
            // Mate scores shrink toward the root so nearer mates win
            return if position.in_check(position.side) {
                -MATE_SCORE + ply as i32
            } else {
                0
            };
        }

        let hash_move = self.hash_move(position);
        self.order_moves(position, &mut moves, ply, hash_move);

        let alpha_original = alpha;
        let mut best_score = -INFINITY_SCORE;
        let mut best_move = moves.get(0);
        let mut bound = Bound::Lower;

        for i in 0..moves.len() {
            self.check_time();
            if self.stop {
                break;
            }

            let m = moves.get(i);

            position.make_move(m);
            let score = -self.negamax(position, depth - 1, -beta, -alpha, ply + 1);
            position.take_back_move();

            if self.stop {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = m;
            }

            if score > alpha {
                alpha = score;
            }

            if alpha >= beta {
                if !m.is_capture() {
                    self.record_killer(m, ply);
                    self.history_table[m.from as usize][m.to as usize] +=
                        depth as i32 * depth as i32;
                }

                break;
            }
        }

        if self.stop {
            // Aborted subtree; the caller discards this value
            return alpha;
        }

        if self.use_tt {
            if best_score > alpha_original && best_score < beta {
                bound = Bound::Exact;
            } else if best_score <= alpha_original {
                bound = Bound::Upper;
            }

            self.tt
                .store(position.hash, depth, ply, best_score, bound, best_move);
        }

        best_score
    }

    /// Captures-only extension past the horizon. The stand-pat score is a
    /// lower bound since the side to move can decline every capture.
    fn quiescence(
        &mut self,
        position: &mut Position,
        mut alpha: i32,
        beta: i32,
        qdepth: usize,
        ply: usize,
    ) -> i32 {
        self.qnodes += 1;

        let stand_pat = (self.eval_fn)(position);

        if qdepth >= MAX_QUIESCENCE_DEPTH {
            return stand_pat;
        }

        if stand_pat >= beta {
            return beta;
        }

        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = MoveList::new();
        position.generate_captures(&mut moves);
        self.order_moves(position, &mut moves, ply, None);

        for i in 0..moves.len() {
            self.check_time();
            if self.stop {
                break;
            }

            let m = moves.get(i);

            position.make_move(m);
            let score = -self.quiescence(position, -beta, -alpha, qdepth + 1, ply + 1);
            position.take_back_move();

            if self.stop {
                break;
            }

            if score >= beta {
                return beta;
            }

            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    fn check_time(&mut self) {
        if self.time_manager.is_hard_limit_reached() {
            self.stop = true;
        }
    }

    /// Best move cached for this position, tried before everything else.
    fn hash_move(&self, position: &Position) -> Option<Move> {
        if self.use_tt {
            self.tt.best_move(position.hash)
        } else {
            None
        }
    }

    fn record_killer(&mut self, m: Move, ply: usize) {
        let ply = ply.min(MAX_PLY - 1);

        if self.killers[ply][0] != m {
            self.killers[ply][1] = self.killers[ply][0];
            self.killers[ply][0] = m;
        }
    }

    /// The cached table move first, then captures by victim-minus-attacker
    /// value, then killers, then the history counters. Insertion sort keeps
    /// equal scores in generation order, so the ordering is deterministic.
    fn order_moves(
        &self,
        position: &Position,
        moves: &mut MoveList,
        ply: usize,
        hash_move: Option<Move>,
    ) {
        let ply = ply.min(MAX_PLY - 1);
        let mut scores = [0i32; MAX_MOVES];

        for i in 0..moves.len() {
            scores[i] = if hash_move == Some(moves.get(i)) {
                HASH_MOVE_ORDER_SCORE
            } else {
                self.score_move(position, moves.get(i), ply)
            };
        }

        for i in 1..moves.len() {
            let key_move = moves.get(i);
            let key_score = scores[i];
            let mut j = i;

            while j > 0 && scores[j - 1] < key_score {
                moves.set(j, moves.get(j - 1));
                scores[j] = scores[j - 1];
                j -= 1;
            }

            moves.set(j, key_move);
            scores[j] = key_score;
        }
    }

    fn score_move(&self, position: &Position, m: Move, ply: usize) -> i32 {
        let mut score;

        if m.is_capture() {
            let victim = if m.is_en_passant() {
                Piece::Pawn
            } else {
                position.piece_on[m.to as usize]
            };
            let attacker = position.piece_on[m.from as usize];

            score = CAPTURE_ORDER_SCORE + MVV_LVA[victim as usize][attacker as usize];
        } else if m == self.killers[ply][0] {
            score = KILLER_FIRST_SCORE;
        } else if m == self.killers[ply][1] {
            score = KILLER_SECOND_SCORE;
        } else {
            score = self.history_table[m.from as usize][m.to as usize];
        }

        if m.promote.is_some() {
            score += PROMOTION_ORDER_BONUS;
        }

        if Self::gives_check_hint(position, m) {
            score += CHECK_ORDER_BONUS;
        }

        score
    }

    /// Would the piece attack the enemy king from its destination, with
    /// the board as it stands? Misses discovered checks and can false-
    /// positive through the vacated square; it only steers ordering, so
    /// both are harmless.
    fn gives_check_hint(position: &Position, m: Move) -> bool {
        let piece = m.promote.unwrap_or(position.piece_on[m.from as usize]);
        let enemy_king =
            position.bit_pieces[position.side.opponent() as usize][Piece::King as usize];

        if enemy_king.is_empty() {
            return false;
        }

        let attacks = tables().attacks_for(piece, position.side, m.to, position.bit_all.0);

        attacks & enemy_king.0 != 0
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}
