use crate::{movegen::MoveList, position::Position};

/// Counts leaf positions reachable by legal moves. The reference numbers
/// for standard positions are exact; any drift means a generation or
/// make/unmake bug.
pub fn perft(position: &mut Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    position.generate_moves(&mut moves);

    // The generator already filtered to legal moves
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;

    for i in 0..moves.len() {
        let m = moves.get(i);

        position.make_move(m);
        nodes += perft(position, depth - 1);
        position.take_back_move();
    }

    nodes
}

/// Per-root-move subtotals, for comparing move by move against a
/// reference engine when a count disagrees.
pub fn perft_divide(position: &mut Position, depth: usize) -> u64 {
    let mut moves = MoveList::new();
    position.generate_moves(&mut moves);

    let mut total = 0u64;

    for i in 0..moves.len() {
        let m = moves.get(i);

        position.make_move(m);
        let nodes = if depth > 1 {
            perft(position, depth - 1)
        } else {
            1
        };
        position.take_back_move();

        let promote = match m.promote {
            Some(piece) => piece.promotion_char().to_string(),
            None => String::new(),
        };

        println!("{}{}{}: {}", m.from.name(), m.to.name(), promote, nodes);

        total += nodes;
    }

    println!("\nTotal nodes: {}", total);

    total
}
