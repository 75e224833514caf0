use std::io::{self, Write};
use std::time::Instant;

use crate::{
    constants::{MATE_SCORE, MATE_THRESHOLD, START_FEN},
    engine::Engine,
    perft::perft_divide,
    search::{DepthSummary, SearchSettings},
};

const ENGINE_NAME: &str = "Ironrook";
const ENGINE_AUTHOR: &str = "Ironrook authors";

pub fn uci_loop(engine: &mut Engine) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let mut input = String::new();

        match stdin.read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(_) => break,
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts[0] {
            "uci" => {
                println!("id name {}", ENGINE_NAME);
                println!("id author {}", ENGINE_AUTHOR);
                println!("uciok");
                stdout.flush().ok();
            }
            "isready" => {
                println!("readyok");
                stdout.flush().ok();
            }
            "ucinewgame" => {
                engine.new_game();
            }
            "position" => {
                if let Err(e) = parse_position_command(engine, &parts) {
                    eprintln!("Error parsing position: {}", e);
                }
            }
            "go" => {
                parse_go_command(engine, &parts);
                run_search(engine);
                stdout.flush().ok();
            }
            "perft" => {
                let depth = parts.get(1).and_then(|d| d.parse::<usize>().ok()).unwrap_or(1);
                let start = Instant::now();
                perft_divide(&mut engine.position, depth);
                println!("Time: {} ms", start.elapsed().as_millis());
            }
            "d" | "display" => {
                engine.position.display();
            }
            "stop" => {}
            "quit" => {
                break;
            }
            _ => {
                // Unknown command - silently ignore per UCI convention
            }
        }
    }
}

/// Parse a position command
/// Examples:
///   position startpos
///   position startpos moves e2e4 e7e5
///   position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1
///   position fen rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 moves e2e4
pub fn parse_position_command(engine: &mut Engine, parts: &[&str]) -> Result<(), String> {
    if parts.len() < 2 {
        return Err("Invalid position command".to_string());
    }

    let mut index = 1;

    let fen = if parts[index] == "startpos" {
        index += 1;
        START_FEN.to_string()
    } else if parts[index] == "fen" {
        index += 1;

        let mut fen_parts = Vec::new();

        // FEN has up to 6 space-separated fields
        while index < parts.len() && parts[index] != "moves" && fen_parts.len() < 6 {
            fen_parts.push(parts[index]);
            index += 1;
        }

        if fen_parts.is_empty() {
            return Err("Missing FEN string".to_string());
        }

        fen_parts.join(" ")
    } else {
        return Err(format!("Unknown position type: {}", parts[index]));
    };

    let moves: Vec<&str> = if index < parts.len() && parts[index] == "moves" {
        parts[index + 1..].to_vec()
    } else {
        Vec::new()
    };

    engine.set_position(&fen, &moves)
}

/// Parse a go command and rebuild the search settings
/// Examples:
///   go depth 6
///   go movetime 5000
///   go wtime 300000 btime 300000 winc 0 binc 0 movestogo 30
///   go infinite
pub fn parse_go_command(engine: &mut Engine, parts: &[&str]) {
    let mut settings = SearchSettings::default();

    let mut i = 1; // Skip "go"
    while i < parts.len() {
        let value = parts.get(i + 1);

        match parts[i] {
            "depth" => {
                settings.depth = value.and_then(|v| v.parse().ok());
                i += 2;
            }
            "movetime" => {
                settings.movetime = value.and_then(|v| v.parse().ok());
                i += 2;
            }
            "wtime" => {
                settings.wtime = value.and_then(|v| v.parse().ok());
                i += 2;
            }
            "btime" => {
                settings.btime = value.and_then(|v| v.parse().ok());
                i += 2;
            }
            "winc" => {
                settings.winc = value.and_then(|v| v.parse().ok());
                i += 2;
            }
            "binc" => {
                settings.binc = value.and_then(|v| v.parse().ok());
                i += 2;
            }
            "movestogo" => {
                settings.moves_to_go = value.and_then(|v| v.parse().ok());
                i += 2;
            }
            "infinite" => {
                // No pondering thread to interrupt; fall back to the
                // default move time instead of searching without end
                i += 1;
            }
            _ => {
                i += 1;
            }
        }
    }

    engine.settings = settings;
}

fn run_search(engine: &mut Engine) {
    let mut print_info = |summary: &DepthSummary| {
        let best = Engine::move_to_uci(summary.best_move);

        if summary.score.abs() > MATE_THRESHOLD {
            let mut mate_in = (MATE_SCORE - summary.score.abs() + 1) / 2;
            mate_in = mate_in.max(1);

            if summary.score < 0 {
                mate_in = -mate_in;
            }

            println!(
                "info depth {} score mate {} nodes {} time {} pv {}",
                summary.depth, mate_in, summary.nodes, summary.time_ms, best
            );
        } else {
            println!(
                "info depth {} score cp {} nodes {} time {} pv {}",
                summary.depth, summary.score, summary.nodes, summary.time_ms, best
            );
        }
    };

    let report = engine.go(Some(&mut print_info));

    match report.best_move {
        Some(m) => println!("bestmove {}", Engine::move_to_uci(m)),
        None => println!("bestmove 0000"),
    }
}
