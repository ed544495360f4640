use duel::board::{Board, PieceKind};
use duel::logger;
use duel::moves::perft::{MAX_PERFT_DEPTH, perft_divide_with};
use duel::moves::promotion::Proposal;
use duel::moves::types::Move;
use duel::square::Square;
use duel::wire::{Message, encode_line};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::{info, warn};

fn main() {
    if let Err(e) = logger::init_from_env() {
        eprintln!("logging disabled: {e}");
    }
    info!("duel console started");

    let mut board = Board::new();
    println!("{board}");
    prompt(&board);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };

        if line.is_empty() {
            prompt(&board);
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "quit" | "exit" => break,
            "board" | "d" => println!("{board}"),
            "moves" => print_moves(&board),
            "undo" => {
                if board.history_len() == 0 {
                    println!("nothing to undo");
                } else {
                    board.unmake_move();
                    println!("{board}");
                }
            }
            "new" => {
                board = Board::new();
                println!("{board}");
            }
            "json" => match board.last_move() {
                Some(mv) => match encode_line(&Message::Move(mv)) {
                    Ok(line) => print!("{line}"),
                    Err(e) => println!("error: {e}"),
                },
                None => println!("no move played yet"),
            },
            "perft" => {
                let depth = parts.get(1).and_then(|d| d.parse::<u32>().ok());
                match depth {
                    Some(d) if d >= 1 && d as usize <= MAX_PERFT_DEPTH => run_perft(&board, d),
                    _ => println!("usage: perft <1..={MAX_PERFT_DEPTH}>"),
                }
            }
            "help" => print_help(),
            text => handle_move(&mut board, text),
        }
        prompt(&board);
    }
}

fn prompt(board: &Board) {
    if board.is_game_over() {
        print!("[game over: {:?}] > ", board.game_result());
    } else {
        print!("{:?} > ", board.side_to_move());
    }
    let _ = io::stdout().flush();
}

fn print_help() {
    println!("commands:");
    println!("  e2e4 / e7e8q   play a move in coordinate notation");
    println!("  moves          list legal moves");
    println!("  undo           take back the last move");
    println!("  board          show the board");
    println!("  json           print the last move as a wire message");
    println!("  perft <n>      count leaf nodes to depth n");
    println!("  new            restart from the initial position");
    println!("  quit");
}

fn print_moves(board: &Board) {
    let moves: Vec<String> = board.legal_moves().iter().map(|m| format!("{m:#}")).collect();
    println!("{} legal: {}", moves.len(), moves.join(", "));
}

/// Split `e7e8q` into its squares and optional promotion letter.
fn parse_coordinates(text: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return None;
    }
    let start: Square = text[0..2].parse().ok()?;
    let end: Square = text[2..4].parse().ok()?;
    let promotion = match text[4..].chars().next() {
        Some(c) => Some(PieceKind::from_letter(c)?),
        None => None,
    };
    Some((start, end, promotion))
}

fn resolve(board: &Board, text: &str) -> Result<Move, String> {
    let (start, end, promotion) =
        parse_coordinates(text).ok_or_else(|| format!("unknown command `{text}`"))?;

    match (board.propose(start, end), promotion) {
        (Proposal::Ready(mv), None) => Ok(mv),
        (Proposal::Ready(_), Some(_)) => Err(format!("{start}{end} is not a promotion")),
        (Proposal::NeedsPromotion(pending), Some(kind)) => pending
            .finalize(kind)
            .ok_or_else(|| format!("cannot promote to `{}`", kind.letter())),
        (Proposal::NeedsPromotion(pending), None) => {
            let choices: String = pending.choices().map(PieceKind::letter).collect();
            Err(format!("{start}{end} promotes: append one of [{choices}]"))
        }
        (Proposal::Illegal, _) => Err(format!("illegal move `{text}`")),
    }
}

fn handle_move(board: &mut Board, text: &str) {
    if board.is_game_over() {
        println!("game is over ({:?}); `undo` or `new`", board.game_result());
        return;
    }

    match resolve(board, text) {
        Ok(mv) => {
            board.apply_move(mv);
            println!("{board}");
            if board.is_game_over() {
                let result = board.game_result();
                info!(?result, "game finished");
                println!("game over: {result:?}");
            }
        }
        Err(msg) => {
            warn!(input = text, "rejected input");
            println!("{msg}");
        }
    }
}

fn run_perft(board: &Board, depth: u32) {
    let mut scratch = board.clone();
    let bar = ProgressBar::new(scratch.legal_moves().len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}") {
        bar.set_style(style);
    }

    let started = Instant::now();
    let total = perft_divide_with(&mut scratch, depth, |mv, count| {
        bar.println(format!("{mv}: {count}"));
        bar.set_message(mv.to_string());
        bar.inc(1);
    });
    bar.finish_and_clear();

    let elapsed = started.elapsed();
    let nps = total as f64 / elapsed.as_secs_f64().max(1e-9);
    println!("perft({depth}) = {total} in {elapsed:.2?} ({nps:.0} nps)");
    info!(depth, total, ?elapsed, "perft finished");
}
