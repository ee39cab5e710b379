//! SableChess - Console Module
//!
//! Interactive text front-end. It owns the collaborator half of the core
//! contract: proposed moves are built from square pairs, tested for
//! membership in the most recently generated legal set, and only then
//! applied; after every mutation the legal set and status flags are
//! regenerated before anything is shown.
//!
//! Commands:
//!   move <from><to>[promo]   e.g. "move e2e4", "move e7e8n"
//!   go [depth]               engine picks and plays a move
//!   undo                     take back the last ply
//!   legal                    list the current legal moves
//!   show                     print the board
//!   new                      start over
//!   quit

use crate::board::{Move, Position};
use crate::error::{ChessError, ChessResult};
use crate::search::{choose_best_move, DEFAULT_DEPTH};
use crate::types::{PieceKind, Square};
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::trace;

pub struct Console {
    position: Position,
    legal: Vec<Move>,
}

impl Console {
    pub fn new() -> Self {
        let mut position = Position::new();
        let legal = position.legal_moves();
        Console { position, legal }
    }

    /// Read commands from stdin until quit or end of input
    pub fn run(&mut self) {
        println!("SableChess - type 'help' for commands");
        self.print_board();

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let mut parts = line.split_whitespace();
            let Some(command) = parts.next() else {
                continue;
            };
            let arg = parts.next();

            match command {
                "move" | "m" => self.handle_move(arg),
                "go" | "g" => self.handle_go(arg),
                "undo" | "u" => self.handle_undo(),
                "legal" | "l" => self.handle_legal(),
                "show" | "d" => self.print_board(),
                "new" => {
                    self.position = Position::new();
                    self.refresh();
                    self.print_board();
                }
                "help" | "h" => self.print_help(),
                "quit" | "q" | "exit" => break,
                other => println!("unknown command: {other} (try 'help')"),
            }
            let _ = io::stdout().flush();
        }
    }

    /// Re-run generation so the status flags reflect the new position
    fn refresh(&mut self) {
        self.legal = self.position.legal_moves();
    }

    fn handle_move(&mut self, arg: Option<&str>) {
        let Some(text) = arg else {
            println!("usage: move <from><to>[promo], e.g. move e2e4");
            return;
        };
        match self.parse_move(text) {
            Ok((start, end, promotion)) => {
                let Some(proposed) = Move::from_squares(start, end, &self.position) else {
                    println!("no piece on {start}");
                    return;
                };
                // take the generator's copy so castle flags survive;
                // equality ignores them by design
                let Some(&matched) = self.legal.iter().find(|m| **m == proposed) else {
                    println!("illegal move: {text}");
                    return;
                };
                let chosen = match promotion {
                    Some(kind) => matched.with_promotion(kind),
                    None => matched,
                };
                trace!(mv = %chosen, "applying move");
                self.position.apply(chosen);
                self.refresh();
                self.print_board();
                self.print_status();
            }
            Err(err) => println!("{err}"),
        }
    }

    fn handle_go(&mut self, arg: Option<&str>) {
        let depth = match arg {
            Some(text) => match text.parse::<u32>() {
                Ok(d) if d >= 1 => d,
                _ => {
                    println!("usage: go [depth >= 1]");
                    return;
                }
            },
            None => DEFAULT_DEPTH,
        };

        let started = Instant::now();
        let (best, stats) = choose_best_move(&mut self.position, depth);
        let elapsed = started.elapsed();

        match best {
            Some(mv) => {
                println!(
                    "bestmove {} (depth {} nodes {} in {} ms)",
                    mv.notation(),
                    depth,
                    stats.nodes,
                    elapsed.as_millis()
                );
                self.position.apply(mv);
                self.refresh();
                self.print_board();
                self.print_status();
            }
            None => {
                self.refresh();
                self.print_status();
            }
        }
    }

    fn handle_undo(&mut self) {
        if self.position.move_log.is_empty() {
            println!("nothing to undo");
            return;
        }
        self.position.undo();
        self.refresh();
        self.print_board();
        self.print_status();
    }

    fn handle_legal(&mut self) {
        let list: Vec<String> = self.legal.iter().map(|m| m.notation()).collect();
        println!("{} legal moves: {}", list.len(), list.join(" "));
    }

    /// Parse "e2e4" or "e7e8n"
    fn parse_move(&self, text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
        if text.len() < 4
            || text.len() > 5
            || !text.is_char_boundary(2)
            || !text.is_char_boundary(4)
        {
            return Err(ChessError::InvalidMove(text.to_string()));
        }
        let start = Square::parse(&text[0..2])?;
        let end = Square::parse(&text[2..4])?;
        let promotion = match text.chars().nth(4) {
            None => None,
            Some(c) => match PieceKind::from_code(c) {
                Some(kind) if kind != PieceKind::King && kind != PieceKind::Pawn => Some(kind),
                _ => return Err(ChessError::InvalidPromotion(c)),
            },
        };
        Ok((start, end, promotion))
    }

    fn print_board(&self) {
        println!("{}", self.position);
        println!("{} to move", self.position.side_to_move());
    }

    fn print_status(&self) {
        if self.position.checkmate {
            println!("checkmate - {} wins", self.position.side_to_move().opposite());
        } else if self.position.stalemate {
            println!("stalemate - draw");
        } else if self.position.in_check {
            println!("check");
        }
    }

    fn print_help(&self) {
        println!("move <from><to>[promo]  play a move, e.g. 'move e2e4' or 'move e7e8n'");
        println!("go [depth]              let the engine move (default depth {DEFAULT_DEPTH})");
        println!("undo                    take back the last ply");
        println!("legal                   list legal moves");
        println!("show                    print the board");
        println!("new                     start a fresh game");
        println!("quit                    leave");
    }
}

impl Default for Console {
    fn default() -> Self {
        Console::new()
    }
}
