#![allow(dead_code)]
use knook::{Board, Move, Position};

pub fn sq(text: &str) -> Position { text.parse().expect("square") }

pub fn mv(text: &str) -> Move { text.parse().expect("coordinate move") }

pub fn fen(text: &str) -> Board { Board::from_fen(text).expect("valid FEN") }

pub fn after(moves: &[&str]) -> Board {
    let mut board = Board::new();
    for m in moves {
        board.play(m).unwrap_or_else(|e| panic!("{m}: {e}"));
    }
    board
}

/// Sorted coordinate strings of `moves`, for order-free comparison.
pub fn texts(moves: &[Move]) -> Vec<String> {
    let mut out: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
    out.sort();
    out
}
