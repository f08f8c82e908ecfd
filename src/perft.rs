// Node counts over the legal move tree. Boards are cloned per child (no unmake).
use rayon::prelude::*;

use crate::board::commit::Promotion;
use crate::board::Board;
use crate::moves::{Move, Special};

static PLAIN: [Option<Promotion>; 1] = [None];
static PROMOTIONS: [Option<Promotion>; 4] =
    [Some(Promotion::Knight), Some(Promotion::Bishop), Some(Promotion::Rook), Some(Promotion::Queen)];

// Promotions count once per piece choice, matching standard perft tables.
fn choices(mv: &Move) -> &'static [Option<Promotion>] {
    if mv.special == Special::Promotion { &PROMOTIONS } else { &PLAIN }
}

fn child(board: &Board, mv: Move, mut choice: Option<Promotion>) -> Board {
    let mut next = board.clone();
    next.move_piece_with(mv, &mut choice);
    next
}

pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = board.legal_moves();
    if depth == 1 { return moves.iter().map(|m| choices(m).len() as u64).sum(); }
    let mut nodes = 0u64;
    for mv in moves {
        for &choice in choices(&mv) {
            nodes += perft(&child(board, mv, choice), depth - 1);
        }
    }
    nodes
}

/// Per-root-move counts, labelled in coordinate text with a promotion suffix.
pub fn divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut out = Vec::new();
    if depth == 0 { return out; }
    for mv in board.legal_moves() {
        for &choice in choices(&mv) {
            let label = match choice { Some(p) => format!("{mv}{}", p.to_char()), None => mv.to_string() };
            out.push((label, perft(&child(board, mv, choice), depth - 1)));
        }
    }
    out
}

/// Root-split perft on the current rayon pool.
pub fn perft_parallel(board: &Board, depth: u32) -> u64 {
    if depth <= 1 { return perft(board, depth); }
    let roots: Vec<(Move, Option<Promotion>)> = board.legal_moves().into_iter()
        .flat_map(|mv| choices(&mv).iter().map(move |&c| (mv, c)))
        .collect();
    roots.par_iter().map(|&(mv, choice)| perft(&child(board, mv, choice), depth - 1)).sum()
}
