//! FEN import/export for setting up positions.
//!
//! Castling rights are ignored on input and written as `-`. The en passant
//! field is translated to and from the board's last-move record.

use thiserror::Error;

use crate::board::{Board, LastMove};
use crate::moves::{Move, Position};
use crate::piece::{Colour, Piece, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("empty FEN")]
    Empty,
    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),
    #[error("rank {0} does not describe exactly 8 files")]
    RankWidth(usize),
    #[error("unknown piece letter '{0}'")]
    Piece(char),
    #[error("side to move must be 'w' or 'b', got '{0}'")]
    Side(String),
    #[error("invalid en passant square '{0}'")]
    EnPassant(String),
    #[error("expected exactly one {0} king")]
    King(&'static str),
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::Empty)?;
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 { return Err(FenError::RankCount(ranks.len())); }

        let mut board = Board::empty();
        let mut kings = [0usize; 2];
        for (y, rank) in ranks.iter().enumerate() {
            let mut x = 0usize;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    x += skip as usize;
                    continue;
                }
                let mut piece = Piece::from_fen_char(c).ok_or(FenError::Piece(c))?;
                if x >= 8 { return Err(FenError::RankWidth(8 - y)); }
                let pos = Position::new(x as i8, y as i8);
                match piece.kind() {
                    PieceKind::Pawn => piece.first_move = piece.colour().relative_row(pos.y) == 1,
                    PieceKind::King => kings[(piece.colour() == Colour::Black) as usize] += 1,
                    _ => {}
                }
                board.place(pos, piece);
                x += 1;
            }
            if x != 8 { return Err(FenError::RankWidth(8 - y)); }
        }
        if kings[0] != 1 { return Err(FenError::King("white")); }
        if kings[1] != 1 { return Err(FenError::King("black")); }

        let side = match fields.next() {
            None | Some("w") => Colour::White,
            Some("b") => Colour::Black,
            Some(other) => return Err(FenError::Side(other.to_string())),
        };
        board.set_current_turn(side);

        let _castling = fields.next();
        if let Some(ep) = fields.next().filter(|s| *s != "-") {
            board.set_last_move(Some(double_step_through(&board, ep, side)?));
        }
        Ok(board)
    }

    /// Placement, side to move, `-` castling, en passant target (only when a
    /// capture is geometrically available) and fixed move counters.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for y in 0..8i8 {
            let mut gap = 0;
            for x in 0..8i8 {
                match self.at((x, y)).fen_char() {
                    Some(c) => {
                        if gap > 0 { out.push_str(&gap.to_string()); gap = 0; }
                        out.push(c);
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 { out.push_str(&gap.to_string()); }
            if y < 7 { out.push('/'); }
        }
        let side = if self.get_current_turn() == Colour::Black { "b" } else { "w" };
        let ep = self.en_passant_target().map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
        format!("{out} {side} - {ep} 0 1")
    }

    /// Square passed over by the last move if it was a double pawn step and a
    /// pawn of the side to move stands beside the landing square.
    fn en_passant_target(&self) -> Option<Position> {
        let last = self.last_move()?;
        let (from, to) = (last.mv.from, last.mv.to);
        if last.from.kind() != PieceKind::Pawn || (from.y - to.y).abs() != 2 || from.x != to.x { return None; }
        let side = self.get_current_turn();
        let capturer = [to.offset(-1, 0), to.offset(1, 0)].into_iter().any(|p| {
            p.in_range() && self.at(p).kind() == PieceKind::Pawn && self.at(p).colour() == side
        });
        capturer.then(|| Position::new(to.x, (from.y + to.y) / 2))
    }
}

fn double_step_through(board: &Board, square: &str, side: Colour) -> Result<LastMove, FenError> {
    let bad = || FenError::EnPassant(square.to_string());
    let target: Position = square.parse().map_err(|_| bad())?;
    let mover = side.opponent();
    let from = target.offset(0, -mover.forward());
    let to = target.offset(0, mover.forward());
    if !from.in_range() || !to.in_range() { return Err(bad()); }
    let pawn = *board.at(to);
    if pawn.kind() != PieceKind::Pawn || pawn.colour() != mover || !board.at(target).is_empty() {
        return Err(bad());
    }
    let mut before = pawn;
    before.first_move = true;
    Ok(LastMove { mv: Move::new(from, to), from: before, to: Piece::EMPTY })
}
