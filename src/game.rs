//! Consumer-level queries built on the rules engine: full legal move
//! enumeration, game status and validated play from coordinate text.

use std::ops::ControlFlow;

use log::debug;
use thiserror::Error;

use crate::board::commit::{Promotion, PromotionSelector};
use crate::board::legality::Probe;
use crate::board::Board;
use crate::moves::{Move, NotationError, Position, Special};
use crate::piece::Colour;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check but has a way out.
    Check,
    Checkmate { winner: Colour },
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool { matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error("no piece on {0}")]
    EmptySquare(Position),
    #[error("it is {}'s turn", .0.name())]
    WrongTurn(Colour),
    #[error("illegal move {0}")]
    Illegal(Move),
}

impl Board {
    /// Legal moves of the piece on `pos`, specials stamped. Empty for an empty cell.
    pub fn legal_moves_from(&self, pos: impl Into<Position>) -> Vec<Move> {
        let mut out = Vec::new();
        let _ = self.walk_legal(pos.into(), &mut |mv| {
            out.push(mv);
            ControlFlow::Continue(())
        });
        out
    }

    /// Every legal move of the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        let side = self.get_current_turn();
        let mut out = Vec::new();
        for (pos, piece) in self.pieces() {
            if piece.colour() != side { continue; }
            let _ = self.walk_legal(pos, &mut |mv| {
                out.push(mv);
                ControlFlow::Continue(())
            });
        }
        out
    }

    pub fn has_legal_move(&self) -> bool {
        let side = self.get_current_turn();
        self.pieces()
            .filter(|(_, p)| p.colour() == side)
            .any(|(pos, _)| self.walk_legal(pos, &mut |_| ControlFlow::Break(())).is_break())
    }

    /// Status for the side to move: no legal move means mate if in check and
    /// stalemate otherwise.
    pub fn status(&self) -> GameStatus {
        let side = self.get_current_turn();
        let checked = self.in_check(side);
        let status = match (self.has_legal_move(), checked) {
            (true, false) => GameStatus::Ongoing,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Checkmate { winner: side.opponent() },
            (false, false) => GameStatus::Stalemate,
        };
        if status.is_over() { debug!("game over: {status:?}"); }
        status
    }

    /// Validates and commits `mv` for the side to move. Returns the move as
    /// committed, with specials stamped.
    pub fn try_move<S: PromotionSelector + ?Sized>(&mut self, mv: Move, selector: &mut S) -> Result<Move, MoveError> {
        let mv = self.validate(mv)?;
        self.move_piece_with(mv, selector);
        Ok(mv)
    }

    /// Plays coordinate text such as `e2e4`; an optional fifth character
    /// (`n`, `b`, `r`, `q`) picks the promotion and is rejected on any other
    /// move.
    pub fn play(&mut self, text: &str) -> Result<Move, MoveError> {
        let text = text.trim();
        let (coords, promotion) = match text.char_indices().nth(4) {
            Some((i, c)) if text.len() == i + c.len_utf8() => match Promotion::from_char(c) {
                Some(p) => (&text[..i], Some(p)),
                None => (text, None),
            },
            _ => (text, None),
        };
        let mv = self.validate(coords.parse()?)?;
        if promotion.is_some() && mv.special != Special::Promotion {
            debug!("{text}: promotion suffix on a non-promotion move");
            return Err(MoveError::Illegal(mv));
        }
        let mut selector = promotion;
        self.move_piece_with(mv, &mut selector);
        Ok(mv)
    }

    /// Full validation for the side to move, returning the stamped move.
    fn validate(&self, mut mv: Move) -> Result<Move, MoveError> {
        if !mv.is_valid() { return Err(MoveError::Illegal(mv)); }
        let piece = *self.at(mv.from);
        if piece.is_empty() { return Err(MoveError::EmptySquare(mv.from)); }
        if piece.colour() != self.get_current_turn() { return Err(MoveError::WrongTurn(self.get_current_turn())); }
        if !self.is_move_legal(&mut mv, Probe::PLAY).legal { return Err(MoveError::Illegal(mv)); }
        Ok(mv)
    }

    /// Walks every template of the piece on `from`. Rays are followed while
    /// the step is pseudo-legal; each step is separately checked for king
    /// safety, so a blocking square further along a ray is still found when
    /// nearer steps fail the lookahead.
    fn walk_legal(&self, from: Position, visit: &mut dyn FnMut(Move) -> ControlFlow<()>) -> ControlFlow<()> {
        let piece = *self.at(from);
        if piece.is_empty() { return ControlFlow::Continue(()); }
        for template in piece.possible_moves(piece.colour()) {
            let (mut mv, repeatable) = template.apply(from);
            loop {
                let pseudo = self.probe_move(&mut mv, Probe::PSEUDO);
                if !pseudo.legal { break; }
                let mut candidate = mv;
                if self.probe_move(&mut candidate, Probe::PLAY).legal {
                    if visit(candidate).is_break() { return ControlFlow::Break(()); }
                }
                if !repeatable || pseudo.capture { break; }
                mv.to = mv.to.offset(template.dx, template.dy);
            }
        }
        ControlFlow::Continue(())
    }
}
