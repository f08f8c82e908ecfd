use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, LastMove};
use crate::moves::{Move, Position, Special};
use crate::piece::{Colour, Piece, PieceKind};

/// The kinds a pawn may promote to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Promotion {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [Promotion::Knight, Promotion::Bishop, Promotion::Rook, Promotion::Queen];

    pub fn kind(self) -> PieceKind {
        match self {
            Promotion::Knight => PieceKind::Knight,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Queen => PieceKind::Queen,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Promotion::Knight => 'n',
            Promotion::Bishop => 'b',
            Promotion::Rook => 'r',
            Promotion::Queen => 'q',
        }
    }

    pub fn from_char(c: char) -> Option<Promotion> {
        match c.to_ascii_lowercase() {
            'n' => Some(Promotion::Knight),
            'b' => Some(Promotion::Bishop),
            'r' => Some(Promotion::Rook),
            'q' => Some(Promotion::Queen),
            _ => None,
        }
    }
}

/// Supplies the replacement kind when a pawn promotes, e.g. a dialog in a
/// front end. `None` means no choice was made and the pawn becomes a queen.
pub trait PromotionSelector {
    fn select(&mut self, colour: Colour, at: Position) -> Option<Promotion>;
}

/// A fixed, pre-made choice.
impl PromotionSelector for Option<Promotion> {
    fn select(&mut self, _colour: Colour, _at: Position) -> Option<Promotion> { *self }
}

impl Board {
    /// Applies a move that `is_move_legal` accepted; promotions become queens.
    pub fn move_piece(&mut self, mv: Move) { self.move_piece_with(mv, &mut None::<Promotion>) }

    /// Applies a move that `is_move_legal` accepted. Nothing is re-validated.
    pub fn move_piece_with<S: PromotionSelector + ?Sized>(&mut self, mv: Move, selector: &mut S) {
        let mover = *self.at(mv.from);
        let colour = mover.colour();
        self.last_move = Some(LastMove { mv, from: mover, to: *self.at(mv.to) });

        let captured = self.relocate(&mv);

        let moved = self.at_mut(mv.to);
        if mv.special == Special::Promotion {
            let choice = selector.select(colour, mv.to).unwrap_or(Promotion::Queen);
            moved.set_kind(choice.kind());
        }
        moved.first_move = false;

        if captured != PieceKind::None {
            self.player_mut(colour).score += captured.value();
        }
        self.current_turn = self.current_turn.opponent();
        debug!("{} played {mv} ({:?}), {} to move", colour.name(), mv.special, self.current_turn.name());
    }

    /// Moves the piece, removing an en passant victim and tracking the king.
    /// Returns the kind captured. Used for both commits and simulations.
    pub(crate) fn relocate(&mut self, mv: &Move) -> PieceKind {
        let piece = *self.at(mv.from);
        let mut captured = self.at(mv.to).kind();

        if mv.special == Special::EnPassant {
            let behind = mv.to.offset(0, -piece.colour().forward());
            if self.at(behind).kind() == PieceKind::Pawn {
                *self.at_mut(behind) = Piece::EMPTY;
                captured = PieceKind::Pawn;
            }
        }
        if piece.kind() == PieceKind::King {
            self.player_mut(piece.colour()).king_pos = mv.to;
        }

        *self.at_mut(mv.to) = piece;
        *self.at_mut(mv.from) = Piece::EMPTY;
        captured
    }
}
