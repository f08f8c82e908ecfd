//! Move validation with a one-level lookahead.
//!
//! A single routine serves three callers: real move validation
//! ([`Probe::PLAY`]), attacked-square generation ([`Probe::ATTACKS`]) and
//! pin detection, which is the simulation half of `PLAY`. Simulations always
//! query attacks with `simulate == false`, so evaluation never nests deeper
//! than one board copy.

use log::trace;

use crate::board::Board;
use crate::moves::{Move, Special};
use crate::piece::{Colour, PieceKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Probe {
    /// Reject moves that leave the mover's king attacked, by simulating them
    /// on a copy of the board.
    pub simulate: bool,
    /// Attack-set mode: friendly targets count as attacked and pawns attack
    /// only along their forward diagonals.
    pub attacks: bool,
}

impl Probe {
    /// A real move by a player.
    pub const PLAY: Probe = Probe { simulate: true, attacks: false };
    /// Squares a side attacks, without king-safety lookahead.
    pub const ATTACKS: Probe = Probe { simulate: false, attacks: true };
    /// Pseudo-legal: movement rules only.
    pub const PSEUDO: Probe = Probe { simulate: false, attacks: false };
}

impl Default for Probe {
    fn default() -> Self { Probe::PLAY }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Legality {
    pub legal: bool,
    /// The destination held a piece. Never set for en passant, whose
    /// destination is empty.
    pub capture: bool,
}

impl Legality {
    pub const ILLEGAL: Legality = Legality { legal: false, capture: false };
}

impl Board {
    /// Validates `mv` against this board. `mv.special` is reset and then
    /// stamped with `EnPassant` or `Promotion` when detected.
    ///
    /// Unlike the probes issued while walking templates, this also checks that
    /// the piece can geometrically reach `mv.to`, so arbitrary consumer input
    /// is safe to pass.
    pub fn is_move_legal(&self, mv: &mut Move, probe: Probe) -> Legality {
        if mv.is_valid() && !self.reaches(mv) {
            mv.special = Special::None;
            return Legality::ILLEGAL;
        }
        self.probe_move(mv, probe)
    }

    /// Legality for a move already produced by one of the piece's templates.
    pub(crate) fn probe_move(&self, mv: &mut Move, probe: Probe) -> Legality {
        mv.special = Special::None;
        if !mv.is_valid() { return Legality::ILLEGAL; }

        let mover = *self.at(mv.from);
        let target = *self.at(mv.to);
        let colour = mover.colour();

        if mover.is_empty() { return Legality::ILLEGAL; }
        if !probe.attacks && colour == target.colour() { return Legality::ILLEGAL; }

        match mover.kind() {
            PieceKind::King if probe.simulate => {
                if Board::gen_checks(colour.opponent(), self, false).contains(mv.to) {
                    if !probe.attacks { trace!("{mv}: king steps onto an attacked square"); }
                    return Legality::ILLEGAL;
                }
                let mut copy = self.clone();
                copy.relocate(mv);
                if Board::gen_checks(colour.opponent(), &copy, false).contains(mv.to) {
                    if !probe.attacks { trace!("{mv}: king would be attacked after moving"); }
                    return Legality::ILLEGAL;
                }
            }
            PieceKind::Pawn => {
                if !self.pawn_allows(mv, colour, probe.attacks) { return Legality::ILLEGAL; }
            }
            _ => {}
        }

        if mover.kind() != PieceKind::King && probe.simulate {
            let mut copy = self.clone();
            copy.relocate(mv);
            if Board::gen_checks(colour.opponent(), &copy, false).contains(self.king_pos(colour)) {
                if !probe.attacks { trace!("{mv}: exposes the {} king", colour.name()); }
                return Legality::ILLEGAL;
            }
        }

        Legality { legal: true, capture: !target.is_empty() }
    }

    /// Pawn movement in colour-relative rows, where forward is +1.
    fn pawn_allows(&self, mv: &mut Move, colour: Colour, attacks: bool) -> bool {
        let dx = (mv.to.x - mv.from.x).abs();
        let from_row = colour.relative_row(mv.from.y);
        let to_row = colour.relative_row(mv.to.y);
        let dy = to_row - from_row;

        if attacks { return dx == 1 && dy == 1; }

        let target = *self.at(mv.to);
        match (dx, dy) {
            (0, 1) => {
                if !target.is_empty() { return false; }
            }
            (0, 2) => {
                let passed = mv.from.offset(0, colour.forward());
                if !self.at(mv.from).first_move || !target.is_empty() || !self.at(passed).is_empty() {
                    return false;
                }
            }
            (1, 1) => {
                if target.is_empty() {
                    if !self.en_passant_available(mv, colour) {
                        trace!("{mv}: diagonal pawn move without a capture");
                        return false;
                    }
                    mv.special = Special::EnPassant;
                } else if target.colour() == colour {
                    return false;
                }
            }
            _ => return false,
        }

        if to_row == 7 { mv.special = Special::Promotion; }
        true
    }

    /// The previous ply was an enemy pawn's double step that landed beside
    /// `mv.from`, in the file `mv` moves into.
    fn en_passant_available(&self, mv: &Move, colour: Colour) -> bool {
        let Some(last) = self.last_move() else { return false };
        if last.from.kind() != PieceKind::Pawn || last.from.colour() != colour.opponent() { return false; }
        let (lf, lt) = (last.mv.from, last.mv.to);
        (lf.y - lt.y).abs() == 2 && lf.x == lt.x && lt.x == mv.to.x && lt.y == mv.from.y
    }

    /// Whether some template of the piece on `mv.from` lands on `mv.to`,
    /// sliding only through empty cells. Pawns are checked by `pawn_allows`.
    fn reaches(&self, mv: &Move) -> bool {
        let piece = *self.at(mv.from);
        if piece.is_empty() { return false; }
        if piece.kind() == PieceKind::Pawn { return true; }
        piece.possible_moves(piece.colour()).any(|t| {
            let mut cur = mv.from.offset(t.dx, t.dy);
            loop {
                if !cur.in_range() { return false; }
                if cur == mv.to { return true; }
                if !t.repeatable || !self.at(cur).is_empty() { return false; }
                cur = cur.offset(t.dx, t.dy);
            }
        })
    }
}
