use crate::board::legality::Probe;
use crate::board::Board;
use crate::moves::SquareSet;
use crate::piece::Colour;

impl Board {
    /// Every square `colour` attacks on `board`.
    ///
    /// Friendly-occupied squares are included (they are defended), rays stop
    /// on the first occupied square. With `simulate` each probe also runs the
    /// king-safety lookahead, which drops attacks by pinned pieces.
    pub fn gen_checks(colour: Colour, board: &Board, simulate: bool) -> SquareSet {
        let probe = Probe { simulate, attacks: true };
        let mut attacked = SquareSet::EMPTY;
        for (pos, piece) in board.pieces() {
            if piece.colour() != colour { continue; }
            for template in piece.possible_moves(colour) {
                let (mut mv, repeatable) = template.apply(pos);
                let mut verdict = board.probe_move(&mut mv, probe);
                while verdict.legal {
                    attacked.insert(mv.to);
                    if !repeatable || verdict.capture { break; }
                    mv.to = mv.to.offset(template.dx, template.dy);
                    verdict = board.probe_move(&mut mv, probe);
                }
            }
        }
        attacked
    }

    /// Squares `colour` attacks on this board.
    pub fn attacked_by(&self, colour: Colour) -> SquareSet { Board::gen_checks(colour, self, false) }

    pub fn in_check(&self, colour: Colour) -> bool {
        self.attacked_by(colour.opponent()).contains(self.king_pos(colour))
    }
}
