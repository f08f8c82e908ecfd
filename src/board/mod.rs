//! Board state: the 8x8 cell grid, per-side player records, the side to move
//! and the one-ply history needed for en passant.
//!
//! Rules live in the submodules: [`legality`] validates candidate moves,
//! [`checks`] computes attacked squares and [`commit`] applies moves.

pub mod checks;
pub mod commit;
pub mod fen;
pub mod legality;

use std::fmt;

use crate::moves::{Move, Position};
use crate::piece::{Colour, Piece, PieceKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Player {
    pub king_pos: Position,
    /// Material captured so far.
    pub score: u32,
}

/// The previous ply: the move and the cell contents before it was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LastMove {
    pub mv: Move,
    pub from: Piece,
    pub to: Piece,
}

/// Plain value: cloning yields an independent snapshot, which the
/// simulate-then-discard legality checks rely on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Piece; 64],
    white: Player,
    black: Player,
    current_turn: Colour,
    last_move: Option<LastMove>,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Default for Board {
    fn default() -> Self { Self::new() }
}

impl Board {
    /// Standard initial setup, white to move. Black occupies rows 0-1.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for x in 0..8i8 {
            let kind = BACK_RANK[x as usize];
            board.place((x, 0), Piece::new(kind, Colour::Black));
            board.place((x, 1), Piece::new(PieceKind::Pawn, Colour::Black));
            board.place((x, 6), Piece::new(PieceKind::Pawn, Colour::White));
            board.place((x, 7), Piece::new(kind, Colour::White));
        }
        board
    }

    /// No pieces, white to move. Kings must be placed before legality queries.
    pub fn empty() -> Self {
        Self {
            cells: [Piece::EMPTY; 64],
            white: Player { king_pos: Position::new(4, 7), score: 0 },
            black: Player { king_pos: Position::new(4, 0), score: 0 },
            current_turn: Colour::White,
            last_move: None,
        }
    }

    #[inline]
    pub fn at(&self, pos: impl Into<Position>) -> &Piece {
        let pos = pos.into();
        debug_assert!(pos.in_range(), "cell {:?} off the board", pos);
        &self.cells[pos.index()]
    }

    /// Raw cell access. Writing a king here does not move `king_pos`; use
    /// [`Board::place`] for setup.
    #[inline]
    pub fn at_mut(&mut self, pos: impl Into<Position>) -> &mut Piece {
        let pos = pos.into();
        debug_assert!(pos.in_range(), "cell {:?} off the board", pos);
        &mut self.cells[pos.index()]
    }

    /// Puts `piece` on `pos`, keeping the owner's `king_pos` in sync.
    pub fn place(&mut self, pos: impl Into<Position>, piece: Piece) {
        let pos = pos.into();
        if piece.kind() == PieceKind::King {
            self.player_mut(piece.colour()).king_pos = pos;
        }
        *self.at_mut(pos) = piece;
    }

    pub fn cells(&self) -> &[Piece; 64] { &self.cells }

    /// Occupied cells with their positions, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.cells.iter().enumerate()
            .filter(|(_, p)| !p.is_empty())
            .map(|(i, p)| (Position::from_index(i), *p))
    }

    #[inline]
    pub fn get_current_turn(&self) -> Colour { self.current_turn }

    pub fn set_current_turn(&mut self, colour: Colour) {
        debug_assert!(colour != Colour::None);
        self.current_turn = colour;
    }

    pub fn last_move(&self) -> Option<&LastMove> { self.last_move.as_ref() }

    pub fn set_last_move(&mut self, last: Option<LastMove>) { self.last_move = last; }

    pub fn player(&self, colour: Colour) -> &Player {
        match colour {
            Colour::White => &self.white,
            Colour::Black => &self.black,
            Colour::None => unreachable!("no player for an empty colour"),
        }
    }

    pub(crate) fn player_mut(&mut self, colour: Colour) -> &mut Player {
        match colour {
            Colour::White => &mut self.white,
            Colour::Black => &mut self.black,
            Colour::None => unreachable!("no player for an empty colour"),
        }
    }

    #[inline]
    pub fn king_pos(&self, colour: Colour) -> Position { self.player(colour).king_pos }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..8i8 {
            write!(f, "{} ", 8 - y)?;
            for x in 0..8i8 {
                write!(f, "{} ", self.at((x, y)).glyph())?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
