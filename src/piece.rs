use crate::moves::{Move, Position};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black,
    #[default]
    None,
}

impl Colour {
    #[inline]
    pub fn opponent(self) -> Colour {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
            Colour::None => Colour::None,
        }
    }

    /// Mirrors a row so that 0 is this colour's back rank and play runs
    /// towards 7.
    #[inline]
    pub fn relative_row(self, y: i8) -> i8 {
        if self == Colour::White { 7 - y } else { y }
    }

    /// Row delta of one step forward in board coordinates.
    #[inline]
    pub fn forward(self) -> i8 {
        if self == Colour::White { -1 } else { 1 }
    }

    pub fn name(self) -> &'static str {
        match self {
            Colour::White => "White",
            Colour::Black => "Black",
            Colour::None => "None",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Bishop,
    King,
    Knight,
    Pawn,
    Queen,
    Rook,
    /// Knight and rook combined.
    Knook,
    #[default]
    None,
}

impl PieceKind {
    /// Material value credited to the capturer.
    pub fn value(self) -> u32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Knook => 8,
            PieceKind::Queen => 9,
            PieceKind::King | PieceKind::None => 0,
        }
    }
}

/// One move-generator entry: applied to an origin it yields a candidate move
/// and whether the direction may be repeated (sliding ray).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveTemplate {
    pub dx: i8,
    pub dy: i8,
    pub repeatable: bool,
}

impl MoveTemplate {
    const fn ray(dx: i8, dy: i8) -> Self { Self { dx, dy, repeatable: true } }
    const fn step(dx: i8, dy: i8) -> Self { Self { dx, dy, repeatable: false } }

    #[inline]
    pub fn apply(&self, from: Position) -> (Move, bool) {
        (Move::new(from, from.offset(self.dx, self.dy)), self.repeatable)
    }
}

// bishop 0..4, rook 4..8, knight 8..16, king 16..24
static TEMPLATES: [MoveTemplate; 24] = [
    MoveTemplate::ray(1, 1),
    MoveTemplate::ray(1, -1),
    MoveTemplate::ray(-1, 1),
    MoveTemplate::ray(-1, -1),
    MoveTemplate::ray(1, 0),
    MoveTemplate::ray(-1, 0),
    MoveTemplate::ray(0, 1),
    MoveTemplate::ray(0, -1),
    MoveTemplate::step(2, -1),
    MoveTemplate::step(2, 1),
    MoveTemplate::step(-2, -1),
    MoveTemplate::step(-2, 1),
    MoveTemplate::step(-1, 2),
    MoveTemplate::step(1, 2),
    MoveTemplate::step(-1, -2),
    MoveTemplate::step(1, -2),
    MoveTemplate::step(0, 1),
    MoveTemplate::step(0, -1),
    MoveTemplate::step(1, -1),
    MoveTemplate::step(-1, -1),
    MoveTemplate::step(1, 0),
    MoveTemplate::step(-1, 0),
    MoveTemplate::step(1, 1),
    MoveTemplate::step(-1, 1),
];

// push, double push, two capture diagonals
static BLACK_PAWN: [MoveTemplate; 4] = [
    MoveTemplate::step(0, 1),
    MoveTemplate::step(0, 2),
    MoveTemplate::step(1, 1),
    MoveTemplate::step(-1, 1),
];

static WHITE_PAWN: [MoveTemplate; 4] = [
    MoveTemplate::step(0, -1),
    MoveTemplate::step(0, -2),
    MoveTemplate::step(1, -1),
    MoveTemplate::step(-1, -1),
];

/// Lazy, finite and restartable (`Clone`) sequence of templates.
pub type Templates = std::iter::Copied<std::slice::Iter<'static, MoveTemplate>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    colour: Colour,
    pub first_move: bool,
}

impl Piece {
    pub const EMPTY: Piece = Piece { kind: PieceKind::None, colour: Colour::None, first_move: false };

    /// A piece that has not moved yet. `None` in either slot yields the empty cell.
    pub fn new(kind: PieceKind, colour: Colour) -> Self {
        if kind == PieceKind::None || colour == Colour::None { return Piece::EMPTY; }
        Piece { kind, colour, first_move: true }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind { self.kind }

    #[inline]
    pub fn colour(&self) -> Colour { self.colour }

    #[inline]
    pub fn is_empty(&self) -> bool { self.kind == PieceKind::None }

    pub(crate) fn set_kind(&mut self, kind: PieceKind) { self.kind = kind; }

    /// Move templates for this piece's kind, with pawn direction taken from `colour`.
    ///
    /// Pure: the result depends only on `(kind, colour)`, never on a board.
    pub fn possible_moves(&self, colour: Colour) -> Templates {
        let table: &'static [MoveTemplate] = match self.kind {
            PieceKind::Bishop => &TEMPLATES[0..4],
            PieceKind::Rook => &TEMPLATES[4..8],
            PieceKind::Queen => &TEMPLATES[0..8],
            PieceKind::Knook => &TEMPLATES[4..16],
            PieceKind::Knight => &TEMPLATES[8..16],
            PieceKind::King => &TEMPLATES[16..24],
            PieceKind::Pawn => match colour {
                Colour::White => &WHITE_PAWN,
                Colour::Black => &BLACK_PAWN,
                Colour::None => unreachable!("pawn templates need a side"),
            },
            PieceKind::None => unreachable!("empty cell has no move templates"),
        };
        table.iter().copied()
    }

    pub fn glyph(&self) -> char {
        match (self.colour, self.kind) {
            (Colour::White, PieceKind::King) => '♔',
            (Colour::White, PieceKind::Queen) => '♕',
            (Colour::White, PieceKind::Rook) => '♖',
            (Colour::White, PieceKind::Bishop) => '♗',
            (Colour::White, PieceKind::Knight) => '♘',
            (Colour::White, PieceKind::Pawn) => '♙',
            (Colour::Black, PieceKind::King) => '♚',
            (Colour::Black, PieceKind::Queen) => '♛',
            (Colour::Black, PieceKind::Rook) => '♜',
            (Colour::Black, PieceKind::Bishop) => '♝',
            (Colour::Black, PieceKind::Knight) => '♞',
            (Colour::Black, PieceKind::Pawn) => '♟',
            (Colour::White, PieceKind::Knook) => 'O',
            (Colour::Black, PieceKind::Knook) => 'o',
            _ => '.',
        }
    }

    /// FEN letter; knooks use `o`/`O`.
    pub fn fen_char(&self) -> Option<char> {
        let c = match self.kind {
            PieceKind::Bishop => 'b',
            PieceKind::King => 'k',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Knook => 'o',
            PieceKind::None => return None,
        };
        Some(if self.colour == Colour::White { c.to_ascii_uppercase() } else { c })
    }

    pub fn from_fen_char(c: char) -> Option<Piece> {
        let colour = if c.is_ascii_uppercase() { Colour::White } else { Colour::Black };
        let kind = match c.to_ascii_lowercase() {
            'b' => PieceKind::Bishop,
            'k' => PieceKind::King,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'o' => PieceKind::Knook,
            _ => return None,
        };
        Some(Piece::new(kind, colour))
    }
}
