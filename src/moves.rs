use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A board coordinate. `x` is the file (a=0), `y` the row counted from
/// black's back rank (row 0 is rank 8). Candidate moves may step outside
/// the board, so both components are signed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self { Self { x, y } }

    #[inline]
    pub const fn in_range(self) -> bool { self.x >= 0 && self.x < 8 && self.y >= 0 && self.y < 8 }

    /// Cell index `y*8+x`. Only meaningful for in-range positions.
    #[inline]
    pub const fn index(self) -> usize { (self.y as usize) * 8 + self.x as usize }

    #[inline]
    pub const fn from_index(index: usize) -> Self { Self { x: (index % 8) as i8, y: (index / 8) as i8 } }

    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Self { Self { x: self.x + dx, y: self.y + dy } }

    /// Rank number as printed on a board, 1..=8.
    pub const fn rank(self) -> i8 { 8 - self.y }

    pub fn file_char(self) -> char { (b'a' + self.x as u8) as char }
}

impl From<(i8, i8)> for Position {
    fn from((x, y): (i8, i8)) -> Self { Self { x, y } }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_range() { return write!(f, "({},{})", self.x, self.y); }
        write!(f, "{}{}", self.file_char(), self.rank())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("expected {expected} characters, got {got}")]
    Length { expected: usize, got: usize },
    #[error("invalid file '{0}' (expected a-h)")]
    File(char),
    #[error("invalid rank '{0}' (expected 1-8)")]
    Rank(char),
}

fn parse_file(c: char) -> Result<i8, NotationError> {
    match c {
        'a'..='h' => Ok((c as u8 - b'a') as i8),
        'A'..='H' => Ok((c as u8 - b'A') as i8),
        _ => Err(NotationError::File(c)),
    }
}

fn parse_rank(c: char) -> Result<i8, NotationError> {
    match c {
        '1'..='8' => Ok(8 - (c as u8 - b'0') as i8),
        _ => Err(NotationError::Rank(c)),
    }
}

impl FromStr for Position {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 { return Err(NotationError::Length { expected: 2, got: chars.len() }); }
        Ok(Position { x: parse_file(chars[0])?, y: parse_rank(chars[1])? })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Special {
    #[default]
    None,
    EnPassant,
    Promotion,
    /// Reserved; the engine never stamps it.
    Castles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub special: Special,
}

impl Move {
    pub fn new(from: impl Into<Position>, to: impl Into<Position>) -> Self {
        Self { from: from.into(), to: to.into(), special: Special::None }
    }

    /// Well-formed: both endpoints on the board. Says nothing about legality.
    pub fn is_valid(&self) -> bool { self.from.in_range() && self.to.in_range() }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}{}", self.from, self.to) }
}

/// Coordinate text such as `e2e4` or `G1F3`.
impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 { return Err(NotationError::Length { expected: 4, got: chars.len() }); }
        let from = Position { x: parse_file(chars[0])?, y: parse_rank(chars[1])? };
        let to = Position { x: parse_file(chars[2])?, y: parse_rank(chars[3])? };
        Ok(Move::new(from, to))
    }
}

/// Set of board cells, one bit per cell index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub fn insert(&mut self, pos: Position) {
        debug_assert!(pos.in_range());
        self.0 |= 1u64 << pos.index();
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool { pos.in_range() && (self.0 >> pos.index()) & 1 == 1 }

    pub fn len(&self) -> usize { self.0.count_ones() as usize }

    pub fn is_empty(&self) -> bool { self.0 == 0 }

    pub fn bits(&self) -> u64 { self.0 }

    pub fn iter(&self) -> impl Iterator<Item = Position> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 { return None; }
            let idx = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(Position::from_index(idx))
        })
    }
}

impl FromIterator<Position> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for p in iter { set.insert(p); }
        set
    }
}
