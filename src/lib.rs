// Two-player chess rules engine: board state, legality with one-level
// lookahead, attacked squares and move commits.
pub mod board;
pub mod game;
pub mod moves;
pub mod openings;
pub mod perft;
pub mod piece;
pub mod selfplay;

pub use board::commit::{Promotion, PromotionSelector};
pub use board::fen::FenError;
pub use board::legality::{Legality, Probe};
pub use board::{Board, LastMove, Player};
pub use game::{GameStatus, MoveError};
pub use moves::{Move, NotationError, Position, Special, SquareSet};
pub use piece::{Colour, MoveTemplate, Piece, PieceKind, Templates};
