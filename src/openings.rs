//! Common chess openings used to diversify self-play starts.
//! Each opening consists of 4 moves (8 half-moves) in coordinate notation.
//! Lines that castle are left out since the engine does not castle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessOpening {
    pub name: String,
    pub moves: Vec<String>,
}

fn line(name: &str, moves: [&str; 8]) -> ChessOpening {
    ChessOpening { name: name.to_string(), moves: moves.iter().map(|m| m.to_string()).collect() }
}

/// Get all chess openings
pub fn get_chess_openings() -> Vec<ChessOpening> {
    vec![
        line("Ruy Lopez", ["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6", "b5a4", "g8f6"]),
        line("Queen's Gambit", ["d2d4", "d7d5", "c2c4", "e7e6", "b1c3", "g8f6", "c1g5", "f8e7"]),
        line("Sicilian Defense - Dragon Variation", ["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4", "g8f6"]),
        line("French Defense", ["e2e4", "e7e6", "d2d4", "d7d5", "b1c3", "f8b4", "e4e5", "c7c5"]),
        line("King's Indian Defense", ["d2d4", "g8f6", "c2c4", "g7g6", "b1c3", "f8g7", "e2e4", "d7d6"]),
        line("English Opening", ["c2c4", "e7e5", "b1c3", "g8f6", "g2g3", "d7d5", "c4d5", "f6d5"]),
        line("Caro-Kann Defense", ["e2e4", "c7c6", "d2d4", "d7d5", "b1c3", "d5e4", "c3e4", "c8f5"]),
        line("Scotch Game", ["e2e4", "e7e5", "g1f3", "b8c6", "d2d4", "e5d4", "f3d4", "f8c5"]),
        line("Queen's Indian Defense", ["d2d4", "g8f6", "c2c4", "e7e6", "g1f3", "b7b6", "g2g3", "c8b7"]),
        line("Pirc Defense", ["e2e4", "d7d6", "d2d4", "g8f6", "b1c3", "g7g6", "f2f4", "f8g7"]),
        line("Alekhine's Defense", ["e2e4", "g8f6", "e4e5", "f6d5", "d2d4", "d7d6", "g1f3", "c8g4"]),
        line("Benoni Defense", ["d2d4", "g8f6", "c2c4", "c7c5", "d4d5", "e7e6", "b1c3", "e6d5"]),
        line("Dutch Defense", ["d2d4", "f7f5", "g2g3", "g8f6", "f1g2", "e7e6", "g1f3", "f8e7"]),
        line("Scandinavian Defense", ["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5", "d2d4", "g8f6"]),
        line("Vienna Game", ["e2e4", "e7e5", "b1c3", "g8f6", "f2f4", "d7d5", "f4e5", "f6e4"]),
        line("King's Gambit", ["e2e4", "e7e5", "f2f4", "e5f4", "g1f3", "g7g5", "h2h4", "g5g4"]),
        line("London System", ["d2d4", "d7d5", "g1f3", "g8f6", "c1f4", "c7c5", "e2e3", "b8c6"]),
        line("Catalan Opening", ["d2d4", "g8f6", "c2c4", "e7e6", "g2g3", "d7d5", "f1g2", "f8e7"]),
    ]
}

/// Get an opening by index, cycling through the list if necessary
pub fn get_opening(index: usize) -> ChessOpening {
    let openings = get_chess_openings();
    openings[index % openings.len()].clone()
}
