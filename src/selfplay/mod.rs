use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::commit::Promotion;
use crate::board::Board;
use crate::game::{GameStatus, MoveError};
use crate::moves::Special;
use crate::openings::get_opening;
use crate::piece::Colour;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub seed: u64,
    pub use_openings: bool, // start from a random built-in opening line
}

impl Default for SelfPlayParams {
    fn default() -> Self { Self { games: 10, max_plies: 200, seed: 42, use_openings: false } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    WhiteCheckmates,
    BlackCheckmates,
    Stalemate,
    /// Hit the ply limit.
    Unfinished,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub opening: Option<String>,
    /// Coordinate text, promotions suffixed with the piece letter.
    pub moves: Vec<String>,
    pub outcome: Outcome,
    pub white_score: u32,
    pub black_score: u32,
}

#[derive(Debug, Error)]
#[error("ply {ply} ({text}): {source}")]
pub struct ReplayError {
    pub ply: usize,
    pub text: String,
    #[source]
    pub source: MoveError,
}

impl GameRecord {
    /// Re-plays every move through full validation from the initial position.
    pub fn replay(&self) -> Result<Board, ReplayError> {
        let mut board = Board::new();
        for (ply, text) in self.moves.iter().enumerate() {
            board.play(text).map_err(|source| ReplayError { ply, text: text.clone(), source })?;
        }
        Ok(board)
    }
}

pub fn generate_games(params: &SelfPlayParams) -> Vec<GameRecord> { generate_games_with(params, |_| {}) }

/// Plays `params.games` random games in parallel, calling `on_game` as each
/// finishes. Game `i` is seeded from `params.seed` and `i`, so results do
/// not depend on scheduling.
pub fn generate_games_with<F>(params: &SelfPlayParams, on_game: F) -> Vec<GameRecord>
where
    F: Fn(&GameRecord) + Sync,
{
    (0..params.games).into_par_iter().map(|gi| {
        let record = play_game(params, gi);
        on_game(&record);
        record
    }).collect()
}

fn play_game(params: &SelfPlayParams, index: usize) -> GameRecord {
    let mut rng = SmallRng::seed_from_u64(params.seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let mut board = Board::new();
    let mut record = GameRecord { opening: None, moves: Vec::new(), outcome: Outcome::Unfinished, white_score: 0, black_score: 0 };

    if params.use_openings {
        let opening = get_opening(rng.gen::<u32>() as usize);
        for text in &opening.moves {
            if let Err(e) = board.play(text) {
                warn!("opening {}: {text} rejected ({e}), continuing from ply {}", opening.name, record.moves.len());
                break;
            }
            record.moves.push(text.clone());
        }
        record.opening = Some(opening.name);
    }

    while record.moves.len() < params.max_plies {
        let moves = board.legal_moves();
        if moves.is_empty() { break; }
        let mv = moves[rng.gen_range(0..moves.len())];
        let mut choice = None;
        let mut text = mv.to_string();
        if mv.special == Special::Promotion {
            let p = Promotion::ALL[rng.gen_range(0..Promotion::ALL.len())];
            text.push(p.to_char());
            choice = Some(p);
        }
        board.move_piece_with(mv, &mut choice);
        record.moves.push(text);
    }

    record.outcome = classify(&board);
    record.white_score = board.player(Colour::White).score;
    record.black_score = board.player(Colour::Black).score;
    debug!("game {index}: {} plies, {:?}", record.moves.len(), record.outcome);
    record
}

/// Outcome of the final position, including one reached on the last
/// allowed ply.
fn classify(board: &Board) -> Outcome {
    match board.status() {
        GameStatus::Checkmate { winner: Colour::White } => Outcome::WhiteCheckmates,
        GameStatus::Checkmate { .. } => Outcome::BlackCheckmates,
        GameStatus::Stalemate => Outcome::Stalemate,
        GameStatus::Ongoing | GameStatus::Check => Outcome::Unfinished,
    }
}

/// One JSON object per line.
pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> std::io::Result<()> {
    if let Some(dir) = path.as_ref().parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    let mut w = BufWriter::new(File::create(&path)?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    info!("wrote {} games to {}", games.len(), path.as_ref().display());
    Ok(())
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<GameRecord>> {
    let rdr = BufReader::new(File::open(path)?);
    let mut games = Vec::new();
    for line in rdr.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        games.push(serde_json::from_str(&line)?);
    }
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn after(moves: &[&str]) -> Board {
        let mut board = Board::new();
        for m in moves { board.play(m).unwrap(); }
        board
    }

    #[test]
    fn mate_on_the_last_ply_is_not_unfinished() {
        // Fool's mate ends on ply 4, exactly at a cap of 4.
        let board = after(&["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(classify(&board), Outcome::BlackCheckmates);
    }

    #[test]
    fn classify_covers_each_ending() {
        assert_eq!(classify(&Board::new()), Outcome::Unfinished);
        let stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(classify(&stalemate), Outcome::Stalemate);
        let scholars = after(&["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"]);
        assert_eq!(classify(&scholars), Outcome::WhiteCheckmates);
    }

    #[test]
    fn zero_ply_cap_leaves_the_game_unfinished() {
        let params = SelfPlayParams { games: 1, max_plies: 0, ..SelfPlayParams::default() };
        let record = play_game(&params, 0);
        assert!(record.moves.is_empty());
        assert_eq!(record.outcome, Outcome::Unfinished);
    }
}
