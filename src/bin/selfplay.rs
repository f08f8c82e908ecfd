use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use knook::selfplay::{generate_games_with, write_jsonl, Outcome, SelfPlayParams};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "knook-selfplay", about = "Play random legal games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 200)]
    max_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Start each game from a random built-in opening line
    #[arg(long)]
    openings: bool,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
    /// Re-validate every written game by replaying it
    #[arg(long)]
    verify: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let params = SelfPlayParams { games: a.games, max_plies: a.max_plies, seed: a.seed, use_openings: a.openings };

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games ({elapsed})").context("progress template")?);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads.max(1)).build().context("thread pool")?;
    let games = pool.install(|| generate_games_with(&params, |_| pb.inc(1)));
    pb.finish();

    let count = |o: Outcome| games.iter().filter(|g| g.outcome == o).count();
    info!(
        "white mates: {}, black mates: {}, stalemates: {}, unfinished: {}",
        count(Outcome::WhiteCheckmates), count(Outcome::BlackCheckmates), count(Outcome::Stalemate), count(Outcome::Unfinished)
    );

    if a.verify {
        for (i, g) in games.iter().enumerate() {
            g.replay().with_context(|| format!("game {i} failed to replay"))?;
        }
        info!("replayed {} games", games.len());
    }

    write_jsonl(&games, &a.out).with_context(|| format!("writing {}", a.out.display()))?;
    eprintln!("Wrote {} games to {}", games.len(), a.out.display());
    Ok(())
}
