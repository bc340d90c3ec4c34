//! Headless driver for the 2048 engine: replays scripted games and runs self-play.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use twenty48_core::{GameConfig, SpawnDistribution};
use twenty48_protocol::{ReplayReport, ReplayScript, run_replay};

mod play;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Print the final report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a list of moves on a seeded game
    Replay {
        #[command(flatten)]
        game: GameArgs,

        /// Moves as letters or words, e.g. "LLUR" or "left up"
        #[arg(short, long, conflicts_with = "script")]
        moves: Option<String>,

        /// JSON replay script, its seed and config override the flags
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,
    },
    /// Let a fixed-priority policy play until no move is left
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// Stop after this many turns even if moves remain
        #[arg(long, value_name = "N", default_value_t = 100_000)]
        max_turns: usize,
    },
}

#[derive(Args, Debug)]
struct GameArgs {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Side length of the grid
    #[arg(long, default_value_t = twenty48_core::DEFAULT_GRID_SIZE)]
    size: u8,

    /// Odds of spawning a 4 instead of a 2
    #[arg(long, value_enum, default_value_t = SpawnArg::Uniform)]
    spawn: SpawnArg,
}

impl GameArgs {
    fn config(&self) -> GameConfig {
        GameConfig::new(self.size, self.spawn.into())
    }

    fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SpawnArg {
    /// 2 and 4 equally likely
    Uniform,
    /// 2 nine times out of ten
    Classic,
}

impl From<SpawnArg> for SpawnDistribution {
    fn from(arg: SpawnArg) -> Self {
        match arg {
            SpawnArg::Uniform => Self::Uniform,
            SpawnArg::Classic => Self::Classic,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let report = match cli.command {
        Command::Replay {
            game,
            moves,
            script,
        } => {
            let script = match script {
                Some(path) => load_script(&path)?,
                None => ReplayScript::from_moves(
                    game.config(),
                    game.seed(),
                    moves.as_deref().unwrap_or_default(),
                )?,
            };
            log::info!(
                "replaying {} inputs with seed {}",
                script.inputs.len(),
                script.seed
            );
            run_replay(&script)?
        }
        Command::Play { game, max_turns } => {
            let seed = game.seed();
            log::info!("self-play with seed {}", seed);
            play::self_play(game.config(), seed, max_turns)
        }
    };

    print_report(&report, cli.json)
}

fn load_script(path: &Path) -> Result<ReplayScript> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read script {}", path.display()))?;
    ReplayScript::from_json(&json)
        .with_context(|| format!("Could not parse script {}", path.display()))
}

fn print_report(report: &ReplayReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("Could not encode report")?;
        println!("{text}");
        return Ok(());
    }

    print!("{}", report.snapshot);
    let stats = &report.stats;
    println!(
        "seed {} | {} turns, {} moves, {} blocked, {} merges, {} restarts | best tile {}",
        report.seed,
        stats.turns,
        stats.moves_applied,
        stats.blocked,
        stats.merges,
        stats.restarts,
        report.snapshot.max_tile(),
    );
    Ok(())
}
