//! Boxes-Bot: a dots-and-boxes engine.
//!
//! ## Usage
//!
//! - `boxes-bot` - Play a game over stdin/stdout
//! - `boxes-bot play --seed 7 --endgame minimize-giveaway` - Same, with options
//! - `boxes-bot demo` - Play a short self-game on an empty board
//!
//! Diagnostics go to stderr; set `RUST_LOG=debug` to see board dumps.

use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use boxes_bot::board::Board;
use boxes_bot::chains::{compute_corridors, has_reached_mid_state};
use boxes_bot::constants::{DEFAULT_SEARCH_DEPTH, DEFAULT_TIME_BUDGET_MS};
use boxes_bot::minimax::Search;
use boxes_bot::protocol::Engine;
use boxes_bot::selector::{EndgameStrategy, EngineConfig, decide_move};
use boxes_bot::state::GameState;

/// Boxes-Bot: a dots-and-boxes engine
#[derive(Parser)]
#[command(name = "boxes-bot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    opts: EngineOpts,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game over the text protocol on stdin/stdout
    Play,
    /// Let the engine play both sides of a game and print each move
    Demo {
        /// Board size of the demo game
        #[arg(long, default_value_t = 3)]
        size: usize,
    },
}

#[derive(Args)]
struct EngineOpts {
    /// Depth of the diagnostic minimax evaluation (0 disables it)
    #[arg(long, global = true, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,

    /// Time budget for the diagnostic evaluation, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIME_BUDGET_MS)]
    time_budget_ms: u64,

    /// Endgame strategy: smallest-corridor or minimize-giveaway
    #[arg(long, global = true, default_value_t = EndgameStrategy::SmallestCorridor)]
    endgame: EndgameStrategy,

    /// Seed for tie-breaking between equally scored moves
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Free text appended to every answer line
    #[arg(long, global = true)]
    message: Option<String>,
}

impl EngineOpts {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            search_depth: self.depth,
            time_budget_ms: self.time_budget_ms,
            endgame: self.endgame,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play) | None => run_play(&cli.opts),
        Some(Commands::Demo { size }) => run_demo(&cli.opts, size),
    }
}

fn run_play(opts: &EngineOpts) -> anyhow::Result<()> {
    let config = opts.config();
    let mut engine = match opts.seed {
        Some(seed) => Engine::with_seed(config, seed),
        None => Engine::new(config),
    };
    if let Some(message) = &opts.message {
        engine = engine.with_message(message.clone());
    }

    let stdin = io::stdin();
    engine
        .run(stdin.lock(), io::stdout())
        .context("game aborted")
}

fn run_demo(opts: &EngineOpts, size: usize) -> anyhow::Result<()> {
    anyhow::ensure!(
        (1..=boxes_bot::constants::MAX_BOARD_SIZE).contains(&size),
        "demo board size must be between 1 and {}",
        boxes_bot::constants::MAX_BOARD_SIZE
    );

    println!("Boxes-Bot: dots-and-boxes self-play on a {size}x{size} board\n");

    let mut rng = match opts.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut state = GameState::new(Board::full(size), 0, 0);
    let mut mover = 'A';
    let mut chain_phase = false;

    while !state.board.is_fully_captured() {
        if !chain_phase && has_reached_mid_state(&state.board) {
            chain_phase = true;
            println!("\nChain phase reached:\n{}", compute_corridors(&state.board));
            let mut search = Search::with_budget(Duration::from_millis(opts.time_budget_ms));
            match search.evaluate(&state, opts.depth) {
                Some(v) => info!("minimax value at depth {}: {v}", opts.depth),
                None => warn!("minimax at depth {} ran out of time", opts.depth),
            }
        }

        let chosen = decide_move(&state.board, opts.endgame, &mut rng)
            .context("engine found no move on a live board")?;
        state.my_turn = mover == 'A';
        let completed = state.play(chosen.mv);
        println!("{mover}: {} (score {}, completed {completed})", chosen.mv, chosen.score);

        // Completing a box earns another move.
        if completed == 0 {
            mover = if mover == 'A' { 'B' } else { 'A' };
        }
    }

    println!("\nA {} - B {}", state.player_score, state.opponent_score);
    Ok(())
}
