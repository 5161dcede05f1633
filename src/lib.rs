//! Boxes-Bot: a dots-and-boxes decision engine.
//!
//! Each turn the engine receives the open sides of every box on an N×N
//! grid and picks one side to remove. Early on, moves are scored one ply
//! deep so that boxes are completed and chains are not handed over. Once
//! every move gives something away, the engine opens the smallest chain.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, heuristic weights, search defaults
//! - [`board`] - Directions, side sets and the box grid
//! - [`state`] - Scores and the move rule (mirrored side removal, captures)
//! - [`chains`] - Chain phase detection and corridor flood fill
//! - [`heuristic`] - One-ply move scoring
//! - [`minimax`] - Fixed-depth minimax and alpha-beta search
//! - [`selector`] - Per-turn move choice
//! - [`protocol`] - Text protocol adapter and turn loop
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use boxes_bot::board::{Board, Direction};
//! use boxes_bot::selector::{EndgameStrategy, decide_move};
//! use boxes_bot::state::GameState;
//! use boxes_bot::minimax::minimax;
//!
//! // A fresh 3x3 game with one side already gone
//! let mut state = GameState::new(Board::full(3), 0, 0);
//! state.play_side(1, 1, Direction::Up);
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let chosen = decide_move(&state.board, EndgameStrategy::SmallestCorridor, &mut rng).unwrap();
//! println!("Best move: {} (score {})", chosen.mv, chosen.score);
//! println!("Minimax value: {}", minimax(&state, 1, true));
//! ```

pub mod board;
pub mod chains;
pub mod constants;
pub mod error;
pub mod heuristic;
pub mod minimax;
pub mod protocol;
pub mod selector;
pub mod state;
