//! Per-turn move selection.
//!
//! Before the chain phase the one-ply heuristic picks the move. Once every
//! move gives something away, the selector decides which chain to open:
//! either the smallest corridor on the board, or the move after which the
//! opponent's forced captures are fewest.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::board::Board;
use crate::chains::{compute_corridors, forced_capture_count, has_reached_mid_state};
use crate::constants::{DEFAULT_SEARCH_DEPTH, DEFAULT_TIME_BUDGET_MS};
use crate::error::EngineError;
use crate::heuristic::{ScoredMove, find_action};
use crate::state::{GameState, Move};

/// How to pick a move once the chain phase is reached.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EndgameStrategy {
    /// Open the corridor with the fewest boxes.
    #[default]
    SmallestCorridor,
    /// Simulate every move and keep the one that lets the opponent
    /// capture the fewest boxes by force.
    MinimizeGiveaway,
}

impl FromStr for EndgameStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smallest-corridor" => Ok(EndgameStrategy::SmallestCorridor),
            "minimize-giveaway" => Ok(EndgameStrategy::MinimizeGiveaway),
            _ => Err(format!(
                "unknown endgame strategy {s:?} (expected smallest-corridor or minimize-giveaway)"
            )),
        }
    }
}

impl fmt::Display for EndgameStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndgameStrategy::SmallestCorridor => write!(f, "smallest-corridor"),
            EndgameStrategy::MinimizeGiveaway => write!(f, "minimize-giveaway"),
        }
    }
}

/// Engine settings for one game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Depth of the diagnostic minimax evaluation (0 disables it)
    pub search_depth: u8,
    /// Time budget for that evaluation, in milliseconds
    pub time_budget_ms: u64,
    pub endgame: EndgameStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            time_budget_ms: DEFAULT_TIME_BUDGET_MS,
            endgame: EndgameStrategy::default(),
        }
    }
}

/// Choose the move to play on `board`.
pub fn decide_move(
    board: &Board,
    strategy: EndgameStrategy,
    rng: &mut fastrand::Rng,
) -> Result<ScoredMove, EngineError> {
    if has_reached_mid_state(board) {
        let chosen = match strategy {
            EndgameStrategy::SmallestCorridor => smallest_corridor_move(board),
            EndgameStrategy::MinimizeGiveaway => min_giveaway_move(board),
        };
        if let Some(chosen) = chosen {
            return Ok(chosen);
        }
        debug!("chain phase reached but no corridor found, falling back to heuristic");
    }
    find_action(board, rng)
}

/// First move, in scan order, inside the smallest corridor. The score is
/// the negated corridor size.
fn smallest_corridor_move(board: &Board) -> Option<ScoredMove> {
    let coloring = compute_corridors(board);
    debug!("corridors:\n{coloring}");

    let (color, size) = coloring.best_color()?;
    board
        .legal_moves()
        .find(|&(x, y, _)| coloring.color(x, y) == Some(color))
        .map(|m| ScoredMove {
            mv: Move::from(m),
            score: -(size as i32),
        })
}

/// First move, in scan order, that minimizes the opponent's forced
/// captures. The score is the negated capture count.
fn min_giveaway_move(board: &Board) -> Option<ScoredMove> {
    let state = GameState::new(board.clone(), 0, 0);
    let mut best: Option<(Move, usize)> = None;

    for m in board.legal_moves() {
        let mv = Move::from(m);
        let after = state.child(mv, true);
        let giveaway = forced_capture_count(&after);
        if best.is_none_or(|(_, count)| giveaway < count) {
            best = Some((mv, giveaway));
        }
    }

    best.map(|(mv, count)| ScoredMove {
        mv,
        score: -(count as i32),
    })
}
