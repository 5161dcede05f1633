//! Fixed-depth minimax over the move rule.
//!
//! The evaluation at the leaves is simply the score difference from the
//! player's point of view. Plies strictly alternate: on a maximizing ply
//! the player moves and is credited with completed boxes, on a minimizing
//! ply the opponent is.
//!
//! Branching is the number of open sides on the board, so only very small
//! depths are affordable. [`Search`] runs the alpha-beta variant under an
//! optional deadline and gives up cleanly when it passes; every child is
//! an independent copy, so an aborted search leaves nothing to undo.

use std::time::{Duration, Instant};

use crate::constants::DEADLINE_CHECK_PERIOD;
use crate::state::{GameState, Move};

fn is_terminal(state: &GameState, depth: u8) -> bool {
    depth == 0 || state.board.is_fully_captured()
}

/// Every position reachable in one move, with the mover credited for
/// captures.
fn children(state: &GameState, maximizing: bool) -> impl Iterator<Item = GameState> + '_ {
    state
        .board
        .legal_moves()
        .map(move |m| state.child(Move::from(m), maximizing))
}

/// Plain minimax with full enumeration.
pub fn minimax(state: &GameState, depth: u8, maximizing: bool) -> i32 {
    if is_terminal(state, depth) {
        return state.score_diff();
    }

    if maximizing {
        children(state, true)
            .map(|child| minimax(&child, depth - 1, false))
            .max()
            .unwrap_or_else(|| state.score_diff())
    } else {
        children(state, false)
            .map(|child| minimax(&child, depth - 1, true))
            .min()
            .unwrap_or_else(|| state.score_diff())
    }
}

/// Minimax with alpha-beta pruning. Returns the same value as
/// [`minimax`] when called with the full `(i32::MIN, i32::MAX)` window.
pub fn alpha_beta(state: &GameState, depth: u8, mut alpha: i32, mut beta: i32, maximizing: bool) -> i32 {
    if is_terminal(state, depth) {
        return state.score_diff();
    }

    if maximizing {
        let mut value = i32::MIN;
        for child in children(state, true) {
            value = value.max(alpha_beta(&child, depth - 1, alpha, beta, false));
            alpha = alpha.max(value);
            if alpha >= beta {
                break;
            }
        }
        value
    } else {
        let mut value = i32::MAX;
        for child in children(state, false) {
            value = value.min(alpha_beta(&child, depth - 1, alpha, beta, true));
            beta = beta.min(value);
            if alpha >= beta {
                break;
            }
        }
        value
    }
}

/// Statistics of the last [`Search::evaluate`] call.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Positions visited, leaves included
    pub nodes: u64,
    /// Wall-clock time spent
    pub elapsed: Duration,
    /// Whether the deadline cut the search short
    pub aborted: bool,
}

/// Deadline-aware alpha-beta driver.
#[derive(Debug, Default)]
pub struct Search {
    deadline: Option<Instant>,
    stats: SearchStats,
}

impl Search {
    /// A search without a time limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// A search that gives up `budget` from now.
    pub fn with_budget(budget: Duration) -> Self {
        Self::with_deadline(Instant::now() + budget)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Evaluate `state` to `depth` plies with the player to move.
    ///
    /// Returns `None` if the deadline passed before the search finished.
    pub fn evaluate(&mut self, state: &GameState, depth: u8) -> Option<i32> {
        let start = Instant::now();
        self.stats = SearchStats::default();
        let value = self.search(state, depth, i32::MIN, i32::MAX, true);
        self.stats.elapsed = start.elapsed();
        self.stats.aborted = value.is_none();
        value
    }

    fn out_of_time(&self) -> bool {
        self.stats.nodes % DEADLINE_CHECK_PERIOD == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn search(&mut self, state: &GameState, depth: u8, mut alpha: i32, mut beta: i32, maximizing: bool) -> Option<i32> {
        if self.out_of_time() {
            return None;
        }
        self.stats.nodes += 1;

        if is_terminal(state, depth) {
            return Some(state.score_diff());
        }

        let mut value = if maximizing { i32::MIN } else { i32::MAX };
        for child in children(state, maximizing) {
            let child_value = self.search(&child, depth - 1, alpha, beta, !maximizing)?;
            if maximizing {
                value = value.max(child_value);
                alpha = alpha.max(value);
            } else {
                value = value.min(child_value);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }
        Some(value)
    }
}
