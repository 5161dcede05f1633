//! One-ply move scoring for the opening and middle game.
//!
//! A move is judged only by the open-side counts of the two boxes it
//! touches, before the side is removed:
//!
//! | own box | contribution |
//! |---|---|
//! | 4 or 3 | 0 |
//! | 2 | -90 |
//! | 1 | +100 |
//!
//! | neighbor | contribution |
//! |---|---|
//! | 4 or 3 | 0 |
//! | 1 | +100 |
//! | 2, own box at 1 | +150 |
//! | 2, otherwise | -90 |

use crate::board::{Board, Direction};
use crate::constants::{SCORE_COMPLETE, SCORE_COMPLETE_AND_SETUP, SCORE_NEUTRAL, SCORE_SACRIFICE};
use crate::error::EngineError;
use crate::state::Move;

/// A move together with the score that got it picked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Contribution of the box the move is played into.
fn own_contribution(own_count: usize) -> i32 {
    match own_count {
        1 => SCORE_COMPLETE,
        2 => SCORE_SACRIFICE,
        _ => SCORE_NEUTRAL,
    }
}

/// Contribution of the box across the played side.
fn neighbor_contribution(own_count: usize, neighbor_count: usize) -> i32 {
    match neighbor_count {
        1 => SCORE_COMPLETE,
        2 if own_count == 1 => SCORE_COMPLETE_AND_SETUP,
        2 => SCORE_SACRIFICE,
        _ => SCORE_NEUTRAL,
    }
}

/// Score removing side `d` of box `(x, y)`. Does not modify the board.
pub fn score_move(board: &Board, x: usize, y: usize, d: Direction) -> i32 {
    let own_count = board.open_count(x, y);
    let mut score = own_contribution(own_count);

    if let Some((nx, ny, _)) = board.neighbor(x, y, d) {
        score += neighbor_contribution(own_count, board.open_count(nx, ny));
    }

    score
}

/// Score every legal move and pick one of the best at random.
pub fn find_action(board: &Board, rng: &mut fastrand::Rng) -> Result<ScoredMove, EngineError> {
    let scored: Vec<ScoredMove> = board
        .legal_moves()
        .map(|(x, y, d)| ScoredMove {
            mv: Move::new(x, y, d),
            score: score_move(board, x, y, d),
        })
        .collect();

    let best_score = scored
        .iter()
        .map(|s| s.score)
        .max()
        .ok_or(EngineError::NoLegalMove)?;

    let bests: Vec<ScoredMove> = scored
        .into_iter()
        .filter(|s| s.score == best_score)
        .collect();

    Ok(bests[rng.usize(..bests.len())])
}
