//! Constants for board limits, heuristic weights, and search defaults.
//!
//! The board size itself is read from the protocol header at runtime, so
//! only its upper bound lives here. Everything tunable at the command line
//! has its default here as well.

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest supported board. A box id is one column letter plus one row
/// digit (`'1'..='9'`), which caps the protocol at 9 rows.
pub const MAX_BOARD_SIZE: usize = 9;

/// Number of sides of a box.
pub const SIDES_PER_BOX: usize = 4;

// =============================================================================
// Heuristic Scores
// =============================================================================

/// Playing the last open side of a box completes it.
pub const SCORE_COMPLETE: i32 = 100;

/// Leaving a box with two open sides hands the opponent a capture.
pub const SCORE_SACRIFICE: i32 = -90;

/// Completing our box while the neighbor drops to two sides.
pub const SCORE_COMPLETE_AND_SETUP: i32 = 150;

/// Boxes with three or four open sides are neutral.
pub const SCORE_NEUTRAL: i32 = 0;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default minimax depth for the per-turn diagnostic evaluation.
pub const DEFAULT_SEARCH_DEPTH: u8 = 2;

/// Default wall-clock budget for the diagnostic search, in milliseconds.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 50;

/// Number of visited nodes between two deadline checks.
pub const DEADLINE_CHECK_PERIOD: u64 = 256;

// =============================================================================
// Protocol Letters
// =============================================================================

/// Side letter for [`Direction::Up`](crate::board::Direction::Up).
pub const SIDE_TOP: char = 'T';

/// Side letter for [`Direction::Down`](crate::board::Direction::Down).
pub const SIDE_BOTTOM: char = 'B';

/// Side letter for [`Direction::Left`](crate::board::Direction::Left).
pub const SIDE_LEFT: char = 'L';

/// Side letter for [`Direction::Right`](crate::board::Direction::Right).
pub const SIDE_RIGHT: char = 'R';
