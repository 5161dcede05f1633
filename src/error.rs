//! Error types.
//!
//! Broken invariants (closing a side twice, indexing off the board) are
//! programming errors and panic. The types here cover conditions a caller
//! can react to: running out of moves, and bad protocol input.

use std::io;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no legal move: every side of every box is closed")]
    NoLegalMove,
}

#[derive(thiserror::Error, Debug)]
pub enum ProtocolError {
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("invalid {what}: {token:?}")]
    InvalidToken { what: &'static str, token: String },

    #[error("board size {0} is not supported")]
    UnsupportedBoardSize(usize),

    #[error("box {0:?} is outside the board")]
    BoxOutOfBoard(String),

    #[error("unknown side letter {letter:?} for box {box_id}")]
    UnknownSide { box_id: String, letter: char },

    #[error("side {side} of box {box_id} is open but its mirror on the neighbor is not")]
    UnmirroredSide { box_id: String, side: char },

    #[error("scores {player}-{opponent} exceed the {captured} captured boxes")]
    InconsistentScores { player: u8, opponent: u8, captured: usize },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
