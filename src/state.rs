//! Game state and move application.
//!
//! A [`GameState`] is a [`Board`] plus both running scores and a flag
//! telling who gets the point when a box is completed. Playing a side
//! removes it from the addressed box and, when the neighbor is on the
//! board, the mirrored side from the neighbor too. One move can therefore
//! complete zero, one or two boxes.

use std::fmt;

use crate::board::{Board, Direction};

/// A single side removal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub x: usize,
    pub y: usize,
    pub dir: Direction,
}

impl Move {
    pub fn new(x: usize, y: usize, dir: Direction) -> Self {
        Self { x, y, dir }
    }

    /// Box id in protocol form, e.g. `"B3"`.
    pub fn box_id(&self) -> String {
        box_id(self.x, self.y)
    }
}

impl From<(usize, usize, Direction)> for Move {
    fn from((x, y, dir): (usize, usize, Direction)) -> Self {
        Self { x, y, dir }
    }
}

/// Protocol rendering: `"<column><row> <side>"`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.box_id(), self.dir)
    }
}

/// Convert a box coordinate to its protocol id (`'A' + x`, `'1' + y`).
pub fn box_id(x: usize, y: usize) -> String {
    let col = (b'A' + x as u8) as char;
    let row = (b'1' + y as u8) as char;
    format!("{col}{row}")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub player_score: u8,
    pub opponent_score: u8,
    /// Completed boxes are credited to the player when set, to the
    /// opponent otherwise.
    pub my_turn: bool,
}

impl GameState {
    pub fn new(board: Board, player_score: u8, opponent_score: u8) -> Self {
        Self {
            board,
            player_score,
            opponent_score,
            my_turn: true,
        }
    }

    /// Score difference from the player's point of view.
    pub fn score_diff(&self) -> i32 {
        i32::from(self.player_score) - i32::from(self.opponent_score)
    }

    fn credit_mover(&mut self) {
        if self.my_turn {
            self.player_score += 1;
        } else {
            self.opponent_score += 1;
        }
    }

    /// Remove side `dir` of box `(x, y)` and its mirror on the neighbor.
    ///
    /// Returns the number of boxes completed by this move, each credited
    /// to the current mover. Panics if the side is not open, or if the
    /// in-bounds neighbor lacks the mirrored side.
    pub fn play_side(&mut self, x: usize, y: usize, dir: Direction) -> u8 {
        let mut completed = 0;

        if self.board.remove_side(x, y, dir) {
            self.credit_mover();
            completed += 1;
        }

        if let Some((nx, ny, nd)) = self.board.neighbor(x, y, dir) {
            if self.board.remove_side(nx, ny, nd) {
                self.credit_mover();
                completed += 1;
            }
        }

        completed
    }

    pub fn play(&mut self, mv: Move) -> u8 {
        self.play_side(mv.x, mv.y, mv.dir)
    }

    /// Copy of this state with `mv` applied by the given mover.
    pub fn child(&self, mv: Move, my_turn: bool) -> GameState {
        let mut next = self.clone();
        next.my_turn = my_turn;
        next.play(mv);
        next
    }
}
