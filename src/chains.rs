//! Endgame chain analysis.
//!
//! Once no safe move is left, every move opens some chain of boxes that
//! the opponent can then eat in one go. This module detects that phase
//! and splits the open boxes into corridors so the selector can hand over
//! the smallest one.

use std::fmt;

use crate::board::Board;
use crate::state::GameState;

/// Check whether the game has entered the chain phase.
///
/// Returns `false` if some box has exactly one open side (a free capture
/// is still on the table), or if some box with three or four open sides
/// looks into an in-bounds neighbor that also has more than two. Boxes
/// with zero or two open sides never disqualify.
pub fn has_reached_mid_state(board: &Board) -> bool {
    for (x, y, sides) in board.boxes() {
        match sides.len() {
            0 | 2 => continue,
            1 => return false,
            _ => {
                for d in sides.iter() {
                    if let Some((nx, ny, _)) = board.neighbor(x, y, d) {
                        if board.open_count(nx, ny) > 2 {
                            return false;
                        }
                    }
                }
            }
        }
    }
    true
}

/// Region ids for every box of a board. `None` means the box belongs to
/// no corridor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorridorColoring {
    size: usize,
    colors: Vec<Option<usize>>,
    region_count: usize,
}

impl CorridorColoring {
    fn uncolored(size: usize) -> Self {
        Self {
            size,
            colors: vec![None; size * size],
            region_count: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn color(&self, x: usize, y: usize) -> Option<usize> {
        assert!(x < self.size && y < self.size, "box ({x}, {y}) is outside the coloring");
        self.colors[y * self.size + x]
    }

    pub fn region_count(&self) -> usize {
        self.region_count
    }

    /// Number of boxes in each region, indexed by region id.
    pub fn region_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.region_count];
        for c in self.colors.iter().flatten() {
            sizes[*c] += 1;
        }
        sizes
    }

    /// Smallest region as `(id, size)`. Ties go to the lowest id.
    pub fn best_color(&self) -> Option<(usize, usize)> {
        self.region_sizes()
            .into_iter()
            .enumerate()
            .min_by_key(|&(id, size)| (size, id))
    }
}

/// Region ids, top row first, `.` for uncolored boxes.
impl fmt::Display for CorridorColoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size).rev() {
            for x in 0..self.size {
                match self.color(x, y) {
                    Some(c) => write!(f, "{c}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn in_corridor(board: &Board, x: usize, y: usize) -> bool {
    matches!(board.open_count(x, y), 1 | 2)
}

/// Partition boxes with one or two open sides into connected corridors.
///
/// Two such boxes are linked when one has an open side towards the other
/// and the other has the mirrored side open. Every flood fill gets the
/// next id, starting from 0.
pub fn compute_corridors(board: &Board) -> CorridorColoring {
    let mut coloring = CorridorColoring::uncolored(board.size);
    let mut stack = Vec::new();

    for (sx, sy, _) in board.boxes() {
        if !in_corridor(board, sx, sy) || coloring.colors[sy * board.size + sx].is_some() {
            continue;
        }

        let color = coloring.region_count;
        coloring.region_count += 1;
        coloring.colors[sy * board.size + sx] = Some(color);
        stack.push((sx, sy));

        while let Some((x, y)) = stack.pop() {
            for d in board.open_sides(x, y).iter() {
                let Some((nx, ny, nd)) = board.neighbor(x, y, d) else {
                    continue;
                };
                let ni = ny * board.size + nx;
                if coloring.colors[ni].is_none()
                    && in_corridor(board, nx, ny)
                    && board.has_open_side(nx, ny, nd)
                {
                    coloring.colors[ni] = Some(color);
                    stack.push((nx, ny));
                }
            }
        }
    }

    coloring
}

/// Let the opponent eat every box that has a single open side, over and
/// over, until none is left. Returns the boxes captured on the way as a
/// coloring (all with id 0), and the state after the cascade.
pub fn cascade_coloring(state: &GameState) -> (CorridorColoring, GameState) {
    let mut after = state.clone();
    after.my_turn = false;
    let size = after.board.size;

    let mut found = true;
    while found {
        found = false;
        for y in 0..size {
            for x in 0..size {
                let sides = after.board.open_sides(x, y);
                if sides.len() != 1 {
                    continue;
                }
                if let Some(d) = sides.iter().next() {
                    found = true;
                    after.play_side(x, y, d);
                }
            }
        }
    }

    let mut coloring = CorridorColoring::uncolored(size);
    for (x, y, sides) in state.board.boxes() {
        if !sides.is_empty() && after.board.open_sides(x, y).is_empty() {
            coloring.colors[y * size + x] = Some(0);
            coloring.region_count = 1;
        }
    }
    (coloring, after)
}

/// Number of boxes the opponent collects by forced captures from here.
pub fn forced_capture_count(state: &GameState) -> usize {
    let (coloring, _) = cascade_coloring(state);
    coloring.region_sizes().first().copied().unwrap_or(0)
}
