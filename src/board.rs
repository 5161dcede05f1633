//! Box grid representation.
//!
//! Each box keeps the set of its sides that are still open. Removing a
//! side only touches the addressed box; mirroring the removal onto the
//! adjacent box is the job of [`GameState::play_side`](crate::state::GameState::play_side).
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row, row 0 at
//! the bottom. `Up` points towards larger `y`.

use std::fmt;

use crate::constants::{SIDE_BOTTOM, SIDE_LEFT, SIDE_RIGHT, SIDE_TOP, SIDES_PER_BOX};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in scan order.
    pub const ALL: [Direction; SIDES_PER_BOX] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Coordinate offset `(dx, dy)` of the neighbor across this side.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Protocol letter (`T`, `B`, `L`, `R`).
    pub fn letter(self) -> char {
        match self {
            Direction::Up => SIDE_TOP,
            Direction::Down => SIDE_BOTTOM,
            Direction::Left => SIDE_LEFT,
            Direction::Right => SIDE_RIGHT,
        }
    }

    pub fn from_letter(c: char) -> Option<Direction> {
        match c {
            SIDE_TOP => Some(Direction::Up),
            SIDE_BOTTOM => Some(Direction::Down),
            SIDE_LEFT => Some(Direction::Left),
            SIDE_RIGHT => Some(Direction::Right),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Set of open sides of one box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sides(u8);

impl Sides {
    pub const NONE: Sides = Sides(0);
    pub const ALL: Sides = Sides(0b1111);

    pub fn contains(self, d: Direction) -> bool {
        self.0 & d.bit() != 0
    }

    pub fn insert(&mut self, d: Direction) {
        self.0 |= d.bit();
    }

    pub fn remove(&mut self, d: Direction) {
        self.0 &= !d.bit();
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Open directions in [`Direction::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }

    /// Parse a protocol side string such as `"LT"`. Returns the first
    /// unknown character on failure.
    pub fn parse(s: &str) -> Result<Sides, char> {
        let mut sides = Sides::NONE;
        for c in s.chars() {
            sides.insert(Direction::from_letter(c).ok_or(c)?);
        }
        Ok(sides)
    }
}

impl FromIterator<Direction> for Sides {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut sides = Sides::NONE;
        for d in iter {
            sides.insert(d);
        }
        sides
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.iter() {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Square grid of boxes. `Clone` is a full deep copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub size: usize,
    cells: Vec<Sides>,
}

impl Board {
    /// A board where every box is already captured.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Sides::NONE; size * size],
        }
    }

    /// A fresh game: every side of every box is open.
    pub fn full(size: usize) -> Self {
        Self {
            size,
            cells: vec![Sides::ALL; size * size],
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.size && y < self.size,
            "box ({x}, {y}) is outside a {0}x{0} board",
            self.size
        );
        y * self.size + x
    }

    pub fn open_sides(&self, x: usize, y: usize) -> Sides {
        self.cells[self.idx(x, y)]
    }

    pub fn set_open_sides(&mut self, x: usize, y: usize, sides: Sides) {
        let i = self.idx(x, y);
        self.cells[i] = sides;
    }

    pub fn open_count(&self, x: usize, y: usize) -> usize {
        self.open_sides(x, y).len()
    }

    pub fn has_open_side(&self, x: usize, y: usize, d: Direction) -> bool {
        self.open_sides(x, y).contains(d)
    }

    /// Remove side `d` of box `(x, y)`.
    ///
    /// Returns `true` if this closed the last open side (the box is
    /// captured). Panics if the side was already closed.
    pub fn remove_side(&mut self, x: usize, y: usize, d: Direction) -> bool {
        let i = self.idx(x, y);
        assert!(
            self.cells[i].contains(d),
            "cannot remove side {d} of box ({x}, {y}): already closed"
        );
        self.cells[i].remove(d);
        self.cells[i].is_empty()
    }

    /// Coordinates of the box across side `d`, and the side of that box
    /// facing back. The result may be off the board.
    pub fn neighbor_of(x: usize, y: usize, d: Direction) -> (isize, isize, Direction) {
        let (dx, dy) = d.offset();
        (x as isize + dx, y as isize + dy, d.opposite())
    }

    pub fn is_in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    /// In-bounds neighbor across side `d`, if any.
    pub fn neighbor(&self, x: usize, y: usize, d: Direction) -> Option<(usize, usize, Direction)> {
        let (nx, ny, nd) = Self::neighbor_of(x, y, d);
        self.is_in_bounds(nx, ny)
            .then_some((nx as usize, ny as usize, nd))
    }

    /// Iterate over `(x, y, open sides)` for every box, bottom row first.
    pub fn boxes(&self) -> impl Iterator<Item = (usize, usize, Sides)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &s)| (i % self.size, i / self.size, s))
    }

    /// Every legal move, in scan order.
    pub fn legal_moves(&self) -> impl Iterator<Item = (usize, usize, Direction)> + '_ {
        self.boxes()
            .flat_map(|(x, y, sides)| sides.iter().map(move |d| (x, y, d)))
    }

    /// First open side whose in-bounds neighbor lacks the mirrored side.
    pub fn first_unmirrored_side(&self) -> Option<(usize, usize, Direction)> {
        self.legal_moves().find(|&(x, y, d)| {
            self.neighbor(x, y, d)
                .is_some_and(|(nx, ny, nd)| !self.has_open_side(nx, ny, nd))
        })
    }

    pub fn total_open_sides(&self) -> usize {
        self.cells.iter().map(|s| s.len()).sum()
    }

    pub fn is_fully_captured(&self) -> bool {
        self.cells.iter().all(|s| s.is_empty())
    }
}

/// Open-side counts, top row first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size).rev() {
            for x in 0..self.size {
                write!(f, "{}", self.open_count(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
