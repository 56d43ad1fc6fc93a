//! Grid coordinates and their two-character notation.
//!
//! A cell is written as a column letter `a`-`i` followed by a row digit
//! `1`-`9`, so row index 0 is `?1` and column index 4 is `e?`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::IllegalReason;

/// Width and height of the board.
pub const SIZE: usize = 9;

/// A square on the 9x9 board, identified by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Creates a cell. Coordinates outside the board are a programming error.
    pub fn new(row: usize, col: usize) -> Self {
        assert!(row < SIZE && col < SIZE, "cell ({row}, {col}) is off the board");
        Cell { row, col }
    }

    /// Creates a cell from signed coordinates, or `None` when off the board.
    pub fn checked(row: isize, col: isize) -> Option<Self> {
        if (0..SIZE as isize).contains(&row) && (0..SIZE as isize).contains(&col) {
            Some(Cell {
                row: row as usize,
                col: col as usize,
            })
        } else {
            None
        }
    }

    /// Row-major index in `0..81`.
    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    pub fn from_index(index: usize) -> Self {
        Cell::new(index / SIZE, index % SIZE)
    }

    /// The adjacent cell in `dir`, ignoring walls.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.delta();
        Cell::checked(self.row as isize + dr, self.col as isize + dc)
    }

    /// Direction of a grid-adjacent cell, or `None` if `other` is not adjacent.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&d| self.step(d) == Some(other))
    }

    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn all() -> impl Iterator<Item = Cell> {
        (0..SIZE * SIZE).map(Cell::from_index)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col_letter = (b'a' + self.col as u8) as char;
        write!(f, "{}{}", col_letter, self.row + 1)
    }
}

impl FromStr for Cell {
    type Err = IllegalReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(IllegalReason::Malformed);
        }
        let (letter, digit) = (bytes[0], bytes[1]);
        if !(b'a'..b'a' + SIZE as u8).contains(&letter) || !(b'1'..b'1' + SIZE as u8).contains(&digit) {
            return Err(IllegalReason::Malformed);
        }
        Ok(Cell::new((digit - b'1') as usize, (letter - b'a') as usize))
    }
}

/// One of the four sides of a cell.
///
/// The discriminant is the bit used in a cell's wall mask: north is `0x1`,
/// south `0x2`, east `0x4` and west `0x8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    South = 1,
    East = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn bit(self) -> u8 {
        1 << self as u8
    }

    /// `(row, col)` offset; north decreases the row index.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::North | Direction::South => [Direction::East, Direction::West],
            Direction::East | Direction::West => [Direction::North, Direction::South],
        }
    }
}
