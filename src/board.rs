//! The 9x9 cell graph with per-edge wall occlusion.
//!
//! Every cell keeps a 4-bit mask of its walled sides (see
//! [`Direction::bit`]), so neighbour and step queries are O(1). Placing or
//! removing a wall touches exactly the four cells it borders. The board does
//! no rule checking: callers validate walls before adding them.

use serde::Serialize;

use crate::cell::{Cell, Direction, SIZE};
use crate::path::{DistanceTree, PathCache};
use crate::player::Goal;
use crate::wall::{Orientation, Wall};

/// Presence masks of every wall slot, one bit per anchor and orientation.
///
/// Identifies a wall configuration independently of placement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct WallKey {
    pub horizontal: u64,
    pub vertical: u64,
}

impl WallKey {
    pub fn contains(&self, wall: Wall) -> bool {
        self.mask(wall.orientation) & wall.slot_bit() != 0
    }

    fn mask(&self, orientation: Orientation) -> u64 {
        match orientation {
            Orientation::Horizontal => self.horizontal,
            Orientation::Vertical => self.vertical,
        }
    }

    fn mask_mut(&mut self, orientation: Orientation) -> &mut u64 {
        match orientation {
            Orientation::Horizontal => &mut self.horizontal,
            Orientation::Vertical => &mut self.vertical,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    sides: [u8; SIZE * SIZE],
    walls: Vec<Wall>,
    key: WallKey,
    paths: PathCache,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            sides: [0; SIZE * SIZE],
            walls: Vec::new(),
            key: WallKey::default(),
            paths: PathCache::default(),
        }
    }

    /// Walled sides of `cell` as a `0000WESN` bit mask.
    pub fn wall_mask(&self, cell: Cell) -> u8 {
        self.sides[cell.index()]
    }

    pub fn wall_masks(&self) -> [[u8; SIZE]; SIZE] {
        let mut grid = [[0; SIZE]; SIZE];
        for cell in Cell::all() {
            grid[cell.row][cell.col] = self.wall_mask(cell);
        }
        grid
    }

    // oldest first
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn key(&self) -> WallKey {
        self.key
    }

    pub fn has_wall(&self, wall: Wall) -> bool {
        self.key.contains(wall)
    }

    /// Cells adjacent to `cell` and not separated from it by a wall.
    pub fn neighbors(&self, cell: Cell) -> Neighbors {
        let mut open = 0u8;
        for dir in Direction::ALL {
            if cell.step(dir).is_some() {
                open |= dir.bit();
            }
        }
        Neighbors {
            origin: cell,
            open: open & !self.wall_mask(cell),
        }
    }

    /// True iff `a` and `b` are grid-adjacent with no wall between them.
    pub fn can_step(&self, a: Cell, b: Cell) -> bool {
        match a.direction_to(b) {
            Some(dir) => self.wall_mask(a) & dir.bit() == 0,
            None => false,
        }
    }

    pub fn add_wall(&mut self, wall: Wall) {
        debug_assert!(!self.has_wall(wall), "{wall} placed twice");
        for (cell, dir) in wall.sides() {
            self.sides[cell.index()] |= dir.bit();
        }
        *self.key.mask_mut(wall.orientation) |= wall.slot_bit();
        self.walls.push(wall);
    }

    /// Reverses [`Board::add_wall`], restoring the four cell masks exactly.
    pub fn remove_wall(&mut self, wall: Wall) {
        let Some(at) = self.walls.iter().rposition(|&w| w == wall) else {
            panic!("{wall} removed but never placed");
        };
        self.walls.remove(at);
        for (cell, dir) in wall.sides() {
            self.sides[cell.index()] &= !dir.bit();
        }
        *self.key.mask_mut(wall.orientation) &= !wall.slot_bit();
    }

    /// Shortest walk from `start` to any cell of `goal`, both ends included.
    ///
    /// Empty if the goal is unreachable; `[start]` if `start` is already on
    /// the goal.
    pub fn path(&self, start: Cell, goal: Goal) -> Vec<Cell> {
        self.distance_tree(goal).path(start)
    }

    /// Number of steps on the shortest path, `None` if unreachable.
    pub fn distance(&self, start: Cell, goal: Goal) -> Option<usize> {
        self.distance_tree(goal).distance(start)
    }

    pub fn distance_tree(&self, goal: Goal) -> DistanceTree {
        self.paths.tree(self, goal)
    }
}

/// Iterator over the open neighbours of a cell, in N, S, E, W order.
#[derive(Debug, Clone)]
pub struct Neighbors {
    origin: Cell,
    open: u8,
}

impl Iterator for Neighbors {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while self.open != 0 {
            let bit = self.open.trailing_zeros() as usize;
            self.open &= self.open - 1;
            if let Some(cell) = self.origin.step(Direction::ALL[bit]) {
                return Some(cell);
            }
        }
        None
    }
}
