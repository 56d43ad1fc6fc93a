//! Wall slots, their mutual exclusions and three-character notation.
//!
//! ```text
//! horizontal  vertical
//! A  B        A || B
//! ====          ||
//! C  D        C || D
//! ```
//!
//! In both cases `A` is the anchor, so `He5` touches `e5`, `f5`, `e6` and
//! `f6`. Anchors range over `a`-`h` and `1`-`8`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::cell::{Cell, Direction, SIZE};
use crate::error::IllegalReason;

/// Number of anchor positions along each axis.
pub const SLOTS: usize = SIZE - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    fn flag(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        }
    }
}

/// A two-cell wall, identified by orientation and top-left anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Wall {
    pub orientation: Orientation,
    pub anchor: Cell,
}

impl Wall {
    pub fn new(orientation: Orientation, anchor: Cell) -> Self {
        assert!(
            anchor.row < SLOTS && anchor.col < SLOTS,
            "wall anchor {anchor} is outside a1..h8"
        );
        Wall {
            orientation,
            anchor,
        }
    }

    pub fn horizontal(row: usize, col: usize) -> Self {
        Wall::new(Orientation::Horizontal, Cell::new(row, col))
    }

    pub fn vertical(row: usize, col: usize) -> Self {
        Wall::new(Orientation::Vertical, Cell::new(row, col))
    }

    /// All 128 wall slots, horizontal first, each in row-major anchor order.
    pub fn all() -> impl Iterator<Item = Wall> {
        [Orientation::Horizontal, Orientation::Vertical]
            .into_iter()
            .flat_map(|o| {
                (0..SLOTS * SLOTS).map(move |i| Wall::new(o, Cell::new(i / SLOTS, i % SLOTS)))
            })
    }

    pub fn cross(self) -> Wall {
        Wall::new(self.orientation.flipped(), self.anchor)
    }

    /// Walls one unit away along this wall's own axis. They would share a
    /// half with this wall, so at most one of them can be on the board.
    pub fn collinear(self) -> impl Iterator<Item = Wall> {
        let Cell { row, col } = self.anchor;
        let (dr, dc) = match self.orientation {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        };
        [-1isize, 1].into_iter().filter_map(move |s| {
            let r = row as isize + s * dr;
            let c = col as isize + s * dc;
            ((0..SLOTS as isize).contains(&r) && (0..SLOTS as isize).contains(&c))
                .then(|| Wall::new(self.orientation, Cell::new(r as usize, c as usize)))
        })
    }

    /// The four cell sides this wall closes.
    pub fn sides(self) -> [(Cell, Direction); 4] {
        let Cell { row: r, col: c } = self.anchor;
        match self.orientation {
            Orientation::Horizontal => [
                (Cell::new(r, c), Direction::South),
                (Cell::new(r, c + 1), Direction::South),
                (Cell::new(r + 1, c), Direction::North),
                (Cell::new(r + 1, c + 1), Direction::North),
            ],
            Orientation::Vertical => [
                (Cell::new(r, c), Direction::East),
                (Cell::new(r + 1, c), Direction::East),
                (Cell::new(r, c + 1), Direction::West),
                (Cell::new(r + 1, c + 1), Direction::West),
            ],
        }
    }

    /// Bit of this slot within the per-orientation 64-bit presence mask.
    pub fn slot_bit(self) -> u64 {
        1 << (self.anchor.row * SLOTS + self.anchor.col)
    }

    pub fn distance_to(self, cell: Cell) -> usize {
        self.anchor.manhattan(cell)
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.orientation.flag(), self.anchor)
    }
}

impl FromStr for Wall {
    type Err = IllegalReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let orientation = match s.as_bytes().first() {
            Some(b'H') => Orientation::Horizontal,
            Some(b'V') => Orientation::Vertical,
            _ => return Err(IllegalReason::Malformed),
        };
        let anchor: Cell = s.get(1..).ok_or(IllegalReason::Malformed)?.parse()?;
        if anchor.row >= SLOTS || anchor.col >= SLOTS {
            return Err(IllegalReason::Malformed);
        }
        Ok(Wall::new(orientation, anchor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn there_are_128_distinct_slots() {
        let walls: Vec<Wall> = Wall::all().collect();
        assert_eq!(walls.len(), 128);
        let notations: std::collections::HashSet<String> =
            walls.iter().map(Wall::to_string).collect();
        assert_eq!(notations.len(), 128);
        for wall in walls {
            assert_eq!(wall.to_string().parse::<Wall>(), Ok(wall));
        }
    }

    #[test]
    fn anchors_past_h8_are_rejected() {
        for bad in ["Hi1", "Va9", "He9", "h1a", "Xe5", "He", "He55"] {
            assert_eq!(bad.parse::<Wall>(), Err(IllegalReason::Malformed), "{bad:?}");
        }
    }

    #[test]
    fn cross_and_collinear_neighbours() {
        let wall: Wall = "He5".parse().unwrap();
        assert_eq!(wall.cross().to_string(), "Ve5");
        let side: Vec<String> = wall.collinear().map(|w| w.to_string()).collect();
        assert_eq!(side, vec!["Hd5", "Hf5"]);

        let edge: Wall = "Va1".parse().unwrap();
        let side: Vec<String> = edge.collinear().map(|w| w.to_string()).collect();
        assert_eq!(side, vec!["Va2"]);
    }

    #[test]
    fn horizontal_wall_closes_south_then_north_sides() {
        let sides = Wall::horizontal(0, 0).sides();
        assert_eq!(sides[0], (Cell::new(0, 0), Direction::South));
        assert_eq!(sides[3], (Cell::new(1, 1), Direction::North));
    }
}
