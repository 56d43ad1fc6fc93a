//! A single turn: a pawn move (`e2`) or a wall placement (`He5`).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::cell::Cell;
use crate::error::IllegalReason;
use crate::wall::Wall;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Turn {
    /// Move the pawn to this cell.
    Move(Cell),
    /// Place this wall.
    Wall(Wall),
}

impl Turn {
    pub fn is_wall(&self) -> bool {
        matches!(self, Turn::Wall(_))
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Move(cell) => write!(f, "{cell}"),
            Turn::Wall(wall) => write!(f, "{wall}"),
        }
    }
}

impl FromStr for Turn {
    type Err = IllegalReason;

    /// Two characters are a move, three a wall.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.len() {
            2 => s.parse().map(Turn::Move),
            3 => s.parse().map(Turn::Wall),
            _ => Err(IllegalReason::Malformed),
        }
    }
}

impl From<Cell> for Turn {
    fn from(cell: Cell) -> Self {
        Turn::Move(cell)
    }
}

impl From<Wall> for Turn {
    fn from(wall: Wall) -> Self {
        Turn::Wall(wall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_selects_the_kind_of_turn() {
        assert_eq!("e2".parse::<Turn>(), Ok(Turn::Move(Cell::new(1, 4))));
        assert_eq!("Va1".parse::<Turn>(), Ok(Turn::Wall(Wall::vertical(0, 0))));
        assert_eq!("e".parse::<Turn>(), Err(IllegalReason::Malformed));
        assert_eq!("He5x".parse::<Turn>(), Err(IllegalReason::Malformed));
    }

    #[test]
    fn every_turn_string_round_trips() {
        let moves = Cell::all().map(Turn::Move);
        let walls = Wall::all().map(Turn::Wall);
        for turn in moves.chain(walls) {
            let text = turn.to_string();
            assert_eq!(text.parse::<Turn>(), Ok(turn), "{text}");
            assert_eq!(text.parse::<Turn>().unwrap().to_string(), text);
        }
    }
}
