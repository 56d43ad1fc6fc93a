//! Per-player state and the canonical seat layouts.

use std::fmt;

use serde::Serialize;

use crate::cell::{Cell, SIZE};

/// Seat index of a registered player, in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(pub usize);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0 + 1)
    }
}

/// The edge a player is racing towards: a full row or a full column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Goal {
    Row(usize),
    Column(usize),
}

impl Goal {
    pub fn contains(self, cell: Cell) -> bool {
        match self {
            Goal::Row(r) => cell.row == r,
            Goal::Column(c) => cell.col == c,
        }
    }

    /// The nine goal cells.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..SIZE).map(move |i| match self {
            Goal::Row(r) => Cell::new(r, i),
            Goal::Column(c) => Cell::new(i, c),
        })
    }
}

/// Supported table sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerCount {
    Two,
    Four,
}

impl PlayerCount {
    pub fn count(self) -> usize {
        match self {
            PlayerCount::Two => 2,
            PlayerCount::Four => 4,
        }
    }

    /// Walls handed to each player at the start of the game.
    pub fn wall_allowance(self) -> usize {
        match self {
            PlayerCount::Two => 10,
            PlayerCount::Four => 5,
        }
    }

    /// Start cell and goal for a seat. Players face each other across the
    /// board; with four players the second and fourth seats cross
    /// east-west.
    pub fn seat(self, seat: usize) -> (Cell, Goal) {
        let mid = SIZE / 2;
        let last = SIZE - 1;
        match (self, seat) {
            (_, 0) => (Cell::new(0, mid), Goal::Row(last)),
            (PlayerCount::Two, 1) | (PlayerCount::Four, 2) => (Cell::new(last, mid), Goal::Row(0)),
            (PlayerCount::Four, 1) => (Cell::new(mid, last), Goal::Column(0)),
            (PlayerCount::Four, 3) => (Cell::new(mid, 0), Goal::Column(last)),
            _ => panic!("seat {seat} does not exist in a {self:?} player game"),
        }
    }
}

/// A registered player. Owned by the engine; simulation copies own their
/// own players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    name: String,
    position: Cell,
    goal: Goal,
    walls: usize,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Cell, goal: Goal, walls: usize) -> Self {
        Player {
            name: name.into(),
            position,
            goal,
            walls,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn walls(&self) -> usize {
        self.walls
    }

    pub fn has_won(&self) -> bool {
        self.goal.contains(self.position)
    }

    pub(crate) fn move_to(&mut self, cell: Cell) {
        self.position = cell;
    }

    pub(crate) fn use_wall(&mut self) {
        debug_assert!(self.walls > 0, "wall placed with none remaining");
        self.walls -= 1;
    }

    pub(crate) fn return_wall(&mut self) {
        self.walls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_seats_race_to_each_others_start_row() {
        let (start0, goal0) = PlayerCount::Two.seat(0);
        let (start1, goal1) = PlayerCount::Two.seat(1);
        assert_eq!(start0.to_string(), "e1");
        assert_eq!(start1.to_string(), "e9");
        assert!(goal0.contains(Cell::new(8, 0)));
        assert!(goal1.contains(start0));
    }

    #[test]
    fn four_player_seats_cover_every_edge() {
        let goals: Vec<Goal> = (0..4).map(|s| PlayerCount::Four.seat(s).1).collect();
        assert_eq!(
            goals,
            vec![Goal::Row(8), Goal::Column(0), Goal::Row(0), Goal::Column(8)]
        );
        let starts: Vec<String> = (0..4)
            .map(|s| PlayerCount::Four.seat(s).0.to_string())
            .collect();
        assert_eq!(starts, vec!["e1", "i5", "e9", "a5"]);
        for seat in 0..4 {
            let (start, goal) = PlayerCount::Four.seat(seat);
            assert!(!goal.contains(start));
            assert_eq!(goal.cells().count(), 9);
        }
    }
}
