//! Read-only snapshot of a game for renderers.

use std::fmt;

use serde::Serialize;

use crate::cell::{Cell, Direction, SIZE};
use crate::game::{GameState, Quoridor};
use crate::player::{Goal, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
    pub goal: Goal,
    pub walls: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub state: GameState,
    /// Player to move; the winner once the game is over.
    pub current: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    pub players: Vec<PlayerSummary>,
    /// Placed walls in notation, oldest first.
    pub walls: Vec<String>,
    /// Walled sides of every cell, `[row][col]`, see [`Direction::bit`].
    pub cells: [[u8; SIZE]; SIZE],
    pub destinations: Vec<String>,
}

impl Summary {
    pub fn of(game: &Quoridor) -> Self {
        let players = game
            .players()
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerSummary {
                id: PlayerId(seat),
                name: p.name().to_string(),
                position: p.position().to_string(),
                goal: p.goal(),
                walls: p.walls(),
            })
            .collect();

        Summary {
            state: game.state(),
            current: (game.state() != GameState::Init).then(|| game.current_player()),
            winner: game.winner(),
            players,
            walls: game.board().walls().iter().map(|w| w.to_string()).collect(),
            cells: game.board().wall_masks(),
            destinations: game
                .legal_destinations()
                .iter()
                .map(Cell::to_string)
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn pawn_at(&self, cell: &str) -> Option<usize> {
        self.players.iter().position(|p| p.position == cell)
    }
}

/// Row 1 is drawn at the top. Pawns show their seat number, `|` and `-`
/// mark walled sides.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: Vec<String> = (0..SIZE).map(|c| ((b'a' + c as u8) as char).to_string()).collect();
        writeln!(f, "  {}", letters.join(" "))?;

        for row in 0..SIZE {
            let mut line = format!("{} ", row + 1);
            for col in 0..SIZE {
                let cell = Cell::new(row, col);
                match self.pawn_at(&cell.to_string()) {
                    Some(seat) => line.push_str(&(seat + 1).to_string()),
                    None => line.push('.'),
                }
                if col + 1 < SIZE {
                    let east = self.cells[row][col] & Direction::East.bit() != 0;
                    line.push(if east { '|' } else { ' ' });
                }
            }
            writeln!(f, "{line}")?;

            if row + 1 < SIZE {
                let mut under = String::from("  ");
                for col in 0..SIZE {
                    let south = self.cells[row][col] & Direction::South.bit() != 0;
                    under.push(if south { '-' } else { ' ' });
                    if col + 1 < SIZE {
                        under.push(' ');
                    }
                }
                writeln!(f, "{}", under.trim_end())?;
            }
        }

        for p in &self.players {
            writeln!(f, "{} ({}): {} walls left", p.id, p.name, p.walls)?;
        }
        match (self.state, self.current, self.winner) {
            (_, _, Some(winner)) => write!(f, "{winner} wins"),
            (GameState::Playing, Some(current), _) => write!(f, "{current} to move"),
            _ => write!(f, "waiting for players"),
        }
    }
}
