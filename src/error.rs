//! Error types for the rules engine.

use derive_more::{Display, Error};

use crate::game::GameState;
use crate::player::PlayerId;

/// Why a turn string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IllegalReason {
    #[display("not a move (e.g. e2) or wall (e.g. He5)")]
    Malformed,
    #[display("destination is not reachable this turn")]
    NotReachable,
    #[display("no walls left to place")]
    NoWallsLeft,
    #[display("a wall is already there")]
    AlreadyPlayed,
    #[display("crosses wall {_0}")]
    Crosses(crate::wall::Wall),
    #[display("overlaps wall {_0}")]
    Overlaps(crate::wall::Wall),
    #[display("cuts {player} off from their goal")]
    CutsOffPath { player: PlayerId },
}

/// Errors returned by [`Quoridor`](crate::Quoridor) operations.
///
/// None of these leave the engine in a modified state.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum QuoridorError {
    /// An operation was called in the wrong phase of the game.
    #[display("operation requires state {expected:?}, game is {actual:?}")]
    WrongState { expected: GameState, actual: GameState },

    /// A player tried to take a turn out of order.
    #[display("it is {to_move}'s turn, not {player}'s")]
    NotYourTurn { player: PlayerId, to_move: PlayerId },

    #[display("illegal turn {turn:?}: {reason}")]
    IllegalMove { turn: String, reason: IllegalReason },

    #[display("game already has {capacity} players")]
    GameFull { capacity: usize },

    #[display("game needs {required} players, {registered} registered")]
    InvalidPlayerCount { registered: usize, required: usize },
}

impl QuoridorError {
    pub fn illegal(turn: impl Into<String>, reason: IllegalReason) -> Self {
        QuoridorError::IllegalMove {
            turn: turn.into(),
            reason,
        }
    }

    /// The rejection reason, if this is an illegal-move error.
    pub fn reason(&self) -> Option<IllegalReason> {
        match self {
            QuoridorError::IllegalMove { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoridorError>;
