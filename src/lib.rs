//! Quoridor for 2 or 4 players: a rules engine, an alpha-beta opponent and
//! browser bindings.
//!
//! ```
//! use quoridor::{PlayerId, Quoridor};
//!
//! let mut game = Quoridor::two_player("ann", "bob").unwrap();
//! game.do_turn(PlayerId(0), "e2").unwrap();
//! game.do_turn(PlayerId(1), "He2").unwrap();
//! assert!(!game.turn_is_legal("e3").0);
//! ```

pub mod board;
pub mod cell;
pub mod error;
pub mod game;
pub mod path;
pub mod player;
pub mod search;
pub mod strategy;
pub mod summary;
pub mod tournament;
pub mod turn;
pub mod wall;
pub mod web;

// `js` feature: entropy for rand on wasm32
extern crate getrandom;

pub use board::Board;
pub use cell::{Cell, Direction};
pub use error::{IllegalReason, QuoridorError, Result};
pub use game::{GameEvent, GameState, Quoridor};
pub use player::{Goal, Player, PlayerCount, PlayerId};
pub use search::{request_move, request_move_with, SearchConfig, SearchHandle, SearchPoll};
pub use strategy::{Strategy, StrategyKind};
pub use summary::Summary;
pub use turn::Turn;
pub use wall::{Orientation, Wall};
