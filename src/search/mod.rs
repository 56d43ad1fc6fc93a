//! Adversarial search over private copies of the rules engine.
//!
//! [`AlphaBeta`] does the work synchronously on a `&mut Quoridor` it may
//! freely mutate; [`request_move`] runs it on a worker thread and hands back
//! a [`SearchHandle`] to poll or cancel.

mod alphabeta;
mod eval;
mod relevance;
mod worker;

use std::time::Duration;

pub use alphabeta::{AlphaBeta, SearchOutcome, SearchStats, WIN};
pub use eval::Evaluator;
pub use relevance::{candidate_walls, choke_points};
pub use worker::{request_move, request_move_with, spawn_search, SearchHandle, SearchPoll};

/// Tuning knobs for a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to look ahead; at least one is always searched.
    pub depth: usize,
    /// Wall-clock budget. A search that runs out yields no move.
    pub deadline: Option<Duration>,
    pub path_weight: i32,
    pub wall_weight: i32,
    /// Walls anchored within this Manhattan distance of a pawn are searched.
    pub radius: usize,
    /// Corridors this narrow or narrower are choke points.
    pub choke_width: usize,
    /// Restrict walls to the relevance filter. Off searches every legal wall.
    pub prune_walls: bool,
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 2,
            deadline: None,
            path_weight: 2,
            wall_weight: 1,
            radius: 2,
            choke_width: 2,
            prune_walls: true,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
