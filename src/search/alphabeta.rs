//! Depth-limited alpha-beta over make/unmake on an owned engine copy.
//!
//! With more than two players the search is "paranoid": the root player
//! maximises and every other seat is assumed to minimise the root player's
//! score, which keeps the game two-sided and the pruning sound.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use crate::game::{GameState, Quoridor};
use crate::player::PlayerId;
use crate::turn::Turn;

use super::eval::Evaluator;
use super::relevance::candidate_walls;
use super::SearchConfig;

/// Base score of a won position. Wins found sooner score higher.
pub const WIN: i32 = 10_000;
const INF: i32 = 1_000_000;

/// Counters for one call to [`AlphaBeta::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub elapsed: Duration,
}

/// The turn a completed search chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub turn: Turn,
    pub score: i32,
    /// Turns that shared the best score; `turn` was drawn from these.
    pub ties: usize,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// The chosen turn in engine notation, ready for `do_turn`.
    pub fn notation(&self) -> String {
        self.turn.to_string()
    }
}

/// The search unwound because it was cancelled or ran out of time.
struct Aborted;

pub struct AlphaBeta {
    config: SearchConfig,
    evaluator: Evaluator,
    stop: Arc<AtomicBool>,
    deadline: Option<Instant>,
    rng: StdRng,
    stats: SearchStats,
}

// std::time::Instant panics on wasm32-unknown-unknown
#[cfg(not(target_arch = "wasm32"))]
fn clock() -> Option<Instant> {
    Some(Instant::now())
}

#[cfg(target_arch = "wasm32")]
fn clock() -> Option<Instant> {
    None
}

impl AlphaBeta {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_stop(config, Arc::new(AtomicBool::new(false)))
    }

    /// A searcher that gives up as soon as `stop` is set.
    pub fn with_stop(config: SearchConfig, stop: Arc<AtomicBool>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        AlphaBeta {
            evaluator: Evaluator::from_config(&config),
            config,
            stop,
            deadline: None,
            rng,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Picks a turn for the player to move in `game`.
    ///
    /// `game` is used as scratch space and is back where it started
    /// when this returns. `None` if the game is not in play, the player has
    /// no legal turn, or the search was stopped before finishing.
    #[instrument(skip_all, fields(depth = self.config.depth))]
    pub fn search(&mut self, game: &mut Quoridor) -> Option<SearchOutcome> {
        self.stats = SearchStats::default();
        if game.state() != GameState::Playing {
            return None;
        }
        let started = clock();
        self.deadline = started.zip(self.config.deadline).map(|(s, d)| s + d);

        let root = game.current_player();
        let depth = self.config.depth.max(1);
        let mut best = -INF;
        let mut ties: Vec<Turn> = Vec::new();

        for turn in self.turns(game) {
            if self.should_stop() {
                debug!(nodes = self.stats.nodes, "search stopped at the root");
                return None;
            }
            game.apply(turn);
            // a window just below the best keeps equal scores exact
            let score = self.value(game, root, depth - 1, best - 1, INF);
            game.retract();
            let Ok(score) = score else {
                debug!(nodes = self.stats.nodes, "search stopped");
                return None;
            };

            if score > best {
                best = score;
                ties.clear();
                ties.push(turn);
            } else if score == best {
                ties.push(turn);
            }
        }

        let turn = *ties.choose(&mut self.rng)?;
        self.stats.elapsed = started.map(|s| s.elapsed()).unwrap_or_default();
        info!(
            %turn,
            score = best,
            ties = ties.len(),
            nodes = self.stats.nodes,
            leaves = self.stats.leaves,
            elapsed_ms = self.stats.elapsed.as_millis() as u64,
            "search complete"
        );
        Some(SearchOutcome {
            turn,
            score: best,
            ties: ties.len(),
            stats: self.stats,
        })
    }

    fn value(
        &mut self,
        game: &mut Quoridor,
        root: PlayerId,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, Aborted> {
        self.stats.nodes += 1;
        if self.should_stop() {
            return Err(Aborted);
        }

        if let Some(winner) = game.winner() {
            let score = WIN + depth as i32;
            return Ok(if winner == root { score } else { -score });
        }
        if depth == 0 {
            self.stats.leaves += 1;
            return Ok(self.evaluator.score(game, root));
        }

        let turns = self.turns(game);
        if turns.is_empty() {
            self.stats.leaves += 1;
            return Ok(self.evaluator.score(game, root));
        }

        let maximising = game.current_player() == root;
        for turn in turns {
            game.apply(turn);
            let score = self.value(game, root, depth - 1, alpha, beta);
            game.retract();
            let score = score?;

            if maximising {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if alpha >= beta {
                break;
            }
        }
        Ok(if maximising { alpha } else { beta })
    }

    /// Legal turns worth searching: pawn moves closest to the goal first,
    /// then the relevant walls.
    fn turns(&self, game: &mut Quoridor) -> Vec<Turn> {
        let mover = &game.players()[game.current_player().0];
        let walls_left = mover.walls();
        let tree = game.board().distance_tree(mover.goal());

        let mut moves: Vec<_> = game.legal_destinations().iter().copied().collect();
        moves.sort_by_key(|&cell| tree.distance(cell).unwrap_or(usize::MAX));
        let mut turns: Vec<Turn> = moves.into_iter().map(Turn::Move).collect();

        if walls_left > 0 {
            for wall in candidate_walls(game, &self.config) {
                if game.check_wall(wall).is_ok() {
                    turns.push(Turn::Wall(wall));
                }
            }
        }
        turns
    }
}
