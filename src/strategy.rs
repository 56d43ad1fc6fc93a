//! Computer players.
//!
//! A [`Strategy`] picks a turn for whoever is to move. Strategies only ever
//! look at the game; they work on a [`Quoridor::copy`] when they need to try
//! things out.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::game::{GameState, Quoridor};
use crate::search::{AlphaBeta, SearchConfig};
use crate::turn::Turn;

pub trait Strategy: Send {
    fn name(&self) -> String;

    /// A legal turn for the player to move, or `None` if there is none.
    fn choose_turn(&mut self, game: &Quoridor) -> Option<Turn>;
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Any legal turn, uniformly.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new(seed: Option<u64>) -> Self {
        RandomStrategy { rng: rng_from(seed) }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> String {
        "Random".to_string()
    }

    fn choose_turn(&mut self, game: &Quoridor) -> Option<Turn> {
        game.copy().legal_turns().choose(&mut self.rng).copied()
    }
}

/// Always steps along a shortest path, never places walls.
#[derive(Debug, Default)]
pub struct ShortestPathStrategy;

impl Strategy for ShortestPathStrategy {
    fn name(&self) -> String {
        "ShortestPath".to_string()
    }

    fn choose_turn(&mut self, game: &Quoridor) -> Option<Turn> {
        if game.state() != GameState::Playing {
            return None;
        }
        let mover = game.player(game.current_player())?;
        let tree = game.board().distance_tree(mover.goal());
        game.legal_destinations()
            .iter()
            .copied()
            .min_by_key(|&cell| tree.distance(cell).unwrap_or(usize::MAX))
            .map(Turn::Move)
    }
}

/// Walks the shortest path, but with probability `wall_preference` places
/// the wall that slows the leading opponent the most.
pub struct DefensiveStrategy {
    wall_preference: f64,
    rng: StdRng,
}

impl DefensiveStrategy {
    pub fn new(wall_preference: f64, seed: Option<u64>) -> Self {
        DefensiveStrategy {
            wall_preference,
            rng: rng_from(seed),
        }
    }

    fn blocking_wall(&mut self, game: &Quoridor) -> Option<Turn> {
        let me = game.current_player();
        let rival = game.opponents(me).min_by_key(|&id| {
            let p = &game.players()[id.0];
            game.board().distance(p.position(), p.goal())
        })?;
        let (start, goal) = {
            let p = &game.players()[rival.0];
            (p.position(), p.goal())
        };
        let before = game.board().distance(start, goal)?;

        let mut scratch = game.copy();
        let mut best = Vec::new();
        let mut best_gain = 0;
        for wall in scratch.legal_walls() {
            scratch.apply(Turn::Wall(wall));
            let after = scratch.board().distance(start, goal).unwrap_or(before);
            scratch.retract();

            let gain = after.saturating_sub(before);
            if gain > best_gain {
                best_gain = gain;
                best.clear();
            }
            if gain == best_gain && gain > 0 {
                best.push(wall);
            }
        }
        best.choose(&mut self.rng).copied().map(Turn::Wall)
    }
}

impl Strategy for DefensiveStrategy {
    fn name(&self) -> String {
        "Defensive".to_string()
    }

    fn choose_turn(&mut self, game: &Quoridor) -> Option<Turn> {
        if game.state() != GameState::Playing {
            return None;
        }
        let me = game.player(game.current_player())?;
        if me.walls() > 0 && self.rng.gen::<f64>() < self.wall_preference {
            if let Some(turn) = self.blocking_wall(game) {
                return Some(turn);
            }
        }
        ShortestPathStrategy.choose_turn(game)
    }
}

/// Alpha-beta search run inline on a copy of the game.
pub struct SearchStrategy {
    search: AlphaBeta,
}

impl SearchStrategy {
    pub fn new(config: SearchConfig) -> Self {
        SearchStrategy {
            search: AlphaBeta::new(config),
        }
    }
}

impl Strategy for SearchStrategy {
    fn name(&self) -> String {
        format!("Search{}", self.search.config().depth)
    }

    fn choose_turn(&mut self, game: &Quoridor) -> Option<Turn> {
        self.search
            .search(&mut game.copy())
            .map(|outcome| outcome.turn)
    }
}

/// The built-in strategies, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum StrategyKind {
    Random,
    ShortestPath,
    Defensive,
    Search,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::Random,
        StrategyKind::ShortestPath,
        StrategyKind::Defensive,
        StrategyKind::Search,
    ];

    /// Looks a strategy up by its command-line name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }

    /// A fresh player; `search` configures the search strategy and seeds
    /// the random ones.
    pub fn build(self, search: &SearchConfig) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new(search.seed)),
            StrategyKind::ShortestPath => Box::new(ShortestPathStrategy),
            StrategyKind::Defensive => Box::new(DefensiveStrategy::new(0.7, search.seed)),
            StrategyKind::Search => Box::new(SearchStrategy::new(search.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn shortest_path_walks_straight_ahead() {
        let game = Quoridor::two_player("a", "b").unwrap();
        assert_eq!(
            ShortestPathStrategy.choose_turn(&game),
            Some(Turn::Move(Cell::new(1, 4)))
        );
    }

    #[test]
    fn random_turns_are_legal() {
        let mut game = Quoridor::two_player("a", "b").unwrap();
        let mut random = RandomStrategy::new(Some(3));
        for _ in 0..20 {
            let turn = random.choose_turn(&game).unwrap();
            game.play(turn).unwrap();
            if game.is_over() {
                break;
            }
        }
    }

    #[test]
    fn defensive_player_blocks_when_it_can() {
        let game = Quoridor::two_player("a", "b").unwrap();
        let mut defensive = DefensiveStrategy::new(1.0, Some(1));
        let turn = defensive.choose_turn(&game).unwrap();
        assert!(turn.is_wall());
        let mut after = game.copy();
        after.play(turn).unwrap();
        let rival = &after.players()[1];
        assert!(after.board().distance(rival.position(), rival.goal()) > Some(8));
    }

    #[test]
    fn no_turn_outside_play() {
        let unstarted = Quoridor::new(crate::player::PlayerCount::Two);
        let mut finished = Quoridor::two_player("a", "b").unwrap();
        finished
            .replay(["e2", "d9", "e3", "c9", "e4", "d9", "e5", "c9", "e6", "d9", "e7", "c9", "e8", "d9", "e9"])
            .unwrap();
        for game in [&unstarted, &finished] {
            for kind in StrategyKind::ALL {
                let mut player = kind.build(&SearchConfig::default().with_depth(1).with_seed(4));
                assert_eq!(player.choose_turn(game), None, "{}", player.name());
            }
        }
    }

    #[test]
    fn kinds_are_found_by_name() {
        assert_eq!(StrategyKind::from_name("shortest-path"), Some(StrategyKind::ShortestPath));
        assert_eq!(StrategyKind::from_name("Search"), Some(StrategyKind::Search));
        assert_eq!(StrategyKind::from_name("minimax"), None);
        for kind in StrategyKind::ALL {
            assert!(!kind.build(&SearchConfig::default()).name().is_empty());
        }
    }
}
