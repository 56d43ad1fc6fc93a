use std::cmp::Reverse;

use crate::cell::SIZE;
use crate::game::Quoridor;
use crate::player::{Player, PlayerId};

use super::SearchConfig;

/// Static evaluation of a position for one player; higher is better.
///
/// `path_weight * (opponent path - own path) + wall_weight * (own walls -
/// opponent walls)`, where the opponent is whoever is closest to their goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    pub path_weight: i32,
    pub wall_weight: i32,
}

impl Evaluator {
    pub fn new(path_weight: i32, wall_weight: i32) -> Self {
        Evaluator {
            path_weight,
            wall_weight,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Evaluator::new(config.path_weight, config.wall_weight)
    }

    fn path_len(game: &Quoridor, player: &Player) -> i32 {
        // legal play never seals a pawn in; score one anyway as hopeless
        game.board()
            .distance(player.position(), player.goal())
            .unwrap_or(SIZE * SIZE) as i32
    }

    pub fn score(&self, game: &Quoridor, me: PlayerId) -> i32 {
        let players = game.players();
        let mine = &players[me.0];
        let rival = game
            .opponents(me)
            .map(|id| &players[id.0])
            .min_by_key(|p| (Self::path_len(game, p), Reverse(p.walls())));
        let Some(rival) = rival else {
            return 0;
        };

        let paths = Self::path_len(game, rival) - Self::path_len(game, mine);
        let walls = mine.walls() as i32 - rival.walls() as i32;
        self.path_weight * paths + self.wall_weight * walls
    }
}
