//! Which walls are worth searching.
//!
//! Enumerating all 128 wall slots at every node makes even depth 2 slow, so
//! the searcher only tries walls near a pawn plus walls that would close a
//! narrow corridor. Everything else is skipped; this can miss a good wall
//! and is accepted as an approximation.

use std::collections::BTreeSet;

use crate::board::Board;
use crate::cell::{Cell, Direction, SIZE};
use crate::game::Quoridor;
use crate::wall::{Orientation, Wall, SLOTS};

use super::SearchConfig;

/// Maximal runs of open crossings along one boundary line.
///
/// `open(i)` says whether crossing `i` (of `SIZE`) is unwalled.
fn open_runs(open: impl Fn(usize) -> bool) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for i in 0..=SIZE {
        match (i < SIZE && open(i), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    runs
}

/// Walls on `line` that would close at least one crossing in `lo..hi`.
fn closing_walls(orientation: Orientation, line: usize, lo: usize, hi: usize) -> impl Iterator<Item = Wall> {
    // a wall anchored at `a` covers crossings `a` and `a + 1`
    (lo.saturating_sub(1)..hi.min(SLOTS)).map(move |a| match orientation {
        Orientation::Horizontal => Wall::horizontal(line, a),
        Orientation::Vertical => Wall::vertical(a, line),
    })
}

/// Walls that would narrow or close a corridor at most `width` cells wide.
///
/// Scans each of the eight boundaries between rows and each of the eight
/// between columns for runs of open crossings bounded by walls or the edge.
/// Walls already on the board or otherwise illegal are not filtered out.
pub fn choke_points(board: &Board, width: usize) -> BTreeSet<Wall> {
    let mut walls = BTreeSet::new();
    for line in 0..SLOTS {
        let south_open = |col| board.wall_mask(Cell::new(line, col)) & Direction::South.bit() == 0;
        for (lo, hi) in open_runs(south_open) {
            if hi - lo <= width {
                walls.extend(closing_walls(Orientation::Horizontal, line, lo, hi));
            }
        }

        let east_open = |row| board.wall_mask(Cell::new(row, line)) & Direction::East.bit() == 0;
        for (lo, hi) in open_runs(east_open) {
            if hi - lo <= width {
                walls.extend(closing_walls(Orientation::Vertical, line, lo, hi));
            }
        }
    }
    walls
}

/// Wall slots the searcher considers for the position, in slot order.
///
/// Legality is left to the caller.
pub fn candidate_walls(game: &Quoridor, config: &SearchConfig) -> Vec<Wall> {
    if !config.prune_walls {
        return Wall::all().collect();
    }
    let pawns: Vec<Cell> = game.players().iter().map(|p| p.position()).collect();
    let mut walls: BTreeSet<Wall> = Wall::all()
        .filter(|w| pawns.iter().any(|&p| w.distance_to(p) <= config.radius))
        .collect();
    walls.extend(choke_points(game.board(), config.choke_width));
    walls.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_board_has_no_choke_points() {
        assert!(choke_points(&Board::new(), 2).is_empty());
    }

    #[test]
    fn gap_between_walls_is_a_choke_point() {
        let mut board = Board::new();
        // row 4/5 boundary closed at a-d and g-h, leaving e, f and i open
        board.add_wall(Wall::horizontal(3, 0));
        board.add_wall(Wall::horizontal(3, 2));
        board.add_wall(Wall::horizontal(3, 6));
        let found: Vec<String> = choke_points(&board, 2).iter().map(Wall::to_string).collect();
        // e-f gap: Hd4, He4, Hf4; i gap: Hh4
        assert_eq!(found, vec!["Hd4", "He4", "Hf4", "Hh4"]);
    }

    #[test]
    fn wide_corridors_are_ignored() {
        let mut board = Board::new();
        board.add_wall(Wall::horizontal(3, 0));
        board.add_wall(Wall::horizontal(3, 2));
        board.add_wall(Wall::horizontal(3, 6));
        assert_eq!(choke_points(&board, 1).len(), 1);
        assert_eq!(choke_points(&board, 0).len(), 0);
    }

    #[test]
    fn candidates_cluster_around_pawns() {
        let game = Quoridor::two_player("a", "b").unwrap();
        let near = candidate_walls(&game, &SearchConfig::default());
        assert!(!near.is_empty() && near.len() < 128);
        for wall in &near {
            assert!(wall.distance_to(Cell::new(0, 4)) <= 2 || wall.distance_to(Cell::new(8, 4)) <= 2);
        }

        let every = SearchConfig {
            prune_walls: false,
            ..SearchConfig::default()
        };
        assert_eq!(candidate_walls(&game, &every).len(), 128);
    }
}
