//! Shortest paths to a goal edge.
//!
//! A [`DistanceTree`] is a breadth-first search seeded from all nine goal
//! cells at once, so a single tree answers "how far is the goal" for every
//! start cell. Trees depend only on the goal and the wall configuration,
//! which makes them cacheable by `(WallKey, Goal)`: pawn moves never
//! invalidate them and an undone wall finds its old tree again.
//!
//! The board is exposed to petgraph through its visit traits, so the BFS
//! walker (and any other petgraph traversal) runs directly on the wall
//! masks without building an explicit graph.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use fixedbitset::FixedBitSet;
use petgraph::visit::{Bfs, GraphBase, IntoNeighbors, VisitMap, Visitable};

use crate::board::{Board, Neighbors, WallKey};
use crate::cell::{Cell, SIZE};
use crate::player::Goal;

const UNREACHABLE: u8 = u8::MAX;
const NO_NEXT: u8 = u8::MAX;

/// Trees kept before the cache is flushed.
const CACHE_CAPACITY: usize = 4096;

impl GraphBase for Board {
    type NodeId = Cell;
    type EdgeId = (Cell, Cell);
}

impl<'a> IntoNeighbors for &'a Board {
    type Neighbors = Neighbors;

    fn neighbors(self, a: Cell) -> Neighbors {
        Board::neighbors(self, a)
    }
}

/// Visited cells, one bit per [`Cell::index`].
#[derive(Debug, Clone)]
pub struct CellSet(FixedBitSet);

impl VisitMap<Cell> for CellSet {
    fn visit(&mut self, cell: Cell) -> bool {
        !self.0.put(cell.index())
    }

    fn is_visited(&self, cell: &Cell) -> bool {
        self.0.contains(cell.index())
    }
}

impl Visitable for Board {
    type Map = CellSet;

    fn visit_map(&self) -> CellSet {
        CellSet(FixedBitSet::with_capacity(SIZE * SIZE))
    }

    fn reset_map(&self, map: &mut CellSet) {
        map.0.clear();
    }
}

/// Distance to a goal, and the next step towards it, for every cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceTree {
    dist: [u8; SIZE * SIZE],
    next: [u8; SIZE * SIZE],
}

impl DistanceTree {
    pub fn build(board: &Board, goal: Goal) -> Self {
        let mut tree = DistanceTree {
            dist: [UNREACHABLE; SIZE * SIZE],
            next: [NO_NEXT; SIZE * SIZE],
        };

        let mut discovered = board.visit_map();
        let mut stack = VecDeque::with_capacity(SIZE * SIZE);
        for cell in goal.cells() {
            discovered.visit(cell);
            stack.push_back(cell);
        }
        let mut bfs = Bfs { stack, discovered };

        // Cells come out in non-decreasing distance, so the closest
        // neighbour already labelled is the one that discovered this cell.
        while let Some(cell) = bfs.next(board) {
            if goal.contains(cell) {
                tree.dist[cell.index()] = 0;
                continue;
            }
            let closest = board
                .neighbors(cell)
                .filter(|n| tree.dist[n.index()] != UNREACHABLE)
                .min_by_key(|n| tree.dist[n.index()]);
            if let Some(toward) = closest {
                tree.dist[cell.index()] = tree.dist[toward.index()] + 1;
                tree.next[cell.index()] = toward.index() as u8;
            }
        }
        tree
    }

    pub fn distance(&self, start: Cell) -> Option<usize> {
        match self.dist[start.index()] {
            UNREACHABLE => None,
            d => Some(d as usize),
        }
    }

    pub fn path(&self, start: Cell) -> Vec<Cell> {
        let Some(len) = self.distance(start) else {
            return Vec::new();
        };
        let mut path = Vec::with_capacity(len + 1);
        path.push(start);
        let mut at = start.index();
        while self.next[at] != NO_NEXT {
            at = self.next[at] as usize;
            path.push(Cell::from_index(at));
        }
        path
    }
}

/// Memo of distance trees keyed by wall configuration and goal.
#[derive(Debug, Clone, Default)]
pub(crate) struct PathCache {
    trees: RefCell<HashMap<(WallKey, Goal), DistanceTree>>,
}

impl PathCache {
    pub(crate) fn tree(&self, board: &Board, goal: Goal) -> DistanceTree {
        let key = (board.key(), goal);
        if let Some(tree) = self.trees.borrow().get(&key) {
            return *tree;
        }
        let tree = DistanceTree::build(board, goal);
        let mut trees = self.trees.borrow_mut();
        if trees.len() >= CACHE_CAPACITY {
            trees.clear();
        }
        trees.insert(key, tree);
        tree
    }
}

#[cfg(test)]
mod tests {
    use petgraph::algo::has_path_connecting;

    use super::*;
    use crate::wall::Wall;

    #[test]
    fn distances_match_row_offsets_on_an_open_board() {
        let board = Board::new();
        let tree = DistanceTree::build(&board, Goal::Row(0));
        for cell in Cell::all() {
            assert_eq!(tree.distance(cell), Some(cell.row));
        }
        let tree = DistanceTree::build(&board, Goal::Column(8));
        assert_eq!(tree.distance(Cell::new(4, 0)), Some(8));
    }

    #[test]
    fn sealed_pocket_is_unreachable() {
        let mut board = Board::new();
        // seal a1 and a2 into a pocket
        board.add_wall(Wall::vertical(0, 0));
        board.add_wall(Wall::horizontal(1, 0));
        let tree = DistanceTree::build(&board, Goal::Row(8));
        assert_eq!(tree.distance(Cell::new(0, 0)), None);
        assert!(tree.path(Cell::new(0, 0)).is_empty());
        assert!(tree.distance(Cell::new(0, 2)).is_some());
    }

    #[test]
    fn petgraph_sees_the_same_connectivity() {
        let mut board = Board::new();
        board.add_wall(Wall::vertical(0, 0));
        board.add_wall(Wall::horizontal(1, 0));
        let a1 = Cell::new(0, 0);
        assert!(has_path_connecting(&board, a1, Cell::new(1, 0), None));
        assert!(!has_path_connecting(&board, a1, Cell::new(8, 8), None));
        assert!(has_path_connecting(&board, Cell::new(0, 2), Cell::new(8, 8), None));
    }

    #[test]
    fn visit_map_marks_each_cell_once() {
        let board = Board::new();
        let mut seen = board.visit_map();
        let e5 = Cell::new(4, 4);
        assert!(!seen.is_visited(&e5));
        assert!(seen.visit(e5));
        assert!(!seen.visit(e5));
        assert!(seen.is_visited(&e5));
        assert!(!seen.is_visited(&Cell::new(8, 8)));
        board.reset_map(&mut seen);
        assert!(!seen.is_visited(&e5));
    }

    #[test]
    fn cache_tracks_the_wall_configuration() {
        let mut board = Board::new();
        let start = Cell::new(0, 4);
        assert_eq!(board.distance(start, Goal::Row(8)), Some(8));

        let wall = Wall::horizontal(0, 3);
        board.add_wall(wall);
        // d1/e1 are sealed from below, detour through f1
        assert_eq!(board.distance(start, Goal::Row(8)), Some(9));

        board.remove_wall(wall);
        assert_eq!(board.distance(start, Goal::Row(8)), Some(8));
    }
}
