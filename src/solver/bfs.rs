use grid_util::Point;
use indexmap::map::Entry::Vacant;
use log::warn;
use std::collections::VecDeque;

use crate::{
    astar::{reverse_path, FxIndexMap},
    maze_grid::MazeGrid,
    solver::MazeSolver,
};

/// Breadth-first search. On a unit-cost grid it returns paths as short as [AstarSolver]'s
/// (possibly a different one among equals) while expanding every cell closer than the goal.
///
/// [AstarSolver]: crate::solver::astar::AstarSolver
#[derive(Clone, Debug, Default)]
pub struct BfsSolver;

impl MazeSolver for BfsSolver {
    fn search(&self, grid: &MazeGrid, start: Point, goal: Point) -> Option<Vec<Point>> {
        let mut parents: FxIndexMap<Point, usize> = FxIndexMap::default();
        parents.insert(start, usize::MAX);
        let mut queue = VecDeque::from([0]);
        while let Some(index) = queue.pop_front() {
            let Some((&node, _)) = parents.get_index(index) else {
                continue;
            };
            if node == goal {
                return Some(reverse_path(&parents, |&p| p, index));
            }
            for next in grid.neighborhood_points(&node) {
                if let Vacant(e) = parents.entry(next) {
                    queue.push_back(e.index());
                    e.insert(index);
                }
            }
        }
        warn!(
            "{:?} unreachable from {:?} after visiting {} cells",
            goal,
            start,
            parents.len()
        );
        None
    }
}
