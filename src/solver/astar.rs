use grid_util::Point;

use crate::{astar::astar, maze_grid::MazeGrid, solver::MazeSolver};

/// A* over the 4-connected grid with the Manhattan distance as heuristic. Among equally promising
/// cells the one discovered first is expanded first, so results are reproducible.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }

    /// Admissible and consistent on a unit-cost 4-grid, so returned paths are optimal.
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        self.cost(p1, p2)
    }
}

impl MazeSolver for AstarSolver {
    fn search(&self, grid: &MazeGrid, start: Point, goal: Point) -> Option<Vec<Point>> {
        astar(
            &start,
            |node| grid.neighborhood_points_and_cost(node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        )
        .map(|(path, _cost)| path)
    }
}
