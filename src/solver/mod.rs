use crate::{maze_grid::MazeGrid, MazeError, STEP_COST};
use grid_util::Point;
use itertools::Itertools;
use log::{debug, info};

pub mod astar;
pub mod bfs;

/// Checks that every cell of `path` is passable and that consecutive cells are 4-adjacent.
/// The empty path is valid.
pub fn is_valid_path(grid: &MazeGrid, path: &[Point]) -> bool {
    path.iter().all(|p| grid.is_passable(p))
        && path
            .iter()
            .tuple_windows::<(_, _)>()
            .all(|(a, b)| a.manhattan_distance(b) == 1)
}

pub trait MazeSolver {
    /// Searches a path between two in-bounds passable cells; [None] if the goal is unreachable.
    /// Callers should go through [find_path](Self::find_path), which validates the endpoints.
    fn search(&self, grid: &MazeGrid, start: Point, goal: Point) -> Option<Vec<Point>>;

    /// Uses [STEP_COST] per cardinal step.
    fn cost(&self, p1: &Point, p2: &Point) -> i32 {
        p1.manhattan_distance(p2) * STEP_COST
    }

    fn get_path_cost(&self, path: &[Point]) -> i32 {
        path.iter()
            .tuple_windows::<(_, _)>()
            .map(|(a, b)| self.cost(a, b))
            .sum()
    }

    /// Computes a shortest path from start to goal, both inclusive. Points outside the grid are
    /// rejected with [MazeError::OutOfBounds]. A wall at either end, or a goal that cannot be
    /// reached, yields an empty path.
    fn find_path(
        &self,
        grid: &MazeGrid,
        start: Point,
        goal: Point,
    ) -> Result<Vec<Point>, MazeError> {
        grid.check_bounds(&start)?;
        grid.check_bounds(&goal)?;
        if !grid.is_passable(&start) || !grid.is_passable(&goal) {
            debug!("{:?} or {:?} is a wall, no path", start, goal);
            return Ok(Vec::new());
        }
        let path = self.search(grid, start, goal).unwrap_or_default();
        info!(
            "Path from {:?} to {:?}: {} cells",
            start,
            goal,
            path.len()
        );
        Ok(path)
    }

    /// Path from the entry of a generated maze to its exit.
    fn solve_maze(&self, grid: &MazeGrid) -> Result<Vec<Point>, MazeError> {
        self.find_path(grid, grid.entry(), grid.exit())
    }
}
