//! # maze_pathfinding
//!
//! Generates [perfect mazes](https://en.wikipedia.org/wiki/Maze_generation_algorithm) on odd-sized
//! square grids with a randomized depth-first backtracker and solves them with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic. Movement is
//! 4-connected with uniform step cost, so the heuristic is consistent and returned paths are
//! shortest paths.
//!
//! Neither generation nor search recurses, so both run on arbitrarily large grids.
//!
//! ```
//! use maze_pathfinding::{generate_maze_seeded, AstarSolver, MazeSolver};
//!
//! let maze = generate_maze_seeded(21, 7).unwrap();
//! let path = AstarSolver::new().solve_maze(&maze).unwrap();
//! assert_eq!(path.first(), Some(&maze.entry()));
//! ```
pub mod astar;
pub mod error;
pub mod generator;
pub mod levels;
pub mod maze_grid;
pub mod placement;
pub mod solver;

pub use error::MazeError;
pub use generator::{generate_maze, generate_maze_seeded, MazeGenerator};
pub use levels::{Level, LevelConfig};
pub use maze_grid::{Cell, Components, MazeGrid};
pub use placement::scatter_items;
pub use solver::{astar::AstarSolver, bfs::BfsSolver, is_valid_path, MazeSolver};

/// Smallest side length the generator accepts.
pub const MIN_MAZE_SIZE: usize = 5;
/// Cost of a single 4-connected step.
pub const STEP_COST: i32 = 1;
/// Inline capacity for neighbourhood buffers; a cell has at most four neighbours.
pub const N_SMALLVEC_SIZE: usize = 4;
