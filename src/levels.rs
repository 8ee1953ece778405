use grid_util::Point;
use log::info;
use rand::Rng;

use crate::{
    generator::MazeGenerator, maze_grid::MazeGrid, placement::scatter_items,
    solver::astar::AstarSolver, solver::MazeSolver, MazeError,
};

/// Highest level in the preset table.
pub const MAX_LEVEL: u32 = 5;

/// Maze size and item quota of one level of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    pub level: u32,
    pub size: usize,
    pub required_coins: usize,
}

pub const LEVELS: [LevelConfig; MAX_LEVEL as usize] = [
    LevelConfig {
        level: 1,
        size: 15,
        required_coins: 5,
    },
    LevelConfig {
        level: 2,
        size: 19,
        required_coins: 8,
    },
    LevelConfig {
        level: 3,
        size: 23,
        required_coins: 12,
    },
    LevelConfig {
        level: 4,
        size: 27,
        required_coins: 15,
    },
    LevelConfig {
        level: 5,
        size: 31,
        required_coins: 20,
    },
];

/// A built level: the maze with its exit tagged as goal, the scattered coins and the solution
/// from entry to exit.
#[derive(Clone, Debug)]
pub struct Level {
    pub config: LevelConfig,
    pub grid: MazeGrid,
    pub coins: Vec<Point>,
    pub solution: Vec<Point>,
}

impl LevelConfig {
    /// Levels are numbered from 1.
    pub fn for_level(level: u32) -> Option<LevelConfig> {
        LEVELS.iter().copied().find(|l| l.level == level)
    }

    pub fn next(&self) -> Option<LevelConfig> {
        LevelConfig::for_level(self.level + 1)
    }

    /// Generates this level's maze with the exit tagged as [Cell::Goal](crate::Cell::Goal).
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MazeGrid, MazeError> {
        MazeGenerator::with_goal().generate(self.size, rng)
    }

    /// Generates the maze, places [required_coins](Self::required_coins) coins and solves it.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Level, MazeError> {
        let grid = self.generate(rng)?;
        let coins = scatter_items(&grid, self.required_coins, rng);
        let solution = AstarSolver::new().solve_maze(&grid)?;
        info!(
            "Level {}: {}x{} maze, {} coins, solution of {} steps",
            self.level,
            self.size,
            self.size,
            coins.len(),
            solution.len().saturating_sub(1)
        );
        Ok(Level {
            config: *self,
            grid,
            coins,
            solution,
        })
    }
}
