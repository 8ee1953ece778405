use crate::maze_grid::{Cell, MazeGrid, NEUMANN_STEPS};
use crate::{MazeError, MIN_MAZE_SIZE};
use grid_util::Point;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// One level of the backtracker: the cell being carved from and the directions not yet tried.
/// A carving move goes two cells in a direction so that rooms stay on the odd lattice and the cell
/// in between becomes the connecting passage.
struct CarveFrame {
    cell: Point,
    steps: [Point; 4],
    next: usize,
}

impl CarveFrame {
    fn new<R: Rng + ?Sized>(cell: Point, rng: &mut R) -> CarveFrame {
        let mut steps = NEUMANN_STEPS;
        steps.shuffle(rng);
        CarveFrame {
            cell,
            steps,
            next: 0,
        }
    }
}

/// Generates perfect mazes by randomized depth-first backtracking from the entry cell.
#[derive(Clone, Debug, Default)]
pub struct MazeGenerator {
    /// Tag the exit as [Cell::Goal] instead of leaving it [Cell::Free].
    pub mark_goal: bool,
}

impl MazeGenerator {
    pub fn new() -> MazeGenerator {
        MazeGenerator { mark_goal: false }
    }

    pub fn with_goal() -> MazeGenerator {
        MazeGenerator { mark_goal: true }
    }

    /// Carves a `size` x `size` maze. The size must be odd, at least [MIN_MAZE_SIZE] and small
    /// enough for the grid to be addressed with `i32` coordinates; anything else is rejected
    /// before allocating.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        size: usize,
        rng: &mut R,
    ) -> Result<MazeGrid, MazeError> {
        validate_size(size)?;
        let mut grid = MazeGrid::new(size, Cell::Wall);
        let visited = carve(&mut grid, rng);
        let entry = grid.entry();
        let exit = grid.exit();
        grid.set_point(entry, Cell::Free);
        let exit_cell = if self.mark_goal {
            Cell::Goal
        } else {
            Cell::Free
        };
        grid.set_point(exit, exit_cell);
        info!(
            "Generated {}x{} maze with {} rooms and {} passable cells",
            size,
            size,
            visited,
            grid.passable_count()
        );
        Ok(grid)
    }
}

pub fn validate_size(size: usize) -> Result<(), MazeError> {
    if size < MIN_MAZE_SIZE
        || size % 2 == 0
        || i32::try_from(size).is_err()
        || size.checked_mul(size).is_none()
    {
        Err(MazeError::InvalidSize { size })
    } else {
        Ok(())
    }
}

/// Iterative backtracker. Every frame shuffles its candidates on creation and tries them in order,
/// which visits cells in exactly the order the recursive formulation would. Returns the number of
/// odd-lattice cells visited.
fn carve<R: Rng + ?Sized>(grid: &mut MazeGrid, rng: &mut R) -> usize {
    let interior = 1..=grid.size() as i32 - 2;
    let start = grid.entry();
    grid.set_point(start, Cell::Free);
    let mut stack = vec![CarveFrame::new(start, rng)];
    let mut visited = 1;
    let mut max_depth = 1;
    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.steps.len() {
            stack.pop();
            continue;
        }
        let step = frame.steps[frame.next];
        frame.next += 1;
        let cell = frame.cell;
        let next = cell + step * 2;
        if interior.contains(&next.x)
            && interior.contains(&next.y)
            && grid.get_point(next) == Cell::Wall
        {
            grid.set_point(cell + step, Cell::Free);
            grid.set_point(next, Cell::Free);
            stack.push(CarveFrame::new(next, rng));
            visited += 1;
            max_depth = max_depth.max(stack.len());
        }
    }
    debug!("Carved {} rooms, backtracking depth {}", visited, max_depth);
    visited
}

/// Generates a maze with the thread-local RNG.
pub fn generate_maze(size: usize) -> Result<MazeGrid, MazeError> {
    MazeGenerator::new().generate(size, &mut rand::thread_rng())
}

/// Generates a maze from a fixed seed; equal seeds give identical grids.
pub fn generate_maze_seeded(size: usize, seed: u64) -> Result<MazeGrid, MazeError> {
    let mut rng = StdRng::seed_from_u64(seed);
    MazeGenerator::new().generate(size, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_even_and_small_sizes() {
        for size in [0, 1, 3, 4, 6, 20] {
            assert_eq!(
                generate_maze_seeded(size, 0),
                Err(MazeError::InvalidSize { size })
            );
        }
        assert!(generate_maze_seeded(5, 0).is_ok());
    }

    #[test]
    fn rejects_sizes_too_large_to_address() {
        let beyond_i32 = i32::MAX as usize + 2;
        for size in [usize::MAX, usize::MAX - 2, beyond_i32] {
            assert_eq!(size % 2, 1);
            assert_eq!(validate_size(size), Err(MazeError::InvalidSize { size }));
            assert_eq!(
                generate_maze_seeded(size, 0),
                Err(MazeError::InvalidSize { size })
            );
        }
        assert_eq!(validate_size(10_001), Ok(()));
    }

    #[test]
    fn smallest_maze_is_a_tree() {
        for seed in 0..20 {
            let maze = generate_maze_seeded(5, seed).unwrap();
            // A 2x2 room lattice always yields 4 rooms and 3 passages.
            assert_eq!(maze.passable_count(), 7);
            assert!(maze.is_perfect());
        }
    }

    #[test]
    fn border_stays_walled() {
        let maze = generate_maze_seeded(15, 3).unwrap();
        let last = 14;
        for i in 0..=last {
            for (x, y) in [(i, 0), (i, last), (0, i), (last, i)] {
                assert_eq!(maze.get(x, y), Cell::Wall);
            }
        }
    }

    #[test]
    fn visits_every_room() {
        for size in [5, 7, 9, 15, 31] {
            let maze = generate_maze_seeded(size, 11).unwrap();
            let rooms = (size - 1) / 2;
            for x in 0..rooms {
                for y in 0..rooms {
                    let p = Point::new(2 * x as i32 + 1, 2 * y as i32 + 1);
                    assert!(maze.get_point(p).is_passable());
                }
            }
            // Spanning tree over rooms: rooms + (rooms - 1) passages.
            assert_eq!(maze.passable_count(), 2 * rooms * rooms - 1);
        }
    }

    #[test]
    fn even_coordinates_never_carved() {
        let maze = generate_maze_seeded(21, 5).unwrap();
        for x in (0..21).step_by(2) {
            for y in (0..21).step_by(2) {
                assert_eq!(maze.get(x, y), Cell::Wall);
            }
        }
    }

    #[test]
    fn goal_marking() {
        let mut rng = StdRng::seed_from_u64(9);
        let maze = MazeGenerator::with_goal().generate(9, &mut rng).unwrap();
        assert_eq!(maze.get(7, 7), Cell::Goal);
        assert_eq!(maze.get(1, 1), Cell::Free);
        assert!(maze.is_perfect());

        let plain = generate_maze_seeded(9, 9).unwrap();
        assert_eq!(plain.get(7, 7), Cell::Free);
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate_maze_seeded(25, 1234).unwrap();
        let b = generate_maze_seeded(25, 1234).unwrap();
        assert_eq!(a, b);
        let c = generate_maze_seeded(25, 1235).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn large_maze_does_not_overflow_stack() {
        let maze = generate_maze_seeded(401, 2).unwrap();
        assert_eq!(maze.passable_count(), 2 * 200 * 200 - 1);
    }
}
