use grid_util::Point;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::maze_grid::MazeGrid;

/// Random draws allowed per requested item before giving up.
pub const ATTEMPTS_PER_ITEM: usize = 10;
/// Lower bound on the spacing between two scattered items.
pub const MIN_ITEM_SPACING: i32 = 3;

/// Minimum Manhattan distance between items on a grid of the given size: one eighth of the side,
/// but never below [MIN_ITEM_SPACING].
pub fn item_spacing(size: usize) -> i32 {
    MIN_ITEM_SPACING.max((size / 8) as i32)
}

/// Scatters up to `count` item positions over the free interior of `grid`, keeping them at least
/// [item_spacing] apart and away from the entry and exit. Draws are uniform over the candidate
/// cells and limited to `count * ATTEMPTS_PER_ITEM`, so fewer than `count` items may be returned
/// on small or crowded grids.
pub fn scatter_items<R: Rng + ?Sized>(grid: &MazeGrid, count: usize, rng: &mut R) -> Vec<Point> {
    let entry = grid.entry();
    let exit = grid.exit();
    let last = grid.size() as i32 - 1;
    let candidates = grid
        .passable_cells()
        .filter(|p| p.x > 0 && p.y > 0 && p.x < last && p.y < last)
        .filter(|p| *p != entry && *p != exit)
        .collect::<Vec<_>>();
    let spacing = item_spacing(grid.size());
    let mut placed: Vec<Point> = Vec::with_capacity(count);
    for _ in 0..count * ATTEMPTS_PER_ITEM {
        if placed.len() >= count {
            break;
        }
        let Some(&candidate) = candidates.choose(rng) else {
            debug!("No free interior cells to place items on");
            break;
        };
        if placed
            .iter()
            .all(|p| p.manhattan_distance(&candidate) >= spacing)
        {
            placed.push(candidate);
        }
    }
    info!(
        "Placed {} of {} items with spacing {}",
        placed.len(),
        count,
        spacing
    );
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_maze_seeded, Cell};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn spacing_grows_with_size() {
        assert_eq!(item_spacing(15), 3);
        assert_eq!(item_spacing(31), 3);
        assert_eq!(item_spacing(33), 4);
        assert_eq!(item_spacing(101), 12);
    }

    #[test]
    fn items_are_spaced_on_free_cells() {
        let maze = generate_maze_seeded(31, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let items = scatter_items(&maze, 20, &mut rng);
        assert!(!items.is_empty());
        assert!(items.len() <= 20);
        for (i, a) in items.iter().enumerate() {
            assert_eq!(maze.get_point(*a), Cell::Free);
            assert_ne!(*a, maze.entry());
            assert_ne!(*a, maze.exit());
            for b in &items[i + 1..] {
                assert!(a.manhattan_distance(b) >= item_spacing(31));
            }
        }
    }

    #[test]
    fn same_seed_same_items() {
        let maze = generate_maze_seeded(19, 8).unwrap();
        let a = scatter_items(&maze, 8, &mut StdRng::seed_from_u64(1));
        let b = scatter_items(&maze, 8, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn no_candidates_no_items() {
        let grid = MazeGrid::new(5, Cell::Wall);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(scatter_items(&grid, 5, &mut rng).is_empty());
        let maze = generate_maze_seeded(5, 0).unwrap();
        assert!(scatter_items(&maze, 0, &mut rng).is_empty());
    }
}
