use crate::{MazeError, N_SMALLVEC_SIZE, STEP_COST};
use core::fmt;
use grid_util::Point;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;
use std::str::FromStr;

/// Unit steps of the 4-neighbourhood in the order they are expanded: +x, +y, -x, -y.
pub const NEUMANN_STEPS: [Point; 4] = [
    Point { x: 1, y: 0 },
    Point { x: 0, y: 1 },
    Point { x: -1, y: 0 },
    Point { x: 0, y: -1 },
];

/// Row-major index of `(x, y)` on a `size` x `size` grid, or [None] outside of it.
fn cell_index(size: usize, x: i32, y: i32) -> Option<usize> {
    let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
    (x < size && y < size).then(|| y * size + x)
}

/// State of a single grid cell. [Cell::Free] and [Cell::Goal] are both passable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Free,
    Goal,
}

impl Cell {
    pub fn is_passable(self) -> bool {
        !matches!(self, Cell::Wall)
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Free => '.',
            Cell::Goal => 'G',
        }
    }

    pub fn from_char(c: char) -> Result<Cell, MazeError> {
        match c {
            '#' => Ok(Cell::Wall),
            '.' | ' ' => Ok(Cell::Free),
            'G' => Ok(Cell::Goal),
            other => Err(MazeError::UnknownCell(other)),
        }
    }
}

/// A square grid of [Cell] values stored row-major. Cells are addressed by `(x, y)` with `x` the
/// column and `y` the row, both in `[0, size)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    size: usize,
    cells: Vec<Cell>,
}

impl MazeGrid {
    pub fn new(size: usize, fill: Cell) -> MazeGrid {
        MazeGrid {
            size,
            cells: vec![fill; size * size],
        }
    }

    /// Builds a grid from a textual picture where `#` is a wall, `.` (or a space) is free and `G`
    /// is the goal. Every row must be as wide as there are rows.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<MazeGrid, MazeError> {
        let size = rows.len();
        let mut grid = MazeGrid::new(size, Cell::Wall);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let width = row.chars().count();
            if width != size {
                return Err(MazeError::NotSquare {
                    row: y,
                    width,
                    expected: size,
                });
            }
            for (x, c) in row.chars().enumerate() {
                grid.set(x as i32, y as i32, Cell::from_char(c)?);
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The fixed entry cell of a generated maze.
    pub fn entry(&self) -> Point {
        Point::new(1, 1)
    }

    /// The fixed exit cell of a generated maze, opposite the entry.
    pub fn exit(&self) -> Point {
        let last = self.size as i32 - 2;
        Point::new(last, last)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        cell_index(self.size, x, y).is_some()
    }

    pub fn point_in_bounds(&self, point: &Point) -> bool {
        self.in_bounds(point.x, point.y)
    }

    /// Rejects points outside the grid extents.
    pub fn check_bounds(&self, point: &Point) -> Result<(), MazeError> {
        if self.point_in_bounds(point) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                point: *point,
                size: self.size,
            })
        }
    }

    /// Panics if `(x, y)` is out of bounds, like slice indexing.
    fn compute_ix(&self, x: i32, y: i32) -> usize {
        match cell_index(self.size, x, y) {
            Some(ix) => ix,
            None => panic!("({x}, {y}) out of bounds"),
        }
    }

    pub fn get_ix_point(&self, point: &Point) -> usize {
        self.compute_ix(point.x, point.y)
    }

    /// Panics if `(x, y)` is out of bounds, like slice indexing.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.cells[self.compute_ix(x, y)]
    }

    pub fn get_point(&self, point: Point) -> Cell {
        self.get(point.x, point.y)
    }

    pub fn try_get(&self, point: Point) -> Option<Cell> {
        cell_index(self.size, point.x, point.y).map(|ix| self.cells[ix])
    }

    /// Panics if `(x, y)` is out of bounds, like slice indexing.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        let ix = self.compute_ix(x, y);
        self.cells[ix] = cell;
    }

    pub fn set_point(&mut self, point: Point, cell: Cell) {
        self.set(point.x, point.y, cell)
    }

    /// In bounds and not a wall.
    pub fn is_passable(&self, point: &Point) -> bool {
        self.try_get(*point).is_some_and(Cell::is_passable)
    }

    /// Passable 4-neighbours of `point` in [NEUMANN_STEPS] order.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        NEUMANN_STEPS
            .iter()
            .map(|step| *point + *step)
            .filter(|p| self.is_passable(p))
            .collect()
    }

    pub fn neighborhood_points_and_cost(
        &self,
        point: &Point,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        self.neighborhood_points(point)
            .into_iter()
            .map(|p| (p, STEP_COST))
            .collect()
    }

    /// All passable cells, column by column.
    pub fn passable_cells(&self) -> impl Iterator<Item = Point> + '_ {
        let size = self.size as i32;
        iproduct!(0..size, 0..size)
            .map(|(x, y)| Point::new(x, y))
            .filter(move |p| self.get_point(*p).is_passable())
    }

    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_passable()).count()
    }

    /// Pairs of 4-adjacent passable cells, each pair listed once.
    pub fn passages(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.passable_cells().flat_map(move |p| {
            [p + NEUMANN_STEPS[0], p + NEUMANN_STEPS[1]]
                .into_iter()
                .filter(move |n| self.is_passable(n))
                .map(move |n| (p, n))
        })
    }

    /// Number of carved connections between passable cells.
    pub fn carved_edges(&self) -> usize {
        self.passages().count()
    }

    /// Links up 4-adjacent passable cells into connected components.
    pub fn generate_components(&self) -> Components {
        let mut union_find = UnionFind::new(self.cells.len());
        for (a, b) in self.passages() {
            union_find.union(self.get_ix_point(&a), self.get_ix_point(&b));
        }
        Components {
            size: self.size,
            passable: self.cells.iter().map(|c| c.is_passable()).collect(),
            union_find,
        }
    }

    /// Checks that the passable cells form a single tree: connected and without cycles.
    pub fn is_perfect(&self) -> bool {
        let mut union_find = UnionFind::new(self.cells.len());
        for (a, b) in self.passages() {
            if !union_find.union(self.get_ix_point(&a), self.get_ix_point(&b)) {
                debug!("Cycle closed between {:?} and {:?}", a, b);
                return false;
            }
        }
        let mut roots = self
            .passable_cells()
            .map(|p| union_find.find(self.get_ix_point(&p)));
        match roots.next() {
            Some(root) => roots.all(|r| r == root),
            None => false,
        }
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line = row.iter().map(|c| c.to_char()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for MazeGrid {
    type Err = MazeError;

    /// Parses the [Display] format back; blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();
        MazeGrid::from_rows(&rows)
    }
}

/// Connected components of the passable cells of a [MazeGrid], kept in a [UnionFind].
#[derive(Clone, Debug)]
pub struct Components {
    size: usize,
    passable: Vec<bool>,
    union_find: UnionFind<usize>,
}

impl Components {
    /// Retrieves the component id a given passable [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        cell_index(self.size, point.x, point.y)
            .filter(|&ix| self.passable[ix])
            .map(|ix| self.union_find.find(ix))
    }

    /// Checks if start and goal are passable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get_component(start), self.get_component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Number of distinct components among passable cells.
    pub fn count(&self) -> usize {
        let mut roots = (0..self.passable.len())
            .filter(|&ix| self.passable[ix])
            .map(|ix| self.union_find.find(ix))
            .collect::<Vec<_>>();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    }
}
