use grid_util::Point;
use maze_pathfinding::{generate_maze_seeded, AstarSolver, MazeGrid, MazeSolver};

// In this example a path is found on a hand-drawn grid with shape
// #######
// #S....#
// #.###.#
// #.#...#
// #.#.###
// #...GE#
// #######
// where S marks the start and E the end, then on a generated maze from entry to exit.
fn main() {
    env_logger::init();
    let grid = MazeGrid::from_rows(&[
        "#######", "#.....#", "#.###.#", "#.#...#", "#.#.###", "#...G.#", "#######",
    ])
    .unwrap();
    let solver = AstarSolver::new();
    let path = solver
        .find_path(&grid, Point::new(1, 1), Point::new(5, 5))
        .unwrap();
    println!("Path:");
    for p in &path {
        println!("{:?}", p);
    }

    let maze = generate_maze_seeded(15, 1).unwrap();
    let solution = solver.solve_maze(&maze).unwrap();
    let mut picture = maze.to_string().lines().map(String::from).collect::<Vec<_>>();
    for p in &solution {
        let row = &mut picture[p.y as usize];
        row.replace_range(p.x as usize..p.x as usize + 1, "o");
    }
    println!("\n{}", picture.join("\n"));
    println!("{} steps", solver.get_path_cost(&solution));
}
