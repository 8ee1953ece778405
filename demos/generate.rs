use maze_pathfinding::{generate_maze_seeded, MazeGenerator};
use rand::thread_rng;

// Prints a seeded 21x21 maze followed by a random one with its exit tagged as the goal:
// - # marks a wall
// - . marks a free cell
// - G marks the goal
//
// Run with RUST_LOG=info to see the generator's summary.
fn main() {
    env_logger::init();
    let maze = generate_maze_seeded(21, 2024).unwrap();
    println!("{}", maze);
    println!("perfect: {}\n", maze.is_perfect());

    let maze = MazeGenerator::with_goal()
        .generate(15, &mut thread_rng())
        .unwrap();
    println!("{}", maze);
}
