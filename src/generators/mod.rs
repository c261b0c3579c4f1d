use rand::{SeedableRng, rngs::StdRng};

mod recur_backtrack;

pub use recur_backtrack::recursive_backtrack;

use crate::maze::{Cell, Maze};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Carves a perfect maze into `maze`, then forces the start and end cells
/// open whatever the carving left there.
pub fn generate_maze(maze: &mut Maze, seed: Option<u64>) {
    recursive_backtrack(maze, seed);
    maze.set(maze.start(), Cell::Open);
    maze.set(maze.end(), Cell::Open);
    tracing::debug!(
        "[generator] carved {}x{} maze with seed {:?}, {} walls left",
        maze.size(),
        maze.size(),
        seed,
        maze.count_walls()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Coord;
    use std::collections::VecDeque;

    /// Every open cell reachable from start, plus the number of open-open
    /// adjacencies among them.
    fn flood(maze: &Maze) -> (usize, usize) {
        let mut seen = vec![false; maze.area()];
        let mut queue: VecDeque<Coord> = VecDeque::from([maze.start()]);
        seen[maze.ravel_index(maze.start())] = true;
        let mut count = 0;
        let mut edges = 0;
        while let Some(c) = queue.pop_front() {
            count += 1;
            for n in maze.open_neighbors(c) {
                edges += 1;
                let idx = maze.ravel_index(n);
                if !seen[idx] {
                    seen[idx] = true;
                    queue.push_back(n);
                }
            }
        }
        // each edge was counted from both ends
        (count, edges / 2)
    }

    #[test]
    fn test_start_and_end_open() {
        for size in [5, 7, 9, 21, 51] {
            for seed in 0..5 {
                let mut maze = Maze::new(size);
                generate_maze(&mut maze, Some(seed));
                assert_eq!(maze[maze.start()], Cell::Open);
                assert_eq!(maze[maze.end()], Cell::Open);
            }
        }
    }

    #[test]
    fn test_perfect_maze_is_connected_tree() {
        for seed in 0..10 {
            let mut maze = Maze::new(21);
            generate_maze(&mut maze, Some(seed));
            let open = maze.area() - maze.count_walls();
            let (reached, edges) = flood(&maze);
            // single component containing start
            assert_eq!(reached, open);
            // a tree has exactly one edge fewer than nodes
            assert_eq!(edges, open - 1);
        }
    }

    #[test]
    fn test_every_room_is_carved() {
        let mut maze = Maze::new(15);
        generate_maze(&mut maze, Some(3));
        for y in (1..15).step_by(2) {
            for x in (1..15).step_by(2) {
                assert_eq!(maze[(x, y)], Cell::Open, "room ({}, {}) left as wall", x, y);
            }
        }
    }

    #[test]
    fn test_border_stays_wall() {
        let mut maze = Maze::new(11);
        generate_maze(&mut maze, Some(9));
        for i in 0..11 {
            assert!(maze[(i, 0)].is_wall());
            assert!(maze[(i, 10)].is_wall());
            assert!(maze[(0, i)].is_wall());
            assert!(maze[(10, i)].is_wall());
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let mut a = Maze::new(31);
        let mut b = Maze::new(31);
        generate_maze(&mut a, Some(42));
        generate_maze(&mut b, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_regenerate_resets_previous_edits() {
        let mut maze = Maze::new(9);
        generate_maze(&mut maze, Some(1));
        let reference = maze.clone();
        maze.toggle((0, 0));
        maze.toggle((2, 2));
        generate_maze(&mut maze, Some(1));
        assert_eq!(maze, reference);
    }
}
