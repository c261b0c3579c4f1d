use std::time::{Duration, Instant};

use mazeblock::{
    generators::generate_maze,
    maze::{MAX_SIZE, Maze, parse_size},
    solvers::{PathLimit, find_all_paths, solve_bfs},
};

/// Times generation, solving and path enumeration.
/// Usage: profile [size] [iterations]
fn main() {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let size = args.next().map_or(MAX_SIZE, |s| parse_size(&s));
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);

    let mut maze = Maze::new(size);
    let mut generate = Duration::ZERO;
    let mut solve = Duration::ZERO;
    let mut enumerate = Duration::ZERO;
    for i in 0..num_iters {
        let t = Instant::now();
        generate_maze(&mut maze, Some(i as u64));
        generate += t.elapsed();

        let t = Instant::now();
        let path = solve_bfs(&maze);
        solve += t.elapsed();

        let t = Instant::now();
        let paths = find_all_paths(&maze, PathLimit::default());
        enumerate += t.elapsed();

        assert_eq!(paths.len(), usize::from(path.is_some()));
    }

    let per_iter = |total: Duration| total / num_iters.max(1) as u32;
    println!("{0}x{0} maze, {1} iterations", size, num_iters);
    println!("generate:  {:?} per iteration", per_iter(generate));
    println!("solve:     {:?} per iteration", per_iter(solve));
    println!("all paths: {:?} per iteration", per_iter(enumerate));
}
