mod all_paths;
mod bfs;

pub use all_paths::{PathLimit, PathSet, find_all_paths};
pub use bfs::solve_bfs;

use crate::maze::{Coord, Maze};

/// Ordered cells from start to end, each 4-adjacent to the previous one.
pub type Path = Vec<Coord>;

/// Checks that `path` runs from start to end over open cells, moves one
/// step at a time and never revisits a cell.
pub fn is_valid_path(maze: &Maze, path: &[Coord]) -> bool {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return false;
    };
    if first != maze.start() || last != maze.end() {
        return false;
    }
    if !path.iter().all(|&c| maze.is_open(c)) {
        return false;
    }
    let adjacent = path
        .windows(2)
        .all(|pair| pair[0].0.abs_diff(pair[1].0) + pair[0].1.abs_diff(pair[1].1) == 1);
    let mut seen = vec![false; maze.area()];
    let simple = path.iter().all(|&c| {
        let idx = maze.ravel_index(c);
        !std::mem::replace(&mut seen[idx], true)
    });
    adjacent && simple
}
