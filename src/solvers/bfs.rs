use std::collections::VecDeque;

use super::Path;
use crate::maze::{Coord, Maze};

/// Breadth-first search from start to end over open cells.
///
/// Returns one shortest path (start and end included), or `None` if the end
/// cannot be reached. Neighbors are queued in [`Direction::SEARCH_ORDER`],
/// which makes the chosen path deterministic for a given maze.
///
/// [`Direction::SEARCH_ORDER`]: crate::maze::Direction::SEARCH_ORDER
pub fn solve_bfs(maze: &Maze) -> Option<Path> {
    let start = maze.start();
    let goal = maze.end();
    if !maze.is_open(start) || !maze.is_open(goal) {
        return None;
    }

    let mut visited = vec![false; maze.area()];
    let mut parent: Vec<Option<Coord>> = vec![None; maze.area()];
    let mut queue = VecDeque::from([start]);
    visited[maze.ravel_index(start)] = true;

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(reconstruct_path(maze, &parent, goal));
        }
        for neighbor in maze.open_neighbors(current) {
            let idx = maze.ravel_index(neighbor);
            if !visited[idx] {
                visited[idx] = true;
                parent[idx] = Some(current);
                queue.push_back(neighbor);
            }
        }
    }

    None // No path found
}

/// Walks the parent links back from `goal` to the start.
fn reconstruct_path(maze: &Maze, parent: &[Option<Coord>], goal: Coord) -> Path {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = parent[maze.ravel_index(current)] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
