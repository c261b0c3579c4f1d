use super::Path;
use crate::maze::{Coord, Direction, Maze};

/// Bounds on an enumeration: how many paths it may collect and how many
/// cells it may step into while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLimit {
    pub max_paths: Option<usize>,
    /// Counts every cell pushed onto the search path, dead ends included.
    pub max_steps: Option<usize>,
}

impl PathLimit {
    pub const UNBOUNDED: PathLimit = PathLimit {
        max_paths: None,
        max_steps: None,
    };

    pub fn at_most(max_paths: usize) -> Self {
        PathLimit {
            max_paths: Some(max_paths),
            max_steps: None,
        }
    }

    pub fn with_max_steps(self, max_steps: usize) -> Self {
        PathLimit {
            max_steps: Some(max_steps),
            ..self
        }
    }
}

impl Default for PathLimit {
    fn default() -> Self {
        PathLimit::at_most(10_000).with_max_steps(5_000_000)
    }
}

/// Every simple path from start to end, in the order the search reached them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: Vec<Path>,
    /// The search stopped at the limit, more paths may exist.
    truncated: bool,
}

impl PathSet {
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }
}

/// Enumerates every simple path from start to end with a backtracking DFS.
///
/// Neighbors are tried in [`Direction::SEARCH_ORDER`]. A cell is marked
/// visited only while it is on the current path, so sibling branches may reuse
/// it. The end cell is never marked: reaching it records the path and
/// backtracks right away.
///
/// The number of paths, and the work needed to find them, grows
/// exponentially on open grids, hence `limit`. Running out of either budget
/// stops the search and marks the set as truncated.
pub fn find_all_paths(maze: &Maze, limit: PathLimit) -> PathSet {
    let mut result = PathSet::default();
    let start = maze.start();
    let goal = maze.end();
    if !maze.is_open(start) || !maze.is_open(goal) {
        return result;
    }

    let mut visited = vec![false; maze.area()];
    let mut path: Path = vec![start];
    // Cell on the current path with the index of the next direction to try
    let mut stack: Vec<(Coord, usize)> = Vec::new();

    if start == goal {
        if limit.max_paths == Some(0) {
            result.truncated = true;
        } else {
            result.paths.push(path);
        }
        return result;
    }
    let mut steps = 0usize;
    visited[maze.ravel_index(start)] = true;
    stack.push((start, 0));

    while let Some((cell, next)) = stack.last_mut() {
        let cell = *cell;
        if *next >= Direction::SEARCH_ORDER.len() {
            // Exhausted, free the cell for sibling branches
            visited[maze.ravel_index(cell)] = false;
            stack.pop();
            path.pop();
            continue;
        }
        let direction = Direction::SEARCH_ORDER[*next];
        *next += 1;

        let Some(neighbor) = direction.step(cell, 1) else {
            continue;
        };
        if !maze.is_open(neighbor) || visited[maze.ravel_index(neighbor)] {
            continue;
        }

        if limit.max_steps.is_some_and(|max| steps >= max) {
            result.truncated = true;
            tracing::warn!(
                "[all paths] gave up after {} steps on a {}x{} maze with {} paths found",
                steps,
                maze.size(),
                maze.size(),
                result.paths.len()
            );
            break;
        }
        steps += 1;

        path.push(neighbor);
        if neighbor == goal {
            if limit.max_paths.is_some_and(|max| result.paths.len() >= max) {
                // One more path exists than the limit allows
                result.truncated = true;
                tracing::warn!(
                    "[all paths] stopped at {} paths on a {}x{} maze, more exist",
                    result.paths.len(),
                    maze.size(),
                    maze.size()
                );
                break;
            }
            result.paths.push(path.clone());
            path.pop();
        } else {
            visited[maze.ravel_index(neighbor)] = true;
            stack.push((neighbor, 0));
        }
    }

    tracing::debug!("[all paths] found {} paths", result.paths.len());
    result
}
