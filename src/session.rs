use rand::{Rng, rngs::StdRng};

use crate::{
    export,
    generators::{generate_maze, get_rng},
    maze::{Coord, DEFAULT_SIZE, Maze, clamp_size},
    solvers::{Path, PathLimit, PathSet, find_all_paths, solve_bfs},
};

/// Settings a session starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Requested side length, clamped before use.
    pub size: u16,
    /// Seed for the whole sequence of generated mazes. Random if `None`.
    pub seed: Option<u64>,
    /// Cap on the all-paths enumeration.
    pub path_limit: PathLimit,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            path_limit: PathLimit::default(),
        }
    }
}

/// The live maze plus everything derived from it and the editing modes.
///
/// Derived results are always rebuilt from scratch whenever the maze changes.
pub struct Session {
    maze: Maze,
    rng: StdRng,
    path_limit: PathLimit,
    /// Shortest path for the current maze, `None` when there is none
    solution: Option<Path>,
    /// Only computed while reveal mode is on
    all_paths: Option<PathSet>,
    edit_mode: bool,
    reveal_all_paths: bool,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(SessionConfig::default())
    }
}

impl Session {
    /// Creates a session and generates its first maze.
    pub fn new(config: SessionConfig) -> Self {
        let size = clamp_size(config.size as i64);
        let mut session = Session {
            maze: Maze::new(size),
            rng: get_rng(config.seed),
            path_limit: config.path_limit,
            solution: None,
            all_paths: None,
            edit_mode: false,
            reveal_all_paths: false,
        };
        session.regenerate(size as i64);
        session
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn size(&self) -> u16 {
        self.maze.size()
    }

    pub fn solution(&self) -> Option<&Path> {
        self.solution.as_ref()
    }

    pub fn all_paths(&self) -> Option<&PathSet> {
        self.all_paths.as_ref()
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn reveal_all_paths(&self) -> bool {
        self.reveal_all_paths
    }

    /// Builds a fresh maze of the requested size (clamped) and recomputes
    /// everything derived from it.
    pub fn regenerate(&mut self, requested_size: i64) {
        let size = clamp_size(requested_size);
        if size != self.maze.size() {
            self.maze = Maze::new(size);
        }
        let seed = self.rng.random::<u64>();
        generate_maze(&mut self.maze, Some(seed));
        tracing::info!("[session] regenerated {}x{} maze", size, size);
        self.refresh();
    }

    /// Flips a cell while in edit mode. Returns whether the maze changed.
    pub fn toggle_cell(&mut self, coord: Coord) -> bool {
        if !self.edit_mode || !self.maze.toggle(coord) {
            return false;
        }
        tracing::debug!("[session] toggled cell {:?} to {:?}", coord, self.maze[coord]);
        self.refresh();
        true
    }

    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.set_edit_mode(!self.edit_mode);
        self.edit_mode
    }

    /// Switches the all-paths overlay. Turning it on enumerates the paths of
    /// the current maze, turning it off drops them.
    pub fn set_reveal_all_paths(&mut self, on: bool) {
        self.reveal_all_paths = on;
        self.all_paths = if on {
            Some(find_all_paths(&self.maze, self.path_limit))
        } else {
            None
        };
    }

    pub fn toggle_reveal_all_paths(&mut self) -> bool {
        self.set_reveal_all_paths(!self.reveal_all_paths);
        self.reveal_all_paths
    }

    /// The datapack text for the current maze.
    pub fn export(&self, block: &str) -> String {
        export::format_datapack(&self.maze, block)
    }

    fn refresh(&mut self) {
        self.solution = solve_bfs(&self.maze);
        match &self.solution {
            Some(path) => tracing::debug!("[session] shortest path has {} cells", path.len()),
            None => tracing::debug!("[session] no path from start to end"),
        }
        self.set_reveal_all_paths(self.reveal_all_paths);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Cell;

    fn seeded(size: u16, seed: u64) -> Session {
        Session::new(SessionConfig {
            size,
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_new_session_is_solved() {
        let session = seeded(21, 1);
        assert_eq!(session.size(), 21);
        assert!(session.solution().is_some());
        assert!(session.all_paths().is_none());
        assert!(!session.edit_mode());
    }

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(seeded(4, 0).size(), 5);
        let mut session = seeded(8, 0);
        assert_eq!(session.size(), 9);
        session.regenerate(2000);
        assert_eq!(session.size(), 1111);
        session.regenerate(-3);
        assert_eq!(session.size(), 5);
    }

    #[test]
    fn test_seeded_sessions_repeat() {
        let mut a = seeded(15, 77);
        let mut b = seeded(15, 77);
        assert_eq!(a.maze(), b.maze());
        a.regenerate(15);
        b.regenerate(15);
        assert_eq!(a.maze(), b.maze());
    }

    #[test]
    fn test_toggle_requires_edit_mode() {
        let mut session = seeded(9, 3);
        let before = session.maze().clone();
        assert!(!session.toggle_cell((2, 2)));
        assert_eq!(session.maze(), &before);

        assert!(session.toggle_edit_mode());
        assert!(session.toggle_cell((2, 2)));
        assert_ne!(session.maze(), &before);
        assert!(session.toggle_cell((2, 2)));
        assert_eq!(session.maze(), &before);
        assert!(!session.toggle_cell((100, 2)));
    }

    #[test]
    fn test_toggle_recomputes_solution() {
        let mut session = seeded(9, 4);
        session.set_edit_mode(true);
        let end = session.maze().end();
        assert!(session.toggle_cell(end));
        assert_eq!(session.maze()[end], Cell::Wall);
        assert!(session.solution().is_none());
        assert!(session.toggle_cell(end));
        assert!(session.solution().is_some());
    }

    #[test]
    fn test_reveal_all_paths() {
        let mut session = seeded(11, 5);
        assert!(session.toggle_reveal_all_paths());
        let paths = session.all_paths().expect("paths computed when revealed");
        // perfect maze
        assert_eq!(paths.len(), 1);
        assert_eq!(Some(&paths.paths()[0]), session.solution());

        assert!(!session.toggle_reveal_all_paths());
        assert!(session.all_paths().is_none());
    }

    #[test]
    fn test_edit_while_revealed_recomputes_paths() {
        let mut session = seeded(5, 6);
        session.set_reveal_all_paths(true);
        session.set_edit_mode(true);
        // open the whole interior: 12 paths in a 3x3 block
        for y in 1..4 {
            for x in 1..4 {
                if session.maze()[(x, y)].is_wall() {
                    session.toggle_cell((x, y));
                }
            }
        }
        assert_eq!(session.all_paths().map(PathSet::len), Some(12));
    }

    #[test]
    fn test_regenerate_keeps_modes() {
        let mut session = seeded(7, 8);
        session.set_reveal_all_paths(true);
        session.set_edit_mode(true);
        session.regenerate(9);
        assert!(session.edit_mode());
        assert_eq!(session.all_paths().map(PathSet::len), Some(1));
    }

    #[test]
    fn test_export_matches_formatter() {
        let session = seeded(7, 9);
        assert_eq!(
            session.export(""),
            export::format_datapack(session.maze(), "stone")
        );
    }
}
