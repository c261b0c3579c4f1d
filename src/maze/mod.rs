pub mod cell;
pub mod grid;

pub use cell::Cell;
use grid::Grid;

/// Coordinate of a cell as (x, y), x being the column and y the row.
pub type Coord = (u16, u16);

/// Smallest accepted maze side length.
pub const MIN_SIZE: u16 = 5;
/// Largest accepted maze side length.
pub const MAX_SIZE: u16 = 1111;
/// Side length used when no valid size was given.
pub const DEFAULT_SIZE: u16 = 21;

/// One of the four axis-aligned steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    /// Exploration order of the solvers. Breaks ties in BFS and fixes the
    /// enumeration order of the all-paths search, so it must not change.
    pub const SEARCH_ORDER: [Direction; 4] = [
        Direction::Down,
        Direction::Right,
        Direction::Up,
        Direction::Left,
    ];

    /// Moves `steps` cells from `coord`, or `None` on underflow.
    /// Overflow is not a concern since sizes are capped far below `u16::MAX`.
    pub fn step(self, coord: Coord, steps: u16) -> Option<Coord> {
        let (x, y) = coord;
        match self {
            Direction::Down => Some((x, y.checked_add(steps)?)),
            Direction::Right => Some((x.checked_add(steps)?, y)),
            Direction::Up => Some((x, y.checked_sub(steps)?)),
            Direction::Left => Some((x.checked_sub(steps)?, y)),
        }
    }
}

/// Clamps a requested side length: even values are bumped to the next odd
/// number, then the result is forced into `[MIN_SIZE, MAX_SIZE]`.
pub fn clamp_size(requested: i64) -> u16 {
    let odd = if requested % 2 == 0 {
        requested.saturating_add(1)
    } else {
        requested
    };
    odd.clamp(MIN_SIZE as i64, MAX_SIZE as i64) as u16
}

/// Parses user input into a valid side length, falling back to
/// [`DEFAULT_SIZE`] when the input is not an integer.
pub fn parse_size(input: &str) -> u16 {
    match input.trim().parse::<i64>() {
        Ok(n) => clamp_size(n),
        Err(_) => DEFAULT_SIZE,
    }
}

/// A square maze of odd side length. Start is fixed at (1, 1), end at
/// (size - 2, size - 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
}

impl Maze {
    /// Creates a new all-wall maze.
    ///
    /// Panics if `size` is even or smaller than 3, since start and end
    /// would not be interior cells.
    pub fn new(size: u16) -> Self {
        assert!(
            size % 2 == 1 && size >= 3,
            "Maze size must be odd and at least 3, got {}",
            size
        );
        Maze {
            grid: Grid::new(size, size, Cell::Wall),
        }
    }

    /// Side length of the maze.
    pub fn size(&self) -> u16 {
        self.grid.width()
    }

    pub fn start(&self) -> Coord {
        (1, 1)
    }

    pub fn end(&self) -> Coord {
        let last = self.size() - 2;
        (last, last)
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.grid.width() && coord.1 < self.grid.height()
    }

    /// Checks that the coordinate is in bounds and open.
    pub fn is_open(&self, coord: Coord) -> bool {
        self.is_in_bounds(coord) && self[coord].is_open()
    }

    pub fn set(&mut self, coord: Coord, cell: Cell) {
        self.grid[coord] = cell;
    }

    /// Flips the state of a cell. Returns `false` without touching the maze
    /// if the coordinate is out of bounds.
    pub fn toggle(&mut self, coord: Coord) -> bool {
        if !self.is_in_bounds(coord) {
            return false;
        }
        self.grid[coord] = self.grid[coord].toggled();
        true
    }

    /// Turns every cell back into a wall.
    pub fn fill_walls(&mut self) {
        self.grid.fill(Cell::Wall);
    }

    /// Index of a coordinate in row-major order, for per-call lookup tables.
    pub fn ravel_index(&self, coord: Coord) -> usize {
        self.grid.ravel_index(coord.0, coord.1)
    }

    /// Number of cells in the maze.
    pub fn area(&self) -> usize {
        self.grid.cells().len()
    }

    pub fn count_walls(&self) -> usize {
        self.grid.cells().iter().filter(|c| c.is_wall()).count()
    }

    /// Iterates over every cell in row-major order (y outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let size = self.size();
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| (x, y)))
            .map(move |coord| (coord, self[coord]))
    }

    /// Get open neighbors of a cell, one step away, in [`Direction::SEARCH_ORDER`].
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::SEARCH_ORDER
            .into_iter()
            .filter_map(move |dir| dir.step(coord, 1))
            .filter(move |&c| self.is_open(c))
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.grid[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_maze_is_all_walls() {
        let maze = Maze::new(5);
        assert_eq!(maze.size(), 5);
        assert_eq!(maze.count_walls(), 25);
        assert_eq!(maze.start(), (1, 1));
        assert_eq!(maze.end(), (3, 3));
    }

    #[test]
    fn test_out_of_bounds() {
        let maze = Maze::new(5);
        assert!(!maze.is_in_bounds((5, 5)));
        assert!(!maze.is_in_bounds((0, 5)));
        assert!(!maze.is_in_bounds((5, 0)));
        assert!(maze.is_in_bounds((4, 4)));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut maze = Maze::new(7);
        let before = maze.clone();
        assert!(maze.toggle((2, 3)));
        assert_eq!(maze[(2, 3)], Cell::Open);
        assert_ne!(maze, before);
        assert!(maze.toggle((2, 3)));
        assert_eq!(maze, before);
    }

    #[test]
    fn test_toggle_out_of_bounds_is_noop() {
        let mut maze = Maze::new(5);
        let before = maze.clone();
        assert!(!maze.toggle((7, 1)));
        assert_eq!(maze, before);
    }

    #[test]
    fn test_open_neighbors_order() {
        let mut maze = Maze::new(5);
        for c in [(2, 1), (1, 2), (2, 3), (3, 2), (2, 2)] {
            maze.set(c, Cell::Open);
        }
        let neighbors = maze.open_neighbors((2, 2)).collect::<Vec<_>>();
        // down, right, up, left
        assert_eq!(neighbors, vec![(2, 3), (3, 2), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_open_neighbors_at_edge() {
        let mut maze = Maze::new(5);
        maze.set((1, 0), Cell::Open);
        maze.set((0, 0), Cell::Open);
        let neighbors = maze.open_neighbors((0, 0)).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(1, 0)]);
    }

    #[test]
    fn test_clamp_size() {
        assert_eq!(clamp_size(21), 21);
        assert_eq!(clamp_size(20), 21);
        assert_eq!(clamp_size(4), 5);
        assert_eq!(clamp_size(-8), 5);
        assert_eq!(clamp_size(0), 5);
        assert_eq!(clamp_size(1111), 1111);
        assert_eq!(clamp_size(1112), 1111);
        assert_eq!(clamp_size(5000), 1111);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size(" 30 "), 31);
        assert_eq!(parse_size("7"), 7);
        assert_eq!(parse_size("abc"), DEFAULT_SIZE);
        assert_eq!(parse_size(""), DEFAULT_SIZE);
    }

    #[test]
    fn test_cells_row_major() {
        let maze = Maze::new(5);
        let coords = maze.cells().map(|(c, _)| c).take(6).collect::<Vec<_>>();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (0, 1)]);
    }
}
