use crate::{
    generators::get_rng,
    maze::{Cell, Coord, Direction, Maze},
};
use rand::{rngs::StdRng, seq::SliceRandom};

/// Directions before shuffling.
const CARVE_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

/// One room on the carving stack, with the directions it still has to try.
struct Frame {
    room: Coord,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    /// Opens `room` and draws its direction order.
    fn enter(maze: &mut Maze, room: Coord, rng: &mut StdRng) -> Self {
        maze.set(room, Cell::Open);
        let mut directions = CARVE_DIRECTIONS;
        directions.shuffle(rng);
        Frame {
            room,
            directions,
            next: 0,
        }
    }
}

/// Randomized recursive backtracker over the rooms (cells with both
/// coordinates odd), starting from (1, 1).
///
/// Runs on an explicit stack so very large mazes don't overflow the call
/// stack. Each room shuffles its directions when it is entered, and a target
/// room is only checked for being a wall when its turn comes, exactly as the
/// recursive formulation would.
pub fn recursive_backtrack(maze: &mut Maze, seed: Option<u64>) {
    let mut rng = get_rng(seed);

    // Initialize the maze with walls
    maze.fill_walls();

    let start = maze.start();
    let mut stack = vec![Frame::enter(maze, start, &mut rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next >= frame.directions.len() {
            // All directions tried, backtrack
            stack.pop();
            continue;
        }
        let direction = frame.directions[frame.next];
        frame.next += 1;
        let room = frame.room;

        let Some(target) = direction.step(room, 2) else {
            continue;
        };
        if maze.is_in_bounds(target) && maze[target].is_wall() {
            // Open the cell between the two rooms, then carve from the target
            if let Some(between) = direction.step(room, 1) {
                maze.set(between, Cell::Open);
            }
            let frame = Frame::enter(maze, target, &mut rng);
            stack.push(frame);
        }
    }
}
