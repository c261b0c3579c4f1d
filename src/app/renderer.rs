use std::io::{Stdout, Write};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    maze::{Cell, Coord},
    session::Session,
};

/// Colours cycled through when every path is revealed, indexed by path number.
const PATH_PALETTE: [Color; 20] = [
    Color::Rgb { r: 230, g: 25, b: 75 },
    Color::Rgb { r: 60, g: 180, b: 75 },
    Color::Rgb { r: 255, g: 225, b: 25 },
    Color::Rgb { r: 0, g: 130, b: 200 },
    Color::Rgb { r: 245, g: 130, b: 48 },
    Color::Rgb { r: 145, g: 30, b: 180 },
    Color::Rgb { r: 70, g: 240, b: 240 },
    Color::Rgb { r: 240, g: 50, b: 230 },
    Color::Rgb { r: 210, g: 245, b: 60 },
    Color::Rgb { r: 250, g: 190, b: 212 },
    Color::Rgb { r: 0, g: 128, b: 128 },
    Color::Rgb { r: 220, g: 190, b: 255 },
    Color::Rgb { r: 170, g: 110, b: 40 },
    Color::Rgb { r: 255, g: 250, b: 200 },
    Color::Rgb { r: 128, g: 0, b: 0 },
    Color::Rgb { r: 170, g: 255, b: 195 },
    Color::Rgb { r: 128, g: 128, b: 0 },
    Color::Rgb { r: 255, g: 215, b: 180 },
    Color::Rgb { r: 0, g: 0, b: 128 },
    Color::Rgb { r: 128, g: 128, b: 128 },
];

/// What to draw on top of an open cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    None,
    Solution,
    /// Index into [`PATH_PALETTE`]
    PathColor(usize),
}

pub struct Renderer {
    /// Top-left cell of the visible part of the maze
    viewport: Coord,
}

impl Renderer {
    /// Rows reserved below the maze for status and help
    pub const NUM_STATUS_ROWS: u16 = 2;

    pub fn new() -> Self {
        Self { viewport: (0, 0) }
    }

    /// Number of maze cells that fit on screen, (columns, rows)
    fn visible_cells(term_width: u16, term_height: u16) -> (u16, u16) {
        (
            (term_width / Cell::CELL_WIDTH).max(1),
            term_height.saturating_sub(Renderer::NUM_STATUS_ROWS).max(1),
        )
    }

    /// Scroll the viewport along one axis so `cursor` stays on screen
    fn follow(offset: u16, cursor: u16, visible: u16, size: u16) -> u16 {
        let offset = if cursor < offset {
            cursor
        } else if cursor >= offset + visible {
            cursor + 1 - visible
        } else {
            offset
        };
        offset.min(size.saturating_sub(visible))
    }

    /// Marks every cell covered by the overlay: the revealed paths when the
    /// mode is on, the shortest path otherwise.
    fn overlays(session: &Session) -> Vec<Overlay> {
        let maze = session.maze();
        let mut overlays = vec![Overlay::None; maze.area()];
        match session.all_paths() {
            Some(paths) => {
                // later paths paint over earlier ones
                for (i, path) in paths.iter().enumerate() {
                    for &coord in path {
                        overlays[maze.ravel_index(coord)] =
                            Overlay::PathColor(i % PATH_PALETTE.len());
                    }
                }
            }
            None => {
                if let Some(path) = session.solution() {
                    for &coord in path {
                        overlays[maze.ravel_index(coord)] = Overlay::Solution;
                    }
                }
            }
        }
        overlays
    }

    /// Redraws the visible part of the maze and the status rows.
    pub fn draw(
        &mut self,
        stdout: &mut Stdout,
        session: &Session,
        cursor_pos: Coord,
        message: &str,
    ) -> std::io::Result<()> {
        let (term_width, term_height) = terminal::size()?;
        let (cols, rows) = Renderer::visible_cells(term_width, term_height);
        let maze = session.maze();
        let size = maze.size();
        self.viewport = (
            Renderer::follow(self.viewport.0, cursor_pos.0, cols, size),
            Renderer::follow(self.viewport.1, cursor_pos.1, rows, size),
        );
        let overlays = Renderer::overlays(session);

        queue!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        let (x0, y0) = self.viewport;
        let rows_drawn = rows.min(size - y0);
        for y in y0..y0 + rows_drawn {
            stdout.queue(cursor::MoveTo(0, y - y0))?;
            for x in x0..x0 + cols.min(size - x0) {
                let coord = (x, y);
                let cell = maze[coord];
                let is_cursor = coord == cursor_pos;
                let content = if coord == maze.start() && cell.is_open() {
                    "🟩".with(Color::Green)
                } else if coord == maze.end() && cell.is_open() {
                    "🟥".with(Color::Red)
                } else if is_cursor {
                    match cell {
                        Cell::Wall => "▓▓".with(Color::Cyan),
                        Cell::Open => "░░".with(Color::Cyan),
                    }
                } else {
                    match (cell, overlays[maze.ravel_index(coord)]) {
                        (Cell::Wall, _) => {
                            stdout.queue(style::Print(cell))?;
                            continue;
                        }
                        (Cell::Open, Overlay::None) => "  ".with(Color::Reset),
                        (Cell::Open, Overlay::Solution) => "  ".on(Color::Yellow),
                        (Cell::Open, Overlay::PathColor(i)) => "  ".on(PATH_PALETTE[i]),
                    }
                };
                let content = if is_cursor {
                    content.attribute(Attribute::Reverse)
                } else {
                    content
                };
                stdout.queue(style::PrintStyledContent(content))?;
            }
        }

        self.draw_status(stdout, session, message, rows_drawn, term_width)?;
        stdout.flush()
    }

    fn draw_status(
        &self,
        stdout: &mut Stdout,
        session: &Session,
        message: &str,
        row: u16,
        term_width: u16,
    ) -> std::io::Result<()> {
        let solution = match session.solution() {
            Some(path) => format!("shortest path {} steps", path.len() - 1),
            None => "no path".to_string(),
        };
        let paths = match session.all_paths() {
            Some(set) if set.is_truncated() => format!(" | {}+ paths", set.len()),
            Some(set) => format!(" | {} paths", set.len()),
            None => String::new(),
        };
        let mode = if session.edit_mode() { " | EDIT" } else { "" };
        let status = format!(
            "{0}x{0} | {1}{2}{3} | {4}",
            session.size(),
            solution,
            paths,
            mode,
            message
        );
        let help = "arrows/hjkl move | e edit | space toggle | r regen | s size | p paths | x export | q quit";

        let width = term_width as usize;
        let (status, _) = status.unicode_truncate(width);
        let (help, _) = help.unicode_truncate(width);
        queue!(
            stdout,
            cursor::MoveTo(0, row),
            style::PrintStyledContent(status.with(Color::Green).attribute(Attribute::Bold)),
            cursor::MoveTo(0, row + 1),
            style::PrintStyledContent(help.with(Color::Cyan)),
        )
    }

    /// Shows `prompt` and the current input on the status row.
    pub fn draw_prompt(
        &self,
        stdout: &mut Stdout,
        prompt: &str,
        input: &str,
    ) -> std::io::Result<()> {
        let (term_width, term_height) = terminal::size()?;
        let line = format!("{}{}", prompt, input);
        let (line, _) = line.unicode_truncate(term_width as usize);
        queue!(
            stdout,
            cursor::MoveTo(0, term_height.saturating_sub(Renderer::NUM_STATUS_ROWS)),
            terminal::Clear(ClearType::FromCursorDown),
            style::PrintStyledContent(line.with(Color::Yellow)),
        )?;
        stdout.flush()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionConfig;

    #[test]
    fn test_follow_keeps_cursor_visible() {
        // cursor inside the viewport
        assert_eq!(Renderer::follow(0, 3, 10, 51), 0);
        // cursor past the right edge
        assert_eq!(Renderer::follow(0, 12, 10, 51), 3);
        // cursor before the left edge
        assert_eq!(Renderer::follow(20, 5, 10, 51), 5);
        // never scroll past the end of the maze
        assert_eq!(Renderer::follow(45, 50, 10, 51), 41);
        // maze smaller than the screen
        assert_eq!(Renderer::follow(0, 4, 80, 21), 0);
    }

    #[test]
    fn test_visible_cells() {
        assert_eq!(Renderer::visible_cells(80, 24), (40, 22));
        assert_eq!(Renderer::visible_cells(1, 1), (1, 1));
    }

    #[test]
    fn test_overlays_follow_mode() {
        let mut session = Session::new(SessionConfig {
            size: 9,
            seed: Some(2),
            ..Default::default()
        });
        let maze = session.maze().clone();
        let overlays = Renderer::overlays(&session);
        let start = maze.ravel_index(maze.start());
        assert_eq!(overlays[start], Overlay::Solution);

        session.set_reveal_all_paths(true);
        let overlays = Renderer::overlays(&session);
        assert_eq!(overlays[start], Overlay::PathColor(0));
        assert_eq!(overlays[maze.ravel_index((0, 0))], Overlay::None);
    }
}
