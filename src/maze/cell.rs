use crossterm::style::{Color, Stylize};

use std::fmt;

/// A single square of the maze: either solid or walkable.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Wall,
    Open,
}

impl Cell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Returns the opposite state.
    pub fn toggled(self) -> Cell {
        match self {
            Cell::Wall => Cell::Open,
            Cell::Open => Cell::Wall,
        }
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    pub fn is_open(self) -> bool {
        self == Cell::Open
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Cell::Wall => "⬜".with(Color::White),
            Cell::Open => "  ".with(Color::Reset),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Cell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
