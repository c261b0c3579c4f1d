//! Converts a maze into `setblock` commands for a block-based world.
//!
//! Every wall becomes a two-block-high pillar: one command at ground level
//! (`~` offset) and one on the layer above (`~1`). Coordinates are relative to
//! wherever the function is run from, with the maze's y axis mapped onto the
//! world's z axis.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::maze::Maze;

/// Block used when the caller gives none.
pub const DEFAULT_BLOCK: &str = "stone";
/// Name of the exported function file.
pub const DATAPACK_FILE_NAME: &str = "maze_datapack.mcfunction";

/// Vertical offsets written for every wall, ground first.
const LAYERS: [&str; 2] = ["", "1"];

/// Returns the trimmed block name, or [`DEFAULT_BLOCK`] if nothing is left.
pub fn block_or_default(block: &str) -> &str {
    match block.trim() {
        "" => DEFAULT_BLOCK,
        name => name,
    }
}

/// Renders the wall layout as newline-separated `setblock` commands, walking
/// the maze row by row. The block name is trimmed first, and an empty or
/// whitespace-only name falls back to [`DEFAULT_BLOCK`].
pub fn format_datapack(maze: &Maze, block: &str) -> String {
    let block = block_or_default(block);
    maze.cells()
        .filter(|(_, cell)| cell.is_wall())
        .flat_map(|((x, y), _)| {
            LAYERS
                .iter()
                .map(move |layer| format!("setblock ~{} ~{} ~{} {}", x, layer, y, block))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the datapack into `dir` and returns the path of the created file.
pub fn write_datapack(maze: &Maze, block: &str, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(DATAPACK_FILE_NAME);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(format_datapack(maze, block).as_bytes())?;
    file.flush()?;
    tracing::info!(
        "[export] wrote {} walls as {} to {}",
        maze.count_walls(),
        block_or_default(block),
        path.display()
    );
    Ok(path)
}
