//! Simulation errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    #[error("maze needs at least one row and one column, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("arena must have a positive finite size, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
}
