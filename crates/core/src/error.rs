//! Contract violations surfaced by the grid.
//!
//! Routine conditions (out-of-range lookups, selecting an empty cell) are not
//! errors; they return `None` or an empty group.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid palette: {0}")]
    InvalidPalette(String),
}
