//! Block grid (workspace facade crate).
//!
//! Re-exports the workspace crates as `block_grid::{core, input, term, types}` so the
//! binary, tests and benches share one import path.

pub use block_grid_core as core;
pub use block_grid_input as input;
pub use block_grid_term as term;
pub use block_grid_types as types;
