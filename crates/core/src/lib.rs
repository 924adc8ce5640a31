//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate contains the grid model and the matching rules of the block puzzle.
//! It has **no dependencies** on rendering, terminals, or input handling, making it:
//!
//! - **Deterministic**: Same seed and same selections produce identical grids
//! - **Testable**: Colours can be scripted cell by cell
//! - **Portable**: Runs headless, in a terminal, or behind any other front end
//!
//! # Module Structure
//!
//! - [`grid`]: block arena plus columns of slots, bounds-checked lookup
//! - [`matching`]: same-colour group discovery and column compaction
//! - [`palette`]: colour sets, the [`ColourSource`] trait and a seeded LCG
//! - [`session`]: the `on_select` entry point and the grid-owning [`Session`]
//! - [`snapshot`]: colour-only view of the grid for renderers
//!
//! # Rules
//!
//! - Selecting a block finds every block reachable from it through orthogonal
//!   neighbours of the same colour
//! - Groups at least `min_group_size` large (default 2) are cleared
//! - A cleared block moves to the top of its column; blocks above it drop one slot
//!
//! # Example
//!
//! ```
//! use block_grid_core::{on_select, Grid, ScriptedColours, SelectPolicy};
//! use block_grid_types::Colour;
//!
//! // A 3x3 grid where every block is red.
//! let mut source = ScriptedColours::uniform(Colour::Red).unwrap();
//! let mut grid = Grid::create(3, 3, &mut source).unwrap();
//!
//! let selection = on_select(&mut grid, 1, 1, SelectPolicy::default());
//! assert_eq!(selection.len(), 9);
//! assert_eq!(grid.remaining(), 0);
//! ```

pub mod error;
pub mod grid;
pub mod matching;
pub mod palette;
pub mod session;
pub mod snapshot;

pub use block_grid_types as types;

// Re-export commonly used types for convenience
pub use error::GridError;
pub use grid::{Block, Grid};
pub use matching::{clear_and_compact, find_group, find_group_at};
pub use palette::{ColourSource, Palette, RandomColours, ScriptedColours, SimpleRng};
pub use session::{on_select, GameConfig, SelectPolicy, Selection, Session};
pub use snapshot::GridSnapshot;
