//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GridAction`] values and mouse
//! presses into terminal positions. It knows nothing about the grid itself.

pub mod map;

pub use block_grid_types as types;

pub use map::{handle_key_event, mouse_click, should_quit};
