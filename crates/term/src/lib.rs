//! Terminal rendering for the block grid.
//!
//! A small, game-oriented rendering layer: the grid snapshot is drawn into a
//! plain framebuffer, which is then flushed to the terminal with crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and free of I/O
//! - Make drawing testable without a terminal
//! - Map mouse positions back to grid cells with the same layout used for drawing

pub mod fb;
pub mod grid_view;
pub mod renderer;

pub use block_grid_core as core;
pub use block_grid_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use grid_view::{colour_rgb, GridView, StatusView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, Run, TerminalRenderer};
