//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behaviour beyond parsing and naming, so they
//! can be used by the core rules, the terminal renderer, and the input layer alike.
//!
//! # Grid Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 10 rows (indexed 0-9, bottom to top)
//!
//! Row `y = 0` is the bottom of a column. "Up" means `y + 1`.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 10 | Columns in a new grid |
//! | `DEFAULT_HEIGHT` | 10 | Rows in a new grid |
//! | `DEFAULT_MIN_GROUP_SIZE` | 2 | Smallest group a selection clears |
//! | `DEFAULT_PALETTE` | red, green, blue, yellow | Colours a new grid draws from |
//!
//! # Examples
//!
//! ```
//! use block_grid_types::{Colour, GridAction, DEFAULT_PALETTE};
//!
//! // Parse from string (case-insensitive)
//! let parsed = Colour::from_str("Blue").unwrap();
//! assert_eq!(parsed, Colour::Blue);
//!
//! // The cleared sentinel never appears in a palette
//! assert!(!DEFAULT_PALETTE.contains(&Colour::Cleared));
//!
//! // Parse an action
//! let action = GridAction::from_str("select").unwrap();
//! assert_eq!(action, GridAction::Select);
//! ```

use serde::{Deserialize, Serialize};

/// Default grid width in columns
pub const DEFAULT_WIDTH: u16 = 10;

/// Default grid height in rows
pub const DEFAULT_HEIGHT: u16 = 10;

/// Smallest group that a selection clears by default
pub const DEFAULT_MIN_GROUP_SIZE: usize = 2;

/// Four-colour palette used when no other palette is configured
pub const DEFAULT_PALETTE: [Colour; 4] = [Colour::Red, Colour::Green, Colour::Blue, Colour::Yellow];

/// Block colours
///
/// A palette is drawn from every variant except [`Colour::Cleared`], which marks a
/// block that has been removed from play but still occupies a slot until compaction
/// moves it to the top of its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Purple,
    Cyan,
    Magenta,
    Cleared,
}

impl Colour {
    /// Every colour a palette may contain.
    pub const PLAYABLE: [Colour; 8] = [
        Colour::Red,
        Colour::Green,
        Colour::Blue,
        Colour::Yellow,
        Colour::Orange,
        Colour::Purple,
        Colour::Cyan,
        Colour::Magenta,
    ];

    /// Parse colour from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_grid_types::Colour;
    ///
    /// assert_eq!(Colour::from_str("red"), Some(Colour::Red));
    /// assert_eq!(Colour::from_str("YELLOW"), Some(Colour::Yellow));
    /// assert_eq!(Colour::from_str("grey"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Colour::Red),
            "green" => Some(Colour::Green),
            "blue" => Some(Colour::Blue),
            "yellow" => Some(Colour::Yellow),
            "orange" => Some(Colour::Orange),
            "purple" => Some(Colour::Purple),
            "cyan" => Some(Colour::Cyan),
            "magenta" => Some(Colour::Magenta),
            "cleared" => Some(Colour::Cleared),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Colour::Red => "red",
            Colour::Green => "green",
            Colour::Blue => "blue",
            Colour::Yellow => "yellow",
            Colour::Orange => "orange",
            Colour::Purple => "purple",
            Colour::Cyan => "cyan",
            Colour::Magenta => "magenta",
            Colour::Cleared => "cleared",
        }
    }

    /// True for the removed-from-play sentinel.
    pub fn is_cleared(&self) -> bool {
        matches!(self, Colour::Cleared)
    }
}

/// Stable identity of a block for the lifetime of a grid.
///
/// Two blocks with equal position and colour are still different blocks; the id is
/// what the engine tracks while blocks move within their column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u32);

impl BlockId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Actions that drive a session from the input layer
///
/// The cursor moves in grid space: `CursorUp` increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridAction {
    /// Move the cursor one column left
    CursorLeft,
    /// Move the cursor one column right
    CursorRight,
    /// Move the cursor one row up
    CursorUp,
    /// Move the cursor one row down
    CursorDown,
    /// Select the block under the cursor
    Select,
    /// Recreate the grid from scratch
    Reset,
}

impl GridAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_grid_types::GridAction;
    ///
    /// assert_eq!(GridAction::from_str("cursorLeft"), Some(GridAction::CursorLeft));
    /// assert_eq!(GridAction::from_str("reset"), Some(GridAction::Reset));
    /// assert_eq!(GridAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cursorleft" => Some(GridAction::CursorLeft),
            "cursorright" => Some(GridAction::CursorRight),
            "cursorup" => Some(GridAction::CursorUp),
            "cursordown" => Some(GridAction::CursorDown),
            "select" => Some(GridAction::Select),
            "reset" => Some(GridAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GridAction::CursorLeft => "cursorLeft",
            GridAction::CursorRight => "cursorRight",
            GridAction::CursorUp => "cursorUp",
            GridAction::CursorDown => "cursorDown",
            GridAction::Select => "select",
            GridAction::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dimensions_and_threshold() {
        assert_eq!(DEFAULT_WIDTH, 10);
        assert_eq!(DEFAULT_HEIGHT, 10);
        assert_eq!(DEFAULT_MIN_GROUP_SIZE, 2);
    }

    #[test]
    fn colour_names_roundtrip() {
        for colour in Colour::PLAYABLE {
            assert_eq!(Colour::from_str(colour.as_str()), Some(colour));
        }
        assert_eq!(Colour::from_str("cleared"), Some(Colour::Cleared));
    }

    #[test]
    fn only_the_sentinel_is_cleared() {
        assert!(Colour::Cleared.is_cleared());
        assert!(Colour::PLAYABLE.iter().all(|c| !c.is_cleared()));
    }

    #[test]
    fn action_names_roundtrip() {
        for action in [
            GridAction::CursorLeft,
            GridAction::CursorRight,
            GridAction::CursorUp,
            GridAction::CursorDown,
            GridAction::Select,
            GridAction::Reset,
        ] {
            assert_eq!(GridAction::from_str(action.as_str()), Some(action));
        }
    }
}
