//! Session module - the selection entry point and the owner of one grid
//!
//! [`on_select`] is the single integration point an input handler calls: it finds the
//! group under a coordinate, applies the minimum group size policy, and clears and
//! compacts when the group qualifies. Everything runs to completion synchronously.
//!
//! [`Session`] bundles a grid with its configuration, colour source and cursor so a
//! front end can drive it with [`GridAction`]s and rebuild it on reset.

use tracing::{debug, info, warn};

use block_grid_types::{
    Colour, GridAction, DEFAULT_HEIGHT, DEFAULT_MIN_GROUP_SIZE, DEFAULT_WIDTH,
};

use crate::error::GridError;
use crate::grid::{Block, Grid};
use crate::matching::{clear_and_compact, find_group_at};
use crate::palette::{ColourSource, Palette, RandomColours};
use crate::snapshot::GridSnapshot;

/// Decides whether a discovered group is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectPolicy {
    /// Groups smaller than this are left in place
    pub min_group_size: usize,
}

impl Default for SelectPolicy {
    fn default() -> Self {
        Self {
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
        }
    }
}

/// Outcome of one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Copies of the cleared blocks as they were discovered (original colour and
    /// position), in discovery order. Empty when nothing was cleared.
    pub removed: Vec<Block>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.removed.len()
    }

    /// Colour of the cleared group, if any.
    pub fn colour(&self) -> Option<Colour> {
        self.removed.first().map(|b| b.colour)
    }
}

/// Select the block at (x, y): find its group and clear it if the policy allows.
pub fn on_select(grid: &mut Grid, x: i32, y: i32, policy: SelectPolicy) -> Selection {
    let group = find_group_at(grid, x, y);
    if group.len() < policy.min_group_size || group.is_empty() {
        debug!(x, y, size = group.len(), "selection left grid unchanged");
        return Selection::default();
    }

    let removed: Vec<Block> = group.iter().filter_map(|id| grid.block(*id).copied()).collect();
    clear_and_compact(grid, &group);
    debug!(x, y, size = removed.len(), "selection cleared group");

    Selection { removed }
}

/// Settings for a new session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub min_group_size: usize,
    pub seed: u32,
    pub palette: Palette,
}

impl GameConfig {
    pub fn policy(&self) -> SelectPolicy {
        SelectPolicy {
            min_group_size: self.min_group_size,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            seed: 1,
            palette: Palette::default(),
        }
    }
}

/// One grid, exclusively owned, plus the state a front end needs to drive it.
pub struct Session {
    config: GameConfig,
    source: Box<dyn ColourSource>,
    grid: Grid,
    cursor: (u16, u16),
    reset_count: u32,
}

impl Session {
    /// Create a session coloured by a seeded RNG over the configured palette.
    pub fn new(config: GameConfig) -> Result<Self, GridError> {
        let source = RandomColours::new(config.palette.clone(), config.seed);
        Self::with_source(config, Box::new(source))
    }

    /// Create a session with an explicit colour source.
    ///
    /// The grid palette comes from the source; `config.palette` is not consulted.
    pub fn with_source(
        config: GameConfig,
        mut source: Box<dyn ColourSource>,
    ) -> Result<Self, GridError> {
        let grid = Grid::create(config.width, config.height, source.as_mut())?;
        let cursor = (0, config.height - 1);
        info!(
            width = config.width,
            height = config.height,
            min_group_size = config.min_group_size,
            "session created"
        );
        Ok(Self {
            config,
            source,
            grid,
            cursor,
            reset_count: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn reset_count(&self) -> u32 {
        self.reset_count
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.grid.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        self.grid.snapshot_into(out);
    }

    /// Select the block at (x, y) under the configured policy.
    pub fn select(&mut self, x: u16, y: u16) -> Selection {
        on_select(&mut self.grid, x as i32, y as i32, self.config.policy())
    }

    /// Recreate the grid from scratch. The colour source continues its sequence, so
    /// a reset produces a fresh layout.
    pub fn reset(&mut self) -> Result<(), GridError> {
        self.grid = Grid::create(self.config.width, self.config.height, self.source.as_mut())?;
        self.reset_count = self.reset_count.wrapping_add(1);
        info!(reset_count = self.reset_count, "grid reset");
        Ok(())
    }

    /// Apply an action. Returns true if anything changed.
    pub fn apply_action(&mut self, action: GridAction) -> bool {
        let (x, y) = self.cursor;
        match action {
            GridAction::CursorLeft => self.move_cursor(x.saturating_sub(1), y),
            GridAction::CursorRight => self.move_cursor(x.saturating_add(1), y),
            GridAction::CursorUp => self.move_cursor(x, y.saturating_add(1)),
            GridAction::CursorDown => self.move_cursor(x, y.saturating_sub(1)),
            GridAction::Select => !self.select(x, y).is_empty(),
            GridAction::Reset => match self.reset() {
                Ok(()) => true,
                Err(err) => {
                    warn!(%err, "reset failed");
                    false
                }
            },
        }
    }

    /// Place the cursor, clamped to the grid. Returns true if it moved.
    pub fn move_cursor(&mut self, x: u16, y: u16) -> bool {
        let next = (
            x.min(self.grid.width() - 1),
            y.min(self.grid.height() - 1),
        );
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }
}
