//! Matching module - group discovery and post-clear compaction
//!
//! Both operations are stateless functions over a [`Grid`]:
//!
//! - [`find_group`] walks same-coloured orthogonal neighbours depth-first from a seed
//! - [`clear_and_compact`] marks a group cleared and lifts each cleared block to the
//!   top of its column, letting the blocks above it drop one slot
//!
//! Discovery order is fully deterministic. Neighbours are examined left, up, right,
//! down, and the walk reproduces the preorder of a recursive depth-first search
//! using an explicit frame stack, so large grids never hit recursion limits.

use std::collections::HashSet;

use arrayvec::ArrayVec;
use tracing::{trace, warn};

use block_grid_types::{BlockId, Colour};

use crate::grid::{Block, Grid};

/// Neighbour offsets in examination order: left, up, right, down.
const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// One level of the depth-first walk: the matching neighbours of a block and how
/// many of them have been examined.
struct Frame {
    candidates: ArrayVec<BlockId, 4>,
    next: usize,
}

impl Frame {
    fn new(grid: &Grid, block: &Block) -> Self {
        Self {
            candidates: same_colour_neighbours(grid, block),
            next: 0,
        }
    }

    fn advance(&mut self) -> Option<BlockId> {
        let id = self.candidates.get(self.next).copied()?;
        self.next += 1;
        Some(id)
    }
}

/// Non-empty orthogonal neighbours sharing `block`'s colour, in examination order.
fn same_colour_neighbours(grid: &Grid, block: &Block) -> ArrayVec<BlockId, 4> {
    let mut out = ArrayVec::new();
    for (dx, dy) in NEIGHBOUR_OFFSETS {
        let neighbour = grid.get(block.x as i32 + dx, block.y as i32 + dy);
        if let Some(n) = neighbour {
            if !Grid::is_empty(neighbour) && n.colour == block.colour {
                out.push(n.id);
            }
        }
    }
    out
}

/// Find every block connected to `seed` through same-coloured orthogonal neighbours.
///
/// The result starts with the seed and lists blocks in discovery order. It is empty
/// when the seed is unknown, no longer placed, or coloured outside the grid palette
/// (which covers cleared placeholders). A lone block yields a group of one.
pub fn find_group(grid: &Grid, seed: BlockId) -> Vec<BlockId> {
    let start = match grid.block(seed) {
        Some(b) if grid.is_placed(seed) && grid.palette().contains(b.colour) => b,
        _ => return Vec::new(),
    };

    let mut visited = HashSet::new();
    visited.insert(seed);
    let mut group = vec![seed];
    let mut stack = vec![Frame::new(grid, start)];

    while let Some(frame) = stack.last_mut() {
        let Some(id) = frame.advance() else {
            stack.pop();
            continue;
        };
        if !visited.insert(id) {
            continue;
        }
        group.push(id);
        if let Some(block) = grid.block(id) {
            stack.push(Frame::new(grid, block));
        }
    }

    group
}

/// [`find_group`] seeded from whatever occupies (x, y).
///
/// Empty and out-of-bounds cells give an empty group.
pub fn find_group_at(grid: &Grid, x: i32, y: i32) -> Vec<BlockId> {
    match grid.id_at(x, y) {
        Some(id) => find_group(grid, id),
        None => Vec::new(),
    }
}

/// Clear a group and compact every column it touches.
///
/// Each block is first recoloured to [`Colour::Cleared`]. Then, one block at a time
/// in group order, the block's slot is taken out of its column and appended at the
/// top; the column's `y` values are rewritten after every single move. Blocks above
/// a cleared block drop by one slot per cleared block beneath them, empty slots are
/// left where they are, and cleared blocks end at the top in group order.
///
/// Unknown, unplaced and repeated ids are skipped. An empty group leaves the grid
/// untouched.
pub fn clear_and_compact(grid: &mut Grid, group: &[BlockId]) {
    if group.is_empty() {
        return;
    }

    let mut seen = HashSet::with_capacity(group.len());
    let mut targets = Vec::with_capacity(group.len());
    for &id in group {
        if !grid.is_placed(id) {
            warn!(block = id.0, "skipping block that is not in the grid");
            continue;
        }
        if seen.insert(id) {
            targets.push(id);
        }
    }

    for &id in &targets {
        grid.set_colour(id, Colour::Cleared);
    }

    for &id in &targets {
        let (x, from_y) = match grid.block(id) {
            Some(b) => (b.x, b.y),
            None => continue,
        };
        if grid.lift_to_top(id) {
            trace!(block = id.0, x, from_y, "lifted cleared block to top of column");
        }
    }
}
