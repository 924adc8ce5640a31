use serde::{Deserialize, Serialize};

use block_grid_types::Colour;

use crate::grid::Grid;

/// Read-only view of a grid for renderers: `columns[x][y]`, bottom to top.
///
/// Empty slots and cleared placeholders both appear as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: u16,
    pub height: u16,
    pub columns: Vec<Vec<Option<Colour>>>,
}

impl GridSnapshot {
    /// Colour at (x, y), `None` for empty or out-of-range cells.
    pub fn colour_at(&self, x: u16, y: u16) -> Option<Colour> {
        self.columns
            .get(x as usize)
            .and_then(|col| col.get(y as usize))
            .copied()
            .flatten()
    }

    /// Number of cells still holding a block in play.
    pub fn occupied(&self) -> usize {
        self.columns.iter().flatten().filter(|c| c.is_some()).count()
    }
}

impl Grid {
    /// Write the grid into an existing snapshot, reusing its column allocations.
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.width = self.width();
        out.height = self.height();
        out.columns.resize_with(self.width() as usize, Vec::new);
        for (x, col) in out.columns.iter_mut().enumerate() {
            col.clear();
            for y in 0..self.height() {
                let colour = self
                    .get(x as i32, y as i32)
                    .filter(|b| !b.is_cleared())
                    .map(|b| b.colour);
                col.push(colour);
            }
        }
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut s = GridSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
