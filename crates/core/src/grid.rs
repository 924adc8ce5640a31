//! Grid module - owns the blocks and the columns they sit in
//!
//! Blocks live in a flat arena addressed by [`BlockId`]. The grid itself is a list
//! of columns, each a list of `height` slots holding a block id or nothing.
//! Moving a block means reassigning which slot holds its id and updating its `y`;
//! the block itself is never copied or recreated.
//!
//! Coordinates: (x, y) where x ranges 0..width (left to right) and y ranges
//! 0..height (bottom to top). "Up" is y + 1.

use block_grid_types::{BlockId, Colour};

use crate::error::GridError;
use crate::palette::{ColourSource, Palette, RandomColours};

/// A single coloured occupant of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    /// Column index, fixed at creation
    pub x: u16,
    /// Row index, rewritten whenever the block moves within its column
    pub y: u16,
    pub colour: Colour,
}

impl Block {
    pub fn is_cleared(&self) -> bool {
        self.colour.is_cleared()
    }
}

/// The playfield - `width` columns of `height` slots
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
    palette: Palette,
    /// Arena of every block ever created for this grid, indexed by `BlockId`
    blocks: Vec<Block>,
    /// `columns[x][y]`
    columns: Vec<Vec<Option<BlockId>>>,
}

impl Grid {
    /// Create a fully populated grid, drawing one colour per cell from `source`.
    ///
    /// Cells are created column by column, bottom to top.
    pub fn create<S>(width: u16, height: u16, source: &mut S) -> Result<Self, GridError>
    where
        S: ColourSource + ?Sized,
    {
        check_dimensions(width as usize, height as usize)?;

        let mut grid = Self {
            width,
            height,
            palette: source.palette().clone(),
            blocks: Vec::with_capacity(width as usize * height as usize),
            columns: Vec::with_capacity(width as usize),
        };
        for x in 0..width {
            let mut column = Vec::with_capacity(height as usize);
            for y in 0..height {
                let colour = source.next_colour();
                column.push(Some(grid.alloc(x, y, colour)));
            }
            grid.columns.push(column);
        }
        Ok(grid)
    }

    /// Create a grid over the default palette using a seeded RNG.
    pub fn with_seed(width: u16, height: u16, seed: u32) -> Result<Self, GridError> {
        Self::create(width, height, &mut RandomColours::with_seed(seed))
    }

    /// Build a grid from explicit columns (`columns[x][y]`), `None` meaning empty.
    ///
    /// Colours are taken as given, so a fixture may contain colours outside the
    /// palette or cleared placeholders.
    pub fn from_colours(
        palette: Palette,
        columns: Vec<Vec<Option<Colour>>>,
    ) -> Result<Self, GridError> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;
        if let Some((x, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != height) {
            return Err(GridError::InvalidArgument(format!(
                "column {} has {} cells, expected {}",
                x,
                col.len(),
                height
            )));
        }

        let mut grid = Self {
            width: width as u16,
            height: height as u16,
            palette,
            blocks: Vec::new(),
            columns: Vec::with_capacity(width),
        };
        for (x, cells) in columns.into_iter().enumerate() {
            let column = cells
                .into_iter()
                .enumerate()
                .map(|(y, cell)| cell.map(|colour| grid.alloc(x as u16, y as u16, colour)))
                .collect();
            grid.columns.push(column);
        }
        Ok(grid)
    }

    fn alloc(&mut self, x: u16, y: u16, colour: Colour) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(Block { id, x, y, colour });
        id
    }

    /// Resolve (x, y) to a slot position, `None` when out of bounds
    #[inline(always)]
    fn slot(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || x >= self.width as i32 || y < 0 || y >= self.height as i32 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Block id at (x, y). Returns None for empty slots and out-of-bounds coordinates.
    pub fn id_at(&self, x: i32, y: i32) -> Option<BlockId> {
        let (cx, cy) = self.slot(x, y)?;
        self.columns[cx][cy]
    }

    /// Block at (x, y). Returns None for empty slots and out-of-bounds coordinates.
    pub fn get(&self, x: i32, y: i32) -> Option<&Block> {
        self.id_at(x, y).and_then(|id| self.block(id))
    }

    /// True if the cell holds no block or a cleared placeholder.
    pub fn is_empty(cell: Option<&Block>) -> bool {
        cell.map_or(true, Block::is_cleared)
    }

    pub fn is_empty_at(&self, x: i32, y: i32) -> bool {
        Self::is_empty(self.get(x, y))
    }

    /// Look up a block by id, whether or not it is still placed in the grid.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    /// True if the block currently occupies the slot its coordinates name.
    pub fn is_placed(&self, id: BlockId) -> bool {
        match self.block(id) {
            Some(b) => self.columns[b.x as usize][b.y as usize] == Some(id),
            None => false,
        }
    }

    /// Slots of column `x`, bottom to top.
    pub fn column(&self, x: u16) -> Option<&[Option<BlockId>]> {
        self.columns.get(x as usize).map(Vec::as_slice)
    }

    /// Replace column `x` wholesale.
    ///
    /// The new column must have exactly `height` slots, and every id must be a block
    /// created for column `x` appearing at most once. Occupants get their `y`
    /// rewritten to their new slot.
    pub fn set_column(&mut self, x: u16, column: Vec<Option<BlockId>>) -> Result<(), GridError> {
        if x >= self.width {
            return Err(GridError::InvalidArgument(format!(
                "column {} is outside a grid of width {}",
                x, self.width
            )));
        }
        if column.len() != self.height as usize {
            return Err(GridError::InvalidArgument(format!(
                "column has {} cells, expected {}",
                column.len(),
                self.height
            )));
        }
        for (y, id) in column.iter().enumerate() {
            let Some(id) = *id else { continue };
            let block = self.block(id).ok_or_else(|| {
                GridError::InvalidArgument(format!("unknown block id {}", id.0))
            })?;
            if block.x != x {
                return Err(GridError::InvalidArgument(format!(
                    "block {} belongs to column {}, not {}",
                    id.0, block.x, x
                )));
            }
            if column[..y].contains(&Some(id)) {
                return Err(GridError::InvalidArgument(format!(
                    "block {} appears twice",
                    id.0
                )));
            }
        }

        self.columns[x as usize] = column;
        self.reindex_column(x as usize);
        Ok(())
    }

    /// Placed blocks, column by column, bottom to top.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.columns
            .iter()
            .flat_map(|col| col.iter().flatten())
            .filter_map(|id| self.block(*id))
    }

    /// Number of cells holding a block that is still in play.
    pub fn remaining(&self) -> usize {
        self.blocks().filter(|b| !b.is_cleared()).count()
    }

    pub(crate) fn set_colour(&mut self, id: BlockId, colour: Colour) {
        if let Some(block) = self.blocks.get_mut(id.index()) {
            block.colour = colour;
        }
    }

    /// Take a placed block out of its slot and append it at the top of its column.
    ///
    /// Every other slot in the column keeps its relative order. Returns false when
    /// the block is not placed.
    pub(crate) fn lift_to_top(&mut self, id: BlockId) -> bool {
        if !self.is_placed(id) {
            return false;
        }
        let block = self.blocks[id.index()];
        let column = &mut self.columns[block.x as usize];
        let slot = column.remove(block.y as usize);
        column.push(slot);
        self.reindex_column(block.x as usize);
        true
    }

    fn reindex_column(&mut self, x: usize) {
        for (y, id) in self.columns[x].iter().enumerate() {
            if let Some(id) = id {
                self.blocks[id.index()].y = y as u16;
            }
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 || width > u16::MAX as usize || height > u16::MAX as usize {
        return Err(GridError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::ScriptedColours;

    fn scripted(colours: Vec<Colour>) -> ScriptedColours {
        ScriptedColours::new(Palette::default(), colours).unwrap()
    }

    #[test]
    fn test_grid_slot_calculation() {
        let grid = Grid::with_seed(3, 2, 1).unwrap();
        assert_eq!(grid.slot(0, 0), Some((0, 0)));
        assert_eq!(grid.slot(2, 1), Some((2, 1)));
        assert_eq!(grid.slot(-1, 0), None);
        assert_eq!(grid.slot(3, 0), None);
        assert_eq!(grid.slot(0, 2), None);
        assert_eq!(grid.slot(0, -1), None);
    }

    #[test]
    fn test_create_fills_column_major() {
        let mut source = scripted(vec![Colour::Red, Colour::Green, Colour::Blue]);
        let grid = Grid::create(2, 3, &mut source).unwrap();

        // x outer, y inner: (0,0) (0,1) (0,2) (1,0) ...
        assert_eq!(grid.get(0, 0).unwrap().colour, Colour::Red);
        assert_eq!(grid.get(0, 1).unwrap().colour, Colour::Green);
        assert_eq!(grid.get(0, 2).unwrap().colour, Colour::Blue);
        assert_eq!(grid.get(1, 0).unwrap().colour, Colour::Red);
        assert_eq!(grid.id_at(1, 0), Some(BlockId(3)));
    }

    #[test]
    fn test_block_coordinates_match_slots() {
        let grid = Grid::with_seed(4, 5, 3).unwrap();
        for b in grid.blocks() {
            assert_eq!(grid.id_at(b.x as i32, b.y as i32), Some(b.id));
            assert!(grid.is_placed(b.id));
        }
        assert_eq!(grid.blocks().count(), 20);
    }

    #[test]
    fn test_create_rejects_zero_dimensions() {
        let mut source = scripted(vec![Colour::Red]);
        assert_eq!(
            Grid::create(0, 3, &mut source),
            Err(GridError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(Grid::create(3, 0, &mut source).is_err());
    }

    #[test]
    fn test_from_colours_rejects_ragged_columns() {
        let columns = vec![vec![Some(Colour::Red), None], vec![Some(Colour::Blue)]];
        assert!(matches!(
            Grid::from_colours(Palette::default(), columns),
            Err(GridError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_lift_to_top_keeps_relative_order() {
        let columns = vec![vec![
            Some(Colour::Red),
            Some(Colour::Green),
            Some(Colour::Blue),
            Some(Colour::Yellow),
        ]];
        let mut grid = Grid::from_colours(Palette::default(), columns).unwrap();
        let lifted = grid.id_at(0, 1).unwrap();

        assert!(grid.lift_to_top(lifted));

        let colours: Vec<_> = (0..4).map(|y| grid.get(0, y).unwrap().colour).collect();
        assert_eq!(
            colours,
            vec![Colour::Red, Colour::Blue, Colour::Yellow, Colour::Green]
        );
        assert_eq!(grid.block(lifted).unwrap().y, 3);
    }
}
