//! Grid module - manages the cell store
//!
//! The grid is 25 rows x 12 columns, stored as a flat row-major array for cache
//! locality and zero allocation. Side walls and the floor are permanent `Wall`
//! cells, so every piece query near the edge lands on an occupied cell instead of
//! leaving the storage. Coordinates are (row, col): row grows downwards.
//!
//! Line clearing lives here too, since it is a pure grid operation.

use arrayvec::ArrayVec;

use crate::types::{
    Cell, ShapeKind, GRID_COLS, GRID_ROWS, LIMIT_X, LIMIT_Y, MARGIN_X, MARGIN_Y, PLAYABLE_HEIGHT,
};

/// Total number of cells in storage
const GRID_SIZE: usize = (GRID_ROWS as usize) * (GRID_COLS as usize);

/// Row indices removed by one `clear_full_rows` pass, in clearing order
pub type ClearedRows = ArrayVec<i8, { PLAYABLE_HEIGHT as usize }>;

/// The game grid - walls, margin and playable area in one flat array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (row * GRID_COLS + col)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a grid with walls and floor set and everything else empty
    pub fn new() -> Self {
        let mut grid = Self {
            cells: [Cell::Empty; GRID_SIZE],
        };
        grid.reset();
        grid
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= GRID_ROWS as i8 || col < 0 || col >= GRID_COLS as i8 {
            return None;
        }
        Some((row as usize) * (GRID_COLS as usize) + (col as usize))
    }

    /// Whether a storage cell belongs to the permanent border
    fn is_border(row: i8, col: i8) -> bool {
        col == 0 || col == LIMIT_X || row >= LIMIT_Y
    }

    /// Reinitialize to the wall/empty pattern
    pub fn reset(&mut self) {
        for row in 0..GRID_ROWS as i8 {
            for col in 0..GRID_COLS as i8 {
                let cell = if Self::is_border(row, col) {
                    Cell::Wall
                } else {
                    Cell::Empty
                };
                self.cells[(row as usize) * (GRID_COLS as usize) + (col as usize)] = cell;
            }
        }
    }

    /// Get cell at (row, col)
    /// Returns None outside the storage
    pub fn cell_at(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Check if a position is inside the storage and empty
    pub fn is_vacant(&self, row: i8, col: i8) -> bool {
        matches!(self.cell_at(row, col), Some(Cell::Empty))
    }

    /// Overwrite the cell at (row, col)
    ///
    /// # Panics
    ///
    /// Panics if (row, col) is outside the 25x12 storage. Placement only writes
    /// cells it has already checked, so this never happens in a running game.
    pub fn set_cell(&mut self, row: i8, col: i8, cell: Cell) {
        match Self::index(row, col) {
            Some(idx) => self.cells[idx] = cell,
            None => panic!("grid write out of range: row {row}, col {col}"),
        }
    }

    /// Check if every playable column of a row is occupied
    pub fn is_row_full(&self, row: i8) -> bool {
        if row < MARGIN_Y || row >= LIMIT_Y {
            return false;
        }
        (MARGIN_X..LIMIT_X).all(|col| {
            self.cell_at(row, col)
                .map(Cell::is_occupied)
                .unwrap_or(true)
        })
    }

    /// Copy the playable part of row `src` into row `dst`
    fn copy_row(&mut self, src: i8, dst: i8) {
        let width = GRID_COLS as usize;
        let src_start = (src as usize) * width + MARGIN_X as usize;
        let dst_start = (dst as usize) * width + MARGIN_X as usize;
        let len = (LIMIT_X - MARGIN_X) as usize;
        self.cells.copy_within(src_start..src_start + len, dst_start);
    }

    /// Set the playable part of a row to empty
    fn clear_row(&mut self, row: i8) {
        for col in MARGIN_X..LIMIT_X {
            self.set_cell(row, col, Cell::Empty);
        }
    }

    /// Clear all full rows and compact the rows above them
    ///
    /// Scans playable rows top to bottom. A full row is removed by shifting every
    /// row above it down by one, margin rows included, so blocks locked in the
    /// margin drop into view; row 0 becomes empty. The same index is tested again
    /// afterwards, since new content just moved into it. Margin rows never count
    /// as full.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut row = MARGIN_Y;

        while row < LIMIT_Y {
            if !self.is_row_full(row) {
                row += 1;
                continue;
            }

            for dst in (1..=row).rev() {
                self.copy_row(dst - 1, dst);
            }
            self.clear_row(0);

            // At most one entry per playable row; a full margin row would block
            // the spawn anchor first.
            cleared.push(row);
        }

        cleared
    }

    /// Clear every locked block of one row, leaving walls in place
    ///
    /// Returns the number of cells cleared.
    pub fn wipe_row(&mut self, row: i8) -> usize {
        let mut wiped = 0;
        for col in 0..GRID_COLS as i8 {
            if let Some(Cell::Block(_)) = self.cell_at(row, col) {
                self.set_cell(row, col, Cell::Empty);
                wiped += 1;
            }
        }
        wiped
    }

    /// Iterate over all block cells as (row, col, kind)
    pub fn blocks(&self) -> impl Iterator<Item = (i8, i8, ShapeKind)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.shape().map(|kind| {
                let row = (idx / GRID_COLS as usize) as i8;
                let col = (idx % GRID_COLS as usize) as i8;
                (row, col, kind)
            })
        })
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a grid from rows of text for tests
    ///
    /// Rows are bottom-aligned: the last string is the bottom playable row.
    /// `.` is empty and a shape letter is a block.
    #[cfg(test)]
    pub fn from_playable_rows(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let first = LIMIT_Y - rows.len() as i8;
        for (i, text) in rows.iter().enumerate() {
            let row = first + i as i8;
            for (j, ch) in text.chars().enumerate() {
                let col = MARGIN_X + j as i8;
                let cell = match ch {
                    '.' => Cell::Empty,
                    c => Cell::Block(
                        ShapeKind::from_str(&c.to_string()).expect("shape letter"),
                    ),
                };
                grid.set_cell(row, col, cell);
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
