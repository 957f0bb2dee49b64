//! Placement module - collision testing and writing pieces into the grid
//!
//! A falling piece lives in the grid as ordinary `Block` cells. Moving it means
//! erasing it, trying the candidate, and putting the original back when the
//! candidate does not fit. Checking and writing are separate steps, so a failed
//! check never leaves half a piece behind.

use crate::geometry::shape_cells;
use crate::grid::Grid;
use crate::types::{Cell, ShapeKind, SPAWN_COL, SPAWN_ROW};

/// Placement of a piece: anchor position, shape and rotation counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceStatus {
    pub row: i8,
    pub col: i8,
    pub kind: ShapeKind,
    /// Unbounded counter; the effective rotation is `rotation % period`
    pub rotation: u32,
}

impl PieceStatus {
    /// Create a piece at the spawn anchor with rotation 0
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            row: SPAWN_ROW,
            col: SPAWN_COL,
            kind,
            rotation: 0,
        }
    }

    /// Absolute (row, col) of all four cells, anchor first
    pub fn cells(&self) -> [(i8, i8); 4] {
        let [a, b, c] = shape_cells(self.kind, self.rotation);
        [
            (self.row, self.col),
            (self.row + a.0, self.col + a.1),
            (self.row + b.0, self.col + b.1),
            (self.row + c.0, self.col + c.1),
        ]
    }

    pub fn moved(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
            ..self
        }
    }

    pub fn rotated(self) -> Self {
        Self {
            rotation: self.rotation.wrapping_add(1),
            ..self
        }
    }
}

/// Check whether all four cells of `status` are vacant
///
/// The anchor is checked first, then the offsets in table order. Cells outside
/// the storage count as occupied.
pub fn is_legal(grid: &Grid, status: &PieceStatus) -> bool {
    status
        .cells()
        .iter()
        .all(|&(row, col)| grid.is_vacant(row, col))
}

/// Write the piece into the grid without checking
pub fn commit(grid: &mut Grid, status: &PieceStatus) {
    for (row, col) in status.cells() {
        grid.set_cell(row, col, Cell::Block(status.kind));
    }
}

/// Test a placement and optionally materialize it
///
/// Returns true iff all four cells were vacant. When `write` is set and the
/// test passes, the piece is committed; a failing test writes nothing.
pub fn test_and_maybe_commit(grid: &mut Grid, status: &PieceStatus, write: bool) -> bool {
    if !is_legal(grid, status) {
        return false;
    }
    if write {
        commit(grid, status);
    }
    true
}

/// Test and commit in one go
pub fn place(grid: &mut Grid, status: &PieceStatus) -> bool {
    test_and_maybe_commit(grid, status, true)
}

/// Set the four cells of `status` back to empty, whatever they hold
pub fn erase(grid: &mut Grid, status: &PieceStatus) {
    for (row, col) in status.cells() {
        grid.set_cell(row, col, Cell::Empty);
    }
}

/// Move protocol: replace `current` with `candidate` if it fits
///
/// On success `current` is updated. On failure the original piece is put back
/// exactly where it was and false is returned. Either way the grid holds one
/// copy of the current piece afterwards.
pub fn try_move(grid: &mut Grid, current: &mut PieceStatus, candidate: PieceStatus) -> bool {
    erase(grid, current);
    if place(grid, &candidate) {
        *current = candidate;
        return true;
    }
    commit(grid, current);
    false
}
