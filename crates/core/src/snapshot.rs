use crate::game_state::Phase;
use crate::grid::Grid;
use crate::types::{
    Rgb, ShapeKind, BACKGROUND, MARGIN_X, MARGIN_Y, PLAYABLE_HEIGHT, PLAYABLE_WIDTH,
};

/// Playable cells, indexed `[row][col]` from the top-left playable cell
pub type PlayableCells = [[Option<ShapeKind>; PLAYABLE_WIDTH as usize]; PLAYABLE_HEIGHT as usize];

/// Everything the renderer needs for one frame
///
/// Margin rows and walls are not part of it. Falling and locked blocks look the
/// same: both are cells of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub cells: PlayableCells,
    pub phase: Phase,
    pub episode_id: u32,
}

impl Snapshot {
    pub fn clear(&mut self) {
        self.cells = [[None; PLAYABLE_WIDTH as usize]; PLAYABLE_HEIGHT as usize];
        self.phase = Phase::Idle;
        self.episode_id = 0;
    }

    pub(crate) fn fill_from_grid(&mut self, grid: &Grid) {
        for (y, row) in self.cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = grid
                    .cell_at(MARGIN_Y + y as i8, MARGIN_X + x as i8)
                    .and_then(|c| c.shape());
            }
        }
    }

    /// Resolved color of a playable cell; background outside the area
    pub fn color_at(&self, row: usize, col: usize) -> Rgb {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .flatten()
            .map(ShapeKind::color)
            .unwrap_or(BACKGROUND)
    }

    /// Resolved colors of the whole playable area
    pub fn colors(&self) -> [[Rgb; PLAYABLE_WIDTH as usize]; PLAYABLE_HEIGHT as usize] {
        let mut out = [[BACKGROUND; PLAYABLE_WIDTH as usize]; PLAYABLE_HEIGHT as usize];
        for (y, row) in out.iter_mut().enumerate() {
            for (x, color) in row.iter_mut().enumerate() {
                *color = self.color_at(y, x);
            }
        }
        out
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        let mut s = Self {
            cells: [[None; PLAYABLE_WIDTH as usize]; PLAYABLE_HEIGHT as usize],
            phase: Phase::Idle,
            episode_id: 0,
        };
        s.clear();
        s
    }
}
