//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Grid Layout
//!
//! The grid is stored as 25 rows x 12 columns:
//!
//! | Rows / Columns | Content |
//! |----------------|---------|
//! | rows 0-1 | top margin (empty, never drawn, never tested for fullness) |
//! | rows 2-21, columns 1-10 | playable area (10 wide, 20 high) |
//! | columns 0 and 11 | side walls |
//! | rows 22-24 | floor |
//!
//! Pieces spawn with their anchor at row 1, column 5.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 500 | Gravity interval |
//! | `WIPE_ROW_MS` | 100 | Game-over wipe pace, per row |
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{GameEvent, ShapeKind, PLAYABLE_HEIGHT, PLAYABLE_WIDTH};
//!
//! assert_eq!(ShapeKind::from_index(2), Some(ShapeKind::O));
//! assert_eq!(ShapeKind::O.index(), 2);
//! assert_eq!(ShapeKind::from_index(0), None);
//!
//! assert_eq!(GameEvent::RotateCw.as_str(), "rotateCw");
//!
//! assert_eq!(PLAYABLE_WIDTH, 10);
//! assert_eq!(PLAYABLE_HEIGHT, 20);
//! ```

/// Playable width in cells (10 columns)
pub const PLAYABLE_WIDTH: u8 = 10;

/// Playable height in cells (20 rows)
pub const PLAYABLE_HEIGHT: u8 = 20;

/// Total grid storage width, including both side walls
pub const GRID_COLS: u8 = 12;

/// Total grid storage height, including top margin and floor
pub const GRID_ROWS: u8 = 25;

/// First playable column (column 0 is the left wall)
pub const MARGIN_X: i8 = 1;

/// First playable row (rows 0 and 1 are the top margin)
pub const MARGIN_Y: i8 = 2;

/// Right wall column; playable columns are `MARGIN_X..LIMIT_X`
pub const LIMIT_X: i8 = 11;

/// First floor row; playable rows are `MARGIN_Y..LIMIT_Y`
pub const LIMIT_Y: i8 = 22;

/// Anchor row of a freshly spawned piece
pub const SPAWN_ROW: i8 = 1;

/// Anchor column of a freshly spawned piece
pub const SPAWN_COL: i8 = 5;

/// Gravity interval in milliseconds
pub const TICK_MS: u32 = 500;

/// Game-over wipe pace in milliseconds per row
pub const WIPE_ROW_MS: u32 = 100;

/// Number of distinct shapes
pub const SHAPE_COUNT: u8 = 7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_geometry_is_consistent() {
        assert_eq!((LIMIT_X - MARGIN_X) as u8, PLAYABLE_WIDTH);
        assert_eq!((LIMIT_Y - MARGIN_Y) as u8, PLAYABLE_HEIGHT);
        assert_eq!(GRID_COLS as i8, LIMIT_X + 1);
        assert!(GRID_ROWS as i8 > LIMIT_Y);
        assert!(SPAWN_ROW < MARGIN_Y);
        assert!(SPAWN_COL > MARGIN_X && SPAWN_COL < LIMIT_X);
    }

    #[test]
    fn shape_index_roundtrip() {
        for idx in 1..=SHAPE_COUNT {
            let kind = ShapeKind::from_index(idx).unwrap();
            assert_eq!(kind.index(), idx);
        }
        assert_eq!(ShapeKind::from_index(0), None);
        assert_eq!(ShapeKind::from_index(8), None);
    }

    #[test]
    fn cell_occupancy() {
        assert!(!Cell::Empty.is_occupied());
        assert!(Cell::Wall.is_occupied());
        assert!(Cell::Block(ShapeKind::T).is_occupied());
        assert_eq!(Cell::Block(ShapeKind::T).shape(), Some(ShapeKind::T));
        assert_eq!(Cell::Wall.shape(), None);
    }

    #[test]
    fn event_names_are_distinct() {
        let events = [
            GameEvent::MoveLeft,
            GameEvent::MoveRight,
            GameEvent::RotateCw,
            GameEvent::SoftDrop,
            GameEvent::Tick,
            GameEvent::Quit,
        ];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
        assert_eq!(GameEvent::SoftDrop.as_str(), "softDrop");
    }
}

/// The seven shape kinds, in shape-index order 1..=7
///
/// - **I**: straight bar of four (red)
/// - **O**: 2x2 square (yellow)
/// - **Z**: Z-shaped (magenta)
/// - **S**: S-shaped, mirror of Z (green)
/// - **L**: L-shaped (blue)
/// - **J**: J-shaped, mirror of L (orange)
/// - **T**: T-shaped (sky blue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    Z,
    S,
    L,
    J,
    T,
}

impl ShapeKind {
    /// All kinds in index order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::T,
    ];

    /// Shape index (1..=7). Index 0 is reserved for "no shape".
    pub fn index(self) -> u8 {
        match self {
            ShapeKind::I => 1,
            ShapeKind::O => 2,
            ShapeKind::Z => 3,
            ShapeKind::S => 4,
            ShapeKind::L => 5,
            ShapeKind::J => 6,
            ShapeKind::T => 7,
        }
    }

    /// Inverse of [`ShapeKind::index`]. Returns `None` for 0 and anything above 7.
    pub fn from_index(idx: u8) -> Option<Self> {
        match idx {
            1..=7 => Some(Self::ALL[(idx - 1) as usize]),
            _ => None,
        }
    }

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("T"), Some(ShapeKind::T));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "z" => Some(ShapeKind::Z),
            "s" => Some(ShapeKind::S),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "t" => Some(ShapeKind::T),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::Z => "z",
            ShapeKind::S => "s",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::T => "t",
        }
    }

    /// Display color of a locked or falling cell of this kind
    pub fn color(self) -> Rgb {
        match self {
            ShapeKind::I => Rgb::new(255, 0, 0),
            ShapeKind::O => Rgb::new(255, 255, 0),
            ShapeKind::Z => Rgb::new(255, 0, 255),
            ShapeKind::S => Rgb::new(0, 255, 0),
            ShapeKind::L => Rgb::new(0, 0, 255),
            ShapeKind::J => Rgb::new(255, 128, 0),
            ShapeKind::T => Rgb::new(0, 128, 255),
        }
    }
}

/// A cell of the grid
///
/// One tagged convention for the whole grid: walls and floor are `Wall`,
/// locked or falling piece cells carry the shape that owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Block(ShapeKind),
}

impl Cell {
    pub fn is_occupied(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    pub fn shape(self) -> Option<ShapeKind> {
        match self {
            Cell::Block(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Abstract events consumed by the game state machine
///
/// Every event is zero-payload. The host layer maps keys, mouse buttons and
/// the gravity timer onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Move piece one row down
    SoftDrop,
    /// Gravity timer fired
    Tick,
    /// Leave the game
    Quit,
}

impl GameEvent {
    /// camelCase name, used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::MoveLeft => "moveLeft",
            GameEvent::MoveRight => "moveRight",
            GameEvent::RotateCw => "rotateCw",
            GameEvent::SoftDrop => "softDrop",
            GameEvent::Tick => "tick",
            GameEvent::Quit => "quit",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color of an empty playable cell
pub const BACKGROUND: Rgb = Rgb::new(255, 255, 255);
