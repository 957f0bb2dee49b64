//! Geometry module - shape table and rotation math
//!
//! Every shape is an anchor cell plus three offsets. Rotation is a quarter turn
//! applied to each offset independently, repeated `rotation % period` times.
//! There are no kick tables: a rotation either fits where it is or it fails.

use crate::types::ShapeKind;

/// Offset of a single cell relative to the piece anchor, as (row, col)
pub type Point = (i8, i8);

/// The three non-anchor offsets of a shape
pub type ShapeOffsets = [Point; 3];

/// Static description of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    /// Number of distinct rotation states (1, 2 or 4)
    pub rotation_period: u32,
    /// Offsets at rotation 0
    pub offsets: ShapeOffsets,
}

/// Shape table, indexed by `ShapeKind::index() - 1`
const SHAPES: [ShapeDef; 7] = [
    // I
    ShapeDef {
        rotation_period: 2,
        offsets: [(0, -1), (0, 1), (0, 2)],
    },
    // O
    ShapeDef {
        rotation_period: 1,
        offsets: [(1, 0), (0, 1), (1, 1)],
    },
    // Z
    ShapeDef {
        rotation_period: 2,
        offsets: [(0, -1), (1, 0), (1, 1)],
    },
    // S
    ShapeDef {
        rotation_period: 2,
        offsets: [(1, -1), (1, 0), (0, 1)],
    },
    // L
    ShapeDef {
        rotation_period: 4,
        offsets: [(0, -1), (0, 1), (-1, 1)],
    },
    // J
    ShapeDef {
        rotation_period: 4,
        offsets: [(-1, -1), (0, -1), (0, 1)],
    },
    // T
    ShapeDef {
        rotation_period: 4,
        offsets: [(-1, 0), (0, 1), (0, -1)],
    },
];

/// Get the static definition of a shape
pub fn shape_def(kind: ShapeKind) -> &'static ShapeDef {
    &SHAPES[(kind.index() - 1) as usize]
}

/// Number of distinct rotation states of a shape
pub fn rotation_period(kind: ShapeKind) -> u32 {
    shape_def(kind).rotation_period
}

/// Rotate one offset a quarter turn clockwise: (dy, dx) -> (dx, -dy)
#[inline(always)]
pub fn rotate_point((dy, dx): Point) -> Point {
    (dx, -dy)
}

/// Get the three non-anchor offsets of `kind` at rotation counter `rotation`
///
/// The counter is reduced modulo the shape's rotation period first, so any
/// counter value is accepted.
pub fn shape_cells(kind: ShapeKind, rotation: u32) -> ShapeOffsets {
    let def = shape_def(kind);
    let turns = rotation % def.rotation_period;
    let mut cells = def.offsets;
    for cell in &mut cells {
        for _ in 0..turns {
            *cell = rotate_point(*cell);
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_point_quarter_turn() {
        // Right of the anchor turns into below the anchor.
        assert_eq!(rotate_point((0, 1)), (1, 0));
        assert_eq!(rotate_point((1, 0)), (0, -1));
        assert_eq!(rotate_point((0, -1)), (-1, 0));
        assert_eq!(rotate_point((-1, 0)), (0, 1));
    }

    #[test]
    fn test_i_shape_states() {
        assert_eq!(shape_cells(ShapeKind::I, 0), [(0, -1), (0, 1), (0, 2)]);
        assert_eq!(shape_cells(ShapeKind::I, 1), [(-1, 0), (1, 0), (2, 0)]);
        // Period 2: counter 2 is state 0 again.
        assert_eq!(shape_cells(ShapeKind::I, 2), shape_cells(ShapeKind::I, 0));
    }

    #[test]
    fn test_o_shape_never_changes() {
        let base = shape_cells(ShapeKind::O, 0);
        for r in 0..8 {
            assert_eq!(shape_cells(ShapeKind::O, r), base);
        }
    }

    #[test]
    fn test_t_shape_four_states() {
        let states: Vec<_> = (0..4).map(|r| shape_cells(ShapeKind::T, r)).collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(states[i], states[j]);
            }
        }
    }

    #[test]
    fn test_huge_counter_reduces() {
        assert_eq!(
            shape_cells(ShapeKind::L, u32::MAX),
            shape_cells(ShapeKind::L, u32::MAX % 4)
        );
    }
}
