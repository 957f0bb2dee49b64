//! RNG module - seeded shape selection
//!
//! Every spawn picks one of the seven shapes uniformly at random. The generator
//! is a small LCG so a seed reproduces the same sequence of shapes, which keeps
//! the state machine testable.

use crate::types::{ShapeKind, SHAPE_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of a power-of-two LCG have short periods; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Pick a shape uniformly at random
    pub fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.next_range(SHAPE_COUNT as u32) as usize]
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
