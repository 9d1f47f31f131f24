//! Mutation operator.
//!
//! A mutation copies an arrangement and exchanges the occupants of two
//! cells. Cells are drawn uniformly with replacement, so drawing the same
//! cell twice yields an unchanged copy.

use crate::puzzle::{Arrangement, Dims, Position};
use rand::Rng;

/// A pair of cells whose occupants are exchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub a: Position,
    pub b: Position,
}

impl Swap {
    /// Draws two cells uniformly at random, with replacement.
    pub fn random<R: Rng>(dims: Dims, rng: &mut R) -> Self {
        let mut cell = || {
            let row = rng.random_range(1..=dims.rows());
            let col = rng.random_range(1..=dims.cols());
            Position::new(row, col)
        };
        let a = cell();
        let b = cell();
        Self { a, b }
    }

    pub fn is_identity(&self) -> bool {
        self.a == self.b
    }

    /// Returns a swapped deep copy of `arrangement`.
    ///
    /// Both moved pieces get their new positions; their neighbors follow
    /// from the grid, so nothing else needs updating.
    pub fn apply(&self, arrangement: &Arrangement) -> Arrangement {
        let mut child = arrangement.clone();
        child.swap(self.a, self.b);
        child
    }
}

/// Produces a neighboring arrangement by one random swap.
pub fn swap_mutation<R: Rng>(arrangement: &Arrangement, rng: &mut R) -> Arrangement {
    Swap::random(arrangement.dims(), rng).apply(arrangement)
}
