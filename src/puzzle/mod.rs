//! Puzzle data model.
//!
//! A puzzle is an `N×M` grid of edge-coded pieces. The model has three
//! layers:
//!
//! - [`Piece`]: an id plus four [`EdgeCode`]s. Built from a [`DraftPiece`],
//!   the only form that may carry a pending edge.
//! - [`CanonicalSolution`]: the solved grid, generated once per instance
//!   with random but self-consistent seams.
//! - [`Arrangement`]: any placement of the pieces, built from an
//!   [`IdMatrix`] permutation with edges copied from the canonical solution.
//!
//! Pieces do not point at each other. An [`Arrangement`] stores them in a
//! row-major arena and answers [`neighbor`](Arrangement::neighbor) queries
//! from grid coordinates.

mod arrangement;
mod edge;
mod grid;
mod piece;
mod solution;

pub use arrangement::{Arrangement, Seam};
pub use edge::{DraftEdge, EdgeCode, Side};
pub use grid::{Dims, IdMatrix, Position};
pub use piece::{DraftPiece, Piece, MIN_NON_FLAT};
pub use solution::CanonicalSolution;
