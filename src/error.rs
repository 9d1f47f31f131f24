//! Error types.
//!
//! Construction-time contract violations surface as [`InvalidPieceError`]
//! and [`PuzzleError`]; solver parameters are checked by
//! [`EvolveConfig::validate`](crate::evolve::EvolveConfig::validate), which
//! reports [`ConfigError`].

use crate::puzzle::Side;

/// A piece could not be built from the given edge codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPieceError {
    /// A raw edge code outside `{-1, 0, 1, 2}`.
    #[error("piece {id}: edge code {code} is not one of -1, 0, 1, 2")]
    CodeOutOfRange { id: u32, code: i8 },

    /// Fewer than two non-flat edges (three or four flat sides).
    #[error("piece {id}: needs at least two non-flat edges, got {non_flat}")]
    TooManyFlat { id: u32, non_flat: usize },

    /// A draft piece was finished while an edge was still pending.
    #[error("piece {id}: {side:?} edge is still pending")]
    Unresolved { id: u32, side: Side },
}

/// A puzzle instance could not be set up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    /// Zero rows or zero columns.
    #[error("puzzle grid must have at least one row and one column")]
    EmptyGrid,

    /// An id matrix row has a different length from the first row.
    #[error("row {row} has {len} entries, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },

    /// The ids are not a permutation of `1..=rows*cols`.
    #[error("ids must be a permutation of 1..={expected}: {reason}")]
    InvalidIds { expected: usize, reason: String },

    /// A piece violated its construction invariants.
    #[error(transparent)]
    InvalidPiece(#[from] InvalidPieceError),

    /// An arrangement's dimensions disagree with the canonical solution.
    #[error("arrangement is {got_rows}x{got_cols}, canonical solution is {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        got_rows: usize,
        got_cols: usize,
    },
}

/// Invalid solver configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    PopulationTooSmall,
    #[error("mutation_ratio must be in (0, 1], got {0}")]
    MutationRatio(f64),
    #[error("max_generations must be positive or None")]
    ZeroGenerations,
    #[error("time_limit_ms must be positive or None")]
    ZeroTimeLimit,
}

/// Any failure while setting up a solver run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
