//! Arrangement scoring.
//!
//! Fitness is a defect count: lower is better and zero means solved.
//!
//! | Defect | Penalty |
//! |---|---|
//! | Non-flat edge on the border | [`BORDER_PENALTY`] |
//! | Interior seam whose edges do not interlock (flat/flat included) | [`SEAM_PENALTY`] |
//! | Piece whose id differs from `(row-1)·M + col` | [`DISPLACED_PENALTY`] |
//!
//! The displacement term dominates, so the search prefers restoring the
//! correct placement over locally compatible but displaced layouts.

use crate::puzzle::{Arrangement, Dims, Position, Side};

pub const BORDER_PENALTY: u32 = 1;
pub const SEAM_PENALTY: u32 = 1;
pub const DISPLACED_PENALTY: u32 = 4;

/// Scores an arrangement.
pub fn evaluate(arrangement: &Arrangement) -> u32 {
    let dims = arrangement.dims();
    let mut score = 0;

    for pos in dims.positions() {
        let piece = arrangement.piece_at(pos);
        for side in Side::ALL {
            if dims.is_border(pos, side) && !piece.edge(side).is_flat() {
                score += BORDER_PENALTY;
            }
        }
        if piece.id() != pos.home_id(dims) {
            score += DISPLACED_PENALTY;
        }
    }

    let mismatched = arrangement.seams().filter(|s| !s.is_matched()).count() as u32;
    score + mismatched * SEAM_PENALTY
}

/// Largest score any arrangement of `dims` can reach.
///
/// Every piece displaced, every border edge non-flat, and every seam
/// mismatched: `4·N·M + 2·(N+M) + (N-1)·M + (M-1)·N`.
pub fn upper_bound(dims: Dims) -> u32 {
    let (n, m) = (dims.rows() as u32, dims.cols() as u32);
    DISPLACED_PENALTY * n * m
        + BORDER_PENALTY * 2 * (n + m)
        + SEAM_PENALTY * ((n - 1) * m + (m - 1) * n)
}

/// A seam whose facing edges do not interlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeamDefect {
    /// Cell of the piece looking across the seam.
    pub position: Position,
    /// `Up` or `Left`.
    pub side: Side,
    pub piece: u32,
    pub neighbor: u32,
}

/// Lists every mismatched interior seam, row-major.
pub fn seam_defects(arrangement: &Arrangement) -> Vec<SeamDefect> {
    arrangement
        .seams()
        .filter(|s| !s.is_matched())
        .map(|s| SeamDefect {
            position: s.piece.position().expect("arranged pieces are placed"),
            side: s.side,
            piece: s.piece.id(),
            neighbor: s.neighbor.id(),
        })
        .collect()
}
