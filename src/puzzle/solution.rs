//! Canonical solution generation.
//!
//! The canonical solution fixes, once per puzzle instance, which id sits in
//! which cell and the shape of every edge. Arrangements copy edge shapes
//! from it and never modify it.

use super::arrangement::Arrangement;
use super::edge::{DraftEdge, EdgeCode, Side};
use super::grid::{Dims, IdMatrix};
use super::piece::{DraftPiece, Piece};
use crate::error::PuzzleError;
use rand::Rng;
use tracing::debug;

/// Order in which a cell's pending edges are resolved.
const RESOLVE_ORDER: [Side; 4] = [Side::Right, Side::Left, Side::Down, Side::Up];

/// The ground-truth puzzle: every piece in its solved cell with mating
/// edges along every seam.
#[derive(Debug, Clone)]
pub struct CanonicalSolution {
    /// Indexed by `id - 1`.
    pieces: Vec<Piece>,
    arrangement: Arrangement,
}

impl CanonicalSolution {
    /// Generates a solution whose layout is `ids`.
    ///
    /// Border-facing edges are flat. Each interior seam receives one random
    /// draw from {tab, blank}; the mating edge gets the complement.
    ///
    /// # Errors
    /// [`PuzzleError::InvalidPiece`] if some cell would need three or four flat
    /// sides, which happens whenever the grid has a single row or column.
    pub fn generate<R: Rng>(ids: &IdMatrix, rng: &mut R) -> Result<Self, PuzzleError> {
        let dims = ids.dims();

        // Phase 1: flat borders, pending interior.
        let mut drafts = dims
            .positions()
            .map(|pos| {
                let code = |side| {
                    if dims.is_border(pos, side) {
                        EdgeCode::Flat.value()
                    } else {
                        DraftEdge::PENDING_CODE
                    }
                };
                DraftPiece::new(
                    code(Side::Up),
                    code(Side::Down),
                    code(Side::Left),
                    code(Side::Right),
                    ids.get(pos),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Phase 2 (wiring) is implied by the grid: neighbors are looked up
        // by coordinates.

        // Phase 3: resolve each interior seam exactly once.
        for (i, pos) in dims.positions().enumerate() {
            for side in RESOLVE_ORDER {
                if !drafts[i].edge(side).is_pending() {
                    continue;
                }
                let other = dims
                    .step(pos, side)
                    .expect("pending edges only face interior neighbors")
                    .index(dims);
                let code = if rng.random_bool(0.5) {
                    EdgeCode::Tab
                } else {
                    EdgeCode::Blank
                };
                drafts[i].resolve(side, code);
                drafts[other].resolve(side.opposite(), code.complement());
            }
        }

        let cells = drafts
            .into_iter()
            .map(DraftPiece::finish)
            .collect::<Result<Vec<_>, _>>()?;
        let arrangement = Arrangement::from_cells(dims, cells);

        let mut pieces: Vec<Piece> = arrangement.pieces().cloned().collect();
        pieces.sort_unstable_by_key(Piece::id);

        debug!(rows = dims.rows(), cols = dims.cols(), "generated canonical solution");
        Ok(Self {
            pieces,
            arrangement,
        })
    }

    /// Generates a solution with the row-major layout `1..=N·M`.
    pub fn sequential<R: Rng>(dims: Dims, rng: &mut R) -> Result<Self, PuzzleError> {
        Self::generate(&IdMatrix::sequential(dims), rng)
    }

    pub fn dims(&self) -> Dims {
        self.arrangement.dims()
    }

    /// All pieces ordered by id.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// The canonical piece with this id.
    ///
    /// # Panics
    /// Panics if `id` is not in `1..=N·M`.
    pub fn piece(&self, id: u32) -> &Piece {
        self.get(id)
            .unwrap_or_else(|| panic!("piece id {id} out of range"))
    }

    /// The canonical piece with this id, or `None` outside `1..=N·M`.
    pub fn get(&self, id: u32) -> Option<&Piece> {
        (id as usize)
            .checked_sub(1)
            .and_then(|slot| self.pieces.get(slot))
    }

    /// The solved arrangement.
    pub fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }
}
