//! Arrangements: full grids of independently owned pieces.
//!
//! Pieces live in a flat, row-major arena. The piece across a seam is found
//! from grid coordinates on every lookup, so moving pieces never leaves a
//! stale link behind.

use super::edge::Side;
use super::grid::{Dims, IdMatrix, Position};
use super::piece::Piece;
use super::solution::CanonicalSolution;
use crate::error::PuzzleError;

/// An `N×M` grid holding exactly one piece per id in `1..=N·M`.
///
/// `Clone` is a deep copy: two arrangements never share a piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrangement {
    dims: Dims,
    cells: Vec<Piece>,
}

/// An interior adjacency between two placed pieces.
///
/// `side` is the edge of `piece` that faces `neighbor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seam<'a> {
    pub piece: &'a Piece,
    pub neighbor: &'a Piece,
    pub side: Side,
}

impl Seam<'_> {
    /// Whether the two facing edges interlock.
    pub fn is_matched(&self) -> bool {
        self.piece
            .edge(self.side)
            .mates_with(self.neighbor.edge(self.side.opposite()))
    }
}

impl Arrangement {
    /// Builds an arrangement from an id permutation, cloning each piece's
    /// edges from the canonical solution.
    ///
    /// # Errors
    /// [`PuzzleError::DimensionMismatch`] if `ids` and `canonical` differ in
    /// shape, [`PuzzleError::InvalidIds`] if an id has no canonical piece.
    pub fn from_permutation(
        ids: &IdMatrix,
        canonical: &CanonicalSolution,
    ) -> Result<Self, PuzzleError> {
        let dims = canonical.dims();
        if ids.dims() != dims {
            return Err(PuzzleError::DimensionMismatch {
                rows: dims.rows(),
                cols: dims.cols(),
                got_rows: ids.dims().rows(),
                got_cols: ids.dims().cols(),
            });
        }
        let cells = ids
            .as_slice()
            .iter()
            .map(|&id| {
                canonical
                    .get(id)
                    .map(Piece::detached)
                    .ok_or_else(|| PuzzleError::InvalidIds {
                        expected: dims.len(),
                        reason: format!("id {id} out of range"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_cells(dims, cells))
    }

    /// Wraps row-major cells, stamping each piece with its position.
    pub(crate) fn from_cells(dims: Dims, mut cells: Vec<Piece>) -> Self {
        assert_eq!(cells.len(), dims.len(), "cell count must match dims");
        for (i, piece) in cells.iter_mut().enumerate() {
            piece.place(dims.position_of(i));
        }
        Self { dims, cells }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The piece at `pos`.
    ///
    /// # Panics
    /// Panics if `pos` lies outside the grid.
    pub fn piece_at(&self, pos: Position) -> &Piece {
        &self.cells[pos.index(self.dims)]
    }

    /// Pieces in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter()
    }

    /// The piece across `side` of `pos`, or `None` at the border.
    pub fn neighbor(&self, pos: Position, side: Side) -> Option<&Piece> {
        self.dims.step(pos, side).map(|p| self.piece_at(p))
    }

    /// Every interior adjacency exactly once, seen from the lower/right
    /// piece looking up or left.
    pub fn seams(&self) -> impl Iterator<Item = Seam<'_>> {
        self.dims.positions().flat_map(move |pos| {
            [Side::Up, Side::Left].into_iter().filter_map(move |side| {
                self.neighbor(pos, side).map(|neighbor| Seam {
                    piece: self.piece_at(pos),
                    neighbor,
                    side,
                })
            })
        })
    }

    /// Current id layout.
    pub fn id_layout(&self) -> IdMatrix {
        IdMatrix::from_raw(self.dims, self.cells.iter().map(Piece::id).collect())
    }

    /// Exchanges the occupants of two cells and updates their positions.
    ///
    /// Swapping a cell with itself is a no-op.
    pub(crate) fn swap(&mut self, a: Position, b: Position) {
        let (ia, ib) = (a.index(self.dims), b.index(self.dims));
        self.cells.swap(ia, ib);
        self.cells[ia].place(a);
        self.cells[ib].place(b);
    }
}
