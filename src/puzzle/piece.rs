//! Edge-coded puzzle pieces.
//!
//! [`DraftPiece`] is the construction-phase form that may hold pending
//! edges; [`Piece`] is the finished form used by every arrangement.

use super::edge::{DraftEdge, EdgeCode, Side};
use super::grid::Position;
use crate::error::InvalidPieceError;

/// Minimum number of non-flat edges on any piece.
pub const MIN_NON_FLAT: usize = 2;

/// A piece under construction.
///
/// Edges are stored in [`Side::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPiece {
    id: u32,
    edges: [DraftEdge; 4],
}

impl DraftPiece {
    /// Creates a draft from raw codes in `{-1, 0, 1, 2}` where `2` marks a
    /// pending edge.
    ///
    /// # Errors
    /// [`InvalidPieceError::CodeOutOfRange`] for any other code, and
    /// [`InvalidPieceError::TooManyFlat`] when fewer than two codes are nonzero.
    pub fn new(up: i8, down: i8, left: i8, right: i8, id: u32) -> Result<Self, InvalidPieceError> {
        let edges = [
            DraftEdge::from_code(id, up)?,
            DraftEdge::from_code(id, down)?,
            DraftEdge::from_code(id, left)?,
            DraftEdge::from_code(id, right)?,
        ];
        let non_flat = edges.iter().filter(|e| !e.is_flat()).count();
        if non_flat < MIN_NON_FLAT {
            return Err(InvalidPieceError::TooManyFlat { id, non_flat });
        }
        Ok(Self { id, edges })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn edge(&self, side: Side) -> DraftEdge {
        self.edges[side.index()]
    }

    /// Assigns a shape to the edge on `side`.
    pub fn resolve(&mut self, side: Side, code: EdgeCode) {
        self.edges[side.index()] = DraftEdge::Set(code);
    }

    /// Finalizes the draft.
    ///
    /// # Errors
    /// [`InvalidPieceError::Unresolved`] if any edge is still pending.
    pub fn finish(self) -> Result<Piece, InvalidPieceError> {
        let mut edges = [EdgeCode::Flat; 4];
        for side in Side::ALL {
            edges[side.index()] = match self.edges[side.index()] {
                DraftEdge::Set(code) => code,
                DraftEdge::Pending => {
                    return Err(InvalidPieceError::Unresolved { id: self.id, side })
                }
            };
        }
        Ok(Piece {
            id: self.id,
            edges,
            position: None,
        })
    }
}

/// A finished puzzle piece.
///
/// Pieces never hold references to each other. Which piece lies across a
/// seam is a property of the [`Arrangement`](super::Arrangement) that owns
/// them, computed from grid coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    id: u32,
    edges: [EdgeCode; 4],
    position: Option<Position>,
}

impl Piece {
    /// Creates an unplaced piece.
    ///
    /// # Errors
    /// [`InvalidPieceError::TooManyFlat`] when fewer than two edges are non-flat.
    pub fn new(
        up: EdgeCode,
        down: EdgeCode,
        left: EdgeCode,
        right: EdgeCode,
        id: u32,
    ) -> Result<Self, InvalidPieceError> {
        let edges = [up, down, left, right];
        let non_flat = edges.iter().filter(|e| !e.is_flat()).count();
        if non_flat < MIN_NON_FLAT {
            return Err(InvalidPieceError::TooManyFlat { id, non_flat });
        }
        Ok(Self {
            id,
            edges,
            position: None,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn edge(&self, side: Side) -> EdgeCode {
        self.edges[side.index()]
    }

    /// Edges in [`Side::ALL`] order.
    pub fn edges(&self) -> [EdgeCode; 4] {
        self.edges
    }

    /// Grid position, or `None` while the piece belongs to no arrangement.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// A copy with the same id and edges but no position.
    ///
    /// This is how arrangements obtain their own piece instances from the
    /// canonical solution.
    pub fn detached(&self) -> Self {
        Self {
            id: self.id,
            edges: self.edges,
            position: None,
        }
    }

    pub(crate) fn place(&mut self, pos: Position) {
        self.position = Some(pos);
    }
}
