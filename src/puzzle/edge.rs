//! Edge codes and sides.
//!
//! A finished piece only ever carries [`EdgeCode`]s. The construction-only
//! placeholder lives in [`DraftEdge::Pending`] and cannot reach a [`Piece`].
//!
//! [`Piece`]: super::Piece

use crate::error::InvalidPieceError;

/// Shape of one piece edge.
///
/// Two edges mate when their [`value`](EdgeCode::value)s sum to zero and
/// neither is flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeCode {
    /// Straight border edge.
    Flat,
    /// Protruding knob (+1).
    Tab,
    /// Socket (-1).
    Blank,
}

impl EdgeCode {
    /// Numeric value: `Flat = 0`, `Tab = 1`, `Blank = -1`.
    pub const fn value(self) -> i8 {
        match self {
            EdgeCode::Flat => 0,
            EdgeCode::Tab => 1,
            EdgeCode::Blank => -1,
        }
    }

    /// The edge that mates with this one. `Flat` maps to itself.
    pub const fn complement(self) -> Self {
        match self {
            EdgeCode::Flat => EdgeCode::Flat,
            EdgeCode::Tab => EdgeCode::Blank,
            EdgeCode::Blank => EdgeCode::Tab,
        }
    }

    pub const fn is_flat(self) -> bool {
        matches!(self, EdgeCode::Flat)
    }

    /// Whether two facing edges form a valid interior seam.
    ///
    /// A flat/flat pair sums to zero but is still rejected: flat edges
    /// belong on the border.
    pub const fn mates_with(self, other: EdgeCode) -> bool {
        self.value() + other.value() == 0 && !(self.is_flat() && other.is_flat())
    }
}

impl TryFrom<i8> for EdgeCode {
    type Error = i8;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EdgeCode::Flat),
            1 => Ok(EdgeCode::Tab),
            -1 => Ok(EdgeCode::Blank),
            other => Err(other),
        }
    }
}

/// An edge during canonical-solution construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftEdge {
    /// Interior edge whose shape has not been drawn yet (raw code `2`).
    Pending,
    Set(EdgeCode),
}

impl DraftEdge {
    /// Raw code used by [`DraftPiece::new`](super::DraftPiece::new).
    pub const PENDING_CODE: i8 = 2;

    /// Parses a raw code from `{-1, 0, 1, 2}`.
    pub fn from_code(id: u32, code: i8) -> Result<Self, InvalidPieceError> {
        if code == Self::PENDING_CODE {
            return Ok(DraftEdge::Pending);
        }
        EdgeCode::try_from(code)
            .map(DraftEdge::Set)
            .map_err(|code| InvalidPieceError::CodeOutOfRange { id, code })
    }

    pub const fn is_pending(self) -> bool {
        matches!(self, DraftEdge::Pending)
    }

    /// Pending edges count as non-flat.
    pub const fn is_flat(self) -> bool {
        matches!(self, DraftEdge::Set(EdgeCode::Flat))
    }
}

/// One of the four sides of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Up,
    Down,
    Left,
    Right,
}

impl Side {
    /// All sides, in the order edge arrays are stored.
    pub const ALL: [Side; 4] = [Side::Up, Side::Down, Side::Left, Side::Right];

    pub const fn opposite(self) -> Self {
        match self {
            Side::Up => Side::Down,
            Side::Down => Side::Up,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Slot in a `[_; 4]` edge array.
    pub const fn index(self) -> usize {
        match self {
            Side::Up => 0,
            Side::Down => 1,
            Side::Left => 2,
            Side::Right => 3,
        }
    }

    /// `(d_row, d_col)` step toward the neighbor on this side.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Side::Up => (-1, 0),
            Side::Down => (1, 0),
            Side::Left => (0, -1),
            Side::Right => (0, 1),
        }
    }
}
