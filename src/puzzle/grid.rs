//! Grid geometry and id layouts.

use super::edge::Side;
use crate::error::PuzzleError;
use crate::random::shuffle;
use rand::Rng;

/// Puzzle dimensions: `rows` × `cols`, both at least 1.
///
/// Only [`Dims::new`] builds one, deserialization included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDims"))]
pub struct Dims {
    rows: usize,
    cols: usize,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDims {
    rows: usize,
    cols: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDims> for Dims {
    type Error = PuzzleError;

    fn try_from(raw: RawDims) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.cols)
    }
}

impl Dims {
    pub fn new(rows: usize, cols: usize) -> Result<Self, PuzzleError> {
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        Ok(Self { rows, cols })
    }

    pub const fn rows(self) -> usize {
        self.rows
    }

    pub const fn cols(self) -> usize {
        self.cols
    }

    /// Number of cells (`N·M`).
    pub const fn len(self) -> usize {
        self.rows * self.cols
    }

    /// Always false: both sides are at least 1.
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// All positions in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (1..=self.rows).flat_map(move |row| (1..=self.cols).map(move |col| Position { row, col }))
    }

    /// Whether the edge on `side` of `pos` lies on the puzzle border.
    pub const fn is_border(self, pos: Position, side: Side) -> bool {
        match side {
            Side::Up => pos.row == 1,
            Side::Down => pos.row == self.rows,
            Side::Left => pos.col == 1,
            Side::Right => pos.col == self.cols,
        }
    }

    /// The position across `side`, or `None` at the border.
    pub fn step(self, pos: Position, side: Side) -> Option<Position> {
        if self.is_border(pos, side) {
            return None;
        }
        let (dr, dc) = side.offset();
        Some(Position {
            row: pos.row.checked_add_signed(dr)?,
            col: pos.col.checked_add_signed(dc)?,
        })
    }

    /// Position of a row-major arena slot.
    pub const fn position_of(self, index: usize) -> Position {
        Position {
            row: index / self.cols + 1,
            col: index % self.cols + 1,
        }
    }
}

/// 1-indexed grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major arena slot.
    ///
    /// # Panics
    /// Panics if the position lies outside `dims`.
    pub fn index(self, dims: Dims) -> usize {
        assert!(
            (1..=dims.rows).contains(&self.row) && (1..=dims.cols).contains(&self.col),
            "position {self:?} outside {dims:?}"
        );
        (self.row - 1) * dims.cols + (self.col - 1)
    }

    /// Id that belongs at this position in the solved layout: `(row-1)·M + col`.
    pub fn home_id(self, dims: Dims) -> u32 {
        ((self.row - 1) * dims.cols + self.col) as u32
    }
}

/// An `N×M` matrix of piece ids, always a permutation of `1..=N·M`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawIdMatrix"))]
pub struct IdMatrix {
    dims: Dims,
    ids: Vec<u32>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawIdMatrix {
    dims: Dims,
    ids: Vec<u32>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawIdMatrix> for IdMatrix {
    type Error = PuzzleError;

    fn try_from(raw: RawIdMatrix) -> Result<Self, Self::Error> {
        Self::from_row_major(raw.dims, raw.ids)
    }
}

impl IdMatrix {
    /// Row-major `1..=N·M`: the solved layout.
    pub fn sequential(dims: Dims) -> Self {
        Self {
            dims,
            ids: (1..=dims.len() as u32).collect(),
        }
    }

    /// A uniformly random permutation of `1..=N·M`.
    pub fn shuffled<R: Rng>(dims: Dims, rng: &mut R) -> Self {
        let mut matrix = Self::sequential(dims);
        shuffle(&mut matrix.ids, rng);
        matrix
    }

    /// Builds a matrix from explicit rows.
    ///
    /// Rows must be non-empty, rectangular, and contain each id in
    /// `1..=N·M` exactly once.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, PuzzleError> {
        let expected = rows.first().map_or(0, Vec::len);
        let dims = Dims::new(rows.len(), expected)?;
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(PuzzleError::Ragged {
                row,
                len: r.len(),
                expected,
            });
        }
        Self::from_row_major(dims, rows.into_iter().flatten().collect())
    }

    /// Builds a matrix from row-major ids.
    ///
    /// `ids` must contain each id in `1..=N·M` exactly once.
    pub fn from_row_major(dims: Dims, ids: Vec<u32>) -> Result<Self, PuzzleError> {
        let n = dims.len();
        if ids.len() != n {
            return Err(PuzzleError::InvalidIds {
                expected: n,
                reason: format!("got {} ids", ids.len()),
            });
        }
        let mut seen = vec![false; n];
        for &id in &ids {
            let slot = (id as usize).checked_sub(1).filter(|&s| s < n);
            match slot {
                None => {
                    return Err(PuzzleError::InvalidIds {
                        expected: n,
                        reason: format!("id {id} out of range"),
                    })
                }
                Some(s) if seen[s] => {
                    return Err(PuzzleError::InvalidIds {
                        expected: n,
                        reason: format!("id {id} appears more than once"),
                    })
                }
                Some(s) => seen[s] = true,
            }
        }
        Ok(Self { dims, ids })
    }

    /// Row-major ids already known to be a permutation.
    pub(crate) fn from_raw(dims: Dims, ids: Vec<u32>) -> Self {
        debug_assert_eq!(ids.len(), dims.len());
        Self { dims, ids }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Id at a position.
    pub fn get(&self, pos: Position) -> u32 {
        self.ids[pos.index(self.dims)]
    }

    /// Ids in row-major order.
    pub fn as_slice(&self) -> &[u32] {
        &self.ids
    }

    /// Nested rows, for renderers and assertions.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.ids.chunks(self.dims.cols).map(<[u32]>::to_vec).collect()
    }

    /// Whether this is the row-major identity layout.
    pub fn is_sequential(&self) -> bool {
        self.ids.iter().enumerate().all(|(i, &id)| id as usize == i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_dims_rejects_zero() {
        assert_eq!(Dims::new(0, 3), Err(PuzzleError::EmptyGrid));
        assert_eq!(Dims::new(3, 0), Err(PuzzleError::EmptyGrid));
        assert!(Dims::new(1, 1).is_ok());
    }

    #[test]
    fn test_positions_row_major() {
        let dims = Dims::new(2, 3).unwrap();
        let positions: Vec<_> = dims.positions().collect();
        assert_eq!(positions.len(), 6);
        for (i, pos) in positions.iter().enumerate() {
            assert_eq!(pos.index(dims), i);
            assert_eq!(dims.position_of(i), *pos);
            assert_eq!(pos.home_id(dims), i as u32 + 1);
        }
    }

    #[test]
    fn test_step_and_border() {
        let dims = Dims::new(3, 3).unwrap();
        let corner = Position::new(1, 1);
        assert_eq!(dims.step(corner, Side::Up), None);
        assert_eq!(dims.step(corner, Side::Left), None);
        assert_eq!(dims.step(corner, Side::Down), Some(Position::new(2, 1)));
        assert_eq!(dims.step(corner, Side::Right), Some(Position::new(1, 2)));

        let center = Position::new(2, 2);
        for side in Side::ALL {
            assert!(!dims.is_border(center, side));
            let next = dims.step(center, side).unwrap();
            assert_eq!(dims.step(next, side.opposite()), Some(center));
        }
    }

    #[test]
    fn test_single_cell_is_all_border() {
        let dims = Dims::new(1, 1).unwrap();
        for side in Side::ALL {
            assert!(dims.is_border(Position::new(1, 1), side));
        }
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_index_out_of_range_panics() {
        let dims = Dims::new(2, 2).unwrap();
        Position::new(3, 1).index(dims);
    }

    #[test]
    fn test_sequential_matrix() {
        let m = IdMatrix::sequential(Dims::new(2, 2).unwrap());
        assert_eq!(m.rows(), vec![vec![1, 2], vec![3, 4]]);
        assert!(m.is_sequential());
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = create_rng(42);
        let dims = Dims::new(4, 5).unwrap();
        let m = IdMatrix::shuffled(dims, &mut rng);
        let mut ids = m.as_slice().to_vec();
        ids.sort_unstable();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_from_rows_valid() {
        let m = IdMatrix::from_rows(vec![vec![2, 1], vec![4, 3]]).unwrap();
        assert_eq!(m.dims(), Dims::new(2, 2).unwrap());
        assert_eq!(m.get(Position::new(1, 1)), 2);
        assert_eq!(m.get(Position::new(2, 2)), 3);
        assert!(!m.is_sequential());
    }

    #[test]
    fn test_from_rows_errors() {
        assert_eq!(IdMatrix::from_rows(vec![]), Err(PuzzleError::EmptyGrid));
        assert_eq!(IdMatrix::from_rows(vec![vec![]]), Err(PuzzleError::EmptyGrid));
        assert!(matches!(
            IdMatrix::from_rows(vec![vec![1, 2], vec![3]]),
            Err(PuzzleError::Ragged { row: 1, len: 1, expected: 2 })
        ));
        assert!(matches!(
            IdMatrix::from_rows(vec![vec![1, 1], vec![3, 4]]),
            Err(PuzzleError::InvalidIds { .. })
        ));
        assert!(matches!(
            IdMatrix::from_rows(vec![vec![0, 1], vec![2, 3]]),
            Err(PuzzleError::InvalidIds { .. })
        ));
        assert!(matches!(
            IdMatrix::from_rows(vec![vec![1, 2], vec![3, 5]]),
            Err(PuzzleError::InvalidIds { .. })
        ));
    }

    #[test]
    fn test_from_row_major() {
        let dims = Dims::new(2, 2).unwrap();
        let m = IdMatrix::from_row_major(dims, vec![2, 1, 4, 3]).unwrap();
        assert_eq!(m.rows(), vec![vec![2, 1], vec![4, 3]]);
        assert_eq!(m.dims().rows(), 2);
        assert_eq!(m.dims().cols(), 2);

        for bad in [vec![1, 1, 1, 1], vec![1, 2, 3, 9], vec![1, 2, 3]] {
            assert!(matches!(
                IdMatrix::from_row_major(dims, bad),
                Err(PuzzleError::InvalidIds { .. })
            ));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates_dims() {
        let dims: Dims = serde_json::from_str(r#"{"rows":2,"cols":3}"#).unwrap();
        assert_eq!(dims, Dims::new(2, 3).unwrap());
        assert!(serde_json::from_str::<Dims>(r#"{"rows":2,"cols":0}"#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates_ids() {
        let json = serde_json::to_string(&IdMatrix::sequential(Dims::new(2, 2).unwrap())).unwrap();
        let m: IdMatrix = serde_json::from_str(&json).unwrap();
        assert!(m.is_sequential());

        for bad in [
            r#"{"dims":{"rows":2,"cols":2},"ids":[1,1,1,1]}"#,
            r#"{"dims":{"rows":2,"cols":2},"ids":[1,2,3,9]}"#,
            r#"{"dims":{"rows":2,"cols":2},"ids":[1,2,3]}"#,
            r#"{"dims":{"rows":2,"cols":0},"ids":[]}"#,
        ] {
            assert!(serde_json::from_str::<IdMatrix>(bad).is_err(), "accepted {bad}");
        }
    }
}
