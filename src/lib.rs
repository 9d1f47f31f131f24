//! Edge-coded grid jigsaw puzzles and an evolutionary solver.
//!
//! A puzzle is an `N×M` grid of pieces, each carrying four edge codes
//! (flat, tab, or blank). A canonical solution fixes which piece belongs
//! in which cell and makes every interior seam interlock. Starting from a
//! scrambled placement, the solver evolves a population of arrangements
//! until one scores zero defects.
//!
//! - [`puzzle`]: pieces, grids, canonical solutions, and arrangements.
//! - [`evolve`]: fitness, mutation, truncation selection, and the
//!   generational loop.
//! - [`random`]: seeded RNG helpers.
//!
//! # Example
//!
//! ```
//! use u_jigsaw::evolve::{EvolveConfig, EvolveRunner};
//! use u_jigsaw::puzzle::{CanonicalSolution, Dims, IdMatrix};
//! use u_jigsaw::random::create_rng;
//!
//! let mut rng = create_rng(42);
//! let puzzle = CanonicalSolution::sequential(Dims::new(2, 2).unwrap(), &mut rng).unwrap();
//! let scrambled = IdMatrix::from_rows(vec![vec![2, 1], vec![4, 3]]).unwrap();
//!
//! let config = EvolveConfig::default()
//!     .with_population_size(4)
//!     .with_max_generations(10_000)
//!     .with_seed(42);
//! let result = EvolveRunner::run_from(&puzzle, &config, &scrambled).unwrap();
//!
//! assert!(result.is_solved());
//! assert_eq!(result.best.id_layout().rows(), vec![vec![1, 2], vec![3, 4]]);
//! ```
//!
//! # Features
//!
//! - `parallel`: fan mutation and scoring out over rayon.
//! - `serde`: derive `Serialize`/`Deserialize` on plain data types.

pub mod error;
pub mod evolve;
pub mod puzzle;
pub mod random;

pub use error::{ConfigError, InvalidPieceError, PuzzleError, SolveError};
