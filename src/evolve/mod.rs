//! Evolutionary puzzle solver.
//!
//! Each generation appends `k = max(1, round(P · r))` swap mutants of
//! randomly chosen members, scores them, and removes the `k` worst members
//! so the population returns to size `P`. The run ends when a member
//! reaches fitness zero, or when an optional budget runs out.
//!
//! # Key Types
//!
//! - [`EvolveConfig`]: population size, mutation ratio, budgets, seed
//! - [`Evolution`]: a run, iterated one generation at a time
//! - [`EvolveRunner`]: drives a run to completion
//! - [`SolveResult`]: final arrangement, outcome, and trajectory
//!
//! # Submodules
//!
//! - [`fitness`]: the defect-count evaluator
//! - [`operators`]: the single-swap mutation
//! - [`selection`]: truncation selection

mod config;
pub mod fitness;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::EvolveConfig;
pub use runner::{Evolution, EvolveRunner};
pub use types::{GenerationStats, Member, Outcome, SolveResult};
