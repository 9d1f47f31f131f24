//! Population members and run statistics.

use super::fitness;
use crate::puzzle::Arrangement;
use std::time::Duration;

/// A scored population member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub arrangement: Arrangement,
    pub fitness: u32,
}

impl Member {
    /// Wraps and scores an arrangement.
    pub fn new(arrangement: Arrangement) -> Self {
        let fitness = fitness::evaluate(&arrangement);
        Self {
            arrangement,
            fitness,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.fitness == 0
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// A zero-fitness arrangement was found.
    Solved,
    /// `max_generations` elapsed without a solution.
    GenerationLimit,
    /// `time_limit_ms` elapsed without a solution.
    TimeLimit,
    /// The cancel flag was raised.
    Cancelled,
}

/// Snapshot taken after one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Lowest fitness among survivors.
    pub best_fitness: u32,
    /// Highest fitness among survivors.
    pub worst_fitness: u32,
    pub mean_fitness: f64,
    /// Mutants appended (and members removed) this generation.
    pub mutations: usize,
    /// Population size after truncation.
    pub population_size: usize,
}

impl GenerationStats {
    pub(crate) fn measure(generation: usize, population: &[Member], mutations: usize) -> Self {
        let best_fitness = population.iter().map(|m| m.fitness).min().unwrap_or(u32::MAX);
        let worst_fitness = population.iter().map(|m| m.fitness).max().unwrap_or(u32::MAX);
        let total: u64 = population.iter().map(|m| u64::from(m.fitness)).sum();
        let mean_fitness = if population.is_empty() {
            f64::NAN
        } else {
            total as f64 / population.len() as f64
        };
        Self {
            generation,
            best_fitness,
            worst_fitness,
            mean_fitness,
            mutations,
            population_size: population.len(),
        }
    }
}

/// Result of a solver run.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub outcome: Outcome,

    /// Best arrangement in the final population.
    pub best: Arrangement,

    /// Same as `fitness::evaluate(&best)`.
    pub best_fitness: u32,

    /// Generations executed.
    pub generations: usize,

    /// Best fitness at the end of each generation.
    pub fitness_history: Vec<u32>,

    /// Wall-clock time from start to stop.
    pub elapsed: Duration,
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        self.outcome == Outcome::Solved
    }
}
