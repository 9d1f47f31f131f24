//! Solver configuration.
//!
//! [`EvolveConfig`] holds all parameters that control the generational loop.

use crate::error::ConfigError;

/// Configuration for the evolutionary puzzle solver.
///
/// # Defaults
///
/// The defaults reproduce the reference behavior: a single-member
/// population, one mutation per generation, and no budget at all (the run
/// continues until a zero-fitness arrangement appears).
///
/// ```
/// use u_jigsaw::evolve::EvolveConfig;
///
/// let config = EvolveConfig::default();
/// assert_eq!(config.population_size, 1);
/// assert_eq!(config.max_generations, None);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_jigsaw::evolve::EvolveConfig;
///
/// let config = EvolveConfig::default()
///     .with_population_size(20)
///     .with_mutation_ratio(0.25)
///     .with_max_generations(50_000)
///     .with_seed(7);
/// assert_eq!(config.num_mutations(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EvolveConfig {
    /// Target population size `P`, restored after every generation.
    pub population_size: usize,

    /// Fraction of the population mutated per generation, in `(0, 1]`.
    ///
    /// Each generation appends `max(1, round(P · r))` mutants and then
    /// removes that many of the worst members.
    pub mutation_ratio: f64,

    /// Generation cap. `None` runs until solved.
    pub max_generations: Option<usize>,

    /// Optional wall-clock limit in milliseconds.
    ///
    /// Checked before each generation, so a run may overshoot by one
    /// generation's worth of work.
    pub time_limit_ms: Option<u64>,

    /// Whether to mutate and score in parallel.
    ///
    /// Only takes effect when the crate is built with the `parallel`
    /// feature. Results are identical either way for a fixed seed.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            population_size: 1,
            mutation_ratio: 1.0,
            max_generations: None,
            time_limit_ms: None,
            parallel: true,
            seed: None,
        }
    }
}

impl EvolveConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the mutation ratio, clamped to `[0, 1]`.
    ///
    /// A ratio of zero is still rejected by [`validate`](Self::validate).
    pub fn with_mutation_ratio(mut self, ratio: f64) -> Self {
        self.mutation_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Caps the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables or disables parallel mutation and scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Mutants appended (and members removed) per generation:
    /// `max(1, round(P · r))`.
    pub fn num_mutations(&self) -> usize {
        let n = (self.population_size as f64 * self.mutation_ratio).round() as usize;
        n.max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 1 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if !(self.mutation_ratio > 0.0 && self.mutation_ratio <= 1.0) {
            return Err(ConfigError::MutationRatio(self.mutation_ratio));
        }
        if self.max_generations == Some(0) {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        Ok(())
    }
}
