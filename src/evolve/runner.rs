//! Generational loop execution.
//!
//! [`Evolution`] runs one generation per [`Iterator::next`] call:
//! mutate → score → truncate. [`EvolveRunner`] drives it to completion.

use super::config::EvolveConfig;
use super::operators::swap_mutation;
use super::selection::truncate;
use super::types::{GenerationStats, Member, Outcome, SolveResult};
use crate::error::{ConfigError, SolveError};
use crate::puzzle::{Arrangement, CanonicalSolution, IdMatrix};
use crate::random::{create_rng, fork_seed};
use rand::rngs::StdRng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// An in-progress solver run.
///
/// Iterating yields one [`GenerationStats`] per generation: the fitness
/// trajectory. The sequence ends right after the generation that finds a
/// zero-fitness arrangement, or when a configured budget or the cancel flag
/// stops the run. It cannot be restarted.
///
/// ```
/// use u_jigsaw::evolve::{Evolution, EvolveConfig, Outcome};
/// use u_jigsaw::puzzle::{CanonicalSolution, Dims};
/// use u_jigsaw::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let puzzle = CanonicalSolution::sequential(Dims::new(2, 3).unwrap(), &mut rng).unwrap();
/// let config = EvolveConfig::default()
///     .with_population_size(8)
///     .with_max_generations(10_000)
///     .with_seed(1);
///
/// let mut evolution = Evolution::new(&puzzle, &config).unwrap();
/// let trajectory: Vec<u32> = evolution.by_ref().map(|g| g.best_fitness).collect();
/// assert_eq!(evolution.outcome(), Some(Outcome::Solved));
/// assert_eq!(trajectory.last(), Some(&0));
/// ```
pub struct Evolution<'a> {
    canonical: &'a CanonicalSolution,
    config: EvolveConfig,
    rng: StdRng,
    population: Vec<Member>,
    generation: usize,
    history: Vec<u32>,
    started: Instant,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
    outcome: Option<Outcome>,
}

impl<'a> Evolution<'a> {
    /// Starts a run whose initial population is `P` independently shuffled
    /// arrangements.
    pub fn new(
        canonical: &'a CanonicalSolution,
        config: &EvolveConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = seeded_rng(config);
        let arrangements = (0..config.population_size)
            .map(|_| {
                let ids = IdMatrix::shuffled(canonical.dims(), &mut rng);
                Arrangement::from_permutation(&ids, canonical)
                    .expect("shuffled layout has the canonical dimensions")
            })
            .collect();
        Ok(Self::start(canonical, config, rng, arrangements))
    }

    /// Starts a run from one explicit scrambled layout; every initial member
    /// is a copy of it.
    pub fn from_layout(
        canonical: &'a CanonicalSolution,
        config: &EvolveConfig,
        layout: &IdMatrix,
    ) -> Result<Self, SolveError> {
        config.validate()?;
        let scrambled = Arrangement::from_permutation(layout, canonical)?;
        let arrangements = vec![scrambled; config.population_size];
        Ok(Self::start(canonical, config, seeded_rng(config), arrangements))
    }

    fn start(
        canonical: &'a CanonicalSolution,
        config: &EvolveConfig,
        rng: StdRng,
        arrangements: Vec<Arrangement>,
    ) -> Self {
        let population = score_all(arrangements, config.parallel);
        let dims = canonical.dims();
        info!(
            rows = dims.rows(),
            cols = dims.cols(),
            population_size = config.population_size,
            mutations = config.num_mutations(),
            "starting evolution"
        );
        let started = Instant::now();
        Self {
            canonical,
            config: config.clone(),
            rng,
            population,
            generation: 0,
            history: Vec::new(),
            started,
            deadline: config
                .time_limit_ms
                .map(|ms| started + Duration::from_millis(ms)),
            cancel: None,
            outcome: None,
        }
    }

    /// Stops the run at the next generation boundary once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn canonical(&self) -> &CanonicalSolution {
        self.canonical
    }

    /// Generations executed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Member] {
        &self.population
    }

    /// Best-fitness member of the current population (earliest on ties).
    pub fn best(&self) -> &Member {
        self.population
            .iter()
            .min_by_key(|m| m.fitness)
            .expect("population is never empty")
    }

    /// Best fitness after each completed generation.
    pub fn fitness_history(&self) -> &[u32] {
        &self.history
    }

    /// Wall-clock time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// `None` while the run can still continue.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Runs any remaining generations and returns the result.
    pub fn into_result(mut self) -> SolveResult {
        while self.next().is_some() {}
        let best = self.best().clone();
        SolveResult {
            outcome: self.outcome.expect("drained evolution has an outcome"),
            best_fitness: best.fitness,
            best: best.arrangement,
            generations: self.generation,
            fitness_history: self.history,
            elapsed: self.started.elapsed(),
        }
    }

    fn budget_exhausted(&self) -> Option<Outcome> {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(Outcome::Cancelled);
            }
        }
        if let Some(max) = self.config.max_generations {
            if self.generation >= max {
                return Some(Outcome::GenerationLimit);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Some(Outcome::TimeLimit);
            }
        }
        None
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        info!(
            ?outcome,
            generations = self.generation,
            best_fitness = self.best().fitness,
            "evolution finished"
        );
    }
}

impl Iterator for Evolution<'_> {
    type Item = GenerationStats;

    fn next(&mut self) -> Option<GenerationStats> {
        if self.outcome.is_some() {
            return None;
        }
        if let Some(outcome) = self.budget_exhausted() {
            self.finish(outcome);
            return None;
        }

        let k = self.config.num_mutations();
        let len = self.population.len();
        let picks: Vec<(usize, u64)> = (0..k)
            .map(|_| (self.rng.random_range(0..len), fork_seed(&mut self.rng)))
            .collect();

        let mutants = breed(&self.population, &picks, self.config.parallel);
        self.population.extend(mutants);
        truncate(&mut self.population, k);
        self.generation += 1;

        let stats = GenerationStats::measure(self.generation, &self.population, k);
        self.history.push(stats.best_fitness);
        debug!(
            generation = stats.generation,
            best = stats.best_fitness,
            worst = stats.worst_fitness,
            "generation complete"
        );

        if stats.best_fitness == 0 {
            self.finish(Outcome::Solved);
        }
        Some(stats)
    }
}

impl FusedIterator for Evolution<'_> {}

/// Executes the solver to completion.
///
/// # Usage
///
/// ```ignore
/// let puzzle = CanonicalSolution::sequential(dims, &mut rng)?;
/// let config = EvolveConfig::default().with_population_size(10).with_seed(42);
/// let result = EvolveRunner::run(&puzzle, &config)?;
/// assert!(result.is_solved());
/// ```
pub struct EvolveRunner;

impl EvolveRunner {
    /// Runs from a shuffled initial population.
    pub fn run(
        canonical: &CanonicalSolution,
        config: &EvolveConfig,
    ) -> Result<SolveResult, ConfigError> {
        Self::run_with_cancel(canonical, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// If the flag is set, the run stops before the next generation and
    /// reports [`Outcome::Cancelled`] with the best arrangement so far.
    pub fn run_with_cancel(
        canonical: &CanonicalSolution,
        config: &EvolveConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveResult, ConfigError> {
        let mut evolution = Evolution::new(canonical, config)?;
        if let Some(flag) = cancel {
            evolution = evolution.with_cancel(flag);
        }
        Ok(evolution.into_result())
    }

    /// Runs from an explicit scrambled layout.
    pub fn run_from(
        canonical: &CanonicalSolution,
        config: &EvolveConfig,
        layout: &IdMatrix,
    ) -> Result<SolveResult, SolveError> {
        Ok(Evolution::from_layout(canonical, config, layout)?.into_result())
    }
}

fn seeded_rng(config: &EvolveConfig) -> StdRng {
    match config.seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Scores a batch of arrangements.
fn score_all(arrangements: Vec<Arrangement>, parallel: bool) -> Vec<Member> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return arrangements.into_par_iter().map(Member::new).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    arrangements.into_iter().map(Member::new).collect()
}

/// Mutates and scores one child per `(parent, seed)` pick.
///
/// Each child draws from its own RNG seeded by the driver, so the result
/// does not depend on how work is scheduled.
fn breed(population: &[Member], picks: &[(usize, u64)], parallel: bool) -> Vec<Member> {
    let mutate = |&(parent, seed): &(usize, u64)| {
        let mut rng = create_rng(seed);
        Member::new(swap_mutation(&population[parent].arrangement, &mut rng))
    };
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return picks.par_iter().map(mutate).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    picks.iter().map(mutate).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolve::fitness;
    use crate::puzzle::Dims;

    fn puzzle(rows: usize, cols: usize, seed: u64) -> CanonicalSolution {
        let mut rng = create_rng(seed);
        CanonicalSolution::sequential(Dims::new(rows, cols).unwrap(), &mut rng).unwrap()
    }

    #[test]
    fn test_solves_2x2_from_row_swap() {
        let p = puzzle(2, 2, 42);
        let layout = IdMatrix::from_rows(vec![vec![2, 1], vec![4, 3]]).unwrap();
        let config = EvolveConfig::default()
            .with_population_size(4)
            .with_mutation_ratio(1.0)
            .with_max_generations(10_000)
            .with_seed(42)
            .with_parallel(false);

        let result = EvolveRunner::run_from(&p, &config, &layout).unwrap();

        assert_eq!(result.outcome, Outcome::Solved);
        assert_eq!(result.best_fitness, 0);
        assert_eq!(result.best.id_layout().rows(), vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(result.fitness_history.len(), result.generations);
    }

    #[test]
    fn test_solves_3x3_shuffled() {
        let p = puzzle(3, 3, 7);
        let config = EvolveConfig::default()
            .with_population_size(10)
            .with_mutation_ratio(0.5)
            .with_max_generations(100_000)
            .with_seed(7)
            .with_parallel(false);

        let result = EvolveRunner::run(&p, &config).unwrap();

        assert!(result.is_solved(), "outcome {:?}", result.outcome);
        assert_eq!(fitness::evaluate(&result.best), 0);
        assert!(result.best.id_layout().is_sequential());
    }

    #[test]
    fn test_population_size_restored_each_generation() {
        let p = puzzle(3, 4, 1);
        for (size, ratio) in [(1, 1.0), (5, 0.2), (6, 0.5), (7, 1.0)] {
            let config = EvolveConfig::default()
                .with_population_size(size)
                .with_mutation_ratio(ratio)
                .with_max_generations(20)
                .with_seed(3)
                .with_parallel(false);
            let evolution = Evolution::new(&p, &config).unwrap();
            assert_eq!(evolution.population().len(), size);
            for stats in evolution {
                assert_eq!(stats.population_size, size);
                assert_eq!(stats.mutations, config.num_mutations());
            }
        }
    }

    #[test]
    fn test_best_fitness_never_worsens() {
        let p = puzzle(4, 4, 5);
        let config = EvolveConfig::default()
            .with_population_size(6)
            .with_mutation_ratio(0.5)
            .with_max_generations(300)
            .with_seed(5)
            .with_parallel(false);

        let history: Vec<u32> = Evolution::new(&p, &config)
            .unwrap()
            .map(|s| s.best_fitness)
            .collect();

        for w in history.windows(2) {
            assert!(w[1] <= w[0], "best fitness regressed: {} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_generation_limit_is_an_outcome() {
        let p = puzzle(5, 5, 9);
        let config = EvolveConfig::default()
            .with_population_size(2)
            .with_max_generations(3)
            .with_seed(9)
            .with_parallel(false);

        let result = EvolveRunner::run(&p, &config).unwrap();

        assert_eq!(result.outcome, Outcome::GenerationLimit);
        assert_eq!(result.generations, 3);
        assert_eq!(result.fitness_history.len(), 3);
        assert_eq!(result.best_fitness, fitness::evaluate(&result.best));
    }

    #[test]
    fn test_iterator_is_fused() {
        let p = puzzle(4, 4, 2);
        let config = EvolveConfig::default()
            .with_max_generations(2)
            .with_seed(2)
            .with_parallel(false);
        let mut evolution = Evolution::new(&p, &config).unwrap();
        assert!(evolution.next().is_some());
        assert!(evolution.next().is_some());
        assert!(evolution.next().is_none());
        assert!(evolution.next().is_none());
        assert_eq!(evolution.generation(), 2);
        assert_eq!(evolution.outcome(), Some(Outcome::GenerationLimit));
    }

    #[test]
    fn test_cancellation() {
        let p = puzzle(8, 8, 4);
        let config = EvolveConfig::default().with_seed(4).with_parallel(false);

        let cancel = Arc::new(AtomicBool::new(true));
        let result = EvolveRunner::run_with_cancel(&p, &config, Some(cancel)).unwrap();

        assert_eq!(result.outcome, Outcome::Cancelled);
        assert_eq!(result.generations, 0);
        assert!(result.fitness_history.is_empty());
    }

    #[test]
    fn test_cancellation_from_thread() {
        let p = puzzle(12, 12, 4);
        let config = EvolveConfig::default()
            .with_population_size(4)
            .with_seed(4)
            .with_parallel(false);

        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result = EvolveRunner::run_with_cancel(&p, &config, Some(cancel)).unwrap();
        assert!(matches!(result.outcome, Outcome::Cancelled | Outcome::Solved));
    }

    #[test]
    fn test_time_limit() {
        let p = puzzle(12, 12, 6);
        let config = EvolveConfig::default()
            .with_population_size(4)
            .with_time_limit_ms(20)
            .with_seed(6)
            .with_parallel(false);

        let result = EvolveRunner::run(&p, &config).unwrap();
        assert!(matches!(result.outcome, Outcome::TimeLimit | Outcome::Solved));
        if result.outcome == Outcome::TimeLimit {
            assert!(result.elapsed >= Duration::from_millis(20));
        }
    }

    #[test]
    fn test_elapsed_is_reported() {
        let p = puzzle(4, 4, 11);
        let config = EvolveConfig::default()
            .with_population_size(3)
            .with_max_generations(50)
            .with_seed(11)
            .with_parallel(false);

        let evolution = Evolution::new(&p, &config).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        let before = evolution.elapsed();
        assert!(before >= Duration::from_millis(5));
        let result = evolution.into_result();
        assert!(result.elapsed >= before);
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let p = puzzle(3, 3, 10);
        let config = EvolveConfig::default()
            .with_population_size(5)
            .with_mutation_ratio(0.6)
            .with_max_generations(200)
            .with_seed(10)
            .with_parallel(false);

        let a = EvolveRunner::run(&p, &config).unwrap();
        let b = EvolveRunner::run(&p, &config).unwrap();
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.best, b.best);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let p = puzzle(3, 4, 12);
        let base = EvolveConfig::default()
            .with_population_size(8)
            .with_mutation_ratio(0.5)
            .with_max_generations(150)
            .with_seed(12);

        let seq = EvolveRunner::run(&p, &base.clone().with_parallel(false)).unwrap();
        let par = EvolveRunner::run(&p, &base.with_parallel(true)).unwrap();
        assert_eq!(seq.fitness_history, par.fitness_history);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let p = puzzle(2, 2, 1);
        let config = EvolveConfig::default().with_population_size(0);
        assert_eq!(
            EvolveRunner::run(&p, &config).unwrap_err(),
            ConfigError::PopulationTooSmall
        );
    }

    #[test]
    fn test_layout_dimension_mismatch() {
        let p = puzzle(2, 2, 1);
        let layout = IdMatrix::sequential(Dims::new(2, 3).unwrap());
        let err = EvolveRunner::run_from(&p, &EvolveConfig::default(), &layout).unwrap_err();
        assert!(matches!(err, SolveError::Puzzle(_)));
    }
}
