//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete search:
//! random population → calibration → scoring → elite cut, then per
//! generation: selection → breeding on the worker pool → elitism merge,
//! until the best score stalls or the run is cancelled.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::config::GaConfig;
use super::operators::{crossover, mutate};
use super::selection::Tournament;
use crate::error::Result;
use crate::model::{Individual, Solution};
use crate::random::create_rng;
use crate::scoring::{Criterion, Scorer};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best solution found during the entire run.
    pub best: Solution,

    /// Best score (same as `best.score()`).
    pub best_score: f64,

    /// Number of generations executed after calibration.
    pub generations: usize,

    /// Generation in which the best score last improved (0 = initial
    /// population).
    pub last_improvement: usize,

    /// Whether the run ended because the best score stalled.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best score of the initial population, then after each generation.
    pub score_history: Vec<f64>,

    /// The calibrated scorer the run used, for score breakdowns.
    pub scorer: Scorer,

    /// Seed of the driver's random stream.
    pub seed: u64,
}

/// Parent score statistics at the end of a generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_score: f64,
    pub mean_score: f64,
    pub worst_score: f64,
}

/// One unit of work for the worker pool.
///
/// Parents are referenced by index into the current parent set, which is
/// only read while tasks run. Each task seeds its own RNG, so results do
/// not depend on which worker runs it.
#[derive(Debug, Clone, Copy)]
struct BreedTask {
    parent1: usize,
    parent2: usize,
    seed: u64,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use roster_ga::ga::{GaConfig, GaRunner};
/// use roster_ga::model::{Gender, Individual};
/// use roster_ga::scoring::default_criteria;
///
/// let roster: Vec<Individual> = (0..8)
///     .map(|i| Individual::new(i, format!("p{i}"), 100.0, Gender::Male))
///     .collect();
/// let config = GaConfig::default()
///     .with_group_count(2)
///     .with_population_size(20)
///     .with_elite_count(5)
///     .with_stagnation_limit(10)
///     .with_deterministic(true);
///
/// let result = GaRunner::run(&roster, default_criteria(), &config).unwrap();
/// assert_eq!(result.best.len(), 8);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// Returns an error before any search work if the configuration is
    /// invalid or the worker pool cannot be created.
    pub fn run(roster: &[Individual], criteria: Vec<Criterion>, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_observer(roster, criteria, config, None, |_| {})
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops at
    /// the next generation boundary and returns the best solution so far.
    /// A generation in flight always completes.
    pub fn run_with_cancel(
        roster: &[Individual],
        criteria: Vec<Criterion>,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        Self::run_with_observer(roster, criteria, config, cancel, |_| {})
    }

    /// Runs the GA, calling `observer` at the end of every generation.
    pub fn run_with_observer<F>(
        roster: &[Individual],
        criteria: Vec<Criterion>,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: F,
    ) -> Result<GaResult>
    where
        F: FnMut(&GenerationStats),
    {
        config.validate()?;

        let workers = config.effective_workers();
        let pool = if workers > 1 {
            Some(ThreadPoolBuilder::new().num_threads(workers).build()?)
        } else {
            None
        };

        let seed = config.effective_seed().unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);

        log::info!(
            "searching {} individuals into {} groups (population {}, elites {}, workers {workers}, seed {seed})",
            roster.len(),
            config.group_count,
            config.population_size,
            config.elite_count,
        );

        // 1. Random initial population
        let mut population: Vec<Solution> = (0..config.population_size)
            .map(|_| Solution::random(roster, config.group_count, &mut rng))
            .collect();

        // 2. Calibrate, then freeze the scorer for the rest of the run
        let mut scorer = Scorer::new(criteria, config.group_count);
        scorer.calibrate(&population);
        let scorer = scorer;

        // 3. Score and cut to the elite set
        for solution in &mut population {
            scorer.score_solution(solution);
        }
        sort_by_score(&mut population);
        population.truncate(config.elite_count);
        let mut parents = population;

        let mut best_score = parents[0].score();
        let mut score_history = vec![best_score];
        let mut last_improvement = 0usize;
        let mut generation = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let tournament = Tournament::new(config.tournament_size, config.selection_pressure);

        log::info!("initial best score {best_score:.4}");

        // 4. Evolutionary loop
        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            generation += 1;

            let tasks: Vec<BreedTask> = (0..config.population_size)
                .map(|_| BreedTask {
                    parent1: tournament.select(&parents, &mut rng),
                    parent2: tournament.select(&parents, &mut rng),
                    seed: rng.random(),
                })
                .collect();

            let children = breed_all(&tasks, &parents, &scorer, config, pool.as_ref());

            // Elitism: previous parents compete with their children
            parents.extend(children);
            sort_by_score(&mut parents);
            parents.truncate(config.elite_count);

            let stats = generation_stats(generation, &parents);
            if stats.best_score < best_score {
                log::debug!(
                    "generation {generation}: best score {:.4} -> {:.4}",
                    best_score,
                    stats.best_score
                );
                best_score = stats.best_score;
                last_improvement = generation;
            }
            score_history.push(best_score);
            log::trace!(
                "generation {generation}: best {:.4}, mean {:.4}, worst {:.4}",
                stats.best_score,
                stats.mean_score,
                stats.worst_score
            );
            observer(&stats);

            if generation - last_improvement > config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        log::info!(
            "search finished after {generation} generations: best score {best_score:.4} (last improved in generation {last_improvement}{})",
            if cancelled { ", cancelled" } else { "" }
        );

        let best = parents.swap_remove(0);
        Ok(GaResult {
            best_score: best.score(),
            best,
            generations: generation,
            last_improvement,
            stagnated,
            cancelled,
            score_history,
            scorer,
            seed,
        })
    }
}

/// Breeds and scores one child per task, on the pool when one is given.
fn breed_all(
    tasks: &[BreedTask],
    parents: &[Solution],
    scorer: &Scorer,
    config: &GaConfig,
    pool: Option<&ThreadPool>,
) -> Vec<Solution> {
    let breed = |task: &BreedTask| {
        let mut rng = create_rng(task.seed);
        let mut child = crossover(&parents[task.parent1], &parents[task.parent2], &mut rng);
        mutate(
            &mut child,
            config.group_count,
            config.mutation_rate,
            config.baggage_rate,
            &mut rng,
        );
        scorer.score_solution(&mut child);
        child
    };

    match pool {
        Some(pool) => pool.install(|| tasks.par_iter().map(breed).collect()),
        None => tasks.iter().map(breed).collect(),
    }
}

/// Sorts solutions by score, best first. Stable, so ties keep their order.
fn sort_by_score(solutions: &mut [Solution]) {
    solutions.sort_by(|a, b| a.score().total_cmp(&b.score()));
}

/// Best, mean and worst score of `parents`.
///
/// The mean is accumulated as an offset from the best score, so equal
/// scores report a mean exactly equal to the best.
fn generation_stats(generation: usize, parents: &[Solution]) -> GenerationStats {
    let scores = parents.iter().map(Solution::score);
    let best_score = scores.clone().fold(f64::INFINITY, f64::min);
    let worst_score = scores.clone().fold(f64::NEG_INFINITY, f64::max);
    let offset = scores.map(|s| s - best_score).sum::<f64>() / parents.len() as f64;
    GenerationStats {
        generation,
        best_score,
        mean_score: (best_score + offset).max(best_score).min(worst_score),
        worst_score,
    }
}

// ============================================================================
// Tests
// ============================================================================
