//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::ConfigError;

/// Seed used when a deterministic run does not name one.
pub const DEFAULT_SEED: u64 = 0;

/// Configuration for the group-assignment Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use roster_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.group_count, 6);
/// assert_eq!(config.population_size, 200);
/// assert_eq!(config.elite_count, 20);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use roster_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_group_count(4)
///     .with_population_size(100)
///     .with_elite_count(10)
///     .with_mutation_rate(0.1)
///     .with_deterministic(true);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.effective_workers(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    /// Number of groups to partition individuals into.
    pub group_count: usize,

    /// Size of the initial random population, and the number of children
    /// bred in every generation.
    pub population_size: usize,

    /// Number of best solutions kept as parents between generations.
    pub elite_count: usize,

    /// Number of parents sampled (with replacement) per tournament.
    pub tournament_size: usize,

    /// Geometric rank weighting `p` for tournaments (0.0 < p ≤ 1.0).
    ///
    /// Rank `i` of the sample is chosen with probability `p·(1-p)^i`.
    /// `1.0` always picks the best of the sample.
    pub selection_pressure: f64,

    /// Probability of each step of the mutation chain (0.0 ≤ m < 1.0).
    ///
    /// The number of mutations per child is geometrically distributed.
    pub mutation_rate: f64,

    /// Probability that a mutated individual's pairing partner moves to the
    /// same new group (0.0–1.0).
    pub baggage_rate: f64,

    /// Number of worker threads breeding children.
    pub workers: usize,

    /// Forces a single worker and a fixed seed.
    pub deterministic: bool,

    /// Random seed. `None` uses OS entropy unless `deterministic` is set.
    pub seed: Option<u64>,

    /// Generations without improvement of the best score before stopping.
    ///
    /// The run ends once more than this many generations have passed since
    /// the last improvement.
    pub stagnation_limit: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            group_count: 6,
            population_size: 200,
            elite_count: 20,
            tournament_size: 5,
            selection_pressure: 0.5,
            mutation_rate: 0.15,
            baggage_rate: 0.5,
            workers: 1,
            deterministic: false,
            seed: None,
            stagnation_limit: 500,
        }
    }
}

impl GaConfig {
    pub fn with_group_count(mut self, n: usize) -> Self {
        self.group_count = n;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the geometric selection pressure (clamped to at most 1.0).
    pub fn with_selection_pressure(mut self, p: f64) -> Self {
        self.selection_pressure = p.min(1.0);
        self
    }

    /// Sets the mutation rate (clamped to 0.0–1.0).
    ///
    /// A rate of exactly 1.0 never ends the mutation chain and is rejected
    /// by [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the baggage carry rate (clamped to 0.0–1.0).
    pub fn with_baggage_rate(mut self, rate: f64) -> Self {
        self.baggage_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    pub fn with_deterministic(mut self, deterministic: bool) -> Self {
        self.deterministic = deterministic;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Worker count actually used: 1 in deterministic mode.
    pub fn effective_workers(&self) -> usize {
        if self.deterministic {
            1
        } else {
            self.workers
        }
    }

    /// Seed actually used, or `None` to draw one from OS entropy.
    pub fn effective_seed(&self) -> Option<u64> {
        match (self.seed, self.deterministic) {
            (Some(seed), _) => Some(seed),
            (None, true) => Some(DEFAULT_SEED),
            (None, false) => None,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_count == 0 {
            return Err(ConfigError::ZeroGroups);
        }
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.elite_count == 0 {
            return Err(ConfigError::ZeroElites);
        }
        if self.elite_count > self.population_size {
            return Err(ConfigError::EliteExceedsPopulation {
                elite_count: self.elite_count,
                population_size: self.population_size,
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::ZeroTournament);
        }
        if !(self.selection_pressure > 0.0 && self.selection_pressure <= 1.0) {
            return Err(ConfigError::InvalidSelectionPressure(self.selection_pressure));
        }
        if !(0.0..1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidProbability {
                name: "mutation_rate",
                range: "[0, 1)",
                value: self.mutation_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.baggage_rate) {
            return Err(ConfigError::InvalidProbability {
                name: "baggage_rate",
                range: "[0, 1]",
                value: self.baggage_rate,
            });
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.stagnation_limit == 0 {
            return Err(ConfigError::ZeroPatience);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.group_count, 6);
        assert_eq!(config.population_size, 200);
        assert_eq!(config.elite_count, 20);
        assert_eq!(config.tournament_size, 5);
        assert!((config.selection_pressure - 0.5).abs() < 1e-10);
        assert!((config.mutation_rate - 0.15).abs() < 1e-10);
        assert!((config.baggage_rate - 0.5).abs() < 1e-10);
        assert_eq!(config.workers, 1);
        assert!(!config.deterministic);
        assert!(config.seed.is_none());
        assert_eq!(config.stagnation_limit, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_group_count(3)
            .with_population_size(50)
            .with_elite_count(5)
            .with_tournament_size(4)
            .with_selection_pressure(0.7)
            .with_mutation_rate(0.05)
            .with_baggage_rate(0.9)
            .with_workers(8)
            .with_seed(42)
            .with_stagnation_limit(100);

        assert_eq!(config.group_count, 3);
        assert_eq!(config.population_size, 50);
        assert_eq!(config.elite_count, 5);
        assert_eq!(config.tournament_size, 4);
        assert!((config.selection_pressure - 0.7).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!((config.baggage_rate - 0.9).abs() < 1e-10);
        assert_eq!(config.workers, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.stagnation_limit, 100);
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_mutation_rate(-0.5)
            .with_baggage_rate(2.0)
            .with_selection_pressure(3.0);

        assert!((config.mutation_rate - 0.0).abs() < 1e-10);
        assert!((config.baggage_rate - 1.0).abs() < 1e-10);
        assert!((config.selection_pressure - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_zero_groups() {
        let config = GaConfig::default().with_group_count(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroGroups));
    }

    #[test]
    fn test_validate_elite_exceeds_population() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_count(11);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EliteExceedsPopulation {
                elite_count: 11,
                population_size: 10,
            })
        );
    }

    #[test]
    fn test_validate_elite_equals_population() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_count(10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_mutation_rate_one() {
        let config = GaConfig::default().with_mutation_rate(1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { name: "mutation_rate", .. })
        ));
    }

    #[test]
    fn test_validate_zero_pressure() {
        let config = GaConfig::default().with_selection_pressure(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_counts() {
        assert!(GaConfig::default().with_workers(0).validate().is_err());
        assert!(GaConfig::default().with_tournament_size(0).validate().is_err());
        assert!(GaConfig::default().with_stagnation_limit(0).validate().is_err());
        assert!(GaConfig::default().with_elite_count(0).validate().is_err());
        assert!(GaConfig::default().with_population_size(0).validate().is_err());
    }

    // ---- Determinism ----

    #[test]
    fn test_deterministic_forces_one_worker_and_seed() {
        let config = GaConfig::default().with_workers(8).with_deterministic(true);
        assert_eq!(config.effective_workers(), 1);
        assert_eq!(config.effective_seed(), Some(DEFAULT_SEED));
    }

    #[test]
    fn test_deterministic_keeps_explicit_seed() {
        let config = GaConfig::default().with_seed(9).with_deterministic(true);
        assert_eq!(config.effective_seed(), Some(9));
    }

    #[test]
    fn test_non_deterministic_without_seed() {
        let config = GaConfig::default().with_workers(4);
        assert_eq!(config.effective_workers(), 4);
        assert_eq!(config.effective_seed(), None);
    }
}
