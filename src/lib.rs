//! Balanced group assignment by genetic search.
//!
//! Partitions a roster of individuals into a fixed number of groups so
//! that the groups are balanced across several weighted criteria: group
//! size, gender mix, rating mean and spread, and pairing constraints.
//!
//! - **Model**: individuals, derived groups and candidate solutions
//! - **Scoring**: weighted imbalance criteria normalized against worst
//!   cases calibrated from a random population
//! - **GA**: tournament selection, segment crossover, geometric mutation,
//!   elitism and a worker pool, stopping when the best score stalls
//!
//! # Example
//!
//! ```
//! use roster_ga::ga::{GaConfig, GaRunner};
//! use roster_ga::model::{Gender, Individual};
//! use roster_ga::scoring::default_criteria;
//!
//! let roster: Vec<Individual> = (0..12)
//!     .map(|i| {
//!         let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
//!         Individual::new(i, format!("player {i}"), 60.0 + i as f64, gender)
//!     })
//!     .collect();
//!
//! let config = GaConfig::default()
//!     .with_group_count(3)
//!     .with_population_size(50)
//!     .with_elite_count(10)
//!     .with_stagnation_limit(30)
//!     .with_deterministic(true);
//!
//! let result = GaRunner::run(&roster, default_criteria(), &config).unwrap();
//! let breakdown = result.scorer.breakdown(result.best.individuals());
//! assert_eq!(breakdown.len(), result.scorer.criteria().len());
//! ```
//!
//! Reading CSV input and rendering results live in [`input`] and
//! [`report`]; the `roster-ga` binary wires them to a command line.

pub mod error;
pub mod ga;
pub mod input;
pub mod model;
pub mod random;
pub mod report;
pub mod scoring;

pub use error::{ConfigError, Error, InputError, Result};
