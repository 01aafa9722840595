//! Genetic Algorithm for balanced group assignment.
//!
//! The search keeps a fixed-size elite set of parent solutions. Each
//! generation breeds a batch of children from tournament-selected parents
//! (crossover, then mutation, then scoring) on a worker pool, merges them
//! with the current elites and keeps the best. The run ends when the best
//! score has not improved for longer than the patience threshold, or when
//! cancelled.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, elites, rates, workers)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final result with the calibrated scorer and history
//!
//! # Submodules
//!
//! - [`operators`]: Segment crossover and geometric-chain mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::{GaConfig, DEFAULT_SEED};
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use selection::{best_index, Tournament};
