//! Multi-criterion scoring.
//!
//! A [`Scorer`] evaluates an individual list against an ordered list of
//! weighted [`Criterion`]s. Each criterion filters the groups, computes a
//! raw imbalance statistic, divides it by its calibrated worst case and
//! multiplies by its weight. The total is the sum over all criteria; lower
//! is better and zero is the ideal.
//!
//! # Key Types
//!
//! - [`Criterion`]: name, [`Statistic`], [`Filter`], optional top-N cap, weight
//! - [`Calibration`]: per-criterion worst-case raw values observed in a
//!   random population
//! - [`Scorer`]: criteria plus calibration; pure once calibrated
//! - [`CriterionBreakdown`]: one row of a per-criterion report

mod calibration;
mod criterion;
mod scorer;
pub mod stats;

pub use calibration::Calibration;
pub use criterion::{default_criteria, Criterion, Filter, Statistic};
pub use scorer::{CriterionBreakdown, Evaluation, Scorer};
