//! Tournament selection with geometric rank weighting.
//!
//! A tournament samples `size` parents uniformly at random (with
//! replacement) and ranks them by score. Walking the ranking from the best,
//! each entrant wins with probability `p`, so rank `i` is chosen with
//! probability `p·(1-p)^i`. Weaker entrants keep a shrinking chance, which
//! preserves diversity without ignoring fitness. If nobody wins the walk,
//! the best parent overall is returned.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use rand::Rng;

use crate::model::Solution;

/// Tournament selection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tournament {
    /// Number of entrants sampled per tournament.
    pub size: usize,
    /// Probability that the current entrant wins the walk.
    pub pressure: f64,
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            size: 5,
            pressure: 0.5,
        }
    }
}

impl Tournament {
    pub fn new(size: usize, pressure: f64) -> Self {
        Self { size, pressure }
    }

    /// Selects a parent index from `parents`.
    ///
    /// # Panics
    /// Panics if `parents` is empty.
    pub fn select<R: Rng>(&self, parents: &[Solution], rng: &mut R) -> usize {
        assert!(!parents.is_empty(), "cannot select from empty population");

        let n = parents.len();
        let mut entrants: Vec<usize> = (0..self.size.max(1))
            .map(|_| rng.random_range(0..n))
            .collect();
        entrants.sort_by(|&a, &b| parents[a].score().total_cmp(&parents[b].score()));

        let p = self.pressure.clamp(0.0, 1.0);
        for &idx in &entrants {
            if rng.random_bool(p) {
                return idx;
            }
        }
        best_index(parents)
    }
}

/// Index of the lowest-scoring solution.
///
/// # Panics
/// Panics if `solutions` is empty.
pub fn best_index(solutions: &[Solution]) -> usize {
    solutions
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.score().total_cmp(&b.score()))
        .map(|(i, _)| i)
        .expect("population must not be empty")
}
