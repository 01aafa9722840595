//! Normalization bounds learned from a random population.
//!
//! Criteria measure very different quantities (head counts, rating
//! spreads, violation counts). Dividing each raw value by the worst value
//! seen among uniformly random assignments maps them onto comparable
//! ranges, so weights alone express relative importance.

use super::scorer::Scorer;
use crate::model::Solution;

/// Worst-case raw value per criterion, in criterion order.
///
/// A worst case of zero means no nonzero value was ever observed and
/// normalization is skipped for that criterion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Calibration {
    worst_case: Vec<f64>,
}

impl Calibration {
    /// An all-zero calibration for `len` criteria.
    pub fn new(len: usize) -> Self {
        Self {
            worst_case: vec![0.0; len],
        }
    }

    pub fn from_worst_cases(worst_case: Vec<f64>) -> Self {
        Self { worst_case }
    }

    pub fn len(&self) -> usize {
        self.worst_case.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worst_case.is_empty()
    }

    /// Worst case of criterion `index`, or `None` past the end.
    pub fn worst_case(&self, index: usize) -> Option<f64> {
        self.worst_case.get(index).copied()
    }

    pub fn worst_cases(&self) -> &[f64] {
        &self.worst_case
    }

    /// Raises each worst case to `raw[i]` when larger.
    ///
    /// Non-finite raw values are skipped. Returns how many were skipped.
    pub fn observe(&mut self, raw: &[f64]) -> usize {
        let mut skipped = 0;
        for (worst, &value) in self.worst_case.iter_mut().zip(raw) {
            if !value.is_finite() {
                skipped += 1;
                continue;
            }
            if value > *worst {
                *worst = value;
            }
        }
        skipped
    }

    /// `raw / worst_case`, or `raw` unchanged when the worst case is zero
    /// or `index` has no entry.
    pub fn normalize(&self, index: usize, raw: f64) -> f64 {
        match self.worst_case(index) {
            Some(worst) if worst != 0.0 => raw / worst,
            _ => raw,
        }
    }
}

impl Scorer {
    /// Records the worst raw value of every criterion over `population`.
    ///
    /// Must run once, after the population is randomized and before any
    /// normalized score is trusted. Running it again on the same
    /// population leaves the calibration unchanged.
    pub fn calibrate(&mut self, population: &[Solution]) {
        let mut skipped = 0;
        for solution in population {
            let raw = self.raw_scores(solution.individuals());
            skipped += self.calibration_mut().observe(&raw);
        }
        if skipped > 0 {
            log::warn!("calibration skipped {skipped} non-finite raw scores");
        }
        for (criterion, worst) in self.criteria().iter().zip(self.calibration().worst_cases()) {
            log::debug!("calibrated '{}': worst case {worst:.4}", criterion.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, Individual};
    use crate::random::create_rng;
    use crate::scoring::default_criteria;

    fn population(seed: u64) -> Vec<Solution> {
        let mut rng = create_rng(seed);
        let roster: Vec<Individual> = (0..20)
            .map(|i| {
                let gender = if i % 3 == 0 { Gender::Female } else { Gender::Male };
                Individual::new(i, format!("p{i}"), 50.0 + i as f64, gender)
            })
            .collect();
        (0..30).map(|_| Solution::random(&roster, 4, &mut rng)).collect()
    }

    #[test]
    fn test_observe_keeps_maximum() {
        let mut cal = Calibration::new(2);
        cal.observe(&[1.0, 5.0]);
        cal.observe(&[3.0, 2.0]);
        assert_eq!(cal.worst_cases(), &[3.0, 5.0]);
    }

    #[test]
    fn test_observe_skips_non_finite() {
        let mut cal = Calibration::new(3);
        let skipped = cal.observe(&[f64::NAN, f64::INFINITY, 2.0]);
        assert_eq!(skipped, 2);
        assert_eq!(cal.worst_cases(), &[0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_normalize_zero_worst_case_passes_raw() {
        let cal = Calibration::new(1);
        assert_eq!(cal.normalize(0, 4.5), 4.5);
    }

    #[test]
    fn test_normalize_out_of_range_passes_raw() {
        let cal = Calibration::from_worst_cases(vec![2.0]);
        assert_eq!(cal.normalize(0, 4.0), 2.0);
        assert_eq!(cal.normalize(3, 4.0), 4.0);
        assert_eq!(cal.worst_case(3), None);
    }

    #[test]
    fn test_calibrate_idempotent() {
        let pop = population(42);
        let mut scorer = Scorer::new(default_criteria(), 4);
        scorer.calibrate(&pop);
        let first = scorer.calibration().clone();
        scorer.calibrate(&pop);
        assert_eq!(scorer.calibration(), &first);
    }

    #[test]
    fn test_calibrated_population_scores_bounded() {
        let pop = population(7);
        let mut scorer = Scorer::new(default_criteria(), 4);
        scorer.calibrate(&pop);

        let weight_sum: f64 = scorer.criteria().iter().map(|c| c.weight as f64).sum();
        for sol in &pop {
            let score = scorer.score(sol.individuals());
            assert!(
                score <= weight_sum + 1e-9,
                "calibration population must score at most the weight sum: {score}"
            );
        }
    }
}
