//! The scoring engine.

use super::calibration::Calibration;
use super::criterion::Criterion;
use crate::error::ConfigError;
use crate::model::{split_into_groups, Individual, Solution};

/// Total score plus the raw value of every criterion, in criterion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub total: f64,
    pub raw: Vec<f64>,
}

/// One row of a per-criterion score report.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionBreakdown {
    pub name: String,
    pub raw: f64,
    pub normalized: f64,
    pub weight: u32,
    pub weighted: f64,
    /// Sum of `weighted` over this and all preceding criteria.
    pub running_total: f64,
}

/// Scores individual lists against weighted, calibrated criteria.
///
/// Scoring is a pure function of the individuals' assignments, the
/// criteria and the calibration. A freshly constructed scorer has an
/// all-zero calibration, which leaves raw scores unnormalized.
#[derive(Debug, Clone)]
pub struct Scorer {
    criteria: Vec<Criterion>,
    group_count: usize,
    calibration: Calibration,
}

impl Scorer {
    pub fn new(criteria: Vec<Criterion>, group_count: usize) -> Self {
        let calibration = Calibration::new(criteria.len());
        Self {
            criteria,
            group_count,
            calibration,
        }
    }

    /// Replaces the calibration.
    ///
    /// The calibration must have one entry per criterion.
    pub fn with_calibration(mut self, calibration: Calibration) -> Result<Self, ConfigError> {
        if calibration.len() != self.criteria.len() {
            return Err(ConfigError::CalibrationMismatch {
                expected: self.criteria.len(),
                actual: calibration.len(),
            });
        }
        self.calibration = calibration;
        Ok(self)
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub(super) fn calibration_mut(&mut self) -> &mut Calibration {
        &mut self.calibration
    }

    /// Raw score of every criterion, in criterion order.
    pub fn raw_scores(&self, individuals: &[Individual]) -> Vec<f64> {
        let groups = split_into_groups(individuals, self.group_count);
        self.criteria.iter().map(|c| c.raw_score(&groups)).collect()
    }

    /// Normalized and weighted contribution of criterion `index` for `raw`.
    ///
    /// Returns `(normalized, weighted)`. A non-finite raw value
    /// contributes zero.
    pub fn contribution(&self, index: usize, raw: f64) -> (f64, f64) {
        if !raw.is_finite() {
            return (0.0, 0.0);
        }
        let normalized = self.calibration.normalize(index, raw);
        (normalized, normalized * self.criteria[index].weight as f64)
    }

    /// Computes the total score together with the per-criterion raw scores.
    pub fn evaluate(&self, individuals: &[Individual]) -> Evaluation {
        let raw = self.raw_scores(individuals);
        let total = raw
            .iter()
            .enumerate()
            .map(|(i, &r)| self.contribution(i, r).1)
            .sum();
        Evaluation { total, raw }
    }

    /// Total score of an individual list. Lower is better.
    pub fn score(&self, individuals: &[Individual]) -> f64 {
        self.evaluate(individuals).total
    }

    /// Scores `solution` and stores the result in it.
    pub fn score_solution(&self, solution: &mut Solution) {
        let score = self.score(solution.individuals());
        solution.set_score(score);
    }

    /// Per-criterion report for presentation.
    pub fn breakdown(&self, individuals: &[Individual]) -> Vec<CriterionBreakdown> {
        let raw = self.raw_scores(individuals);
        let mut running_total = 0.0;
        self.criteria
            .iter()
            .zip(raw)
            .enumerate()
            .map(|(i, (criterion, raw))| {
                let (normalized, weighted) = self.contribution(i, raw);
                running_total += weighted;
                CriterionBreakdown {
                    name: criterion.name.clone(),
                    raw,
                    normalized,
                    weight: criterion.weight,
                    weighted,
                    running_total,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Gender, IndividualId};
    use crate::scoring::{default_criteria, Statistic};

    fn count_criterion(weight: u32) -> Criterion {
        Criterion::new("number of players", Statistic::CountImbalance).with_weight(weight)
    }

    fn lopsided() -> Vec<Individual> {
        // Sizes [4, 0]: count imbalance raw = 3
        (0..4)
            .map(|i| Individual::new(i, format!("p{i}"), 100.0, Gender::Male))
            .collect()
    }

    #[test]
    fn test_uncalibrated_uses_raw() {
        let scorer = Scorer::new(vec![count_criterion(2)], 2);
        let eval = scorer.evaluate(&lopsided());
        assert_eq!(eval.raw, vec![3.0]);
        assert_eq!(eval.total, 6.0);
    }

    #[test]
    fn test_calibrated_normalizes() {
        let scorer = Scorer::new(vec![count_criterion(2)], 2)
            .with_calibration(Calibration::from_worst_cases(vec![6.0]))
            .unwrap();
        let eval = scorer.evaluate(&lopsided());
        assert_eq!(eval.total, 1.0);
    }

    #[test]
    fn test_tiny_worst_case_inflates_but_stays_finite() {
        let scorer = Scorer::new(vec![count_criterion(1)], 2)
            .with_calibration(Calibration::from_worst_cases(vec![1e-300]))
            .unwrap();
        let total = scorer.score(&lopsided());
        assert!(total.is_finite());
        assert!(total > 1e299, "expected huge normalized score, got {total}");
    }

    #[test]
    fn test_non_finite_raw_contributes_zero() {
        let mut inds = lopsided();
        inds[0].rating = f64::NAN;
        let criteria = vec![
            Criterion::new("average rating", Statistic::RatingMeanSpread).with_weight(5),
            count_criterion(1),
        ];
        let scorer = Scorer::new(criteria, 2);

        let eval = scorer.evaluate(&inds);
        assert!(eval.raw[0].is_nan());
        assert_eq!(eval.total, 3.0);
    }

    #[test]
    fn test_perfect_solution_scores_zero() {
        let inds: Vec<Individual> = (0..12)
            .map(|i| {
                let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
                Individual::new(i, format!("p{i}"), 100.0, gender).with_group(i / 2)
            })
            .collect();
        let scorer = Scorer::new(default_criteria(), 6);
        assert_eq!(scorer.score(&inds), 0.0);
    }

    #[test]
    fn test_breakdown_running_total() {
        let mut inds = lopsided();
        inds[0].paired_with = Some(IndividualId(3));
        inds[3].group = 1;
        let criteria = vec![
            Criterion::new("pairs", Statistic::PairingViolation).with_weight(10),
            count_criterion(3),
        ];
        let scorer = Scorer::new(criteria, 2);

        let rows = scorer.breakdown(&inds);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].raw, 1.0);
        assert_eq!(rows[0].weighted, 10.0);
        assert_eq!(rows[1].raw, 1.0); // sizes [3, 1]
        assert_eq!(rows[1].running_total, 13.0);
        assert_eq!(rows[1].running_total, scorer.score(&inds));
    }

    #[test]
    fn test_score_solution_sets_score() {
        let scorer = Scorer::new(vec![count_criterion(1)], 2);
        let mut sol = Solution::new(lopsided());
        scorer.score_solution(&mut sol);
        assert_eq!(sol.score(), 3.0);
    }

    #[test]
    fn test_calibration_length_mismatch_is_rejected() {
        let err = Scorer::new(vec![count_criterion(1)], 2)
            .with_calibration(Calibration::from_worst_cases(vec![1.0, 2.0]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::CalibrationMismatch {
                expected: 1,
                actual: 2
            }
        );
    }
}
