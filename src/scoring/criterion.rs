//! Criterion descriptors and raw imbalance statistics.

use super::stats::{mean, sample_std_dev};
use crate::model::{Gender, Group, Individual};

/// Raw imbalance statistic computed over a list of (filtered) groups.
///
/// Every statistic measures an amount of imbalance, so 0.0 is ideal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    /// Largest group size minus smallest, minus one.
    ///
    /// A difference of one is unavoidable when the individuals do not
    /// divide evenly, so differences of 0 or 1 score zero.
    CountImbalance,

    /// Sample standard deviation of the per-group mean rating.
    ///
    /// A group with no members contributes a mean of zero.
    RatingMeanSpread,

    /// Sample standard deviation of each group's own rating standard
    /// deviation. Groups with fewer than two members contribute zero.
    RatingInternalSpread,

    /// Number of individuals whose pairing partner is not in their group.
    ///
    /// A partner id that matches nobody counts as a violation.
    PairingViolation,
}

impl Statistic {
    /// Computes the raw score for `groups`.
    pub fn compute(&self, groups: &[Group<'_>]) -> f64 {
        match self {
            Statistic::CountImbalance => count_imbalance(groups),
            Statistic::RatingMeanSpread => rating_mean_spread(groups),
            Statistic::RatingInternalSpread => rating_internal_spread(groups),
            Statistic::PairingViolation => pairing_violations(groups),
        }
    }
}

/// Which members of each group a criterion looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Gender(Gender),
}

impl Filter {
    pub fn matches(&self, individual: &Individual) -> bool {
        match self {
            Filter::All => true,
            Filter::Gender(g) => individual.gender == *g,
        }
    }
}

/// One weighted measure of imbalance.
///
/// # Examples
///
/// ```
/// use roster_ga::model::Gender;
/// use roster_ga::scoring::{Criterion, Filter, Statistic};
///
/// let top_males = Criterion::new("average rating top males", Statistic::RatingMeanSpread)
///     .with_filter(Filter::Gender(Gender::Male))
///     .with_top_n(3)
///     .with_weight(19);
/// assert_eq!(top_males.top_n, Some(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    /// Human-readable name, used in reports.
    pub name: String,
    pub statistic: Statistic,
    pub filter: Filter,
    /// When set, only the `n` highest-rated filtered members of each group
    /// are considered. The filter is applied before the cap.
    pub top_n: Option<usize>,
    pub weight: u32,
}

impl Criterion {
    /// Creates an unfiltered, uncapped criterion with weight 1.
    pub fn new(name: impl Into<String>, statistic: Statistic) -> Self {
        Self {
            name: name.into(),
            statistic,
            filter: Filter::All,
            top_n: None,
            weight: 1,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Applies the filter, then the top-N cap, to every group.
    pub fn filter_groups<'a>(&self, groups: &[Group<'a>]) -> Vec<Group<'a>> {
        groups
            .iter()
            .map(|group| {
                let mut members: Vec<&'a Individual> = group
                    .members
                    .iter()
                    .copied()
                    .filter(|m| self.filter.matches(m))
                    .collect();
                if let Some(n) = self.top_n {
                    members.sort_by(|a, b| b.rating.total_cmp(&a.rating));
                    members.truncate(n);
                }
                Group {
                    index: group.index,
                    members,
                }
            })
            .collect()
    }

    /// Raw (unnormalized, unweighted) score for already-split groups.
    pub fn raw_score(&self, groups: &[Group<'_>]) -> f64 {
        self.statistic.compute(&self.filter_groups(groups))
    }
}

/// The standard balancing criteria for mixed-gender rosters.
pub fn default_criteria() -> Vec<Criterion> {
    use Statistic::*;
    let male = Filter::Gender(Gender::Male);
    let female = Filter::Gender(Gender::Female);

    vec![
        Criterion::new("matching pairings", PairingViolation).with_weight(10),
        Criterion::new("number of players", CountImbalance).with_weight(15),
        Criterion::new("number of males", CountImbalance)
            .with_filter(male)
            .with_weight(12),
        Criterion::new("number of females", CountImbalance)
            .with_filter(female)
            .with_weight(12),
        Criterion::new("average rating players", RatingMeanSpread).with_weight(8),
        Criterion::new("average rating males", RatingMeanSpread)
            .with_filter(male)
            .with_weight(7),
        Criterion::new("average rating females", RatingMeanSpread)
            .with_filter(female)
            .with_weight(7),
        Criterion::new("average rating top players", RatingMeanSpread)
            .with_top_n(3)
            .with_weight(20),
        Criterion::new("average rating top males", RatingMeanSpread)
            .with_filter(male)
            .with_top_n(3)
            .with_weight(19),
        Criterion::new("average rating top females", RatingMeanSpread)
            .with_filter(female)
            .with_top_n(3)
            .with_weight(19),
        Criterion::new("std dev of group ratings", RatingInternalSpread).with_weight(5),
        Criterion::new("std dev of group male ratings", RatingInternalSpread)
            .with_filter(male)
            .with_weight(4),
        Criterion::new("std dev of group female ratings", RatingInternalSpread)
            .with_filter(female)
            .with_weight(4),
    ]
}

// ============================================================================
// Statistics
// ============================================================================

fn count_imbalance(groups: &[Group<'_>]) -> f64 {
    let sizes = groups.iter().map(Group::len);
    let (Some(max), Some(min)) = (sizes.clone().max(), sizes.min()) else {
        return 0.0;
    };
    let diff = max - min;
    if diff <= 1 {
        0.0
    } else {
        (diff - 1) as f64
    }
}

fn group_ratings(group: &Group<'_>) -> Vec<f64> {
    group.members.iter().map(|m| m.rating).collect()
}

fn rating_mean_spread(groups: &[Group<'_>]) -> f64 {
    let means: Vec<f64> = groups.iter().map(|g| mean(&group_ratings(g))).collect();
    sample_std_dev(&means)
}

fn rating_internal_spread(groups: &[Group<'_>]) -> f64 {
    let spreads: Vec<f64> = groups
        .iter()
        .map(|g| sample_std_dev(&group_ratings(g)))
        .collect();
    sample_std_dev(&spreads)
}

fn pairing_violations(groups: &[Group<'_>]) -> f64 {
    groups
        .iter()
        .map(|group| {
            group
                .members
                .iter()
                .filter_map(|m| m.paired_with)
                .filter(|&partner| !group.contains(partner))
                .count()
        })
        .sum::<usize>() as f64
}
