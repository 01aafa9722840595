//! Genetic operators for group assignments.
//!
//! Every solution lists individuals in roster order, so a chromosome is the
//! sequence of group indices and operators work position by position.
//!
//! # Crossover
//!
//! - [`crossover`]: one- or two-point recombination — contiguous segments
//!   alternate between the parents, which keeps runs of co-assigned
//!   neighbours together
//!
//! # Mutation
//!
//! - [`mutate`]: geometric chain of single-individual reassignments, with
//!   optional carry of the moved individual's pairing partner
//!
//! # References
//!
//! - Spears & De Jong (1991), "An Analysis of Multi-Point Crossover"

use rand::Rng;

use crate::model::{position_of, Individual, Solution};

/// Recombines two parents into one unscored child.
///
/// One or two cut points are chosen (with equal probability) in
/// `1..len`; positions before the first cut come from `parent1`, the next
/// segment from `parent2`, and so on alternately. Parents with fewer than
/// three individuals (or mismatched lengths) cannot be split and yield a
/// copy of `parent1`. Neither parent is modified.
pub fn crossover<R: Rng>(parent1: &Solution, parent2: &Solution, rng: &mut R) -> Solution {
    let n = parent1.len();
    if n < 3 || parent2.len() != n {
        log::trace!("crossover on {n} individuals degenerates to a copy");
        return Solution::new(parent1.individuals().to_vec());
    }

    let cuts = split_points(n, rng);
    let individuals = parent1
        .individuals()
        .iter()
        .zip(parent2.individuals())
        .enumerate()
        .map(|(i, (a, b))| {
            let segment = cuts.iter().filter(|&&c| c <= i).count();
            let group = if segment % 2 == 0 { a.group } else { b.group };
            Individual { group, ..a.clone() }
        })
        .collect();
    Solution::new(individuals)
}

/// Reassigns random individuals to random groups.
///
/// Each step of the chain happens with probability `mutation_rate`, so the
/// number of moves is geometrically distributed. After each move the
/// moved individual's pairing partner follows it with probability
/// `baggage_rate`, re-rolled per step. Returns the number of moves.
///
/// # Panics
/// Panics if `mutation_rate` is not in `[0, 1)` or `baggage_rate` is not in
/// `[0, 1]`.
pub fn mutate<R: Rng>(
    solution: &mut Solution,
    group_count: usize,
    mutation_rate: f64,
    baggage_rate: f64,
    rng: &mut R,
) -> usize {
    assert!(
        (0.0..1.0).contains(&mutation_rate),
        "mutation_rate must be in [0, 1)"
    );
    assert!(
        (0.0..=1.0).contains(&baggage_rate),
        "baggage_rate must be in [0, 1]"
    );
    if solution.is_empty() || group_count == 0 {
        return 0;
    }

    let individuals = solution.individuals_mut();
    let mut moves = 0;
    while rng.random_bool(mutation_rate) {
        let idx = rng.random_range(0..individuals.len());
        let group = rng.random_range(0..group_count);
        individuals[idx].group = group;

        if rng.random_bool(baggage_rate) {
            if let Some(partner) = individuals[idx].paired_with {
                if let Some(p) = position_of(individuals, partner) {
                    individuals[p].group = group;
                }
            }
        }
        moves += 1;
    }
    moves
}

/// One or two distinct ascending cut points in `1..n`. Requires `n >= 3`.
fn split_points<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let first = rng.random_range(1..n);
    if !rng.random_bool(0.5) {
        return vec![first];
    }
    let mut second = rng.random_range(1..n - 1);
    if second >= first {
        second += 1;
    }
    vec![first.min(second), first.max(second)]
}
