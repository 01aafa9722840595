//! Candidate solutions.

use rand::Rng;

use super::individual::{split_into_groups, Group, Individual, IndividualId};

/// A candidate assignment of every individual to a group.
///
/// Each solution owns its individual list, so breeding and mutation never
/// alias another solution's state. The cached score is invalidated (set to
/// `f64::INFINITY`) whenever mutable access to the individuals is taken,
/// so an unscored solution always loses a comparison instead of carrying a
/// stale value.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    individuals: Vec<Individual>,
    score: f64,
}

impl Solution {
    /// Wraps an individual list as an unscored solution.
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self {
            individuals,
            score: f64::INFINITY,
        }
    }

    /// Copies `roster` and assigns every individual to a uniformly random
    /// group in `0..group_count`.
    pub fn random<R: Rng>(roster: &[Individual], group_count: usize, rng: &mut R) -> Self {
        let individuals = roster
            .iter()
            .map(|ind| Individual {
                group: rng.random_range(0..group_count),
                ..ind.clone()
            })
            .collect();
        Self::new(individuals)
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mutable access to the individuals. Invalidates the cached score.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        self.score = f64::INFINITY;
        &mut self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Cached total score; `f64::INFINITY` when unscored. Lower is better.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_finite()
    }

    /// Group index of every individual, in roster order.
    pub fn assignment(&self) -> Vec<usize> {
        self.individuals.iter().map(|ind| ind.group).collect()
    }

    /// Position of the individual with `id` in the individual list.
    pub fn position(&self, id: IndividualId) -> Option<usize> {
        position_of(&self.individuals, id)
    }

    pub fn get(&self, id: IndividualId) -> Option<&Individual> {
        self.position(id).map(|i| &self.individuals[i])
    }

    pub fn groups(&self, group_count: usize) -> Vec<Group<'_>> {
        split_into_groups(&self.individuals, group_count)
    }
}

/// Finds `id` in `individuals`, trying its roster position first.
pub(crate) fn position_of(individuals: &[Individual], id: IndividualId) -> Option<usize> {
    match individuals.get(id.0) {
        Some(ind) if ind.id == id => Some(id.0),
        _ => individuals.iter().position(|ind| ind.id == id),
    }
}
