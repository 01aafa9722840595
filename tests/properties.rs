//! Property tests for the model, scoring and operators.

use proptest::prelude::*;

use roster_ga::ga::operators::{crossover, mutate};
use roster_ga::model::{split_into_groups, Gender, Individual, Solution};
use roster_ga::random::create_rng;
use roster_ga::scoring::{default_criteria, Scorer, Statistic};

fn roster(n: usize) -> Vec<Individual> {
    (0..n)
        .map(|i| {
            let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
            Individual::new(i, format!("p{i}"), (i * 13 % 50) as f64, gender)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_random_solutions_partition_roster(n in 0usize..60, groups in 1usize..10, seed: u64) {
        let mut rng = create_rng(seed);
        let sol = Solution::random(&roster(n), groups, &mut rng);

        prop_assert!(sol.assignment().iter().all(|&g| g < groups));
        let total: usize = sol.groups(groups).iter().map(|g| g.len()).sum();
        prop_assert_eq!(total, n);
    }

    #[test]
    fn prop_mutation_keeps_assignments_in_range(
        n in 1usize..40,
        groups in 1usize..8,
        rate in 0.0f64..0.95,
        seed: u64,
    ) {
        let mut rng = create_rng(seed);
        let mut sol = Solution::random(&roster(n), groups, &mut rng);
        mutate(&mut sol, groups, rate, 0.5, &mut rng);
        prop_assert!(sol.assignment().iter().all(|&g| g < groups));
    }

    #[test]
    fn prop_count_imbalance_formula(sizes in prop::collection::vec(0usize..12, 1..8)) {
        let mut individuals = Vec::new();
        for (group, &size) in sizes.iter().enumerate() {
            for _ in 0..size {
                let id = individuals.len();
                individuals.push(Individual::new(id, format!("p{id}"), 1.0, Gender::Male).with_group(group));
            }
        }
        let groups = split_into_groups(&individuals, sizes.len());
        let max = *sizes.iter().max().unwrap();
        let min = *sizes.iter().min().unwrap();
        let expected = if max - min <= 1 { 0.0 } else { (max - min - 1) as f64 };

        prop_assert_eq!(Statistic::CountImbalance.compute(&groups), expected);
    }

    #[test]
    fn prop_crossover_with_self_is_identity(n in 0usize..40, groups in 1usize..6, seed: u64) {
        let mut rng = create_rng(seed);
        let parent = Solution::random(&roster(n), groups, &mut rng);
        let child = crossover(&parent, &parent, &mut rng);
        prop_assert_eq!(child.assignment(), parent.assignment());
    }

    #[test]
    fn prop_calibration_is_idempotent(n in 2usize..30, groups in 1usize..6, seed: u64) {
        let mut rng = create_rng(seed);
        let r = roster(n);
        let population: Vec<Solution> = (0..15).map(|_| Solution::random(&r, groups, &mut rng)).collect();

        let mut scorer = Scorer::new(default_criteria(), groups);
        scorer.calibrate(&population);
        let once = scorer.calibration().clone();
        scorer.calibrate(&population);
        prop_assert_eq!(scorer.calibration(), &once);
    }
}
