//! roster-ga CLI - split a roster into balanced groups.

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use roster_ga::ga::{GaConfig, GaRunner};
use roster_ga::input::{apply_pairings_from_path, read_individuals_from_path};
use roster_ga::report::{breakdown_table, group_listing, unresolved_pairings};
use roster_ga::scoring::default_criteria;

/// Split a roster into balanced groups with a genetic algorithm.
#[derive(Parser, Debug)]
#[command(name = "roster-ga")]
#[command(about = "Balance groups by size, gender, rating and pairing constraints")]
struct Cli {
    /// Players CSV (columns: name, rating, gender).
    #[arg(long)]
    players: PathBuf,

    /// Pairings CSV (columns: name, partner).
    #[arg(long)]
    pairings: Option<PathBuf>,

    /// Number of groups.
    #[arg(long, default_value_t = 6)]
    groups: usize,

    /// Children bred per generation (and initial population size).
    #[arg(long, default_value_t = 200)]
    population: usize,

    /// Parents kept between generations.
    #[arg(long, default_value_t = 20)]
    elites: usize,

    /// Entrants per tournament.
    #[arg(long, default_value_t = 5)]
    tournament_size: usize,

    /// Probability of each step of the mutation chain.
    #[arg(long, default_value_t = 0.15)]
    mutation_rate: f64,

    /// Probability that a mutated individual's partner follows it.
    #[arg(long, default_value_t = 0.5)]
    baggage_rate: f64,

    /// Worker threads (defaults to available parallelism).
    #[arg(long)]
    workers: Option<usize>,

    /// Single worker and fixed seed, for reproducible output.
    #[arg(long, default_value_t = false)]
    deterministic: bool,

    /// Random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Generations without improvement before stopping.
    #[arg(long, default_value_t = 500)]
    patience: usize,
}

impl Cli {
    fn config(&self) -> GaConfig {
        let workers = self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        });
        let mut config = GaConfig::default()
            .with_group_count(self.groups)
            .with_population_size(self.population)
            .with_elite_count(self.elites)
            .with_tournament_size(self.tournament_size)
            .with_mutation_rate(self.mutation_rate)
            .with_baggage_rate(self.baggage_rate)
            .with_workers(workers)
            .with_deterministic(self.deterministic)
            .with_stagnation_limit(self.patience);
        config.seed = self.seed;
        config
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> roster_ga::Result<()> {
    let config = cli.config();
    config.validate()?;

    let mut roster = read_individuals_from_path(&cli.players)?;
    if let Some(path) = &cli.pairings {
        apply_pairings_from_path(path, &mut roster)?;
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        log::warn!("interrupt received, finishing current generation");
        flag.store(true, Ordering::Relaxed);
    }) {
        log::warn!("could not install interrupt handler: {e}");
    }

    let result = GaRunner::run_with_cancel(&roster, default_criteria(), &config, Some(cancel))?;

    println!("{}", group_listing(&result.best, config.group_count));
    println!(
        "{}",
        breakdown_table(&result.scorer.breakdown(result.best.individuals()))
    );
    println!(
        "best score {:.4} after {} generations (seed {})",
        result.best_score, result.generations, result.seed
    );

    for issue in unresolved_pairings(&result.best) {
        match (issue.partner, issue.partner_group) {
            (Some(partner), Some(group)) => log::warn!(
                "{} (group {}) is not with partner {} (group {})",
                issue.name,
                issue.group + 1,
                partner,
                group + 1
            ),
            _ => log::warn!("{} has a pairing that matches nobody", issue.name),
        }
    }
    Ok(())
}
