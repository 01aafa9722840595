//! Error types.
//!
//! Configuration problems are reported before any search work starts.
//! Input problems come from the CSV collaborator. Degenerate search
//! conditions are recovered inside the engine and never surface here.

/// Invalid [`GaConfig`](crate::ga::GaConfig) parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("group_count must be at least 1")]
    ZeroGroups,

    #[error("population_size must be at least 1")]
    ZeroPopulation,

    #[error("elite_count must be at least 1")]
    ZeroElites,

    #[error("elite_count ({elite_count}) exceeds population_size ({population_size})")]
    EliteExceedsPopulation {
        elite_count: usize,
        population_size: usize,
    },

    #[error("tournament_size must be at least 1")]
    ZeroTournament,

    #[error("{name} must be in {range}, got {value}")]
    InvalidProbability {
        name: &'static str,
        range: &'static str,
        value: f64,
    },

    #[error("selection_pressure must be in (0, 1], got {0}")]
    InvalidSelectionPressure(f64),

    #[error("workers must be at least 1")]
    ZeroWorkers,

    #[error("stagnation_limit must be at least 1")]
    ZeroPatience,

    #[error("calibration has {actual} entries, expected one per criterion ({expected})")]
    CalibrationMismatch { expected: usize, actual: usize },
}

/// Failures while reading roster input files.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid gender '{0}'")]
    InvalidGender(String),

    #[error("rating for '{name}' is not a finite number: {rating}")]
    InvalidRating { name: String, rating: f64 },

    #[error("individual '{0}' is listed more than once")]
    DuplicateName(String),

    #[error("pairing references unknown individual '{0}'")]
    UnknownIndividual(String),

    #[error("'{name}' is already paired with '{existing}', cannot also pair with '{requested}'")]
    AlreadyPaired {
        name: String,
        existing: String,
        requested: String,
    },

    #[error("roster is empty")]
    EmptyRoster,
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
