//! CSV roster input.
//!
//! Players file, with a header row:
//!
//! ```text
//! name,rating,gender
//! Alice Smith,87.5,f
//! Bob Jones,72,m
//! ```
//!
//! Pairings file, with a header row. Each row asks for `name` to share a
//! group with `partner`:
//!
//! ```text
//! name,partner
//! Alice Smith,Bob Jones
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::InputError;
use crate::model::{Gender, Individual, IndividualId};

#[derive(Debug, Deserialize)]
struct PlayerRow {
    name: String,
    rating: f64,
    gender: String,
}

#[derive(Debug, Deserialize)]
struct PairingRow {
    name: String,
    partner: String,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Reads individuals from a players CSV. Ids follow row order.
pub fn read_individuals<R: Read>(reader: R) -> Result<Vec<Individual>, InputError> {
    let mut individuals = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for row in csv_reader(reader).deserialize() {
        let row: PlayerRow = row?;
        if !row.rating.is_finite() {
            return Err(InputError::InvalidRating {
                name: row.name,
                rating: row.rating,
            });
        }
        let gender: Gender = row.gender.parse()?;
        if seen.insert(row.name.clone(), individuals.len()).is_some() {
            return Err(InputError::DuplicateName(row.name));
        }
        individuals.push(Individual::new(individuals.len(), row.name, row.rating, gender));
    }

    if individuals.is_empty() {
        return Err(InputError::EmptyRoster);
    }
    log::info!("read {} individuals", individuals.len());
    Ok(individuals)
}

pub fn read_individuals_from_path(path: impl AsRef<Path>) -> Result<Vec<Individual>, InputError> {
    read_individuals(File::open(path)?)
}

/// Applies a pairings CSV to `individuals`. Returns the number of rows.
///
/// Pairings are one-directional as written. Repeating an identical row is
/// accepted; pairing someone with two different partners is an error.
pub fn apply_pairings<R: Read>(reader: R, individuals: &mut [Individual]) -> Result<usize, InputError> {
    let index: HashMap<String, usize> = individuals
        .iter()
        .enumerate()
        .map(|(i, ind)| (ind.name.to_string(), i))
        .collect();
    let lookup = |name: &str| {
        index
            .get(name)
            .copied()
            .ok_or_else(|| InputError::UnknownIndividual(name.to_string()))
    };

    let mut count = 0;
    for row in csv_reader(reader).deserialize() {
        let row: PairingRow = row?;
        let who = lookup(&row.name)?;
        let partner = lookup(&row.partner)?;

        let current = individuals[who].paired_with;
        match current {
            Some(existing) if existing.0 != partner => {
                return Err(InputError::AlreadyPaired {
                    name: row.name,
                    existing: individuals[existing.0].name.to_string(),
                    requested: row.partner,
                });
            }
            _ => individuals[who].paired_with = Some(IndividualId(partner)),
        }
        log::info!("paired {} with {}", row.name, row.partner);
        count += 1;
    }
    Ok(count)
}

pub fn apply_pairings_from_path(
    path: impl AsRef<Path>,
    individuals: &mut [Individual],
) -> Result<usize, InputError> {
    apply_pairings(File::open(path)?, individuals)
}
