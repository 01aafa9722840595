//! Individuals, genders and derived groups.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::InputError;

/// Gender of an individual.
///
/// [`Gender::Unset`] is the default for individuals whose gender was not
/// recorded; they match only unfiltered criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unset,
}

impl FromStr for Gender {
    type Err = InputError;

    /// Parses `m`/`male` or `f`/`female`, ignoring case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            _ => Err(InputError::InvalidGender(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gender::Male => "m",
            Gender::Female => "f",
            Gender::Unset => "-",
        };
        f.write_str(s)
    }
}

/// Identity of an individual, unique within a roster.
///
/// Lookups match ids by equality. Rosters read from input files number
/// individuals by roster position, which makes those lookups constant time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndividualId(pub usize);

/// A unit being assigned to a group.
///
/// Only `group` changes during search. `paired_with` is a soft constraint
/// looked up by id; it may point at someone in another group (a violation
/// the scorer penalizes) or at an id that does not exist at all (also a
/// violation).
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub id: IndividualId,
    pub name: Arc<str>,
    pub rating: f64,
    pub gender: Gender,
    /// Group index in `0..group_count`.
    pub group: usize,
    pub paired_with: Option<IndividualId>,
}

impl Individual {
    /// Creates an unpaired individual assigned to group 0.
    pub fn new(id: usize, name: impl Into<Arc<str>>, rating: f64, gender: Gender) -> Self {
        Self {
            id: IndividualId(id),
            name: name.into(),
            rating,
            gender,
            group: 0,
            paired_with: None,
        }
    }

    /// Sets the pairing constraint.
    pub fn with_pairing(mut self, partner: IndividualId) -> Self {
        self.paired_with = Some(partner);
        self
    }

    /// Sets the group assignment.
    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    pub fn is_paired(&self) -> bool {
        self.paired_with.is_some()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {:.1})", self.name, self.gender, self.rating)
    }
}

/// The individuals sharing one group index.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub index: usize,
    pub members: Vec<&'a Individual>,
}

impl<'a> Group<'a> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if the individual with `id` is a member.
    pub fn contains(&self, id: IndividualId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }
}

/// Partitions individuals into `group_count` groups by their assignment.
///
/// Always returns exactly `group_count` groups; empty groups are kept so
/// criteria can penalize them. Individuals whose assignment is out of range
/// are not placed in any group.
pub fn split_into_groups(individuals: &[Individual], group_count: usize) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = (0..group_count)
        .map(|index| Group {
            index,
            members: Vec::new(),
        })
        .collect();
    for individual in individuals {
        if let Some(group) = groups.get_mut(individual.group) {
            group.members.push(individual);
        }
    }
    groups
}
