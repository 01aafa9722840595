//! Entity model.
//!
//! - [`Individual`]: a unit being assigned to a group, with a rating, a
//!   gender and an optional pairing constraint
//! - [`Group`]: a view over the individuals sharing one group index,
//!   always derived from the individual list
//! - [`Solution`]: an owned copy of the whole individual list plus its
//!   cached score

mod individual;
mod solution;

pub use individual::{split_into_groups, Gender, Group, Individual, IndividualId};
pub use solution::Solution;
pub(crate) use solution::position_of;
