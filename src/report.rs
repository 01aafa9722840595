//! Text rendering of a finished assignment.

use std::fmt::Write;

use crate::model::{Group, Solution};
use crate::scoring::stats::mean;
use crate::scoring::CriterionBreakdown;

/// An individual whose pairing partner ended up in a different group.
#[derive(Debug, Clone, PartialEq)]
pub struct PairingIssue {
    pub name: String,
    pub group: usize,
    /// `None` when the pairing id matches nobody in the roster.
    pub partner: Option<String>,
    pub partner_group: Option<usize>,
}

/// Lists every pairing constraint the solution leaves unsatisfied.
pub fn unresolved_pairings(solution: &Solution) -> Vec<PairingIssue> {
    solution
        .individuals()
        .iter()
        .filter_map(|ind| {
            let partner_id = ind.paired_with?;
            let partner = solution.get(partner_id);
            if partner.is_some_and(|p| p.group == ind.group) {
                return None;
            }
            Some(PairingIssue {
                name: ind.name.to_string(),
                group: ind.group,
                partner: partner.map(|p| p.name.to_string()),
                partner_group: partner.map(|p| p.group),
            })
        })
        .collect()
}

/// Fixed-width table of a per-criterion score breakdown.
pub fn breakdown_table(rows: &[CriterionBreakdown]) -> String {
    let width = rows
        .iter()
        .map(|r| r.name.len())
        .chain(std::iter::once("criterion".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<width$}  {:>10}  {:>10}  {:>6}  {:>10}  {:>10}",
        "criterion", "raw", "normalized", "weight", "weighted", "total"
    );
    for r in rows {
        let _ = writeln!(
            out,
            "{:<width$}  {:>10.4}  {:>10.4}  {:>6}  {:>10.4}  {:>10.4}",
            r.name, r.raw, r.normalized, r.weight, r.weighted, r.running_total
        );
    }
    out
}

/// Members of every group, highest rating first, with group summaries.
pub fn group_listing(solution: &Solution, group_count: usize) -> String {
    let mut out = String::new();
    for Group { index, mut members } in solution.groups(group_count) {
        members.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        let ratings: Vec<f64> = members.iter().map(|m| m.rating).collect();
        let _ = writeln!(
            out,
            "Group {} ({} members, mean rating {:.2})",
            index + 1,
            members.len(),
            mean(&ratings)
        );
        for m in members {
            let _ = writeln!(out, "  {:<24} {}  {:>7.2}", m.name, m.gender, m.rating);
        }
    }
    out
}
