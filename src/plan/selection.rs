//! Lexicographic candidate selection.
//!
//! Selection rules:
//! 1. Minimize mean tags per occupied channel
//! 2. Among those, minimize the summed edge cost
//! 3. Among candidates tied on both, take the one closest to the tag centroid
//!    (the lowest such center if two are equally close)
//!
//! Rules 1 and 2 are a scan over the *sorted distinct values* of each cost,
//! which yields every candidate that hits the minimal pair rather than just
//! one of them.

use std::cmp::Ordering;

use crate::plan::cost::CandidateCost;

/// The chosen candidate and the cost level it was chosen at.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Index into the evaluated candidate list.
    pub index: usize,
    pub center_mhz: f64,
    pub tag_per_channel_mean: f64,
    pub channel_edge_cost: f64,
    /// Indices of all candidates tied on both costs (ascending).
    pub acceptable: Vec<usize>,
}

/// Sorted distinct values, ascending.
pub fn sorted_unique(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.into_iter().collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

/// Every candidate at the lexicographically smallest (density, edge cost)
/// pair, together with that pair.
pub fn acceptable_candidates(costs: &[CandidateCost]) -> Option<(f64, f64, Vec<usize>)> {
    let density_levels = sorted_unique(costs.iter().map(|c| c.tag_per_channel_mean));
    let edge_levels = sorted_unique(costs.iter().map(|c| c.channel_edge_cost));

    // Cost values come out of identical arithmetic per candidate, so exact
    // equality is the right test here.
    for &density in &density_levels {
        for &edge in &edge_levels {
            let acceptable: Vec<usize> = costs
                .iter()
                .enumerate()
                .filter(|(_, c)| c.tag_per_channel_mean == density && c.channel_edge_cost == edge)
                .map(|(i, _)| i)
                .collect();
            if !acceptable.is_empty() {
                return Some((density, edge, acceptable));
            }
        }
    }
    None
}

/// Pick the best candidate; `None` only for an empty cost table.
pub fn select_candidate(costs: &[CandidateCost], centroid_mhz: f64) -> Option<Selection> {
    let (density, edge, acceptable) = acceptable_candidates(costs)?;

    let index = acceptable
        .iter()
        .copied()
        .min_by(|&a, &b| {
            let da = (costs[a].center_mhz - centroid_mhz).abs();
            let db = (costs[b].center_mhz - centroid_mhz).abs();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        })?;

    Some(Selection {
        index,
        center_mhz: costs[index].center_mhz,
        tag_per_channel_mean: density,
        channel_edge_cost: edge,
        acceptable,
    })
}
