//! Per-candidate cost evaluation.
//!
//! Each candidate center gets two independent costs:
//!
//! - **tag density**: mean number of tags per *occupied* channel (channels
//!   with no tag are left out of the mean, not counted as zero)
//! - **edge cost**: summed penalty for tags whose distance to their channel
//!   edge is inside the roll-off shoulder
//!
//! The edge penalty for one tag is `|shoulder / d - 1|`, where `d` is the
//! distance from the tag to the nearer edge of its nearest channel. It is zero
//! where the shoulder starts and grows without bound as `d -> 0`.

use log::trace;

use crate::plan::grid::{ChannelGrid, channel_containing};
use crate::plan::normalize::{NormalizedTags, round_mhz};

/// Costs for one candidate center frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateCost {
    pub center_mhz: f64,
    /// Mean tags per occupied channel (primary objective).
    pub tag_per_channel_mean: f64,
    /// Summed shoulder penalty (secondary objective). May be infinite.
    pub channel_edge_cost: f64,
}

/// Distance from each tag to the edge of its nearest channel (MHz), rounded
/// to 1 Hz. Negative only for tags outside the acquisition band.
pub fn edge_distances(tags: &NormalizedTags, grid: &ChannelGrid, center_mhz: f64) -> Vec<f64> {
    let centers = grid.centers(center_mhz);
    let nearest = grid.nearest(&centers);
    let half_bw = grid.channel_bw_mhz / 2.0;

    tags.sorted_mhz
        .iter()
        .map(|&f| round_mhz(half_bw - (nearest.center(f) - f).abs()))
        .collect()
}

/// Shoulder penalty summed over tags.
pub fn edge_cost(distances: &[f64], shoulder_mhz: f64) -> f64 {
    distances
        .iter()
        .filter(|&&d| d < shoulder_mhz)
        .map(|&d| (shoulder_mhz / d - 1.0).abs())
        .sum()
}

/// Count of tags in each channel (ascending channel order).
pub fn tags_per_channel(tags: &NormalizedTags, grid: &ChannelGrid, center_mhz: f64) -> Vec<usize> {
    let boundaries = grid.boundaries(center_mhz);
    let mut counts = vec![0; grid.len()];
    for &f in &tags.sorted_mhz {
        if let Some(channel) = channel_containing(&boundaries, f) {
            counts[channel] += 1;
        }
    }
    counts
}

/// Mean of the non-zero channel counts.
///
/// Infinite when no channel holds a tag, so such a candidate always ranks last.
pub fn occupied_mean(counts: &[usize]) -> f64 {
    let (occupied, total) = counts
        .iter()
        .filter(|&&c| c > 0)
        .fold((0usize, 0usize), |(n, sum), &c| (n + 1, sum + c));
    if occupied == 0 {
        return f64::INFINITY;
    }
    total as f64 / occupied as f64
}

/// Evaluate both costs for every candidate.
pub fn evaluate_candidates(
    tags: &NormalizedTags,
    grid: &ChannelGrid,
    candidates_mhz: &[f64],
) -> Vec<CandidateCost> {
    candidates_mhz
        .iter()
        .map(|&center_mhz| {
            let distances = edge_distances(tags, grid, center_mhz);
            let cost = CandidateCost {
                center_mhz,
                tag_per_channel_mean: occupied_mean(&tags_per_channel(tags, grid, center_mhz)),
                channel_edge_cost: edge_cost(&distances, tags.shoulder_mhz),
            };
            trace!(
                "candidate {center_mhz:.6} MHz: tags/channel={:.4} edge_cost={:.6}",
                cost.tag_per_channel_mean,
                cost.channel_edge_cost
            );
            cost
        })
        .collect()
}
