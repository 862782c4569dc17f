//! Channel planning.
//!
//! Stages, in order:
//!
//! - normalize the tag list (rounding, sorting, span check)
//! - build the nominal channel grid
//! - generate covering candidate radio centers
//! - evaluate tag density and edge cost per candidate
//! - select lexicographically, tie-break on the tag centroid
//! - assign every tag to a channel in channelizer order

pub mod assign;
pub mod candidates;
pub mod cost;
pub mod grid;
pub mod normalize;
pub mod selection;


pub use assign::*;
pub use candidates::*;
pub use cost::*;
pub use grid::*;
pub use normalize::*;
pub use selection::*;

use log::debug;

use crate::domain::{ChannelPlan, PlanDiagnostics};
use crate::error::PlanError;

/// Select the radio center frequency and channel plan for a set of tags.
///
/// # Arguments
/// - `sample_rate_hz`: radio sample rate, which is also the acquisition bandwidth
/// - `n_channels`: number of equal-width channels the channelizer produces
/// - `tag_freqs_mhz`: tag transmit frequencies (any order, duplicates allowed)
///
/// Per-tag outputs come back in the order of `tag_freqs_mhz`.
pub fn tuner(
    sample_rate_hz: f64,
    n_channels: usize,
    tag_freqs_mhz: &[f64],
) -> Result<ChannelPlan, PlanError> {
    let tags = normalize(sample_rate_hz, n_channels, tag_freqs_mhz)?;
    let grid = ChannelGrid::new(sample_rate_hz, n_channels);
    debug!(
        "{} tags in [{:.6}, {:.6}] MHz, {n_channels} channels of {:.1} Hz",
        tags.len(),
        tags.f_min_mhz,
        tags.f_max_mhz,
        tags.channel_bw_hz
    );

    let candidates = candidate_centers(&tags, &grid);
    let costs = evaluate_candidates(&tags, &grid, &candidates.centers_mhz);

    let centroid_mhz = tags.centroid_mhz();
    let selection =
        select_candidate(&costs, centroid_mhz).ok_or(PlanError::NoCoveringCandidate)?;
    debug!(
        "selected {:.6} MHz: tags/channel={:.4} edge_cost={:.6} ({} tied candidates)",
        selection.center_mhz,
        selection.tag_per_channel_mean,
        selection.channel_edge_cost,
        selection.acceptable.len()
    );

    let assignment = assign_channels(&tags, &grid, selection.center_mhz);

    Ok(ChannelPlan {
        radio_fc_mhz: selection.center_mhz,
        channel_bw_hz: tags.channel_bw_hz,
        channel_fc_mhz: assignment.channel_fc_mhz,
        channel_edges: assignment.channel_edges,
        tag_channel_num: assignment.tag_channel_num,
        tag_channel_edge_warning: assignment.tag_channel_edge_warning,
        tag_offset_hz: assignment.tag_offset_hz,
        multiple_tags_in_channel_warning: assignment.multiple_tags_in_channel_warning,
        diagnostics: PlanDiagnostics {
            n_candidates: costs.len(),
            n_acceptable: selection.acceptable.len(),
            tag_per_channel_mean: selection.tag_per_channel_mean,
            channel_edge_cost: Some(selection.channel_edge_cost).filter(|c| c.is_finite()),
            tag_centroid_mhz: centroid_mhz,
            used_fallback_candidate: candidates.used_fallback,
        },
    })
}
