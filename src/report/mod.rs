//! Reporting utilities: channelizer arguments, channel occupancy, and
//! formatted terminal output.
//!
//! Formatting lives here so the planner stays free of presentation code and
//! output changes are covered by golden-string tests in one place.

use crate::domain::{ChannelPlan, Tag};

pub mod format;

pub use format::*;

/// Channelizer argument tokens, one per tag in input order.
///
/// Each token is the tag's 1-based channel number, negated for dual-pulse
/// tags.
pub fn channelizer_args(tags: &[Tag], plan: &ChannelPlan) -> Vec<i64> {
    tags.iter()
        .zip(&plan.tag_channel_num)
        .map(|(tag, &channel)| tag.channelizer_token(channel))
        .collect()
}

/// Number of tags in each channel, in channelizer order.
pub fn channel_occupancy(plan: &ChannelPlan) -> Vec<usize> {
    let mut counts = vec![0usize; plan.channel_fc_mhz.len()];
    for &channel in &plan.tag_channel_num {
        if let Some(c) = counts.get_mut(channel.wrapping_sub(1)) {
            *c += 1;
        }
    }
    counts
}

/// Lowest and highest channel edge, i.e. the span the channelizer covers.
pub fn band_extent(plan: &ChannelPlan) -> Option<(f64, f64)> {
    let lower = plan
        .channel_edges
        .iter()
        .map(|e| e.lower_mhz)
        .fold(f64::INFINITY, f64::min);
    let upper = plan
        .channel_edges
        .iter()
        .map(|e| e.upper_mhz)
        .fold(f64::NEG_INFINITY, f64::max);
    (lower.is_finite() && upper.is_finite() && upper > lower).then_some((lower, upper))
}
