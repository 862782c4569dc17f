//! Shared domain types.
//!
//! These types are kept serializable so a plan can be:
//!
//! - computed in-memory by the planner
//! - exported to JSON/CSV
//! - reloaded later for reporting without recomputing

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fraction of a channel's bandwidth treated as flat passband.
///
/// The remaining 15% is split evenly between the two channel edges and forms
/// the filter roll-off "shoulder".
pub const BW_FLAT_FRAC: f64 = 0.85;

/// Spacing of the candidate radio center frequency grid (100 Hz).
pub const CANDIDATE_STEP_MHZ: f64 = 0.0001;

/// Number of decimal places (in MHz) kept on tag frequencies, candidate
/// centers and edge distances. Six places is 1 Hz.
pub const FREQ_DECIMALS: i32 = 6;

/// A known transmitter whose frequency must land inside a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u32,
    pub frequency_mhz: f64,
    /// Tag emits a second pulse train that the channelizer must also watch.
    #[serde(default)]
    pub dual_pulse: bool,
}

impl Tag {
    /// Build tags from bare frequencies, numbering them 1..=n in input order.
    pub fn from_frequencies(frequencies_mhz: &[f64]) -> Vec<Tag> {
        frequencies_mhz
            .iter()
            .enumerate()
            .map(|(i, &frequency_mhz)| Tag {
                id: i as u32 + 1,
                frequency_mhz,
                dual_pulse: false,
            })
            .collect()
    }

    /// Channelizer argument for this tag: the 1-based channel number, negated
    /// for dual-pulse tags.
    pub fn channelizer_token(&self, channel_num: usize) -> i64 {
        let channel = channel_num as i64;
        if self.dual_pulse { -channel } else { channel }
    }
}

/// Lower and upper edge of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelEdges {
    pub lower_mhz: f64,
    pub upper_mhz: f64,
}

/// How the selected plan scored, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDiagnostics {
    /// Number of candidate center frequencies that were evaluated.
    pub n_candidates: usize,
    /// Number of candidates tied with the selected one on both costs.
    pub n_acceptable: usize,
    /// Mean tags per occupied channel for the selected center.
    pub tag_per_channel_mean: f64,
    /// Summed edge cost for the selected center. `None` when infinite, i.e.
    /// some tag sits exactly on a channel edge under every candidate.
    pub channel_edge_cost: Option<f64>,
    /// Arithmetic mean of the (rounded) tag frequencies.
    pub tag_centroid_mhz: f64,
    /// The candidate grid was empty and the feasible-window midpoint was used.
    pub used_fallback_candidate: bool,
}

/// The selected radio tuning and the channel each tag lands in.
///
/// Per-tag vectors are in the caller's original tag order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPlan {
    pub radio_fc_mhz: f64,
    pub channel_bw_hz: f64,
    /// Channel center frequencies in channelizer (hardware) order.
    pub channel_fc_mhz: Vec<f64>,
    /// Channel edges, aligned with `channel_fc_mhz`.
    pub channel_edges: Vec<ChannelEdges>,
    /// 1-based channel index for each tag.
    pub tag_channel_num: Vec<usize>,
    /// Tag sits in the roll-off shoulder of its channel.
    pub tag_channel_edge_warning: Vec<bool>,
    /// Tag frequency minus its channel center, in Hz.
    pub tag_offset_hz: Vec<f64>,
    pub multiple_tags_in_channel_warning: bool,
    pub diagnostics: PlanDiagnostics,
}

impl ChannelPlan {
    /// The classic five outputs: radio center, channel centers, tag channel
    /// numbers, tag edge warnings and the multiple-tags-per-channel warning.
    pub fn outputs(&self) -> (f64, Vec<f64>, Vec<usize>, Vec<bool>, bool) {
        (
            self.radio_fc_mhz,
            self.channel_fc_mhz.clone(),
            self.tag_channel_num.clone(),
            self.tag_channel_edge_warning.clone(),
            self.multiple_tags_in_channel_warning,
        )
    }
}

/// Where the tag list comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TagSource {
    /// Frequencies given directly on the command line (MHz).
    Inline(Vec<f64>),
    /// A tags CSV (`id,frequency_mhz[,dual_pulse]`).
    File(PathBuf),
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment defaults).
#[derive(Debug, Clone)]
pub struct PlanConfig {
    pub sample_rate_hz: f64,
    pub n_channels: usize,
    pub tags: TagSource,

    pub plot: bool,
    pub plot_width: usize,

    pub export_plan: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

/// A saved plan file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub sample_rate_hz: f64,
    pub n_channels: usize,
    pub tags: Vec<Tag>,
    pub plan: ChannelPlan,
}
