//! Final channel assignment for the selected radio center.

use std::collections::BTreeSet;

use crate::domain::ChannelEdges;
use crate::plan::grid::ChannelGrid;
use crate::plan::normalize::NormalizedTags;

/// Channel layout and per-tag placement for one radio center.
///
/// Channel vectors are in channelizer order; tag vectors are in the caller's
/// original tag order.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub channel_fc_mhz: Vec<f64>,
    pub channel_edges: Vec<ChannelEdges>,
    /// 1-based channelizer channel number per tag.
    pub tag_channel_num: Vec<usize>,
    pub tag_channel_edge_warning: Vec<bool>,
    pub tag_offset_hz: Vec<f64>,
    pub multiple_tags_in_channel_warning: bool,
}

/// Snap every tag to its nearest channel and flag shoulder placements.
pub fn assign_channels(tags: &NormalizedTags, grid: &ChannelGrid, radio_fc_mhz: f64) -> Assignment {
    let ascending = grid.centers(radio_fc_mhz);
    let nearest = grid.nearest(&ascending);
    let half_bw = grid.channel_bw_mhz / 2.0;
    let flat_half_width = half_bw - tags.shoulder_mhz;

    let mut channel_num = Vec::with_capacity(tags.len());
    let mut edge_warning = Vec::with_capacity(tags.len());
    let mut offset_hz = Vec::with_capacity(tags.len());
    for &f in &tags.sorted_mhz {
        let ascending_index = nearest.index(f);
        let offset_mhz = f - ascending[ascending_index];
        channel_num.push(grid.hardware_index(ascending_index) + 1);
        edge_warning.push(offset_mhz.abs() > flat_half_width);
        offset_hz.push(offset_mhz * 1e6);
    }

    let distinct: BTreeSet<usize> = channel_num.iter().copied().collect();
    let multiple_tags_in_channel_warning = distinct.len() != channel_num.len();

    let channel_fc_mhz = grid.hardware_order(&ascending);
    let channel_edges = channel_fc_mhz
        .iter()
        .map(|&c| ChannelEdges {
            lower_mhz: c - half_bw,
            upper_mhz: c + half_bw,
        })
        .collect();

    Assignment {
        channel_fc_mhz,
        channel_edges,
        tag_channel_num: tags.restore_order(&channel_num),
        tag_channel_edge_warning: tags.restore_order(&edge_warning),
        tag_offset_hz: tags.restore_order(&offset_hz),
        multiple_tags_in_channel_warning,
    }
}
