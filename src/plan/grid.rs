//! Channel grid construction and nearest-channel lookup.
//!
//! The grid is the set of nominal channel center offsets relative to the
//! radio center frequency, derived from the sample rate and channel count
//! alone. Offsets are kept ascending here; channelizer (hardware) order is
//! only applied when the final plan is built.

use crate::plan::normalize::round_mhz;

#[derive(Debug, Clone)]
pub struct ChannelGrid {
    /// Channel center offsets from the radio center, ascending (MHz).
    pub offsets_mhz: Vec<f64>,
    pub channel_bw_mhz: f64,
    /// How far the acquisition band reaches above the radio center (MHz).
    pub radio_bw_upper_mhz: f64,
    /// How far the acquisition band reaches below the radio center (MHz).
    pub radio_bw_lower_mhz: f64,
}

impl ChannelGrid {
    /// Build the nominal grid.
    ///
    /// - odd `n_channels`: offsets run from `-bw * floor(n/2)` upward, so the
    ///   middle channel sits at zero offset
    /// - even `n_channels`: offsets run from `-Fs/2` upward, stopping short of
    ///   `+Fs/2`
    ///
    /// Either way exactly `n_channels` offsets are produced.
    pub fn new(sample_rate_hz: f64, n_channels: usize) -> Self {
        let channel_bw_hz = sample_rate_hz / n_channels as f64;
        let first_hz = if n_channels % 2 != 0 {
            -channel_bw_hz * (n_channels / 2) as f64
        } else {
            -sample_rate_hz / 2.0
        };

        let offsets_mhz: Vec<f64> = (0..n_channels)
            .map(|k| (first_hz + k as f64 * channel_bw_hz) * 1e-6)
            .collect();

        let channel_bw_mhz = channel_bw_hz * 1e-6;
        let half_bw = channel_bw_mhz / 2.0;
        let max_offset = offsets_mhz[offsets_mhz.len() - 1];
        let min_offset = offsets_mhz[0];

        Self {
            radio_bw_upper_mhz: max_offset.abs() + half_bw,
            radio_bw_lower_mhz: min_offset.abs() + half_bw,
            offsets_mhz,
            channel_bw_mhz,
        }
    }

    pub fn len(&self) -> usize {
        self.offsets_mhz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets_mhz.is_empty()
    }

    /// Absolute channel centers for a radio center, ascending.
    pub fn centers(&self, radio_fc_mhz: f64) -> Vec<f64> {
        self.offsets_mhz.iter().map(|&o| radio_fc_mhz + o).collect()
    }

    /// The `n + 1` channel boundaries for a radio center, ascending.
    ///
    /// Adjacent channels share a boundary value, so channel `j` is the
    /// interval `(b[j], b[j + 1]]`.
    pub fn boundaries(&self, radio_fc_mhz: f64) -> Vec<f64> {
        let half_bw = self.channel_bw_mhz / 2.0;
        let centers = self.centers(radio_fc_mhz);
        let mut out: Vec<f64> = centers.iter().map(|&c| lower_boundary(c, half_bw)).collect();
        out.push(round_mhz(centers[centers.len() - 1] + half_bw));
        out
    }

    /// Nearest-channel lookup for a radio center, split on the same rounded
    /// boundaries as [`ChannelGrid::boundaries`].
    pub fn nearest<'a>(&self, centers: &'a [f64]) -> NearestCenter<'a> {
        NearestCenter::new(centers, self.channel_bw_mhz)
    }

    /// Whether the acquisition band centered at `radio_fc_mhz` holds the whole
    /// `[f_min, f_max]` span.
    pub fn covers(&self, radio_fc_mhz: f64, f_min_mhz: f64, f_max_mhz: f64) -> bool {
        radio_fc_mhz - self.radio_bw_lower_mhz <= f_min_mhz
            && radio_fc_mhz + self.radio_bw_upper_mhz >= f_max_mhz
    }

    /// Left rotation that turns ascending order into channelizer order.
    ///
    /// The channelizer emits the baseband channel first; this is a fixed
    /// rotation by `ceil(n/2)`.
    pub fn hardware_shift(&self) -> usize {
        self.len().div_ceil(2) % self.len()
    }

    /// Channelizer index of the channel at `ascending_index`.
    pub fn hardware_index(&self, ascending_index: usize) -> usize {
        let n = self.len();
        (ascending_index + n - self.hardware_shift()) % n
    }

    /// Reorder ascending per-channel values into channelizer order.
    pub fn hardware_order<T: Clone>(&self, ascending: &[T]) -> Vec<T> {
        let shift = self.hardware_shift();
        let n = ascending.len();
        (0..n).map(|i| ascending[(i + shift) % n].clone()).collect()
    }
}

fn lower_boundary(center_mhz: f64, half_bw_mhz: f64) -> f64 {
    round_mhz(center_mhz - half_bw_mhz)
}

/// Nearest-center lookup over an ascending set of equally spaced channel
/// centers.
///
/// Neighbouring centers are split at the rounded shared boundary, so inside
/// the band this agrees with [`channel_containing`]. A value exactly on a
/// boundary snaps to the lower channel; values outside the grid snap to the
/// closest end.
#[derive(Debug, Clone)]
pub struct NearestCenter<'a> {
    centers: &'a [f64],
    midpoints: Vec<f64>,
}

impl<'a> NearestCenter<'a> {
    pub fn new(centers: &'a [f64], channel_bw_mhz: f64) -> Self {
        let half_bw = channel_bw_mhz / 2.0;
        let midpoints = centers
            .iter()
            .skip(1)
            .map(|&c| lower_boundary(c, half_bw))
            .collect();
        Self { centers, midpoints }
    }

    /// Index of the nearest center.
    pub fn index(&self, value: f64) -> usize {
        self.midpoints.partition_point(|&m| m < value)
    }

    /// Frequency of the nearest center.
    pub fn center(&self, value: f64) -> f64 {
        self.centers[self.index(value)]
    }
}

/// Index of the channel whose `(lower, upper]` interval holds `value`.
///
/// The bottom edge of the lowest channel is closed, so a value sitting exactly
/// on the lower end of the acquisition band still belongs to a channel.
pub fn channel_containing(boundaries: &[f64], value: f64) -> Option<usize> {
    let (first, last) = (boundaries[0], boundaries[boundaries.len() - 1]);
    if value < first || value > last {
        return None;
    }
    if value == first {
        return Some(0);
    }
    Some(boundaries.partition_point(|&b| b < value) - 1)
}
