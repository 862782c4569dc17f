//! Tag normalization.
//!
//! Tag frequencies are rounded to 1 Hz (6 decimal places in MHz) before any
//! comparison, sorted ascending, and the permutation back to the caller's
//! order is kept so per-tag outputs can be restored at the end.

use crate::domain::{BW_FLAT_FRAC, FREQ_DECIMALS};
use crate::error::PlanError;

/// Round a frequency in MHz to `FREQ_DECIMALS` places (ties to even).
pub fn round_mhz(value: f64) -> f64 {
    let scale = 10f64.powi(FREQ_DECIMALS);
    (value * scale).round_ties_even() / scale
}

/// Sorted tag frequencies plus the bandwidth terms derived from the radio
/// settings.
#[derive(Debug, Clone)]
pub struct NormalizedTags {
    /// Rounded tag frequencies, ascending (MHz).
    pub sorted_mhz: Vec<f64>,
    /// `input_rank[i]` is the position in `sorted_mhz` of the caller's i-th tag.
    pub input_rank: Vec<usize>,
    pub sample_rate_hz: f64,
    pub nyquist_hz: f64,
    pub channel_bw_hz: f64,
    pub channel_bw_mhz: f64,
    /// Width of the roll-off shoulder at each channel edge (MHz).
    pub shoulder_mhz: f64,
    pub f_min_mhz: f64,
    pub f_max_mhz: f64,
}

impl NormalizedTags {
    pub fn len(&self) -> usize {
        self.sorted_mhz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_mhz.is_empty()
    }

    /// Arithmetic mean of the rounded tag frequencies.
    pub fn centroid_mhz(&self) -> f64 {
        self.sorted_mhz.iter().sum::<f64>() / self.sorted_mhz.len() as f64
    }

    /// Reorder per-tag values computed in sorted order back into the caller's
    /// original order.
    pub fn restore_order<T: Clone>(&self, sorted: &[T]) -> Vec<T> {
        self.input_rank.iter().map(|&rank| sorted[rank].clone()).collect()
    }
}

/// Validate the inputs, round and sort the tags, and derive bandwidth terms.
pub fn normalize(
    sample_rate_hz: f64,
    n_channels: usize,
    tag_freqs_mhz: &[f64],
) -> Result<NormalizedTags, PlanError> {
    if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
        return Err(PlanError::InvalidSampleRate(sample_rate_hz));
    }
    if n_channels == 0 {
        return Err(PlanError::InvalidChannelCount(n_channels));
    }
    if tag_freqs_mhz.is_empty() {
        return Err(PlanError::EmptyTagList);
    }
    if let Some(index) = tag_freqs_mhz.iter().position(|f| !f.is_finite()) {
        return Err(PlanError::NonFiniteTag { index });
    }

    let rounded: Vec<f64> = tag_freqs_mhz.iter().map(|&f| round_mhz(f)).collect();

    // Stable sort keeps equal frequencies in input order.
    let mut sorted_index: Vec<usize> = (0..rounded.len()).collect();
    sorted_index.sort_by(|&a, &b| rounded[a].total_cmp(&rounded[b]));

    let mut input_rank = vec![0; rounded.len()];
    for (rank, &original) in sorted_index.iter().enumerate() {
        input_rank[original] = rank;
    }
    let sorted_mhz: Vec<f64> = sorted_index.iter().map(|&i| rounded[i]).collect();

    let f_min_mhz = sorted_mhz[0];
    let f_max_mhz = sorted_mhz[sorted_mhz.len() - 1];

    // Both ends are on a 1 Hz grid, so the span is a whole number of Hz.
    let span_hz = (round_mhz(f_max_mhz - f_min_mhz) * 1e6).round();
    if span_hz > sample_rate_hz {
        return Err(PlanError::TagSpanExceedsBandwidth {
            span_hz,
            sample_rate_hz,
        });
    }

    let channel_bw_hz = sample_rate_hz / n_channels as f64;
    let channel_bw_mhz = channel_bw_hz * 1e-6;

    Ok(NormalizedTags {
        sorted_mhz,
        input_rank,
        sample_rate_hz,
        nyquist_hz: sample_rate_hz / 2.0,
        channel_bw_hz,
        channel_bw_mhz,
        shoulder_mhz: channel_bw_mhz * (1.0 - BW_FLAT_FRAC) / 2.0,
        f_min_mhz,
        f_max_mhz,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn rounding_removes_sub_hz_jitter() {
        assert_eq!(round_mhz(150.000_000_4), 150.0);
        assert_eq!(round_mhz(149.922_727_000_000_1), 149.922_727);
    }

    #[test]
    fn sorts_and_restores_caller_order() {
        let tags = normalize(192_000.0, 48, &[150.02, 149.95, 150.01]).unwrap();
        assert_eq!(tags.sorted_mhz, vec![149.95, 150.01, 150.02]);
        assert_eq!(tags.input_rank, vec![2, 0, 1]);
        assert_eq!(tags.restore_order(&["a", "b", "c"]), vec!["c", "a", "b"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let tags = normalize(192_000.0, 48, &[150.0, 150.000_000_1, 150.0]).unwrap();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags.sorted_mhz, vec![150.0, 150.0, 150.0]);
    }

    #[test]
    fn bandwidth_terms() {
        let tags = normalize(192_000.0, 48, &[150.0]).unwrap();
        assert_abs_diff_eq!(tags.channel_bw_hz, 4000.0);
        assert_abs_diff_eq!(tags.channel_bw_mhz, 0.004, epsilon = 1e-15);
        assert_abs_diff_eq!(tags.shoulder_mhz, 0.0003, epsilon = 1e-12);
        assert_abs_diff_eq!(tags.nyquist_hz, 96_000.0);
    }

    #[test]
    fn span_wider_than_sample_rate_is_rejected() {
        let err = normalize(192_000.0, 48, &[150.0, 150.192_001]).unwrap_err();
        assert!(matches!(err, PlanError::TagSpanExceedsBandwidth { .. }));
    }

    #[test]
    fn span_equal_to_sample_rate_is_allowed() {
        assert!(normalize(192_000.0, 48, &[150.0, 150.192]).is_ok());
    }

    #[test]
    fn contract_violations() {
        assert_eq!(
            normalize(0.0, 4, &[150.0]).unwrap_err(),
            PlanError::InvalidSampleRate(0.0)
        );
        assert_eq!(
            normalize(300_000.0, 0, &[150.0]).unwrap_err(),
            PlanError::InvalidChannelCount(0)
        );
        assert_eq!(
            normalize(300_000.0, 4, &[]).unwrap_err(),
            PlanError::EmptyTagList
        );
        assert_eq!(
            normalize(300_000.0, 4, &[150.0, f64::NAN]).unwrap_err(),
            PlanError::NonFiniteTag { index: 1 }
        );
    }
}
