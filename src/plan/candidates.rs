//! Candidate radio center frequencies.
//!
//! Candidates are laid on a fixed 100 Hz grid from the lowest tag upward,
//! stopping short of the highest tag, and only those whose acquisition band
//! holds every tag are kept. The search is deterministic and does not claim
//! optimality between grid points.

use log::{debug, warn};

use crate::domain::CANDIDATE_STEP_MHZ;
use crate::plan::grid::ChannelGrid;
use crate::plan::normalize::{NormalizedTags, round_mhz};

/// Valid candidate centers for one planning run.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    /// Ascending candidate centers (MHz). Never empty.
    pub centers_mhz: Vec<f64>,
    /// No grid point was valid and the feasible-window midpoint was used.
    pub used_fallback: bool,
}

/// Generate the candidate grid and keep only covering candidates.
pub fn candidate_centers(tags: &NormalizedTags, grid: &ChannelGrid) -> CandidateSet {
    let (f_min, f_max) = (tags.f_min_mhz, tags.f_max_mhz);

    let raw: Vec<f64> = if f_min == f_max {
        vec![f_max]
    } else {
        let steps = ((f_max - f_min) / CANDIDATE_STEP_MHZ).ceil() as usize;
        (0..steps)
            .map(|k| round_mhz(f_min + k as f64 * CANDIDATE_STEP_MHZ))
            .collect()
    };
    let n_raw = raw.len();

    let centers_mhz: Vec<f64> = raw
        .into_iter()
        .filter(|&c| grid.covers(c, f_min, f_max))
        .collect();
    debug!(
        "{} of {n_raw} grid candidates cover [{f_min:.6}, {f_max:.6}] MHz",
        centers_mhz.len()
    );

    if !centers_mhz.is_empty() {
        return CandidateSet {
            centers_mhz,
            used_fallback: false,
        };
    }

    // The feasible window is narrower than the grid step; it is never empty
    // once the span has been checked against the sample rate.
    let window_low = f_max - grid.radio_bw_upper_mhz;
    let window_high = f_min + grid.radio_bw_lower_mhz;
    let midpoint = round_mhz((window_low + window_high) / 2.0);
    warn!(
        "No {:.0} Hz grid point covers every tag; using {midpoint:.6} MHz from the feasible window [{window_low:.6}, {window_high:.6}]",
        CANDIDATE_STEP_MHZ * 1e6
    );

    CandidateSet {
        centers_mhz: vec![midpoint],
        used_fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::plan::normalize::normalize;

    fn candidates_for(fs: f64, n: usize, tags: &[f64]) -> CandidateSet {
        let tags = normalize(fs, n, tags).unwrap();
        let grid = ChannelGrid::new(fs, n);
        candidate_centers(&tags, &grid)
    }

    #[test]
    fn single_tag_collapses_to_one_candidate() {
        let set = candidates_for(300_000.0, 4, &[146.0]);
        assert_eq!(set.centers_mhz, vec![146.0]);
        assert!(!set.used_fallback);
    }

    #[test]
    fn grid_steps_by_100_hz_and_stops_below_the_top_tag() {
        let set = candidates_for(192_000.0, 48, &[150.0, 150.001_05]);
        assert_eq!(set.centers_mhz.len(), 11);
        assert_eq!(set.centers_mhz[0], 150.0);
        assert_eq!(set.centers_mhz[1], 150.0001);
        assert_eq!(set.centers_mhz[10], 150.001);
    }

    #[test]
    fn every_candidate_covers_the_span() {
        let fs = 192_000.0;
        let tags = [149.922_727, 150.087_777, 150.0];
        let set = candidates_for(fs, 48, &tags);
        let grid = ChannelGrid::new(fs, 48);
        assert!(!set.centers_mhz.is_empty());
        for &c in &set.centers_mhz {
            assert!(c - grid.radio_bw_lower_mhz <= 149.922_727);
            assert!(c + grid.radio_bw_upper_mhz >= 150.087_777);
        }
    }

    #[test]
    fn wide_span_trims_candidates_to_the_feasible_window() {
        // Span 180 kHz with a 192 kHz band: only centers in
        // [fmax - 0.094, fmin + 0.098] survive.
        let set = candidates_for(192_000.0, 48, &[150.0, 150.18]);
        assert!(!set.used_fallback);
        let first = set.centers_mhz[0];
        let last = set.centers_mhz[set.centers_mhz.len() - 1];
        assert!((first - 150.086).abs() < 1.5e-4, "first={first}");
        assert!((last - 150.098).abs() < 1.5e-4, "last={last}");
        assert!(set.centers_mhz.len() >= 119);
    }

    #[test]
    fn window_narrower_than_grid_step_falls_back_to_its_midpoint() {
        // One 100.05 kHz channel, tags 100.03 kHz apart: the feasible window
        // is [150.050005, 150.050025], which holds no 100 Hz grid point.
        let set = candidates_for(100_050.0, 1, &[150.0, 150.100_03]);
        assert!(set.used_fallback);
        assert_eq!(set.centers_mhz.len(), 1);
        assert_abs_diff_eq!(set.centers_mhz[0], 150.050_015, epsilon = 1e-9);
    }
}
