//! Formatted terminal output for a channel plan.

use crate::domain::{ChannelPlan, Tag};
use crate::report::{band_extent, channel_occupancy, channelizer_args};

/// Format the plan summary (inputs, selected tuning, cost diagnostics, warnings).
pub fn format_plan_summary(sample_rate_hz: f64, n_channels: usize, plan: &ChannelPlan) -> String {
    let mut out = String::new();
    let d = &plan.diagnostics;

    out.push_str("=== tuner - channel plan ===\n");
    out.push_str(&format!(
        "Sample rate: {sample_rate_hz:.0} Hz | channels: {n_channels} x {:.1} Hz\n",
        plan.channel_bw_hz
    ));
    out.push_str(&format!("Radio center: {:.6} MHz\n", plan.radio_fc_mhz));
    if let Some((lo, hi)) = band_extent(plan) {
        out.push_str(&format!("Band: [{lo:.6}, {hi:.6}] MHz\n"));
    }
    out.push_str(&format!(
        "Candidates: {} evaluated, {} tied at the best cost\n",
        d.n_candidates, d.n_acceptable
    ));
    if d.used_fallback_candidate {
        out.push_str("  (no grid candidate covered every tag; using the feasible-window midpoint)\n");
    }
    out.push_str(&format!(
        "Tags per occupied channel: {:.3}\n",
        d.tag_per_channel_mean
    ));
    match d.channel_edge_cost {
        Some(cost) => out.push_str(&format!("Edge cost: {cost:.6}\n")),
        None => out.push_str("Edge cost: inf (a tag sits on a channel edge)\n"),
    }
    out.push_str(&format!("Tag centroid: {:.6} MHz\n", d.tag_centroid_mhz));

    let mut warnings = Vec::new();
    if plan.multiple_tags_in_channel_warning {
        warnings.push("multiple tags share a channel".to_string());
    }
    let shoulder = plan.tag_channel_edge_warning.iter().filter(|&&w| w).count();
    if shoulder > 0 {
        warnings.push(format!("{shoulder} tag(s) in a channel shoulder"));
    }
    if warnings.is_empty() {
        out.push_str("Warnings: none\n");
    } else {
        out.push_str(&format!("Warnings: {}\n", warnings.join("; ")));
    }

    out
}

/// Format the per-tag assignment table (input order).
///
/// Flags: `edge` (tag in the roll-off shoulder), `shared` (channel holds more
/// than one tag), `dual` (dual-pulse tag).
pub fn format_tag_table(tags: &[Tag], plan: &ChannelPlan) -> String {
    let occupancy = channel_occupancy(plan);
    let mut out = String::new();

    out.push_str("Tags:\n");
    push_row(
        &mut out,
        ["id", "frequency_mhz", "ch", "channel_fc_mhz", "offset_hz", "flags"].map(String::from),
    );

    for (i, tag) in tags.iter().enumerate() {
        let channel = plan.tag_channel_num.get(i).copied();
        let slot = channel.and_then(|c| c.checked_sub(1));
        let mut flags = Vec::new();
        if plan.tag_channel_edge_warning.get(i).copied().unwrap_or(false) {
            flags.push("edge");
        }
        if slot.and_then(|s| occupancy.get(s)).is_some_and(|&n| n > 1) {
            flags.push("shared");
        }
        if tag.dual_pulse {
            flags.push("dual");
        }
        let missing = || "-".to_string();
        let channel_fc = slot.and_then(|s| plan.channel_fc_mhz.get(s));
        let offset_hz = plan.tag_offset_hz.get(i);

        push_row(
            &mut out,
            [
                tag.id.to_string(),
                format!("{:.6}", tag.frequency_mhz),
                channel.map_or_else(missing, |c| c.to_string()),
                channel_fc.map_or_else(missing, |fc| format!("{fc:.6}")),
                offset_hz.map_or_else(missing, |o| format!("{o:.1}")),
                flags.join(","),
            ],
        );
    }

    out
}

fn push_row(out: &mut String, cols: [String; 6]) {
    let [id, freq, ch, fc, offset, flags] = cols;
    let line = format!("{id:>6} {freq:>14} {ch:>4} {fc:>15} {offset:>11}  {flags}");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Channelizer argument line: space separated tokens, one per tag.
pub fn format_channelizer_line(tags: &[Tag], plan: &ChannelPlan) -> String {
    channelizer_args(tags, plan)
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixture;

    #[test]
    fn summary_golden() {
        let txt = format_plan_summary(300_000.0, 3, &fixture::plan());
        let expected = concat!(
            "=== tuner - channel plan ===\n",
            "Sample rate: 300000 Hz | channels: 3 x 100000.0 Hz\n",
            "Radio center: 150.000000 MHz\n",
            "Band: [149.850000, 150.150000] MHz\n",
            "Candidates: 10 evaluated, 2 tied at the best cost\n",
            "Tags per occupied channel: 1.500\n",
            "Edge cost: 0.250000\n",
            "Tag centroid: 150.063333 MHz\n",
            "Warnings: multiple tags share a channel; 1 tag(s) in a channel shoulder\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn summary_reports_infinite_edge_cost_and_fallback() {
        let mut plan = fixture::plan();
        plan.diagnostics.channel_edge_cost = None;
        plan.diagnostics.used_fallback_candidate = true;
        plan.multiple_tags_in_channel_warning = false;
        plan.tag_channel_edge_warning = vec![false; 3];

        let txt = format_plan_summary(300_000.0, 3, &plan);
        assert!(txt.contains("Edge cost: inf"));
        assert!(txt.contains("feasible-window midpoint"));
        assert!(txt.ends_with("Warnings: none\n"));
    }

    #[test]
    fn tag_table_golden() {
        let txt = format_tag_table(&fixture::tags(), &fixture::plan());
        let expected = concat!(
            "Tags:\n",
            "    id  frequency_mhz   ch  channel_fc_mhz   offset_hz  flags\n",
            "     1     150.020000    3      150.000000     20000.0  shared\n",
            "     2     150.140000    1      150.100000     40000.0  edge,dual\n",
            "     3     150.030000    3      150.000000     30000.0  shared\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn tag_table_tolerates_unknown_channels() {
        let mut plan = fixture::plan();
        plan.tag_channel_num = vec![0, 1, 9];
        plan.tag_offset_hz.truncate(1);

        let txt = format_tag_table(&fixture::tags(), &plan);
        let rows: Vec<&str> = txt.lines().skip(2).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "     1     150.020000    0               -     20000.0");
        assert!(rows[2].contains("   9               -           -"));
    }

    #[test]
    fn channelizer_line_golden() {
        assert_eq!(
            format_channelizer_line(&fixture::tags(), &fixture::plan()),
            "3 -1 3"
        );
    }
}
