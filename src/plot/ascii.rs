//! ASCII channel map for terminal output.
//!
//! Fixed-width and deterministic, for quick visual sanity checks and golden
//! tests. Rows, top to bottom:
//!
//! - channel layout: `|` channel edge, `+` channel center, `-` passband
//! - tags: `o` tag, `!` tag in a channel shoulder, `*` several tags in one column
//! - radio center: `^`

use crate::domain::ChannelPlan;
use crate::report::band_extent;

/// Render the channel map for a plan. Tag markers follow `plan`'s per-tag
/// vectors, so any tag list in the same order works.
pub fn render_channel_map(plan: &ChannelPlan, tag_freqs_mhz: &[f64], width: usize) -> String {
    let width = width.max(20);
    let Some((lo, hi)) = band_extent(plan) else {
        return "Channel map: empty plan\n".to_string();
    };

    let mut layout = vec!['-'; width];
    for &c in &plan.channel_fc_mhz {
        layout[map_x(c, lo, hi, width)] = '+';
    }
    for e in &plan.channel_edges {
        layout[map_x(e.lower_mhz, lo, hi, width)] = '|';
        layout[map_x(e.upper_mhz, lo, hi, width)] = '|';
    }

    let mut tags = vec![' '; width];
    for (i, &f) in tag_freqs_mhz.iter().enumerate() {
        let x = map_x(f, lo, hi, width);
        let shoulder = plan.tag_channel_edge_warning.get(i).copied().unwrap_or(false);
        tags[x] = match (tags[x], shoulder) {
            (' ', false) => 'o',
            (' ', true) => '!',
            _ => '*',
        };
    }

    let mut radio = vec![' '; width];
    radio[map_x(plan.radio_fc_mhz, lo, hi, width)] = '^';

    let mut out = String::new();
    out.push_str(&format!(
        "Channel map: [{lo:.6}, {hi:.6}] MHz | {} channels | radio {:.6} MHz\n",
        plan.channel_fc_mhz.len(),
        plan.radio_fc_mhz
    ));
    for row in [layout, tags, radio] {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn map_x(f: f64, lo: f64, hi: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((f - lo) / (hi - lo)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}
