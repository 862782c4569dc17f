//! Export per-tag assignments to CSV.
//!
//! One row per tag in input order, easy to load into a spreadsheet or diff
//! between deployments.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{ChannelPlan, Tag};
use crate::error::AppError;

/// Write per-tag assignments to a CSV file.
pub fn write_assignments_csv(
    path: &Path,
    tags: &[Tag],
    plan: &ChannelPlan,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    write_assignments(file, tags, plan)
}

/// Write per-tag assignments as CSV to any sink.
pub fn write_assignments<W: Write>(
    mut out: W,
    tags: &[Tag],
    plan: &ChannelPlan,
) -> Result<(), AppError> {
    writeln!(
        out,
        "id,frequency_mhz,dual_pulse,channel,channel_fc_mhz,offset_hz,edge_warning"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (i, tag) in tags.iter().enumerate() {
        let row = plan.tag_channel_num.get(i).and_then(|&channel| {
            let fc = plan.channel_fc_mhz.get(channel.checked_sub(1)?)?;
            Some((
                channel,
                *fc,
                *plan.tag_offset_hz.get(i)?,
                *plan.tag_channel_edge_warning.get(i)?,
            ))
        });
        let Some((channel, fc, offset_hz, edge_warning)) = row else {
            return Err(AppError::new(
                2,
                format!("Tag {} has no valid channel assignment in the plan.", tag.id),
            ));
        };
        writeln!(
            out,
            "{},{:.6},{},{},{:.6},{:.1},{}",
            tag.id,
            tag.frequency_mhz,
            tag.dual_pulse,
            channel,
            fc,
            offset_hz,
            edge_warning,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::tuner;

    #[test]
    fn one_row_per_tag_in_input_order() {
        let freqs = [146.07, 145.86];
        let tags = Tag::from_frequencies(&freqs);
        let plan = tuner(300_000.0, 4, &freqs).unwrap();

        let mut buf = Vec::new();
        write_assignments(&mut buf, &tags, &plan).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "id,frequency_mhz,dual_pulse,channel,channel_fc_mhz,offset_hz,edge_warning"
        );
        assert!(lines[1].starts_with("1,146.070000,false,"));
        assert!(lines[2].starts_with("2,145.860000,false,"));
    }

    #[test]
    fn writes_to_disk() {
        let freqs = [146.0];
        let tags = Tag::from_frequencies(&freqs);
        let plan = tuner(300_000.0, 4, &freqs).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.csv");
        write_assignments_csv(&path, &tags, &plan).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("1,146.000000,false,1,146.000000,0.0,false")
        );
    }

    #[test]
    fn unassigned_tag_is_an_error_not_a_panic() {
        let freqs = [146.0];
        let tags = Tag::from_frequencies(&freqs);
        let mut plan = tuner(300_000.0, 4, &freqs).unwrap();
        plan.tag_channel_num = vec![0];

        let err = write_assignments(Vec::<u8>::new(), &tags, &plan).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
