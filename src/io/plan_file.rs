//! Read/write plan JSON files.
//!
//! Plan JSON is the portable record of one planning run:
//! - the inputs (sample rate, channel count, tag list)
//! - the selected radio center, channel layout and per-tag assignments
//! - when and by what it was generated
//!
//! The schema is defined by `domain::PlanFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{ChannelPlan, PlanFile, Tag};
use crate::error::AppError;

/// Name written into the `tool` field of exported plans.
pub const TOOL_NAME: &str = "tuner";

/// Bundle a computed plan with its inputs, stamped with the current time.
pub fn build_plan_file(
    sample_rate_hz: f64,
    n_channels: usize,
    tags: &[Tag],
    plan: &ChannelPlan,
) -> PlanFile {
    PlanFile {
        tool: TOOL_NAME.to_string(),
        generated_at: Utc::now(),
        sample_rate_hz,
        n_channels,
        tags: tags.to_vec(),
        plan: plan.clone(),
    }
}

/// Write a plan JSON file.
pub fn write_plan_json(path: &Path, plan_file: &PlanFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create plan JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, plan_file)
        .map_err(|e| AppError::new(2, format!("Failed to write plan JSON: {e}")))?;

    Ok(())
}

/// Read a plan JSON file.
pub fn read_plan_json(path: &Path) -> Result<PlanFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open plan JSON '{}': {e}", path.display()))
    })?;
    let plan_file: PlanFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid plan JSON: {e}")))?;

    validate_plan_file(&plan_file).map_err(|msg| {
        AppError::new(2, format!("Invalid plan JSON '{}': {msg}", path.display()))
    })?;

    Ok(plan_file)
}

/// Check that the per-tag and per-channel vectors line up and every channel
/// number points at a real channel.
fn validate_plan_file(file: &PlanFile) -> Result<(), String> {
    let plan = &file.plan;
    let n_tags = file.tags.len();
    let n_channels = plan.channel_fc_mhz.len();

    if n_channels == 0 {
        return Err("plan has no channels".to_string());
    }
    if plan.channel_edges.len() != n_channels {
        return Err(format!(
            "{n_channels} channel centers but {} channel edge pairs",
            plan.channel_edges.len()
        ));
    }
    for (name, len) in [
        ("channel assignments", plan.tag_channel_num.len()),
        ("edge warnings", plan.tag_channel_edge_warning.len()),
        ("tag offsets", plan.tag_offset_hz.len()),
    ] {
        if len != n_tags {
            return Err(format!("{n_tags} tags but {len} {name}"));
        }
    }
    if let Some((i, &channel)) = plan
        .tag_channel_num
        .iter()
        .enumerate()
        .find(|&(_, &c)| c == 0 || c > n_channels)
    {
        return Err(format!(
            "tag {} is assigned to channel {channel}, outside 1..={n_channels}",
            file.tags[i].id
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::tuner;

    #[test]
    fn plan_survives_a_trip_through_disk() {
        let tags = Tag::from_frequencies(&[146.0, 146.01]);
        let plan = tuner(300_000.0, 4, &[146.0, 146.01]).unwrap();
        let file = build_plan_file(300_000.0, 4, &tags, &plan);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        write_plan_json(&path, &file).unwrap();
        let loaded = read_plan_json(&path).unwrap();

        assert_eq!(loaded.tool, "tuner");
        assert_eq!(loaded.generated_at, file.generated_at);
        assert_eq!(loaded.n_channels, 4);
        assert_eq!(loaded.tags, tags);
        assert_eq!(loaded.plan.tag_channel_num, plan.tag_channel_num);
        assert_eq!(loaded.plan.radio_fc_mhz, plan.radio_fc_mhz);
    }

    #[test]
    fn mismatched_tag_count_is_rejected() {
        let plan = tuner(300_000.0, 4, &[146.0]).unwrap();
        let file = build_plan_file(300_000.0, 4, &Tag::from_frequencies(&[146.0, 146.01]), &plan);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        write_plan_json(&path, &file).unwrap();

        let err = read_plan_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    fn write_tampered(plan_file: &PlanFile) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        write_plan_json(&path, plan_file).unwrap();
        (dir, path)
    }

    #[test]
    fn out_of_range_channel_numbers_are_rejected() {
        let freqs = [146.0, 146.07];
        let plan = tuner(300_000.0, 4, &freqs).unwrap();
        let tags = Tag::from_frequencies(&freqs);

        for bad in [0, 5] {
            let mut file = build_plan_file(300_000.0, 4, &tags, &plan);
            file.plan.tag_channel_num[1] = bad;
            let (_dir, path) = write_tampered(&file);

            let err = read_plan_json(&path).unwrap_err();
            assert_eq!(err.exit_code(), 2);
            assert!(err.to_string().contains("outside 1..=4"), "{err}");
        }
    }

    #[test]
    fn short_per_tag_vectors_are_rejected() {
        let freqs = [146.0, 146.07];
        let plan = tuner(300_000.0, 4, &freqs).unwrap();
        let tags = Tag::from_frequencies(&freqs);

        let mut file = build_plan_file(300_000.0, 4, &tags, &plan);
        file.plan.tag_offset_hz.pop();
        let (_dir, path) = write_tampered(&file);
        assert!(read_plan_json(&path).unwrap_err().to_string().contains("tag offsets"));

        let mut file = build_plan_file(300_000.0, 4, &tags, &plan);
        file.plan.tag_channel_edge_warning.clear();
        let (_dir, path) = write_tampered(&file);
        assert!(read_plan_json(&path).unwrap_err().to_string().contains("edge warnings"));
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_plan_json(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("nope.json"));
    }
}
