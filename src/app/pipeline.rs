//! Shared planning pipeline.
//!
//! Keeps the core workflow in one place:
//! tag source -> tag records -> planner -> plan
//!
//! Front-ends then only deal with presentation (printing, exports).

use log::info;

use crate::domain::{ChannelPlan, PlanConfig, Tag, TagSource};
use crate::error::AppError;

/// All computed outputs of a single `tuner plan` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Tag records in input order (aligned with the plan's per-tag vectors).
    pub tags: Vec<Tag>,
    pub plan: ChannelPlan,
}

/// Resolve the tag list and run the planner.
pub fn run_plan(config: &PlanConfig) -> Result<RunOutput, AppError> {
    let tags = match &config.tags {
        TagSource::Inline(freqs) => Tag::from_frequencies(freqs),
        TagSource::File(path) => crate::io::load_tags_csv(path)?.tags,
    };
    plan_tags(config.sample_rate_hz, config.n_channels, tags)
}

/// Run the planner for already-loaded tag records.
pub fn plan_tags(
    sample_rate_hz: f64,
    n_channels: usize,
    tags: Vec<Tag>,
) -> Result<RunOutput, AppError> {
    let freqs: Vec<f64> = tags.iter().map(|t| t.frequency_mhz).collect();
    let plan = crate::plan::tuner(sample_rate_hz, n_channels, &freqs)?;

    info!(
        "radio center {:.6} MHz for {} tags over {n_channels} channels",
        plan.radio_fc_mhz,
        tags.len()
    );
    if plan.multiple_tags_in_channel_warning {
        info!("some channels hold more than one tag");
    }

    Ok(RunOutput { tags, plan })
}
