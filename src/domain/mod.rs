//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - planner constants (`BW_FLAT_FRAC`, `CANDIDATE_STEP_MHZ`, `FREQ_DECIMALS`)
//! - tag records (`Tag`)
//! - planner outputs (`ChannelPlan`, `PlanDiagnostics`)
//! - run configuration and the saved plan schema (`PlanConfig`, `PlanFile`)

pub mod types;

pub use types::*;
