//! `tag-tuner` library crate.
//!
//! The binary (`tuner`) is a thin wrapper around this library so that:
//!
//! - the planner is testable without spawning processes
//! - receiver front-ends can call `plan::tuner` directly
//! - I/O and presentation stay out of the numeric code

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plan;
pub mod plot;
pub mod report;
