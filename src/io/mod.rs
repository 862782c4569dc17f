//! Input/output helpers.
//!
//! - tag list CSV ingest + validation (`tags`)
//! - plan JSON read/write (`plan_file`)
//! - per-tag CSV export (`export`)

pub mod export;
pub mod plan_file;
pub mod tags;

pub use export::*;
pub use plan_file::*;
pub use tags::*;
