//! CLI command handlers, one per file.

mod demo;
mod estimate;

pub use demo::run_demo;
pub use estimate::{run_estimate, EstimateRequest};
