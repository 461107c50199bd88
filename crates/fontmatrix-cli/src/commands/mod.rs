//! CLI command implementations

pub mod check;
pub mod generate;

mod reporting;

pub use reporting::{error_codes, CommandOutcome, RunOptions};
