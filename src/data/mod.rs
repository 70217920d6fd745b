//! Data layer for JMH benchmark result files.
//!
//! Loads result files into scores keyed by group and benchmark name.

mod error;
mod filter;
mod groups;
mod loader;
mod models;

pub use error::PlotError;
pub use filter::BenchmarkFilter;
pub use groups::{base_group, display_label, is_optimized};
pub use loader::load_results;
pub use models::{score_of, BenchmarkSet, VmInfo, ZeroPolicy};
#[cfg(test)]
pub use models::BenchmarkRecord;
