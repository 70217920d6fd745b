//! Fetch-and-build driver for the evaluation corpus.
//!
//! Clones each manifest repository at its pinned revision and compiles it
//! with maven or gradle, falling back across Java runtimes.

mod command;
mod descriptor;
mod driver;
mod error;
mod manifest;
mod runtime;
#[cfg(test)]
mod testing;

pub use command::SystemRunner;
pub use driver::Driver;
pub use error::BuildError;
pub use manifest::parse_manifest;
pub use runtime::{default_runtimes, RuntimeEnv};
