//! Errors raised while loading and arranging benchmark results.

use std::path::PathBuf;

use thiserror::Error;

/// Plotter error type
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Benchmark file {0:?} missing")]
    MissingFile(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed benchmark entry #{index} in {path:?}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("No benchmark results left after filtering")]
    NoData,

    #[error("Unknown benchmark group: {0}")]
    UnknownGroup(String),

    #[error("Invalid figure size {0:?}, expected WIDTH,HEIGHT")]
    InvalidFigsize(String),
}
