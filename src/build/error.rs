//! Errors raised by the fetch-and-build driver.

use std::borrow::Borrow;
use std::path::PathBuf;

use thiserror::Error;

/// Fetch-and-build error type
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {}", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("no runtime environments configured")]
    NoRuntimes,

    #[error("don't know how to build {repo:?}, top-level entries: {entries:?}")]
    UnknownBuildSystem { repo: PathBuf, entries: Vec<String> },

    #[error("copying dependencies is not supported for gradle projects ({repo:?}), rebuild with gradle instead")]
    GradleDependencyCopyUnsupported { repo: PathBuf },

    #[error("malformed manifest line {line}: {content:?}")]
    Manifest { line: usize, content: String },

    #[error("invalid runtime {0:?}, expected NAME=JAVA_HOME")]
    InvalidRuntime(String),

    #[error("repository path {path:?} is not valid UTF-8")]
    NonUtf8Path { path: PathBuf },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: impl Borrow<Option<i32>>) -> String {
    match code.borrow() {
        Some(c) => format!("exit code {c}"),
        None => "no exit code (killed by signal)".to_string(),
    }
}

impl BuildError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }
}
