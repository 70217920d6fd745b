//! Java runtime environments and the build fallback sequence.

use std::path::PathBuf;

use tracing::{info, warn};

use super::command::{CommandRunner, ToolCommand};
use super::error::BuildError;

/// A named `JAVA_HOME` to try a build with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnv {
    pub name: String,
    pub java_home: PathBuf,
}

impl RuntimeEnv {
    pub fn new(name: impl Into<String>, java_home: impl Into<PathBuf>) -> Self {
        RuntimeEnv {
            name: name.into(),
            java_home: java_home.into(),
        }
    }

    /// Parse a `NAME=JAVA_HOME` pair
    pub fn parse(value: &str) -> Result<Self, BuildError> {
        match value.split_once('=') {
            Some((name, home)) if !name.trim().is_empty() && !home.trim().is_empty() => {
                Ok(RuntimeEnv::new(name.trim(), home.trim()))
            }
            _ => Err(BuildError::InvalidRuntime(value.to_string())),
        }
    }

    /// Parse a comma separated list of `NAME=JAVA_HOME` pairs
    pub fn parse_list(list: &str) -> Result<Vec<Self>, BuildError> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(RuntimeEnv::parse)
            .collect()
    }
}

/// Preferred runtimes, newest first
pub fn default_runtimes() -> Vec<RuntimeEnv> {
    vec![
        RuntimeEnv::new("jdk13", "/usr/lib/jvm/java-1.13.0-openjdk-amd64"),
        RuntimeEnv::new("jdk11", "/usr/lib/jvm/java-1.11.0-openjdk-amd64"),
        RuntimeEnv::new("jdk8", "/usr/lib/jvm/java-8-oracle-amd64"),
    ]
}

/// Run `command` under each runtime in order until one succeeds.
///
/// Returns the runtime that worked. Only a non-zero exit moves on to the next
/// runtime; a command that cannot be started fails at once. When every
/// attempt fails the error of the last attempt is returned.
pub fn run_with_runtimes<'r>(
    runner: &dyn CommandRunner,
    command: &ToolCommand,
    runtimes: &'r [RuntimeEnv],
) -> Result<&'r RuntimeEnv, BuildError> {
    let mut last_error = None;

    for runtime in runtimes {
        let attempt = command
            .clone()
            .with_env("JAVA_HOME", runtime.java_home.as_os_str());

        match runner.run(&attempt) {
            Ok(()) => {
                info!(command = %command, runtime = %runtime.name, "build step succeeded");
                return Ok(runtime);
            }
            Err(e @ BuildError::CommandFailed { .. }) => {
                warn!(command = %command, runtime = %runtime.name, error = %e, "build step failed");
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or(BuildError::NoRuntimes))
}
