//! External tool invocation.
//!
//! Every git/maven/gradle call goes through [`CommandRunner`], so the driver
//! can be exercised without those tools installed.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use super::error::BuildError;

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, OsString)>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        ToolCommand {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Build a command from a whitespace separated command line
    pub fn from_line(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let mut cmd = ToolCommand::new(parts.next().unwrap_or_default());
        cmd.args = parts.map(str::to_string).collect();
        cmd
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set an environment variable, replacing an earlier value for the same key
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        let key = key.into();
        self.env.retain(|(k, _)| *k != key);
        self.env.push((key, value.into()));
        self
    }

    /// Value of an environment override, if set
    #[allow(dead_code)] // Used in tests
    pub fn env_value(&self, key: &str) -> Option<&OsString> {
        self.env.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external commands to completion
pub trait CommandRunner {
    fn run(&self, command: &ToolCommand) -> Result<(), BuildError>;
}

/// Runs commands as child processes, inheriting stdio
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> Result<(), BuildError> {
        debug!(command = %command, cwd = ?command.cwd, "running");

        let mut process = Command::new(&command.program);
        process.args(&command.args);
        if let Some(dir) = &command.cwd {
            process.current_dir(dir);
        }
        process.envs(command.env.iter().map(|(k, v)| (k, v)));

        let status = process.status().map_err(|source| BuildError::Spawn {
            command: command.to_string(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(BuildError::CommandFailed {
                command: command.to_string(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_line_splits_on_whitespace() {
        let cmd = ToolCommand::from_line("bash gradlew classes  --no-daemon -g gcache");
        assert_eq!(cmd.program, "bash");
        assert_eq!(cmd.args, ["gradlew", "classes", "--no-daemon", "-g", "gcache"]);
        assert_eq!(cmd.to_string(), "bash gradlew classes --no-daemon -g gcache");
    }

    #[test]
    fn test_with_env_replaces_previous_value() {
        let cmd = ToolCommand::new("mvn")
            .with_env("JAVA_HOME", "/a")
            .with_env("JAVA_HOME", "/b");
        assert_eq!(cmd.env.len(), 1);
        assert_eq!(cmd.env_value("JAVA_HOME"), Some(&OsString::from("/b")));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_exit_code() {
        let runner = SystemRunner;
        assert!(runner.run(&ToolCommand::from_line("true")).is_ok());

        let err = runner.run(&ToolCommand::from_line("false")).unwrap_err();
        assert!(matches!(err, BuildError::CommandFailed { code: Some(1), .. }));
    }

    #[test]
    fn test_system_runner_reports_missing_program() {
        let err = SystemRunner
            .run(&ToolCommand::new("definitely-not-a-real-program-7f3a"))
            .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}
