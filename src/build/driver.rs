//! Clone, pin and compile every repository of a manifest.
//!
//! Progress is tracked with two empty marker files at the repository root:
//! - `.built`: sources compiled
//! - `.libs`: dependency jars copied (or not needed)
//!
//! A repository with both markers is skipped. The first failure aborts the
//! whole run.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use super::command::{CommandRunner, ToolCommand};
use super::descriptor::BuildSystem;
use super::error::BuildError;
use super::manifest::ManifestEntry;
use super::runtime::{run_with_runtimes, RuntimeEnv};

pub const BUILT_MARKER: &str = ".built";
pub const LIBS_MARKER: &str = ".libs";

/// Directory (relative to the repository) receiving copied dependency jars
const LIBS_DIR: &str = "libs";

const MAVEN_COMPILE: &str = "mvn compile";
const MAVEN_INSTALL: &str = "mvn install -DskipTests";
const GRADLE_CLASSES: &str = "bash gradlew classes --no-daemon -g gcache";

/// What happened to a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AlreadyBuilt,
    Built,
}

/// Drives clone and build for a list of repositories
pub struct Driver<'a> {
    runner: &'a dyn CommandRunner,
    runtimes: &'a [RuntimeEnv],
    repos_dir: PathBuf,
}

impl<'a> Driver<'a> {
    pub fn new(runner: &'a dyn CommandRunner, runtimes: &'a [RuntimeEnv], repos_dir: PathBuf) -> Self {
        Driver {
            runner,
            runtimes,
            repos_dir,
        }
    }

    /// Process every entry in order, stopping at the first error
    pub fn run(&self, entries: &[ManifestEntry]) -> Result<(), BuildError> {
        fs::create_dir_all(&self.repos_dir).map_err(|e| BuildError::io(&self.repos_dir, e))?;

        for entry in entries {
            self.process(entry)?;
        }
        Ok(())
    }

    /// Fetch and build a single repository
    pub fn process(&self, entry: &ManifestEntry) -> Result<Outcome, BuildError> {
        let name = entry.repo_name();
        let repo_dir = self.repos_dir.join(name);
        info!(repo = name, "processing");
        // command lines carry the path as text
        utf8_path(&repo_dir)?;

        if !repo_dir.exists() {
            self.fetch(entry, &repo_dir)?;
        }

        let built = repo_dir.join(BUILT_MARKER);
        let libs = repo_dir.join(LIBS_MARKER);
        if built.exists() && libs.exists() {
            info!(repo = name, "already built, skipping");
            return Ok(Outcome::AlreadyBuilt);
        }

        let system = BuildSystem::detect(&repo_dir)?;

        if !built.exists() {
            self.compile(&system, &repo_dir, &libs)?;
            touch(&built)?;
        }

        if !libs.exists() {
            self.copy_dependencies(&system, &repo_dir)?;
            touch(&libs)?;
        }

        Ok(Outcome::Built)
    }

    fn fetch(&self, entry: &ManifestEntry, repo_dir: &Path) -> Result<(), BuildError> {
        info!(url = %entry.url, revision = %entry.revision, "cloning");

        self.runner.run(
            &ToolCommand::new("git")
                .arg("clone")
                .arg(entry.url.as_str())
                .arg(utf8_path(repo_dir)?),
        )?;
        self.runner.run(
            &ToolCommand::new("git")
                .arg("checkout")
                .arg(entry.revision.as_str())
                .in_dir(repo_dir),
        )?;

        let gitignore = repo_dir.join(".gitignore");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&gitignore)
            .map_err(|e| BuildError::io(&gitignore, e))?;
        writeln!(file, "{BUILT_MARKER}\n{LIBS_MARKER}").map_err(|e| BuildError::io(&gitignore, e))
    }

    fn compile(&self, system: &BuildSystem, repo_dir: &Path, libs: &Path) -> Result<(), BuildError> {
        match system {
            BuildSystem::Maven(poms) => {
                for pom in poms {
                    info!(descriptor = ?pom, "building");
                    self.build_step(MAVEN_COMPILE, pom)?;
                }
            }
            BuildSystem::Gradle(gradlews) => {
                for gradlew in gradlews {
                    info!(descriptor = ?gradlew, "building");
                    self.build_step(GRADLE_CLASSES, gradlew)?;
                }
                // gradle leaves classes in place, nothing to copy
                touch(libs)?;
            }
            BuildSystem::Unknown => return Err(unknown_build_system(repo_dir)),
        }
        Ok(())
    }

    fn copy_dependencies(&self, system: &BuildSystem, repo_dir: &Path) -> Result<(), BuildError> {
        match system {
            BuildSystem::Maven(poms) => {
                let lib_dir = std::path::absolute(repo_dir.join(LIBS_DIR))
                    .map_err(|e| BuildError::io(repo_dir, e))?;
                let copy = format!(
                    "mvn dependency:copy-dependencies -DoutputDirectory={}",
                    lib_dir.display()
                );

                for pom in poms {
                    info!(descriptor = ?pom, "copying jars");
                    self.build_step(MAVEN_INSTALL, pom)?;
                    self.build_step(&copy, pom)?;
                }
                Ok(())
            }
            BuildSystem::Gradle(_) => Err(BuildError::GradleDependencyCopyUnsupported {
                repo: repo_dir.to_path_buf(),
            }),
            BuildSystem::Unknown => Err(unknown_build_system(repo_dir)),
        }
    }

    /// Run a build tool command in the descriptor's directory
    fn build_step(&self, line: &str, descriptor: &Path) -> Result<(), BuildError> {
        let dir = descriptor.parent().unwrap_or(descriptor);
        let command = ToolCommand::from_line(line).in_dir(dir);
        run_with_runtimes(self.runner, &command, self.runtimes).map(|_| ())
    }
}

fn utf8_path(path: &Path) -> Result<&str, BuildError> {
    path.to_str().ok_or_else(|| BuildError::NonUtf8Path {
        path: path.to_path_buf(),
    })
}

fn touch(path: &Path) -> Result<(), BuildError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| BuildError::io(path, e))
}

fn unknown_build_system(repo_dir: &Path) -> BuildError {
    let mut entries: Vec<String> = fs::read_dir(repo_dir)
        .map(|rd| {
            rd.flatten()
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    entries.sort();

    BuildError::UnknownBuildSystem {
        repo: repo_dir.to_path_buf(),
        entries,
    }
}
