//! Build descriptor discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::BuildError;

pub const MAVEN_DESCRIPTOR: &str = "pom.xml";
pub const GRADLE_DESCRIPTOR: &str = "gradlew";

/// Keep the paths closest to the root. Ties are all kept.
pub fn shallowest<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut best = Vec::new();
    let mut best_depth = usize::MAX;

    for path in paths {
        let depth = path.components().count();
        if depth > best_depth {
            continue;
        }
        if depth < best_depth {
            best_depth = depth;
            best.clear();
        }
        best.push(path);
    }

    best
}

/// Find files named `file_name` under `root`, keeping only the shallowest matches
pub fn find_descriptors(root: &Path, file_name: &str) -> Result<Vec<PathBuf>, BuildError> {
    let mut matches = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            BuildError::io(path, e.into())
        })?;
        if entry.file_type().is_file() && entry.file_name() == file_name {
            matches.push(entry.into_path());
        }
    }

    Ok(shallowest(matches))
}

/// Build system detected for a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildSystem {
    /// `pom.xml` files at the shallowest depth
    Maven(Vec<PathBuf>),
    /// `gradlew` scripts at the shallowest depth
    Gradle(Vec<PathBuf>),
    Unknown,
}

impl BuildSystem {
    /// Maven wins when both descriptor kinds are present
    pub fn detect(repo_dir: &Path) -> Result<Self, BuildError> {
        let poms = find_descriptors(repo_dir, MAVEN_DESCRIPTOR)?;
        if !poms.is_empty() {
            return Ok(BuildSystem::Maven(poms));
        }

        let gradlews = find_descriptors(repo_dir, GRADLE_DESCRIPTOR)?;
        if !gradlews.is_empty() {
            return Ok(BuildSystem::Gradle(gradlews));
        }

        Ok(BuildSystem::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_shallowest_keeps_all_ties() {
        let paths = vec![
            PathBuf::from("r/a/b/pom.xml"),
            PathBuf::from("r/x/pom.xml"),
            PathBuf::from("r/y/pom.xml"),
            PathBuf::from("r/x/z/w/pom.xml"),
        ];
        assert_eq!(
            shallowest(paths),
            vec![PathBuf::from("r/x/pom.xml"), PathBuf::from("r/y/pom.xml")]
        );
    }

    #[test]
    fn test_shallowest_resets_on_shallower_match() {
        let paths = vec![
            PathBuf::from("r/a/b/pom.xml"),
            PathBuf::from("r/c/d/pom.xml"),
            PathBuf::from("r/pom.xml"),
        ];
        assert_eq!(shallowest(paths), vec![PathBuf::from("r/pom.xml")]);
        assert!(shallowest(Vec::new()).is_empty());
    }

    #[test]
    fn test_detect_prefers_maven_at_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("core/sub")).unwrap();
        fs::write(root.join("pom.xml"), "").unwrap();
        fs::write(root.join("core/pom.xml"), "").unwrap();
        fs::write(root.join("core/sub/gradlew"), "").unwrap();

        assert_eq!(
            BuildSystem::detect(root).unwrap(),
            BuildSystem::Maven(vec![root.join("pom.xml")])
        );
    }

    #[test]
    fn test_detect_gradle_and_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        assert_eq!(BuildSystem::detect(root).unwrap(), BuildSystem::Unknown);

        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a/gradlew"), "").unwrap();
        fs::write(root.join("b/gradlew"), "").unwrap();

        assert_eq!(
            BuildSystem::detect(root).unwrap(),
            BuildSystem::Gradle(vec![root.join("a/gradlew"), root.join("b/gradlew")])
        );
    }
}
