//! Repository manifest: one `URL REVISION` pair per line.

use super::error::BuildError;

/// A repository pinned to a revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub url: String,
    pub revision: String,
}

impl ManifestEntry {
    /// Local directory name, derived from the last URL segment
    pub fn repo_name(&self) -> &str {
        let trimmed = self.url.trim_end_matches('/');
        let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
        last.strip_suffix(".git").unwrap_or(last)
    }
}

/// Parse manifest text. Blank lines and `#` comments are skipped.
pub fn parse_manifest(text: &str) -> Result<Vec<ManifestEntry>, BuildError> {
    let mut entries = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [url, revision] => entries.push(ManifestEntry {
                url: url.to_string(),
                revision: revision.to_string(),
            }),
            _ => {
                return Err(BuildError::Manifest {
                    line: idx + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    Ok(entries)
}
