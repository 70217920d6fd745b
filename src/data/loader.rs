//! Loading JMH result files.
//!
//! Each file is a JSON array of objects like
//! `{"benchmark": "pkg.TestPush.sum", "primaryMetric": {"score": 12.5}, "vmName": ..., "vmVersion": ...}`.
//! Records from later files overwrite earlier ones with the same group and name.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::PlotError;
use super::filter::BenchmarkFilter;
use super::groups::normalize_group;
use super::models::{BenchmarkRecord, BenchmarkSet, RawBenchmark, VmInfo, ZeroPolicy};

/// Load, validate, filter and merge every result file
pub fn load_results(
    files: &[PathBuf],
    filter: &BenchmarkFilter,
    zero: ZeroPolicy,
) -> Result<BenchmarkSet, PlotError> {
    let mut set = BenchmarkSet::default();

    for file in files {
        let entries = read_entries(file)?;
        debug!(file = ?file, entries = entries.len(), "loaded results");

        // VM details come from the first entry of the last file read
        set.vm = entries.first().and_then(VmInfo::from_raw);

        for (index, raw) in entries.iter().enumerate() {
            let mut record = BenchmarkRecord::from_raw(raw, zero).map_err(|reason| {
                PlotError::MalformedRecord {
                    path: file.clone(),
                    index,
                    reason,
                }
            })?;
            record.group = normalize_group(&record.group);

            if filter.keeps(&record.group, &record.name) {
                set.insert(record);
            }
        }
    }

    if set.is_empty() {
        return Err(PlotError::NoData);
    }
    Ok(set)
}

fn read_entries(path: &Path) -> Result<Vec<RawBenchmark>, PlotError> {
    if !path.exists() {
        return Err(PlotError::MissingFile(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values: Vec<serde_json::Value> =
        serde_json::from_str(&text).map_err(|source| PlotError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    // Entries are decoded one by one so a bad one can be reported by position
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|e| PlotError::MalformedRecord {
                path: path.to_path_buf(),
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(dir: &Path, name: &str, json: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_load_missing_score_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(
            dir.path(),
            "out.json",
            r#"[{"benchmark":"x.y.TestBaseline.a","primaryMetric":{"score":0}},
                {"benchmark":"x.y.TestPush.a","primaryMetric":{"score":12.5}}]"#,
        );

        let set = load_results(&[file], &BenchmarkFilter::default(), ZeroPolicy::Missing).unwrap();
        assert_eq!(set.groups["TestBaseline"]["a"], None);
        assert_eq!(set.groups["TestPush"]["a"], Some(12.5));
        assert_eq!(set.vm, None);
    }

    #[test]
    fn test_legacy_groups_renamed_before_filtering() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(
            dir.path(),
            "old.json",
            r#"[{"benchmark":"b.TestJava8.sum","primaryMetric":{"score":3.0},"vmName":"OpenJDK 64-Bit Server VM","vmVersion":"13.0.1"},
                {"benchmark":"b.TestPushInline.sum","primaryMetric":{"score":1.0}}]"#,
        );
        let filter = BenchmarkFilter {
            include_groups: vec!["TestStream".to_string(), "TestPushOpt".to_string()],
            ..Default::default()
        };

        let set = load_results(&[file], &filter, ZeroPolicy::Missing).unwrap();
        let groups: Vec<&str> = set.groups.keys().map(String::as_str).collect();
        assert_eq!(groups, ["TestPushOpt", "TestStream"]);
        assert_eq!(
            set.vm,
            Some(VmInfo {
                name: "OpenJDK 64-Bit Server VM".to_string(),
                version: "13.0.1".to_string(),
            })
        );
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let first = write(dir.path(), "a.json", r#"[{"benchmark":"b.TestPull.sum","primaryMetric":{"score":1.0}}]"#);
        let second = write(dir.path(), "b.json", r#"[{"benchmark":"b.TestPull.sum","primaryMetric":{"score":2.0}}]"#);

        let set = load_results(&[first, second], &BenchmarkFilter::default(), ZeroPolicy::Missing).unwrap();
        assert_eq!(set.groups["TestPull"]["sum"], Some(2.0));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            load_results(&[missing], &BenchmarkFilter::default(), ZeroPolicy::Missing),
            Err(PlotError::MissingFile(_))
        ));

        let not_json = write(dir.path(), "bad.json", "not json");
        assert!(matches!(
            load_results(&[not_json], &BenchmarkFilter::default(), ZeroPolicy::Missing),
            Err(PlotError::Json { .. })
        ));

        let malformed = write(
            dir.path(),
            "malformed.json",
            r#"[{"benchmark":"b.TestPull.sum","primaryMetric":{"score":1.0}}, {"primaryMetric":{"score":1.0}}]"#,
        );
        assert!(matches!(
            load_results(&[malformed], &BenchmarkFilter::default(), ZeroPolicy::Missing),
            Err(PlotError::MalformedRecord { index: 1, .. })
        ));

        let filtered = write(dir.path(), "ok.json", r#"[{"benchmark":"b.TestPull.sum","primaryMetric":{"score":1.0}}]"#);
        let filter = BenchmarkFilter {
            exclude: vec!["sum".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            load_results(&[filtered], &filter, ZeroPolicy::Missing),
            Err(PlotError::NoData)
        ));
    }
}
