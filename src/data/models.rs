//! Data models for benchmark results.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::error::PlotError;
use super::groups::group_rank;

/// Scores of one group, keyed by benchmark name. `None` means not measured.
pub type GroupScores = BTreeMap<String, Option<f64>>;

/// How a literal `0` score in the input is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroPolicy {
    /// Zero is the harness's "not measured" marker
    #[default]
    Missing,
    /// Zero is a real measurement
    Keep,
}

/// One entry of a JMH result file, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawBenchmark {
    pub benchmark: Option<String>,
    pub primary_metric: Option<serde_json::Map<String, serde_json::Value>>,
    pub vm_name: Option<String>,
    pub vm_version: Option<String>,
}

/// A validated benchmark measurement
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    pub group: String,
    pub name: String,
    pub score: Option<f64>,
}

impl BenchmarkRecord {
    /// Validate a raw entry. Group and name are the last two components of
    /// the dotted benchmark identifier.
    pub(crate) fn from_raw(raw: &RawBenchmark, zero: ZeroPolicy) -> Result<Self, String> {
        let id = raw
            .benchmark
            .as_deref()
            .ok_or("missing \"benchmark\" identifier")?;

        let mut parts = id.rsplit('.');
        let (name, group) = match (parts.next(), parts.next()) {
            (Some(name), Some(group)) if !name.is_empty() && !group.is_empty() => (name, group),
            _ => return Err(format!("benchmark identifier {id:?} has no group component")),
        };

        let metric = raw
            .primary_metric
            .as_ref()
            .ok_or("missing \"primaryMetric\" object")?;

        let score = match metric.get("score") {
            None => return Err("missing \"primaryMetric.score\"".to_string()),
            Some(serde_json::Value::Null) => None,
            Some(value) => {
                let v = value
                    .as_f64()
                    .ok_or_else(|| format!("score {value} is not a number"))?;
                match zero {
                    ZeroPolicy::Missing if v == 0.0 => None,
                    _ => Some(v),
                }
            }
        };

        Ok(BenchmarkRecord {
            group: group.to_string(),
            name: name.to_string(),
            score,
        })
    }
}

/// JVM that produced the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmInfo {
    pub name: String,
    pub version: String,
}

impl VmInfo {
    pub(crate) fn from_raw(raw: &RawBenchmark) -> Option<Self> {
        Some(VmInfo {
            name: raw.vm_name.clone()?,
            version: raw.vm_version.clone()?,
        })
    }
}

/// Scores aggregated by group then benchmark name
#[derive(Debug, Clone, Default)]
pub struct BenchmarkSet {
    pub groups: BTreeMap<String, GroupScores>,
    pub vm: Option<VmInfo>,
}

impl BenchmarkSet {
    pub fn insert(&mut self, record: BenchmarkRecord) {
        self.groups
            .entry(record.group)
            .or_default()
            .insert(record.name, record.score);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sorted benchmark names, taken from one group.
    /// All groups are expected to share the same names.
    pub fn benchmark_names(&self) -> Vec<String> {
        self.groups
            .values()
            .next()
            .map(|scores| scores.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Groups in display order
    pub fn ordered_groups(&self) -> Result<Vec<(&str, &GroupScores)>, PlotError> {
        let mut ranked = self
            .groups
            .iter()
            .map(|(group, scores)| Ok((group_rank(group)?, group.as_str(), scores)))
            .collect::<Result<Vec<_>, PlotError>>()?;
        ranked.sort_by_key(|(rank, _, _)| *rank);

        Ok(ranked
            .into_iter()
            .map(|(_, group, scores)| (group, scores))
            .collect())
    }
}

/// Score of `name` in a group, `None` when absent or not measured
pub fn score_of(scores: &GroupScores, name: &str) -> Option<f64> {
    scores.get(name).copied().flatten()
}
