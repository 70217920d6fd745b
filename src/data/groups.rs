//! Benchmark group naming and ordering.

use super::error::PlotError;

/// Display order of the benchmark groups
pub const GROUP_ORDER: [&str; 7] = [
    "TestBaseline",
    "TestStream",
    "TestStreamOpt",
    "TestPush",
    "TestPushOpt",
    "TestPull",
    "TestPullOpt",
];

const GROUP_PREFIX: &str = "Test";
const OPTIMIZED_SUFFIX: &str = "Opt";

/// Rename groups from old result files to their current names
pub fn normalize_group(group: &str) -> String {
    group.replace("Java8", "Stream").replace("Inline", "Opt")
}

/// Position of `group` in [`GROUP_ORDER`]
pub fn group_rank(group: &str) -> Result<usize, PlotError> {
    GROUP_ORDER
        .iter()
        .position(|g| *g == group)
        .ok_or_else(|| PlotError::UnknownGroup(group.to_string()))
}

pub fn is_optimized(group: &str) -> bool {
    group.contains(OPTIMIZED_SUFFIX)
}

/// Group an optimized variant belongs to (`TestPushOpt` -> `TestPush`)
pub fn base_group(group: &str) -> &str {
    group.strip_suffix(OPTIMIZED_SUFFIX).unwrap_or(group)
}

/// Legend label (`TestPushOpt` -> `Push optimized`)
pub fn display_label(group: &str) -> String {
    let name = group.strip_prefix(GROUP_PREFIX).unwrap_or(group);
    name.replace(OPTIMIZED_SUFFIX, " optimized")
}
