//! Plain text score table.

use comfy_table::{presets, CellAlignment, Table};

use crate::data::{score_of, BenchmarkSet, PlotError, VmInfo};

/// Header line naming the JVM the results came from
pub fn render_vm_line(vm: Option<&VmInfo>) -> String {
    match vm {
        Some(vm) => format!("VM: {} {}", vm.name, vm.version),
        None => "Unknown VM?".to_string(),
    }
}

/// One row per group, one column per benchmark name.
/// Missing scores are shown as `inf`.
pub fn render_table(set: &BenchmarkSet) -> Result<String, PlotError> {
    let names = set.benchmark_names();
    let groups = set.ordered_groups()?;

    let mut table = Table::new();
    table.load_preset(presets::ASCII_MARKDOWN);

    let mut header = vec!["Group".to_string()];
    header.extend(names.iter().cloned());
    table.set_header(header);

    for (group, scores) in &groups {
        let mut row = vec![group.to_string()];
        row.extend(names.iter().map(|name| {
            let value = score_of(scores, name).unwrap_or(f64::INFINITY);
            format!("{value:.3}")
        }));
        table.add_row(row);
    }

    // score columns, the group column stays left aligned
    for index in 1..=names.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    Ok(table.to_string())
}
