//! Rendering of benchmark results: text table, terminal chart and vector file.

mod chart;
mod series;
mod svg;
mod table;
mod theme;

pub use chart::BenchmarkChart;
pub use series::ChartModel;
pub use svg::save_svg;
pub use table::{render_table, render_vm_line};
pub use theme::Theme;
