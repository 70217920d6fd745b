//! Backend independent bar chart model.
//!
//! One series per benchmark group, one bar per benchmark name. Bars without
//! a measurement borrow the height of the previous group's bar so the slot
//! is still visible, and are flagged as missing.

use crate::data::{base_group, display_label, is_optimized, score_of, BenchmarkSet, PlotError};

use super::theme::{Rgb, Theme, OPTIMIZED_DARKEN};

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub name: String,
    pub height: f64,
    pub missing: bool,
}

/// Bars of one benchmark group
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub group: String,
    pub label: String,
    pub color: Rgb,
    /// Optimized variants are drawn hatched
    pub hatched: bool,
    pub bars: Vec<Bar>,
}

/// Value printed above a bar that is cut off by the y limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowLabel {
    pub series: usize,
    pub bar: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ChartModel {
    pub names: Vec<String>,
    pub series: Vec<Series>,
    pub y_limit: Option<f64>,
}

impl ChartModel {
    pub fn build(set: &BenchmarkSet, theme: &Theme, y_limit: Option<f64>) -> Result<Self, PlotError> {
        let names = set.benchmark_names();
        let groups = set.ordered_groups()?;
        let mut series: Vec<Series> = Vec::with_capacity(groups.len());
        let mut next_color = 0;

        for (i, (group, scores)) in groups.iter().enumerate() {
            let hatched = is_optimized(group);
            let base_color = series
                .iter()
                .find(|s| hatched && s.group == base_group(group))
                .map(|s| s.color);

            let color = match base_color {
                Some(c) => c.darken(OPTIMIZED_DARKEN),
                None => {
                    let c = theme.bar_color(next_color);
                    next_color += 1;
                    if hatched {
                        c.darken(OPTIMIZED_DARKEN)
                    } else {
                        c
                    }
                }
            };

            // the first group wraps around to the last one
            let (_, previous) = groups[(i + groups.len() - 1) % groups.len()];
            let bars = names
                .iter()
                .map(|name| match score_of(scores, name) {
                    Some(height) => Bar {
                        name: name.clone(),
                        height,
                        missing: false,
                    },
                    None => Bar {
                        name: name.clone(),
                        height: score_of(previous, name).unwrap_or(0.0),
                        missing: true,
                    },
                })
                .collect();

            series.push(Series {
                group: group.to_string(),
                label: display_label(group),
                color,
                hatched,
                bars,
            });
        }

        Ok(ChartModel {
            names,
            series,
            y_limit: y_limit.filter(|&y| y > 0.0),
        })
    }

    /// Whether the legend needs a "Missing optimization" entry
    pub fn any_missing(&self) -> bool {
        self.series
            .iter()
            .any(|s| s.bars.iter().any(|b| b.missing))
    }

    /// Top of the value axis
    pub fn y_max(&self) -> f64 {
        if let Some(limit) = self.y_limit {
            return limit;
        }
        let tallest = self
            .series
            .iter()
            .flat_map(|s| s.bars.iter().map(|b| b.height))
            .fold(0.0, f64::max);
        if tallest > 0.0 {
            tallest * 1.05
        } else {
            1.0
        }
    }

    /// Labels for non-optimized bars reaching the y limit
    pub fn overflow_labels(&self) -> Vec<OverflowLabel> {
        let Some(limit) = self.y_limit else {
            return Vec::new();
        };

        let mut labels = Vec::new();
        for (si, series) in self.series.iter().enumerate() {
            if series.hatched {
                continue;
            }
            for (bi, bar) in series.bars.iter().enumerate() {
                if bar.height >= limit {
                    labels.push(OverflowLabel {
                        series: si,
                        bar: bi,
                        text: format!("{}", bar.height as i64),
                    });
                }
            }
        }
        labels
    }
}
