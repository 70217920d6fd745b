//! Vector chart output.
//!
//! Renders a [`ChartModel`] as a standalone SVG page: grouped bars per
//! benchmark name, hatched optimized variants, grey missing bars, overflow
//! labels above the y limit and a legend.

use std::fmt::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};

use super::series::ChartModel;
use super::theme::MISSING;

/// Pixels per figure-size unit
const DPI: f64 = 100.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 120.0;
const GROUP_WIDTH: f64 = 0.8;
const OPACITY: f64 = 0.8;
const Y_LABEL: &str = "Average time (ms)";
const MISSING_LABEL: &str = "Missing optimization";

/// Maps data coordinates to page coordinates
struct Frame {
    x0: f64,
    x1: f64,
    y0: f64,
    y1: f64,
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Frame {
    fn x(&self, v: f64) -> f64 {
        self.x0 + (v - self.x_min) / (self.x_max - self.x_min) * (self.x1 - self.x0)
    }

    fn y(&self, v: f64) -> f64 {
        if self.y_max <= 0.0 {
            return self.y1;
        }
        self.y1 - v.clamp(0.0, self.y_max) / self.y_max * (self.y1 - self.y0)
    }
}

/// Render the chart as an SVG document
pub fn render_svg(model: &ChartModel, figsize: (u32, u32), title: &str) -> Result<String, fmt::Error> {
    let width = f64::from(figsize.0) * DPI;
    let height = f64::from(figsize.1) * DPI;
    let n = model.names.len();
    let m = model.series.len().max(1);
    let bar_width = GROUP_WIDTH / m as f64;

    let frame = Frame {
        x0: MARGIN_LEFT,
        x1: width - MARGIN_RIGHT,
        y0: MARGIN_TOP,
        y1: height - MARGIN_BOTTOM,
        x_min: -bar_width / 2.0 - 0.1,
        x_max: (n.max(1) - 1) as f64 + GROUP_WIDTH - bar_width / 2.0 + 0.1,
        y_max: model.y_max(),
    };

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif" font-size="12">"#
    )?;
    writeln!(out, "<title>{}</title>", escape(title))?;
    writeln!(
        out,
        r#"<defs><pattern id="hatch" patternUnits="userSpaceOnUse" width="8" height="8"><path d="M-2,2 l4,-4 M0,8 l8,-8 M6,10 l4,-4" stroke="black" stroke-width="1"/></pattern></defs>"#
    )?;
    writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

    draw_axes(&mut out, &frame)?;
    draw_bars(&mut out, model, &frame, bar_width)?;
    draw_names(&mut out, model, &frame, bar_width)?;
    draw_overflow(&mut out, model, &frame, bar_width)?;
    draw_legend(&mut out, model, &frame)?;

    writeln!(out, "</svg>")?;
    Ok(out)
}

/// Render and write the chart to `path`, creating parent directories
pub fn save_svg(model: &ChartModel, figsize: (u32, u32), title: &str, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {dir:?}"))?;
    }
    let svg = render_svg(model, figsize, title).context("Failed to render chart")?;
    std::fs::write(path, svg).with_context(|| format!("Failed to write chart: {path:?}"))
}

fn draw_axes(out: &mut String, frame: &Frame) -> fmt::Result {
    let step = nice_step(frame.y_max / 5.0);
    let mut tick = 0.0;
    while tick <= frame.y_max + step * 1e-9 {
        let y = frame.y(tick);
        writeln!(
            out,
            r##"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="#dddddd"/>"##,
            frame.x0, frame.x1
        )?;
        writeln!(
            out,
            r#"<text x="{}" y="{}" text-anchor="end">{}</text>"#,
            frame.x0 - 6.0,
            y + 4.0,
            format_tick(tick)
        )?;
        tick += step;
    }

    writeln!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="black"/>"#,
        frame.x0,
        frame.y0,
        frame.x1 - frame.x0,
        frame.y1 - frame.y0
    )?;

    let mid = (frame.y0 + frame.y1) / 2.0;
    writeln!(
        out,
        r#"<text x="20" y="{mid}" text-anchor="middle" transform="rotate(-90 20 {mid})">{Y_LABEL}</text>"#
    )
}

fn draw_bars(out: &mut String, model: &ChartModel, frame: &Frame, bar_width: f64) -> fmt::Result {
    for (i, series) in model.series.iter().enumerate() {
        for (j, bar) in series.bars.iter().enumerate() {
            let center = j as f64 + i as f64 * bar_width;
            let left = frame.x(center - bar_width / 2.0);
            let right = frame.x(center + bar_width / 2.0);
            let top = frame.y(bar.height);
            let color = if bar.missing { MISSING } else { series.color };

            writeln!(
                out,
                r#"<rect x="{left:.2}" y="{top:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{OPACITY}" stroke="black"/>"#,
                right - left,
                frame.y1 - top,
                color.hex()
            )?;
            if series.hatched {
                writeln!(
                    out,
                    r#"<rect x="{left:.2}" y="{top:.2}" width="{:.2}" height="{:.2}" fill="url(#hatch)"/>"#,
                    right - left,
                    frame.y1 - top
                )?;
            }
        }
    }
    Ok(())
}

fn draw_names(out: &mut String, model: &ChartModel, frame: &Frame, bar_width: f64) -> fmt::Result {
    let offset = (model.series.len().max(1) - 1) as f64 / 2.0 * bar_width;
    let y = frame.y1 + 14.0;
    for (j, name) in model.names.iter().enumerate() {
        let x = frame.x(j as f64 + offset);
        writeln!(
            out,
            r#"<text x="{x:.2}" y="{y}" text-anchor="end" transform="rotate(-30 {x:.2} {y})">{}</text>"#,
            escape(name)
        )?;
    }
    Ok(())
}

fn draw_overflow(out: &mut String, model: &ChartModel, frame: &Frame, bar_width: f64) -> fmt::Result {
    let y = frame.y0 - 4.0;
    for label in model.overflow_labels() {
        let x = frame.x(label.bar as f64 + label.series as f64 * bar_width);
        writeln!(
            out,
            r#"<text x="{x:.2}" y="{y}" text-anchor="start" transform="rotate(-30 {x:.2} {y})">{}</text>"#,
            label.text
        )?;
    }
    Ok(())
}

fn draw_legend(out: &mut String, model: &ChartModel, frame: &Frame) -> fmt::Result {
    let mut entries: Vec<(String, String, bool)> = model
        .series
        .iter()
        .map(|s| (s.label.clone(), s.color.hex(), s.hatched))
        .collect();
    if model.any_missing() {
        entries.push((MISSING_LABEL.to_string(), MISSING.hex(), true));
    }

    let row = 18.0;
    let box_width = 190.0;
    let left = frame.x1 - box_width - 10.0;
    let top = frame.y0 + 10.0;
    writeln!(
        out,
        r##"<rect x="{left}" y="{top}" width="{box_width}" height="{}" fill="white" fill-opacity="0.8" stroke="#cccccc"/>"##,
        entries.len() as f64 * row + 8.0
    )?;

    for (k, (label, color, hatched)) in entries.iter().enumerate() {
        let y = top + 6.0 + k as f64 * row;
        writeln!(
            out,
            r#"<rect x="{}" y="{y}" width="24" height="12" fill="{color}" fill-opacity="{OPACITY}" stroke="black"/>"#,
            left + 8.0
        )?;
        if *hatched {
            writeln!(
                out,
                r#"<rect x="{}" y="{y}" width="24" height="12" fill="url(#hatch)"/>"#,
                left + 8.0
            )?;
        }
        writeln!(
            out,
            r#"<text x="{}" y="{}">{}</text>"#,
            left + 40.0,
            y + 10.0,
            escape(label)
        )?;
    }
    Ok(())
}

/// Round a raw tick spacing up to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        let s = format!("{value:.3}");
        s.trim_end_matches('0').to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
