//! Grouped bar chart widget for the terminal viewer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::series::ChartModel;
use super::theme::{Theme, MISSING};

/// Bar values are integers, scores are kept to three decimals
const VALUE_SCALE: f64 = 1000.0;

/// Terminal rendering of a [`ChartModel`]
pub struct BenchmarkChart<'a> {
    model: &'a ChartModel,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> BenchmarkChart<'a> {
    pub fn new(model: &'a ChartModel, title: &'a str, theme: &'a Theme) -> Self {
        BenchmarkChart {
            model,
            title,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title_style(self.theme.title_style());

        if self.model.names.is_empty() || self.model.series.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let message = Paragraph::new("No data available")
                .style(Style::default().add_modifier(Modifier::DIM))
                .alignment(Alignment::Center);
            frame.render_widget(message, inner);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Bars
                Constraint::Length(3), // Legend and cut-off values
            ])
            .split(area);

        let mut chart = BarChart::default()
            .block(block)
            .bar_width(3)
            .bar_gap(0)
            .group_gap(2);
        if let Some(limit) = self.model.y_limit {
            chart = chart.max(scaled(limit));
        }

        for (j, name) in self.model.names.iter().enumerate() {
            let bars: Vec<Bar> = self
                .model
                .series
                .iter()
                .map(|series| {
                    let bar = &series.bars[j];
                    let color = if bar.missing { MISSING } else { series.color };
                    Bar::default()
                        .value(scaled(bar.height))
                        .text_value(format_value(bar.height))
                        .style(Style::default().fg(color.into()))
                        .value_style(Style::default().fg(color.into()).add_modifier(Modifier::REVERSED))
                })
                .collect();
            chart = chart.data(BarGroup::default().label(Line::from(name.as_str())).bars(&bars));
        }

        frame.render_widget(chart, chunks[0]);
        self.render_legend(frame, chunks[1]);
    }

    fn render_legend(&self, frame: &mut Frame, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        for series in &self.model.series {
            let symbol = if series.hatched { "▒▒ " } else { "██ " };
            spans.push(Span::styled(symbol, Style::default().fg(series.color.into())));
            spans.push(Span::styled(format!("{}   ", series.label), self.theme.normal_style()));
        }
        if self.model.any_missing() {
            spans.push(Span::styled("▒▒ ", Style::default().fg(MISSING.into())));
            spans.push(Span::styled("Missing optimization", self.theme.normal_style()));
        }

        let mut lines = vec![Line::from(spans)];

        let overflow = self.model.overflow_labels();
        if !overflow.is_empty() {
            let cut: Vec<String> = overflow
                .iter()
                .map(|l| {
                    format!(
                        "{}/{} {}",
                        self.model.series[l.series].label, self.model.names[l.bar], l.text
                    )
                })
                .collect();
            lines.push(Line::from(Span::styled(
                format!("Cut off: {}", cut.join(", ")),
                self.theme.warning_style(),
            )));
        }
        lines.push(Line::from(Span::styled(
            "q: quit",
            Style::default().add_modifier(Modifier::DIM),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }
}

fn scaled(value: f64) -> u64 {
    (value.max(0.0) * VALUE_SCALE).round() as u64
}

/// Format a score for display above a bar
fn format_value(value: f64) -> String {
    if value >= 1000.0 {
        format!("{:.0}", value)
    } else if value >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}
