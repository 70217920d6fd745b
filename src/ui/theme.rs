//! Colors shared by the terminal chart and the vector output.

use ratatui::style::{Color, Modifier, Style};

/// An RGB color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Rgb { r, g, b }
    }

    fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Rgb::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Darker shade used for optimized variants
    pub fn darken(self, amount: f64) -> Self {
        Rgb::new(
            (self.r - amount).max(0.0),
            (self.g - amount).max(0.0),
            (self.b - amount).max(0.0),
        )
    }

    fn channel(v: f64) -> u8 {
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// `#rrggbb`
    pub fn hex(self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            Self::channel(self.r),
            Self::channel(self.g),
            Self::channel(self.b)
        )
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(Rgb::channel(c.r), Rgb::channel(c.g), Rgb::channel(c.b))
    }
}

/// How much darker an optimized variant is than its base group
pub const OPTIMIZED_DARKEN: f64 = 0.2;

/// Color of bars without a measurement
pub const MISSING: Rgb = Rgb::new(0.5, 0.5, 0.5);

/// Color theme for the charts
#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub border: Color,
    pub title: Color,
    pub warning: Color,
    pub bar_colors: Vec<Rgb>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            fg: Color::White,
            border: Color::Rgb(100, 100, 120),
            title: Color::Cyan,
            warning: Color::Yellow,
            // the usual ten-color categorical cycle
            bar_colors: vec![
                Rgb::from_u8(0x1f, 0x77, 0xb4),
                Rgb::from_u8(0xff, 0x7f, 0x0e),
                Rgb::from_u8(0x2c, 0xa0, 0x2c),
                Rgb::from_u8(0xd6, 0x27, 0x28),
                Rgb::from_u8(0x94, 0x67, 0xbd),
                Rgb::from_u8(0x8c, 0x56, 0x4b),
                Rgb::from_u8(0xe3, 0x77, 0xc2),
                Rgb::from_u8(0x7f, 0x7f, 0x7f),
                Rgb::from_u8(0xbc, 0xbd, 0x22),
                Rgb::from_u8(0x17, 0xbe, 0xcf),
            ],
        }
    }
}

impl Theme {
    /// Get style for normal text
    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get style for titles
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Get a bar color by index (cycles through available colors)
    pub fn bar_color(&self, index: usize) -> Rgb {
        self.bar_colors[index % self.bar_colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_colors_are_distinct() {
        let theme = Theme::default();
        let c0 = theme.bar_color(0);
        let c1 = theme.bar_color(1);
        let c2 = theme.bar_color(2);
        assert_ne!(c0, c1, "Colors 0 and 1 should be different");
        assert_ne!(c1, c2, "Colors 1 and 2 should be different");
        assert_ne!(c0, c2, "Colors 0 and 2 should be different");
    }

    #[test]
    fn test_bar_color_cycles() {
        let theme = Theme::default();
        let len = theme.bar_colors.len();
        assert_eq!(theme.bar_color(0), theme.bar_color(len));
        assert_eq!(theme.bar_color(1), theme.bar_color(len + 1));
    }

    #[test]
    fn test_darken_clamps_at_zero() {
        let c = Rgb::new(0.1, 0.5, 1.0).darken(OPTIMIZED_DARKEN);
        assert_eq!(c.r, 0.0);
        assert!((c.g - 0.3).abs() < 1e-9);
        assert!((c.b - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_hex() {
        assert_eq!(MISSING.hex(), "#808080");
        assert_eq!(Rgb::new(1.0, 0.0, 0.0).hex(), "#ff0000");
        assert_eq!(Color::from(Rgb::new(0.0, 1.0, 0.0)), Color::Rgb(0, 255, 0));
    }
}
