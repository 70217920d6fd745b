//! Interactive terminal chart viewer.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ui::{BenchmarkChart, ChartModel, Theme};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Viewer state
pub struct App<'a> {
    model: &'a ChartModel,
    title: &'a str,
    theme: &'a Theme,
    should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(model: &'a ChartModel, title: &'a str, theme: &'a Theme) -> Self {
        App {
            model,
            title,
            theme,
            should_quit: false,
        }
    }

    /// Handle keyboard input
    fn handle_input(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        BenchmarkChart::new(self.model, self.title, self.theme).render(frame, area);
    }
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup - ignore errors since we may be in a panic
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Show the chart until the user quits
pub fn run(model: &ChartModel, title: &str, theme: &Theme) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    let mut app = App::new(model, title, theme);
    let result = run_main_loop(&mut terminal, &mut app);

    // Always restore terminal, regardless of result
    restore_terminal();
    terminal.show_cursor().ok();

    result
}

fn run_main_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_input(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
