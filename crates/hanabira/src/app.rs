//! The terminal application: a page with the effect overlay on top.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hanabira_config::Config;
use hanabira_core::{EffectsConfig, Viewport};
use hanabira_effects::{CanvasProvider, EffectOrchestrator, Host, Overlay, Rgba};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph},
};

/// Logical pixels per terminal column.
pub const CELL_WIDTH: f32 = 8.0;

/// Logical pixels per terminal row.
pub const CELL_HEIGHT: f32 = 16.0;

/// Logical pixels per raster pixel. A cell holds one column of two pixels.
const RASTER_SCALE: f32 = 8.0;

/// Settings resolved from the config files and the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub effects: Option<EffectsConfig>,
    pub seed: u64,
    pub title: String,
    pub backdrop: [u8; 3],
}

impl Settings {
    /// Merge the sources. Effect switches come from the first of the command
    /// line, the site config and the user config that provides any.
    pub fn resolve(
        config: Config,
        site_effects: Option<EffectsConfig>,
        cli_effects: Option<EffectsConfig>,
        cli_seed: Option<u64>,
    ) -> Self {
        Self {
            effects: cli_effects.or(site_effects).or(config.effects),
            seed: cli_seed.or(config.seed).unwrap_or_else(init_seed),
            title: config.title,
            backdrop: config.backdrop,
        }
    }
}

/// Seed from the system clock for runs without a fixed seed.
fn init_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Viewport in logical pixels for a terminal of `cols` x `rows` cells.
pub fn viewport_for(cols: u16, rows: u16) -> Viewport {
    Viewport::new(f32::from(cols) * CELL_WIDTH, f32::from(rows) * CELL_HEIGHT)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    host: Host,
    orchestrator: EffectOrchestrator<CanvasProvider>,
    started: Instant,
    effects: Option<EffectsConfig>,
    title: String,
    backdrop: [u8; 3],
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of the given size.
    pub fn new(settings: Settings, cols: u16, rows: u16) -> Self {
        let orchestrator = EffectOrchestrator::new(
            settings.effects,
            CanvasProvider::new(RASTER_SCALE),
            settings.seed,
        );
        Self {
            running: false,
            host: Host::new(viewport_for(cols, rows)),
            orchestrator,
            started: Instant::now(),
            effects: settings.effects,
            title: settings.title,
            backdrop: settings.backdrop,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.orchestrator.mount(&mut self.host);
        while self.running {
            let now = self.elapsed_ms();
            self.orchestrator.pump(&mut self.host, now);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.orchestrator.unmount(&mut self.host);
        Ok(())
    }

    fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn backdrop_color(&self) -> Color {
        let [r, g, b] = self.backdrop;
        Color::Rgb(r, g, b)
    }

    /// Renders the page, then the effect overlay on top of it.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let backdrop = self.backdrop_color();
        frame.render_widget(Block::new().style(Style::new().bg(backdrop)), area);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Active effects
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let title = Paragraph::new(self.title.as_str().bold())
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let active = Paragraph::new(effects_summary(self.effects).dark_gray())
            .alignment(Alignment::Center);
        frame.render_widget(active, chunks[3]);

        let help = Line::from(vec!["q".bold(), " quit".dark_gray()]).centered();
        frame.render_widget(help, chunks[5]);

        let [r, g, b] = self.backdrop;
        let overlay = Overlay::new(
            self.orchestrator
                .controllers()
                .iter()
                .filter_map(|controller| controller.surface()),
            Rgba::rgb(r, g, b),
        );
        frame.render_widget(overlay, area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls at roughly the display refresh rate so frames keep coming.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => {
                    self.orchestrator
                        .resize(&mut self.host, viewport_for(cols, rows));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// One-line description of the enabled effects.
fn effects_summary(effects: Option<EffectsConfig>) -> String {
    let names: Vec<&str> = effects
        .iter()
        .flat_map(|config| config.enabled())
        .map(|effect| effect.name())
        .collect();
    if names.is_empty() {
        "no effects".to_string()
    } else {
        names.join(" · ")
    }
}
