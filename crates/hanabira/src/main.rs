mod app;
mod cli;
mod logging;

use clap::Parser;
use hanabira_config::{Config, load_site_effects};

use crate::app::{App, Settings};
use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = logging::init(cli.verbose, cli.quiet) {
        log::info!("logging to {}", path.display());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let site_effects = match &cli.site_config {
        Some(path) => load_site_effects(path)?,
        None => None,
    };
    let settings = Settings::resolve(config, site_effects, cli.effects_override(), cli.seed);
    log::info!("effects: {:?}, seed: {}", settings.effects, settings.seed);

    let (cols, rows) = crossterm::terminal::size()?;
    let terminal = ratatui::init();
    let result = App::new(settings, cols, rows).run(terminal);
    ratatui::restore();
    result
}
