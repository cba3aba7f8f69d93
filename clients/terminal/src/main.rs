use crate::app::App;
use std::fs::File;

pub mod app;
pub mod event;
pub mod input;
pub mod surface;
pub mod ui;

/// Log file; stderr would draw over the TUI
const LOG_FILE: &str = "terminal-client.log";

fn init_logging() -> color_eyre::Result<()> {
    let file = File::create(LOG_FILE)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let terminal = ratatui::init();
    let size = terminal.size()?;
    let result = App::new((size.width, size.height)).and_then(|app| app.run(terminal));
    ratatui::restore();
    result
}
