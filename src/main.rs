//! This crate contains the source code for the binary for the game waypointer.

#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use std::io::stdout;

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use ratatui::crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use waypointer::{init_logging, App, Config};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    init_logging(&config)?;

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;

    let result = App::new(config).and_then(|mut app| app.run(&mut terminal));

    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();

    result
}
