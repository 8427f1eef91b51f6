//! Waypointer is a terminal game in which a token travels a numbered course of waypoints.
//!
//! The player clicks the next waypoint to advance the token along the poly-line segment leading to
//! it, or any waypoint already visited to rewind along the same segments. Reaching the last
//! waypoint after every waypoint has been visited completes the course.
//!
//! The traversal engine ([`course`], [`transition`], [`tracking`] and [`engine`]) has no terminal
//! dependencies and can be driven on its own; [`App`] wires it to a Ratatui interface.

use std::fs::File;

use color_eyre::eyre::{eyre, Result};
use log::info;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

pub mod config;
pub mod course;
pub mod engine;
pub mod geometry;
pub mod tracking;
pub mod transition;
pub mod types;

mod app;
mod events;
mod ui;
mod viewport;

pub use app::App;
pub use config::Config;

/// Installs the file logger requested on the command line.
///
/// Nothing is logged unless a log file was given, since the terminal itself belongs to the game.
///
/// # Errors
///
/// This function may return errors if the log file cannot be created or a logger is already set.
pub fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let logger_config = ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(config.log_level, logger_config, File::create(path)?)
        .map_err(|err| eyre!("failed to install logger: {err}"))?;

    info!("logging to {} at level {}", path.display(), config.log_level);

    Ok(())
}
