//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::{LevelFilter, ParseLevelError};

use crate::engine::DEFAULT_STEP;

/// Runtime settings of the game, parsed from the command line.
#[derive(Clone, Debug, Parser, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Progress added to a transition on every animation tick, in `(0, 1]`.
    #[arg(long, default_value_t = DEFAULT_STEP, value_parser = parse_step)]
    pub step: f64,
    /// Milliseconds between animation ticks.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_rate: u64,
    /// Progress per second; when set, ticks advance by elapsed wall time instead of `--step`.
    #[arg(long, value_parser = parse_positive)]
    pub speed: Option<f64>,
    /// Click radius around each waypoint, in course units.
    #[arg(long, default_value_t = 25., value_parser = parse_positive)]
    pub hit_radius: f64,
    /// File to write logs to; nothing is logged without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Most verbose level written to the log file.
    #[arg(long, default_value_t = LevelFilter::Info, value_parser = parse_level)]
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            tick_rate: 16,
            speed: None,
            hit_radius: 25.,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Time between two animation ticks.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_rate)
    }
}

/// Parses a per-tick step, which must lie in `(0, 1]`.
fn parse_step(input: &str) -> Result<f64, String> {
    let step = input.parse::<f64>().map_err(|err| err.to_string())?;
    if step > 0. && step <= 1. {
        Ok(step)
    } else {
        Err(format!("step must be in (0, 1], got {step}"))
    }
}

/// Parses a strictly positive, finite number.
fn parse_positive(input: &str) -> Result<f64, String> {
    let value = input.parse::<f64>().map_err(|err| err.to_string())?;
    if value.is_finite() && value > 0. {
        Ok(value)
    } else {
        Err(format!("expected a positive number, got {value}"))
    }
}

/// Parses a log level name such as `info` or `TRACE`.
fn parse_level(input: &str) -> Result<LevelFilter, String> {
    input.parse().map_err(|err: ParseLevelError| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parser() {
        let parsed = Config::try_parse_from(["waypointer"]).expect("no arguments should parse");

        assert_eq!(parsed, Config::default());
        assert_eq!(parsed.tick_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_parse_all_options() {
        let parsed = Config::try_parse_from([
            "waypointer",
            "--step",
            "0.03",
            "--tick-rate",
            "20",
            "--speed",
            "1.5",
            "--hit-radius",
            "30",
            "--log-file",
            "game.log",
            "--log-level",
            "debug",
        ])
        .expect("valid arguments should parse");

        assert!((parsed.step - 0.03).abs() < f64::EPSILON);
        assert_eq!(parsed.tick_rate, 20);
        assert_eq!(parsed.speed, Some(1.5));
        assert!((parsed.hit_radius - 30.).abs() < f64::EPSILON);
        assert_eq!(parsed.log_file, Some(PathBuf::from("game.log")));
        assert_eq!(parsed.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_bad_step() {
        for step in ["0", "-0.1", "1.5", "NaN", "fast"] {
            assert!(
                Config::try_parse_from(["waypointer", "--step", step]).is_err(),
                "step {step} should be rejected"
            );
        }
        assert!(Config::try_parse_from(["waypointer", "--step", "1"]).is_ok());
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        assert!(Config::try_parse_from(["waypointer", "--tick-rate", "0"]).is_err());
    }

    #[test]
    fn test_rejects_bad_speed_and_radius() {
        assert!(Config::try_parse_from(["waypointer", "--speed", "0"]).is_err());
        assert!(Config::try_parse_from(["waypointer", "--speed", "inf"]).is_err());
        assert!(Config::try_parse_from(["waypointer", "--hit-radius", "-3"]).is_err());
        assert!(Config::try_parse_from(["waypointer", "--log-level", "loud"]).is_err());
    }
}
