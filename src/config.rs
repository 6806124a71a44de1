use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default starting time for each side: ten minutes.
pub const DEFAULT_INITIAL_SECONDS: f64 = 600.0;

/// Default tick cadence, which is also the amount taken off the running clock per tick.
pub const DEFAULT_TICK_MS: u64 = 100;

/// Command line arguments for the clock server
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Two-player chess clock served as a web page")]
pub struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Starting time for each player, in seconds
    #[arg(long, default_value_t = DEFAULT_INITIAL_SECONDS)]
    pub initial_seconds: f64,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Directory holding index.html and the page assets
    #[arg(long, default_value = "./static")]
    pub static_dir: PathBuf,
}

impl Args {
    pub fn clock_config(&self) -> Result<ClockConfig, ConfigError> {
        ClockConfig::new(self.initial_seconds, self.tick_ms)
    }
}

/// Validated timing parameters shared by every clock session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    initial_duration: Duration,
    tick_interval: Duration,
}

impl ClockConfig {
    pub fn new(initial_seconds: f64, tick_ms: u64) -> Result<Self, ConfigError> {
        if !initial_seconds.is_finite() {
            return Err(ConfigError::NonFiniteDuration(initial_seconds));
        }
        if initial_seconds <= 0.0 {
            return Err(ConfigError::NonPositiveDuration(initial_seconds));
        }
        if tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        let initial_duration = Duration::try_from_secs_f64(initial_seconds)
            .map_err(|_| ConfigError::DurationTooLarge(initial_seconds))?;
        // Sub-nanosecond inputs round down to nothing
        if initial_duration.is_zero() {
            return Err(ConfigError::NonPositiveDuration(initial_seconds));
        }

        Ok(Self {
            initial_duration,
            tick_interval: Duration::from_millis(tick_ms),
        })
    }

    pub fn initial_duration(&self) -> Duration {
        self.initial_duration
    }

    /// The tick interval doubles as the quantum removed from the running clock.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            initial_duration: Duration::from_secs(600),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}
