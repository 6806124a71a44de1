use thiserror::Error;

/// Rejected clock configuration. Raised once, at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial duration must be positive, got {0} seconds")]
    NonPositiveDuration(f64),
    #[error("initial duration must be a finite number of seconds, got {0}")]
    NonFiniteDuration(f64),
    #[error("initial duration of {0} seconds is too large")]
    DurationTooLarge(f64),
    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
}
