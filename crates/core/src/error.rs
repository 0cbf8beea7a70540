//! Error types for the simulation core.
//!
//! Game-rule violations are not errors (commands simply report `false`).
//! The only fallible surface is configuration.

use thiserror::Error;

/// Rejected [`GameConfig`](crate::config::GameConfig) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board {width}x{height} is too small (minimum {min}x{min})")]
    BoardTooSmall { width: u8, height: u8, min: u8 },

    #[error("board {width}x{height} is too large (maximum {max}x{max})")]
    BoardTooLarge { width: u8, height: u8, max: u8 },

    #[error("lines_per_level must be at least 1")]
    ZeroLinesPerLevel,

    #[error("base drop interval must be positive")]
    ZeroBaseInterval,

    #[error("minimum drop interval {min_ms}ms must be positive and not exceed the base interval {base_ms}ms")]
    MinIntervalOutOfRange { min_ms: u32, base_ms: u32 },

    #[error("line points must not decrease (entry {index} is {value}, previous is {previous})")]
    LinePointsNotMonotonic { index: usize, value: u32, previous: u32 },
}
