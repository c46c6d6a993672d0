//! Error types for configuration and level loading.
//!
//! Gameplay failures (blocked steps, missing targets, busy actors) are not
//! errors: they surface as `GameEvent` notifications and outcome enums.

use std::path::PathBuf;

use thiserror::Error;

/// Problems with a configuration value or file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid attack range: min {min} / max {max} (need 1 <= min <= max)")]
    InvalidAttackRange { min: i32, max: i32 },

    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),

    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidDuration { field: &'static str, value: f32 },

    #[error("max health must be at least 1, got {0}")]
    InvalidMaxHealth(i32),

    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
}

/// Problems parsing an ASCII level.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level text contains no rows")]
    Empty,

    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph { glyph: char, row: usize, column: usize },

    #[error("level has no player start ('P')")]
    MissingPlayerStart,

    #[error("level has more than one player start ('P')")]
    DuplicatePlayerStart,
}
