//! Error types for setup, configuration and input scripts.
//!
//! Illegal moves during play are not errors: the battle session rejects
//! them with an advisory message and leaves its state unchanged.

use std::path::PathBuf;

use crate::battle::{Coord, Side};

/// Failure to build a battle from the given rosters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    /// A roster had no living units.
    #[error("{0:?} roster has no living units")]
    EmptyRoster(Side),
    /// A unit was placed outside the grid.
    #[error("unit {name} placed outside the grid at {pos}")]
    OutOfBounds {
        /// Unit display name.
        name: String,
        /// Offending position.
        pos: Coord,
    },
    /// Two living units share a tile.
    #[error("units {first} and {second} both stand on {pos}")]
    Overlap {
        /// First unit's display name.
        first: String,
        /// Second unit's display name.
        second: String,
        /// Shared tile.
        pos: Coord,
    },
}

/// Failure to load game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The config file is not valid JSON for [`crate::config::GameConfig`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// A field holds a value outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Failure to parse a battle input script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// A token did not name any input.
    #[error("line {line}: unknown input `{token}`")]
    UnknownToken {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
}
