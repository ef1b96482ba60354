//! Typed errors for the I/O edges of slotboard.
//!
//! - `SourceError`: reading brand and post exports
//! - `ConfigError`: invalid values in `slotboard.toml`, env or CLI
//!
//! Slot planning and reconciliation have no error type: malformed data
//! degrades to defaults instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading scheduling data.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {kind} export at {path}: {source}")]
    Read {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {kind} export at {path}: {source}")]
    Parse {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} export at {path} is neither an array nor an object wrapping one")]
    Shape { kind: &'static str, path: PathBuf },
}

/// Errors from resolving configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid timezone from {origin}: {source}")]
    InvalidTimeZone {
        origin: &'static str,
        #[source]
        source: slotboard_common::ModelError,
    },

    #[error("Invalid lookahead_minutes from {origin}: '{value}'")]
    InvalidLookahead { origin: &'static str, value: String },

    #[error("Config file already exists at {0}")]
    AlreadyExists(PathBuf),
}
