//! Error types for the engine boundary.
//!
//! The engine itself has no failure modes; only the key-value store and
//! configuration loading touch the outside world.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure talking to a [`KeyValueStore`](crate::persist::KeyValueStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("failed to access store at {}: {source}", .path.display())]
    Io {
        /// Store file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The backing file is not a JSON object of string values.
    #[error("store at {} is not a JSON object of strings: {source}", .path.display())]
    Format {
        /// Store file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The layer state could not be serialized.
    #[error("failed to encode layer state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure loading or validating an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The config text is not valid JSON for the config schema.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    /// An element id that cannot be written as a CSS ID selector.
    #[error("{field} '{value}' is not a valid CSS identifier")]
    InvalidIdent {
        /// Config field name.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// A percentage outside 0-100.
    #[error("{field} must be between 0 and 100, got {value}")]
    OutOfRange {
        /// Config field name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
}
