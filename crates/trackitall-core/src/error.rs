//! Core error types for trackitall-core.
//!
//! This module defines the error hierarchy using thiserror. Domain failures
//! of the gamification and aggregation engine live in [`GamificationError`];
//! the configuration and snapshot layers have their own enums, and
//! [`CoreError`] wraps all of them for callers that do not care which layer
//! failed.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for trackitall-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Engine-level errors (points, badges, windows, rankings)
    #[error("Gamification error: {0}")]
    Gamification(#[from] GamificationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised synchronously by the engine components.
///
/// Everything else (empty collections, zero totals, records without a usable
/// date) degrades to an empty or zero result instead of an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GamificationError {
    /// A point award was zero or negative
    #[error("Invalid point amount {amount}: awards must be positive")]
    InvalidAmount { amount: i64 },

    /// A badge with this id has already been awarded
    #[error("Badge '{id}' has already been awarded")]
    DuplicateBadge { id: String },

    /// A period length was zero or negative
    #[error("Invalid period of {days} days: period length must be positive")]
    InvalidPeriod { days: i64 },

    /// A non-empty result was required but there was nothing to rank
    #[error("Cannot select top {requested} from an empty collection")]
    EmptyInput { requested: usize },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Snapshot store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the snapshot file failed
    #[error("Snapshot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot file is not valid JSON for the expected shape
    #[error("Snapshot at {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
