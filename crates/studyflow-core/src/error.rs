//! Core error types for studyflow-core.
//!
//! This module defines the error hierarchy using thiserror. Parse and
//! configuration errors are fatal to a single request; narrative errors are
//! always absorbed at the call site with a local fallback.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed date or time strings in a request
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// State store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Narrative generation errors
    ///
    /// Planning and reflection flows never surface this variant; they catch
    /// it and substitute a deterministic fallback text. It exists so the
    /// narrator trait has a concrete error channel.
    #[error("Narrative error: {0}")]
    Narrative(#[from] NarrativeError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from parsing date and time-of-day strings.
///
/// Dates are `YYYY-MM-DD`, times are zero-padded 24-hour `HH:MM`.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Malformed calendar date
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Malformed time of day
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime { value: String },

    /// Malformed window spec on the CLI (expects HH:MM-HH:MM)
    #[error("Invalid window '{value}': expected HH:MM-HH:MM")]
    InvalidWindow { value: String },
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
}

/// State store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the user database
    #[error("Failed to open user database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Stored state blob could not be decoded
    #[error("Corrupt state for user '{user_id}': {message}")]
    CorruptState { user_id: String, message: String },

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Narrative generator errors.
///
/// Every variant maps to a stable category name via [`NarrativeError::category`],
/// which fallback texts embed for diagnostics.
#[derive(Error, Debug)]
pub enum NarrativeError {
    /// No API key available in the environment
    #[error("No API key found in environment variable {0}")]
    MissingApiKey(String),

    /// Transport-level failure (connect, timeout, body read)
    #[error("Request failed: {0}")]
    Request(String),

    /// Non-success HTTP status from the generation endpoint
    #[error("Generation endpoint returned HTTP {status}")]
    Status { status: u16 },

    /// Response decoded but contained no usable text
    #[error("Generation response contained no text")]
    EmptyResponse,

    /// Generation disabled for this run (offline mode)
    #[error("Narrative generation is disabled")]
    Disabled,
}

impl NarrativeError {
    /// Stable category name embedded in fallback texts.
    pub fn category(&self) -> &'static str {
        match self {
            NarrativeError::MissingApiKey(_) => "MissingApiKey",
            NarrativeError::Request(_) => "Request",
            NarrativeError::Status { .. } => "Status",
            NarrativeError::EmptyResponse => "EmptyResponse",
            NarrativeError::Disabled => "Disabled",
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        NarrativeError::Request(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
