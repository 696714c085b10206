//! Error types.
//!
//! [`TrackerError`] covers everything that stops the tracker from working with a valid problem
//! set; these propagate to the binary and end the process. [`InputError`] covers text typed at a
//! prompt that could not be understood; the session shows it and asks again.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// Reading or writing a file failed.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The problem document could not be decoded or encoded.
    #[error("problem document {path} is not valid: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file could not be decoded.
    #[error("configuration {path} is not valid: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// No data file exists and the configured starter template is missing too.
    #[error("no problem data found and template {0} does not exist")]
    TemplateMissing(PathBuf),

    /// A stored timestamp does not have the `YYYY-MM-DDTHH:MM:SS[.mmm]Z` shape.
    #[error("record '{name}' has an invalid {field} timestamp: '{value}'")]
    InvalidTimestamp {
        name: String,
        field: &'static str,
        value: String,
    },

    /// A stored record violates the schema in some other way.
    #[error("record '{name}' is invalid: {message}")]
    InvalidRecord { name: String, message: String },

    /// Talking to the terminal failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Problems with text entered by the user, reported inline before prompting again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter time in m:ss format (e.g., 5:30), 0, 'fail', or 'skip'")]
    MalformedOutcome(String),
}

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;
