//! Error types for the grid soccer crate

use thiserror::Error;

/// Main error type for the grid soccer crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("no transition entry for state '{state}' under joint action '{joint}'")]
    MissingTransition { state: String, joint: String },

    #[error("invalid state '{input}': {reason}")]
    InvalidState { input: String, reason: String },

    #[error("invalid action '{input}'. Expected one of: {expected}")]
    ParseAction { input: String, expected: String },

    #[error("invalid joint action '{input}' (expected format: '{expected}')")]
    ParseJointAction { input: String, expected: String },

    #[error("invalid algorithm '{input}'. Expected one of: {expected}")]
    ParseAlgorithm { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
