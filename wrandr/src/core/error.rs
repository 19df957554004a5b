use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// The compositor's output list could not be turned into a model.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("compositor returned an empty output list")]
    Empty,
    #[error("malformed output list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate output name in snapshot: {0}")]
    DuplicateName(String),
}

/// A mutation was rejected by the output model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Unknown output: {0}")]
    UnknownOutput(String),
    #[error("Output {output} does not support mode {mode}")]
    UnsupportedMode { output: String, mode: String },
    #[error("Invalid scale {0} (must be 0.1-4.0)")]
    InvalidScale(f64),
}

/// The external configuration tool could not be run, or reported failure.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {message}")]
    Failed {
        program: String,
        status: ExitStatus,
        message: String,
    },
    #[error("{program} rejected the command: {message}")]
    Rejected { program: String, message: String },
}

/// Fetching the initial output snapshot failed.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Invocation(#[from] InvocationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
