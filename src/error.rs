//! Error types for zfs-cleaner
//!
//! Library errors are plain `thiserror` enums. The binary wraps them in
//! `anyhow` at the command boundary.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::SnapshotError;
use crate::domain::ports::ZfsError;

/// Result type alias for zfs-cleaner operations
pub type CleanerResult<T> = Result<T, CleanerError>;

/// Result type alias for configuration parsing
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure to parse a duration literal such as `30d`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("duration string too short")]
    TooShort,

    #[error("unknown unit")]
    UnknownUnit,

    #[error("negative duration not allowed")]
    Negative,

    #[error("invalid duration value '{value}': {source}")]
    InvalidNumber {
        value: String,
        source: ParseIntError,
    },

    #[error("duration '{0}' is out of range")]
    OutOfRange(String),
}

/// Failure while reading a retention configuration.
///
/// Parsing stops at the first error, so exactly one of these is reported per
/// read.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A line did not match any known statement in its scope
    #[error("unparseable tokens: [{}]", .0.join(" "))]
    Unparsable(Vec<String>),

    #[error("unterminated plan")]
    UnterminatedPlan,

    #[error("frequency cannot be bigger than age")]
    FrequencyTooBig,

    #[error("latest must be at least 1")]
    Latest1,

    #[error("no paths defined")]
    NoPaths,

    #[error("no keep periods defined")]
    NoKeeps,

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error("invalid latest count '{value}': {source}")]
    InvalidLatest {
        value: String,
        source: ParseIntError,
    },

    /// The top-level configuration file could not be opened
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("'{0}' matches nothing")]
    IncludeNoMatch(String),

    #[error("failed to open {path}: {source}")]
    IncludeOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    IncludeRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read protect list {path}: {source}")]
    ProtectRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main error type for a cleaning run
#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Config { path: PathBuf, source: ConfigError },

    #[error("could not acquire lock on '{}'", .path.display())]
    Locked { path: PathBuf },

    #[error("dataset {dataset}: {source}")]
    Snapshot {
        dataset: String,
        source: SnapshotError,
    },

    #[error(transparent)]
    Zfs(#[from] ZfsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
