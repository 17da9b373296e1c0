//! A single ZFS snapshot

use std::fmt;
use std::num::ParseIntError;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Separator between dataset and snapshot name in `tank/home@daily-1`
pub const SNAPSHOT_SEPARATOR: char = '@';

/// Errors for snapshot listings that cannot be trusted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("broken line: '{0}'")]
    MalformedLine(String),

    #[error("invalid creation time in '{line}': {source}")]
    InvalidCreation {
        line: String,
        source: ParseIntError,
    },

    #[error("output does not appear sorted. {current} < {previous}")]
    NotSorted { current: i64, previous: i64 },
}

/// A snapshot as listed by `zfs list -t snapshot -o name,creation -H -p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Fully qualified name, `dataset@snapshot`
    pub name: String,
    pub creation: DateTime<Utc>,
    /// Set by retention rules; never cleared within one evaluation
    pub keep: bool,
}

impl Snapshot {
    pub fn new(name: impl Into<String>, creation: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            creation,
            keep: false,
        }
    }

    /// Parse one `name<TAB>creation` record.
    pub fn from_line(line: &str) -> Result<Self, SnapshotError> {
        let malformed = || SnapshotError::MalformedLine(line.to_string());

        if line.len() < 3 {
            return Err(malformed());
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [name, creation] = fields.as_slice() else {
            return Err(malformed());
        };

        let creation: i64 = creation
            .parse()
            .map_err(|source| SnapshotError::InvalidCreation {
                line: line.to_string(),
                source,
            })?;
        if creation < 0 {
            return Err(malformed());
        }

        let creation = DateTime::<Utc>::from_timestamp(creation, 0).ok_or_else(malformed)?;

        Ok(Self::new(*name, creation))
    }

    /// The part of the name after the last `@`, or the whole name when
    /// there is no separator.
    pub fn snapshot_name(&self) -> &str {
        self.name
            .rsplit_once(SNAPSHOT_SEPARATOR)
            .map_or(self.name.as_str(), |(_, suffix)| suffix)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.name,
            self.creation.timestamp(),
            self.keep
        )
    }
}
