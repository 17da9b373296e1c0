//! Clean result types

use chrono::Duration;
use serde::Serialize;

use crate::domain::entities::SnapshotList;

/// The evaluated snapshots of one dataset
#[derive(Debug, Clone)]
pub struct DatasetSnapshots {
    /// Name of the plan that covers the dataset
    pub plan: String,
    pub dataset: String,
    pub snapshots: SnapshotList,
}

/// What happens to a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoAction {
    Keep,
    Destroy,
}

/// One decision, in the order it will be carried out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub action: TodoAction,
    pub snapshot: String,
    /// Age of the snapshot at evaluation time
    pub age: Duration,
}

impl Todo {
    pub fn keep(snapshot: impl Into<String>, age: Duration) -> Self {
        Self {
            action: TodoAction::Keep,
            snapshot: snapshot.into(),
            age,
        }
    }

    pub fn destroy(snapshot: impl Into<String>, age: Duration) -> Self {
        Self {
            action: TodoAction::Destroy,
            snapshot: snapshot.into(),
            age,
        }
    }

    pub fn is_destroy(&self) -> bool {
        self.action == TodoAction::Destroy
    }

    /// Human-readable description, e.g. `Keep tank@s1 (Age 24h0m0s)`
    pub fn comment(&self) -> String {
        let verb = match self.action {
            TodoAction::Keep => "Keep",
            TodoAction::Destroy => "Destroying",
        };
        format!("{verb} {} (Age {})", self.snapshot, format_age(self.age))
    }

    pub(crate) fn to_json(&self, dry_run: bool) -> serde_json::Value {
        serde_json::json!({
            "event": self.action,
            "snapshot": self.snapshot,
            "age_seconds": self.age.num_seconds(),
            "dry_run": dry_run,
        })
    }
}

/// Format an age as hours, minutes and seconds: `720h0m0s`.
pub fn format_age(age: Duration) -> String {
    let sign = if age < Duration::zero() { "-" } else { "" };
    let secs = age.num_seconds().unsigned_abs();
    format!(
        "{sign}{}h{}m{}s",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Result of a cleaning run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub kept: Vec<String>,
    pub destroyed: Vec<String>,
    /// Snapshots a dry run would have destroyed
    pub planned: Vec<String>,
}

impl CleanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots considered
    pub fn total_count(&self) -> usize {
        self.kept.len() + self.destroyed.len() + self.planned.len()
    }
}
