//! ZfsExecutor port - abstraction over the `zfs` tool
//!
//! The domain never spawns processes itself; listing, hold queries and
//! destruction all go through this trait so they can be faked in tests.

use thiserror::Error;

/// Result type for ZFS operations
pub type ZfsResult<T> = Result<T, ZfsError>;

/// ZFS operation errors
#[derive(Error, Debug)]
pub enum ZfsError {
    /// The tool could not be started at all
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The tool ran and reported failure
    #[error("failed to {action}: {stderr}")]
    Failed { action: String, stderr: String },
}

/// Abstract interface to ZFS
///
/// Implementations:
/// - `CommandZfsExecutor` - runs the `zfs` binary
/// - `MockZfsExecutor` - in-memory for testing
pub trait ZfsExecutor {
    /// Raw `name<TAB>creation` listing of the snapshots directly under
    /// `dataset`, oldest first.
    fn snapshot_list(&self, dataset: &str) -> ZfsResult<String>;

    /// Raw listing of all filesystem names, one per line.
    fn filesystems(&self) -> ZfsResult<String>;

    /// Whether `dataset` has at least one snapshot.
    fn has_snapshot(&self, dataset: &str) -> ZfsResult<bool>;

    /// Whether `snapshot` carries at least one user hold.
    fn has_hold(&self, snapshot: &str) -> ZfsResult<bool>;

    /// Destroy `snapshot`, returning whatever the tool printed.
    fn destroy_snapshot(&self, snapshot: &str) -> ZfsResult<String>;

    /// Human-readable form of the destroy command, for dry runs.
    fn destroy_command(&self, snapshot: &str) -> String {
        format!("zfs destroy {snapshot}")
    }
}

impl<T: ZfsExecutor + ?Sized> ZfsExecutor for &T {
    fn snapshot_list(&self, dataset: &str) -> ZfsResult<String> {
        (**self).snapshot_list(dataset)
    }

    fn filesystems(&self) -> ZfsResult<String> {
        (**self).filesystems()
    }

    fn has_snapshot(&self, dataset: &str) -> ZfsResult<bool> {
        (**self).has_snapshot(dataset)
    }

    fn has_hold(&self, snapshot: &str) -> ZfsResult<bool> {
        (**self).has_hold(snapshot)
    }

    fn destroy_snapshot(&self, snapshot: &str) -> ZfsResult<String> {
        (**self).destroy_snapshot(snapshot)
    }

    fn destroy_command(&self, snapshot: &str) -> String {
        (**self).destroy_command(snapshot)
    }
}

/// In-memory ZFS for testing
///
/// Listing output is stored verbatim per dataset; every hold query and
/// destroy call is recorded.
#[cfg(test)]
#[derive(Default)]
pub struct MockZfsExecutor {
    pub listings: std::collections::HashMap<String, String>,
    pub filesystems: Vec<String>,
    pub holds: std::collections::HashSet<String>,
    pub failing: std::collections::HashSet<String>,
    pub hold_queries: std::sync::Mutex<Vec<String>>,
    pub destroyed: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockZfsExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, dataset: &str, output: &str) -> Self {
        self.listings
            .insert(dataset.to_string(), output.to_string());
        self
    }

    pub fn with_filesystems(mut self, names: &[&str]) -> Self {
        self.filesystems = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_hold(mut self, snapshot: &str) -> Self {
        self.holds.insert(snapshot.to_string());
        self
    }

    /// Make every operation on `name` fail.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn hold_queries(&self) -> Vec<String> {
        self.hold_queries.lock().unwrap().clone()
    }

    fn check(&self, name: &str, action: &str) -> ZfsResult<()> {
        if self.failing.contains(name) {
            return Err(ZfsError::Failed {
                action: format!("{action} {name}"),
                stderr: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
impl ZfsExecutor for MockZfsExecutor {
    fn snapshot_list(&self, dataset: &str) -> ZfsResult<String> {
        self.check(dataset, "list snapshots of")?;
        Ok(self.listings.get(dataset).cloned().unwrap_or_default())
    }

    fn filesystems(&self) -> ZfsResult<String> {
        Ok(self.filesystems.iter().map(|f| format!("{f}\n")).collect())
    }

    fn has_snapshot(&self, dataset: &str) -> ZfsResult<bool> {
        self.check(dataset, "list snapshots of")?;
        Ok(self
            .listings
            .get(dataset)
            .is_some_and(|l| !l.trim().is_empty()))
    }

    fn has_hold(&self, snapshot: &str) -> ZfsResult<bool> {
        self.hold_queries.lock().unwrap().push(snapshot.to_string());
        self.check(snapshot, "list holds of")?;
        Ok(self.holds.contains(snapshot))
    }

    fn destroy_snapshot(&self, snapshot: &str) -> ZfsResult<String> {
        self.check(snapshot, "destroy")?;
        self.destroyed.lock().unwrap().push(snapshot.to_string());
        Ok(String::new())
    }
}
