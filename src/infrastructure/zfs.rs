//! Command ZFS Implementation
//!
//! Implements the ZfsExecutor port by running the `zfs` binary.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::domain::ports::{ZfsError, ZfsExecutor, ZfsResult};

/// ZFS executor that shells out to a `zfs` binary
pub struct CommandZfsExecutor {
    command: PathBuf,
}

impl CommandZfsExecutor {
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Run the binary with `args`, returning stdout on success.
    ///
    /// `action` describes the operation in error messages.
    fn run(&self, args: &[&str], action: impl FnOnce() -> String) -> ZfsResult<String> {
        trace!(command = %self.command.display(), ?args, "running zfs");

        let output = Command::new(&self.command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ZfsError::Spawn {
                command: self.command.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ZfsError::Failed {
                action: action(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ZfsExecutor for CommandZfsExecutor {
    fn snapshot_list(&self, dataset: &str) -> ZfsResult<String> {
        let args = [
            "list",
            "-t",
            "snapshot",
            "-o",
            "name,creation",
            "-s",
            "creation",
            "-d",
            "1",
            "-H",
            "-p",
            "-r",
            dataset,
        ];
        self.run(&args, || format!("get snapshot list for dataset {dataset}"))
    }

    fn filesystems(&self) -> ZfsResult<String> {
        let args = ["list", "-t", "filesystem", "-o", "name", "-H"];
        self.run(&args, || "get filesystem list".to_string())
    }

    fn has_snapshot(&self, dataset: &str) -> ZfsResult<bool> {
        let args = [
            "list", "-t", "snapshot", "-o", "name", "-H", "-d", "1", dataset,
        ];
        let output = self.run(&args, || {
            format!("check for snapshots of dataset {dataset}")
        })?;
        Ok(!output.trim().is_empty())
    }

    fn has_hold(&self, snapshot: &str) -> ZfsResult<bool> {
        let output = self.run(&["holds", "-H", snapshot], || {
            format!("get holds for snapshot {snapshot}")
        })?;
        Ok(!output.trim().is_empty())
    }

    fn destroy_snapshot(&self, snapshot: &str) -> ZfsResult<String> {
        debug!(snapshot, "destroying snapshot");
        self.run(&["destroy", snapshot], || {
            format!("destroy snapshot {snapshot}")
        })
    }

    fn destroy_command(&self, snapshot: &str) -> String {
        format!("{} destroy {snapshot}", self.command.display())
    }
}
