//! Plan coverage check
//!
//! Finds filesystems that no plan in the configuration mentions.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::ports::ZfsExecutor;
use crate::error::CleanerResult;

/// Plan check use case - reports filesystems without a plan
pub struct PlanCheckUseCase<Z>
where
    Z: ZfsExecutor,
{
    zfs: Z,
}

impl<Z> PlanCheckUseCase<Z>
where
    Z: ZfsExecutor,
{
    pub fn new(zfs: Z) -> Self {
        Self { zfs }
    }

    /// Filesystems not covered by any plan path, in the order ZFS lists
    /// them.
    ///
    /// With `ignore_empty`, filesystems without snapshots are left out. A
    /// failed snapshot query counts as having none.
    pub fn unplanned(&self, config: &Config, ignore_empty: bool) -> CleanerResult<Vec<String>> {
        let planned: HashSet<&str> = config
            .plans
            .iter()
            .flat_map(|plan| plan.paths.iter().map(String::as_str))
            .collect();

        let output = self.zfs.filesystems()?;
        let mut unplanned = Vec::new();

        for filesystem in output.split_whitespace() {
            if planned.contains(filesystem) {
                continue;
            }
            if ignore_empty && !self.has_snapshots(filesystem) {
                debug!(filesystem, "skipping filesystem without snapshots");
                continue;
            }
            unplanned.push(filesystem.to_string());
        }

        Ok(unplanned)
    }

    fn has_snapshots(&self, filesystem: &str) -> bool {
        self.zfs.has_snapshot(filesystem).unwrap_or_else(|err| {
            warn!(filesystem, error = %err, "could not list snapshots");
            false
        })
    }
}

/// The line printed for an unplanned filesystem.
pub fn no_plan_message(filesystem: &str) -> String {
    format!("No plan found for path: '{filesystem}'")
}
