//! Clean Use Case
//!
//! Orchestrates listing, retention marking and destruction.

use std::io::Write;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::entities::SnapshotList;
use crate::domain::ports::ZfsExecutor;
use crate::domain::services::apply_plan;
use crate::error::{CleanerError, CleanerResult};

use super::options::CleanOptions;
use super::result::{CleanReport, DatasetSnapshots, Todo};

/// Clean use case - destroys snapshots no plan keeps
pub struct CleanUseCase<Z>
where
    Z: ZfsExecutor,
{
    zfs: Z,
}

impl<Z> CleanUseCase<Z>
where
    Z: ZfsExecutor,
{
    pub fn new(zfs: Z) -> Self {
        Self { zfs }
    }

    /// Evaluate every (plan, path) pair in configuration order.
    ///
    /// Nothing is destroyed here. Any listing or hold query failure aborts
    /// the whole evaluation.
    pub fn evaluate(
        &self,
        config: &Config,
        options: &CleanOptions,
    ) -> CleanerResult<Vec<DatasetSnapshots>> {
        let now = options.now();
        let mut evaluated = Vec::new();

        for plan in &config.plans {
            for dataset in &plan.paths {
                let output = self.zfs.snapshot_list(dataset)?;
                let mut snapshots = SnapshotList::from_output(&output, dataset)
                    .map_err(|source| CleanerError::Snapshot {
                        dataset: dataset.clone(),
                        source,
                    })?;

                apply_plan(&mut snapshots, plan, now);
                if options.check_holds {
                    snapshots.keep_holds(|snapshot| self.zfs.has_hold(&snapshot.name))?;
                }

                info!(
                    plan = %plan.name,
                    dataset = %dataset,
                    total = snapshots.len(),
                    kept = snapshots.kept().count(),
                    "evaluated dataset"
                );

                evaluated.push(DatasetSnapshots {
                    plan: plan.name.clone(),
                    dataset: dataset.clone(),
                    snapshots,
                });
            }
        }

        Ok(evaluated)
    }

    /// Flatten evaluated datasets into decisions, oldest snapshot first
    /// within each dataset.
    pub fn todos(evaluated: &[DatasetSnapshots], now: DateTime<Utc>) -> Vec<Todo> {
        evaluated
            .iter()
            .flat_map(|dataset| dataset.snapshots.iter())
            .map(|snapshot| {
                let age = now.signed_duration_since(snapshot.creation);
                if snapshot.keep {
                    Todo::keep(snapshot.name.clone(), age)
                } else {
                    Todo::destroy(snapshot.name.clone(), age)
                }
            })
            .collect()
    }

    /// Carry out `todos` in order, writing progress to `out`.
    ///
    /// The first failed destroy stops the run; later todos are not
    /// attempted.
    pub fn execute(
        &self,
        todos: &[Todo],
        options: &CleanOptions,
        out: &mut dyn Write,
    ) -> CleanerResult<CleanReport> {
        let mut report = CleanReport::new();

        for todo in todos {
            if options.json {
                writeln!(out, "{}", todo.to_json(options.dry_run))?;
            } else if options.verbose {
                writeln!(out, "### {}", todo.comment())?;
            }

            if !todo.is_destroy() {
                report.kept.push(todo.snapshot.clone());
                continue;
            }

            if !options.json && (options.verbose || options.dry_run) {
                writeln!(
                    out,
                    "# Running '{}'",
                    self.zfs.destroy_command(&todo.snapshot)
                )?;
            }

            if options.dry_run {
                report.planned.push(todo.snapshot.clone());
                continue;
            }

            match self.zfs.destroy_snapshot(&todo.snapshot) {
                Ok(output) => {
                    if !options.json {
                        write!(out, "{output}")?;
                    }
                    info!(snapshot = %todo.snapshot, "destroyed snapshot");
                    report.destroyed.push(todo.snapshot.clone());
                }
                Err(err) => {
                    warn!(snapshot = %todo.snapshot, error = %err, "destroy failed");
                    if options.json {
                        writeln!(
                            out,
                            "{}",
                            serde_json::json!({
                                "event": "error",
                                "snapshot": todo.snapshot,
                                "error": err.to_string(),
                            })
                        )?;
                    }
                    return Err(err.into());
                }
            }
        }

        if options.json {
            writeln!(
                out,
                "{}",
                serde_json::json!({
                    "event": "complete",
                    "dry_run": options.dry_run,
                    "kept": report.kept.len(),
                    "destroyed": report.destroyed.len(),
                    "planned": report.planned.len(),
                })
            )?;
        }

        Ok(report)
    }

    /// Evaluate, plan and execute in one go.
    pub fn run(
        &self,
        config: &Config,
        options: &CleanOptions,
        out: &mut dyn Write,
    ) -> CleanerResult<CleanReport> {
        // pin the clock so evaluation and reported ages agree
        let options = options.clone().with_now(Some(options.now()));
        let evaluated = self.evaluate(config, &options)?;
        let todos = Self::todos(&evaluated, options.now());
        self.execute(&todos, &options, out)
    }
}
