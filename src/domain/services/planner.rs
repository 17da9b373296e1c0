//! Retention planning service
//!
//! Marks the snapshots a plan keeps. Everything left unmarked is a destroy
//! candidate. Hold queries need ZFS and are applied by the caller
//! afterwards with [`SnapshotList::keep_holds`].

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::Plan;
use crate::domain::entities::SnapshotList;

/// Apply the static rules of `plan` to `list`, measuring ages from `now`.
///
/// Rules run in a fixed order: protected names, the latest snapshots, then
/// one sieve per period. Rules only add marks, so the order does not change
/// the result.
pub fn apply_plan(list: &mut SnapshotList, plan: &Plan, now: DateTime<Utc>) {
    list.keep_named(&plan.protect);
    list.keep_latest(plan.latest);
    debug!(
        plan = %plan.name,
        kept = list.kept().count(),
        "applied protect and latest"
    );

    for period in &plan.periods {
        let start = now
            .checked_sub_signed(period.age)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        list.sieve(start, period.frequency);
        debug!(
            plan = %plan.name,
            frequency = period.frequency.num_seconds(),
            age = period.age.num_seconds(),
            kept = list.kept().count(),
            "applied period"
        );
    }
}
