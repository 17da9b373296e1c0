//! Ordered snapshots of one dataset and the retention rules that mark them

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::snapshot::{Snapshot, SnapshotError, SNAPSHOT_SEPARATOR};

/// Tolerated backwards step between consecutive creation times.
const SORT_TOLERANCE_SECS: i64 = 1;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Snapshots ordered by creation time, oldest first.
///
/// Retention rules only ever set `keep`; nothing but [`reset`](Self::reset)
/// clears it, so rules can be applied in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotList {
    snapshots: Vec<Snapshot>,
}

impl SnapshotList {
    /// Build a list, rejecting input that is not ordered oldest first.
    pub fn new(snapshots: Vec<Snapshot>) -> Result<Self, SnapshotError> {
        let mut list = Self::default();
        for snapshot in snapshots {
            list.push(snapshot)?;
        }
        Ok(list)
    }

    /// Parse `zfs list` output, keeping only snapshots of `dataset` itself.
    ///
    /// A malformed record fails the whole listing, even when it belongs
    /// to another dataset.
    pub fn from_output(output: &str, dataset: &str) -> Result<Self, SnapshotError> {
        let prefix = format!("{dataset}{SNAPSHOT_SEPARATOR}");
        let mut list = Self::default();

        for line in output.lines() {
            let snapshot = Snapshot::from_line(line)?;
            if snapshot.name.starts_with(&prefix) {
                list.push(snapshot)?;
            }
        }

        Ok(list)
    }

    fn push(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        if let Some(last) = self.snapshots.last() {
            let previous = last.creation.timestamp();
            let current = snapshot.creation.timestamp();
            if previous - current > SORT_TOLERANCE_SECS {
                return Err(SnapshotError::NotSorted { current, previous });
            }
        }
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn kept(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter().filter(|s| s.keep)
    }

    /// First snapshot created at or after `from`.
    pub fn next(&self, from: DateTime<Utc>) -> Option<&Snapshot> {
        self.snapshots.iter().find(|s| s.creation >= from)
    }

    pub fn oldest(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Keep the `count` newest snapshots.
    pub fn keep_latest(&mut self, count: usize) {
        let skip = self.snapshots.len().saturating_sub(count);
        for snapshot in &mut self.snapshots[skip..] {
            snapshot.keep = true;
        }
    }

    /// Keep the `count` oldest snapshots.
    pub fn keep_oldest(&mut self, count: usize) {
        for snapshot in self.snapshots.iter_mut().take(count) {
            snapshot.keep = true;
        }
    }

    /// Keep every snapshot whose short name is listed in `names`.
    pub fn keep_named<S: AsRef<str>>(&mut self, names: &[S]) {
        for snapshot in &mut self.snapshots {
            let short = snapshot.snapshot_name();
            if names.iter().any(|name| name.as_ref() == short) {
                snapshot.keep = true;
            }
        }
    }

    /// Keep snapshots for which `has_hold` answers true.
    ///
    /// Only snapshots not yet kept are queried, so a query that would fail
    /// for an already kept snapshot is never made and its error never
    /// surfaces. The keep marks come out the same either way. The first
    /// error from a query that is made stops the scan and is returned.
    pub fn keep_holds<F, E>(&mut self, mut has_hold: F) -> Result<(), E>
    where
        F: FnMut(&Snapshot) -> Result<bool, E>,
    {
        for snapshot in self.snapshots.iter_mut().filter(|s| !s.keep) {
            if has_hold(snapshot)? {
                snapshot.keep = true;
            }
        }
        Ok(())
    }

    /// Keep at most one snapshot per `frequency` window from `start` on.
    ///
    /// `start` is first moved back onto a multiple of `frequency` since the
    /// Unix epoch, so repeated runs select the same snapshots. Frequencies
    /// under one second keep everything from `start` on.
    pub fn sieve(&mut self, start: DateTime<Utc>, frequency: Duration) {
        if frequency < Duration::seconds(1) {
            for snapshot in self.snapshots.iter_mut().filter(|s| s.creation >= start) {
                snapshot.keep = true;
            }
            return;
        }

        let mut cursor = align_to_epoch(start, frequency);
        let mut index = 0;

        while let Some(offset) = self.snapshots[index..]
            .iter()
            .position(|s| s.creation >= cursor)
        {
            let snapshot = &mut self.snapshots[index + offset];
            snapshot.keep = true;
            cursor = match snapshot.creation.checked_add_signed(frequency) {
                Some(next) => next,
                None => break,
            };
            index += offset + 1;
        }
    }

    /// Clear every keep mark.
    pub fn reset(&mut self) {
        for snapshot in &mut self.snapshots {
            snapshot.keep = false;
        }
    }
}

/// Round `start` down to the nearest multiple of `frequency` since the
/// Unix epoch.
fn align_to_epoch(start: DateTime<Utc>, frequency: Duration) -> DateTime<Utc> {
    let frequency_nanos = i128::from(frequency.num_seconds()) * NANOS_PER_SEC
        + i128::from(frequency.subsec_nanos());
    if frequency_nanos <= 0 {
        return start;
    }

    let start_nanos = i128::from(start.timestamp()) * NANOS_PER_SEC
        + i128::from(start.timestamp_subsec_nanos());
    let offset = start_nanos.rem_euclid(frequency_nanos);

    // offset < frequency, so both parts fit
    let offset = Duration::seconds((offset / NANOS_PER_SEC) as i64)
        + Duration::nanoseconds((offset % NANOS_PER_SEC) as i64);

    start.checked_sub_signed(offset).unwrap_or(start)
}

impl<'a> IntoIterator for &'a SnapshotList {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

impl fmt::Display for SnapshotList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for snapshot in &self.snapshots {
            write!(f, "{snapshot} ")?;
        }
        write!(f, "]")
    }
}
