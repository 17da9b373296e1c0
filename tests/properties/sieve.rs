//! Property tests for the retention engine.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use zfs_cleaner::{Snapshot, SnapshotList};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap()
}

/// Sorted creation times within roughly a year.
fn creations() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(0i64..31_536_000, 0..64).prop_map(|mut v| {
        v.sort_unstable();
        v
    })
}

fn list_at(creations: &[i64]) -> SnapshotList {
    let snapshots = creations
        .iter()
        .enumerate()
        .map(|(i, c)| Snapshot::new(format!("tank@s{i}"), at(*c)))
        .collect();
    SnapshotList::new(snapshots).unwrap()
}

fn keeps(list: &SnapshotList) -> Vec<bool> {
    list.iter().map(|s| s.keep).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: sieving twice marks nothing new.
    #[test]
    fn property_sieve_is_idempotent(
        creations in creations(),
        start in 0i64..31_536_000,
        frequency in 0i64..2_000_000,
    ) {
        let mut list = list_at(&creations);
        list.sieve(at(start), Duration::seconds(frequency));
        let once = keeps(&list);
        list.sieve(at(start), Duration::seconds(frequency));
        prop_assert_eq!(keeps(&list), once);
    }

    /// PROPERTY: starts inside the same frequency window select the same
    /// snapshots.
    #[test]
    fn property_sieve_ignores_phase_within_window(
        creations in creations(),
        window in 0i64..365,
        a in 0i64..86_400,
        b in 0i64..86_400,
    ) {
        let day = Duration::days(1);
        let base = window * 86_400;

        let mut first = list_at(&creations);
        first.sieve(at(base + a), day);
        let mut second = list_at(&creations);
        second.sieve(at(base + b), day);

        prop_assert_eq!(keeps(&first), keeps(&second));
    }

    /// PROPERTY: kept snapshots are at least one frequency apart.
    #[test]
    fn property_sieve_spacing(
        creations in creations(),
        start in 0i64..31_536_000,
        frequency in 1i64..2_000_000,
    ) {
        let mut list = list_at(&creations);
        list.sieve(at(start), Duration::seconds(frequency));
        let kept: Vec<i64> = list.kept().map(|s| s.creation.timestamp()).collect();
        for pair in kept.windows(2) {
            prop_assert!(pair[1] - pair[0] >= frequency);
        }
    }

    /// PROPERTY: keep_latest(n) marks exactly min(n, len) snapshots, newest
    /// first.
    #[test]
    fn property_keep_latest_count(creations in creations(), n in 0usize..80) {
        let mut list = list_at(&creations);
        list.keep_latest(n);
        let expected = n.min(creations.len());
        prop_assert_eq!(list.kept().count(), expected);
        prop_assert!(list.iter().rev().take(expected).all(|s| s.keep));
    }
}
