//! Property tests for duration literals.

use chrono::Duration;
use proptest::prelude::*;

use zfs_cleaner::{parse_duration, DurationError};

fn unit() -> impl Strategy<Value = (char, i64)> {
    prop_oneof![
        Just(('s', 1)),
        Just(('m', 60)),
        Just(('h', 3_600)),
        Just(('d', 86_400)),
        Just(('y', 31_536_000)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `<n><unit>` is exactly n times the unit length.
    #[test]
    fn property_duration_scales_by_unit(n in 0i64..1_000_000, (suffix, seconds) in unit()) {
        let parsed = parse_duration(&format!("{n}{suffix}")).unwrap();
        prop_assert_eq!(parsed, Duration::seconds(n * seconds));
    }

    /// PROPERTY: negative values are always rejected, whatever the unit.
    #[test]
    fn property_negative_durations_rejected(n in 1i64..1_000_000, (suffix, _) in unit()) {
        prop_assert_eq!(
            parse_duration(&format!("-{n}{suffix}")),
            Err(DurationError::Negative)
        );
    }

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_duration_never_panics(input in "\\PC{0,12}") {
        let _ = parse_duration(&input);
    }
}
