//! Property tests for the configuration parser.

use proptest::prelude::*;

use zfs_cleaner::Config;

fn statement() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("plan p {".to_string()),
        Just("}".to_string()),
        Just("path tank/a".to_string()),
        Just("keep latest 3".to_string()),
        Just("keep 1h for 1d".to_string()),
        Just("keep 1d for 1h".to_string()),
        Just("protect initial".to_string()),
        Just("# comment".to_string()),
        Just(String::new()),
        "[a-z{} 0-9]{0,20}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: reading arbitrary bytes never panics.
    #[test]
    fn property_read_never_panics(input in proptest::collection::vec(any::<u8>(), 0..256)) {
        let _ = Config::read(input.as_slice());
    }

    /// PROPERTY: a successful read only yields plans that pass validation.
    #[test]
    fn property_parsed_plans_are_valid(lines in proptest::collection::vec(statement(), 0..16)) {
        let input = lines.join("\n");
        if let Ok(config) = Config::read(input.as_bytes()) {
            for plan in &config.plans {
                prop_assert!(!plan.paths.is_empty());
                prop_assert!(plan.latest >= 1);
                prop_assert!(plan.validate().is_ok());
                for period in &plan.periods {
                    prop_assert!(period.frequency <= period.age);
                }
            }
        }
    }
}
