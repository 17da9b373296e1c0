//! Retention policy types
//!
//! A [`Config`] is the ordered set of plans read from one configuration file
//! (and everything it includes).

use chrono::Duration;

/// The whole retention policy: every plan, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub plans: Vec<Plan>,
}

/// A description of how the cleaner should behave for specific paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub name: String,
    /// Datasets covered by this plan, e.g. `tank/home`
    pub paths: Vec<String>,
    /// Number of most recent snapshots always kept
    pub latest: usize,
    pub periods: Vec<Period>,
    /// Snapshot names (the part after `@`) that are never destroyed
    pub protect: Vec<String>,
}

impl Plan {
    /// Create an empty plan with the default `latest` of 1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paths: Vec::new(),
            latest: 1,
            periods: Vec::new(),
            protect: Vec::new(),
        }
    }

    /// Whether any rule in this plan keeps snapshots.
    pub fn has_keeps(&self) -> bool {
        !self.periods.is_empty() || self.latest >= 1
    }
}

/// Within the last `age`, keep at most one snapshot per `frequency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub frequency: Duration,
    pub age: Duration,
}

impl Period {
    pub fn new(frequency: Duration, age: Duration) -> Self {
        Self { frequency, age }
    }
}
