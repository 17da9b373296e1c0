//! Clean options

use chrono::{DateTime, Utc};

/// Options for a cleaning run
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Print what would be destroyed without destroying anything
    pub dry_run: bool,
    /// Print a comment for every decision
    pub verbose: bool,
    /// Emit one JSON object per decision instead of text
    pub json: bool,
    /// Keep snapshots that carry a user hold
    pub check_holds: bool,
    /// Evaluation instant (None = wall clock)
    pub now: Option<DateTime<Utc>>,
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_check_holds(mut self, check_holds: bool) -> Self {
        self.check_holds = check_holds;
        self
    }

    pub fn with_now(mut self, now: Option<DateTime<Utc>>) -> Self {
        self.now = now;
        self
    }

    /// The instant snapshot ages are measured from.
    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}
