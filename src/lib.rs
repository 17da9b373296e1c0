//! zfs-cleaner - destroy ZFS snapshots after predefined retention periods
//!
//! A configuration names datasets and how long their snapshots live.
//! Every run lists the snapshots of each dataset, marks the ones some rule
//! keeps, and destroys the rest.
//!
//! ```
//! use zfs_cleaner::Config;
//!
//! let config = Config::read("plan home {\n path tank/home\n keep 1d for 30d\n}".as_bytes())?;
//! assert_eq!(config.plans[0].paths, vec!["tank/home"]);
//! # Ok::<(), zfs_cleaner::error::ConfigError>(())
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use config::{parse_duration, Config, Period, Plan, Settings};
pub use domain::entities::{Snapshot, SnapshotError, SnapshotList};
pub use domain::ports::{ZfsError, ZfsExecutor};
pub use error::{CleanerError, CleanerResult, ConfigError, DurationError};
