//! Command handlers for the binary

use std::path::Path;

use zfs_cleaner::error::{CleanerError, CleanerResult, ConfigError};
use zfs_cleaner::Config;

pub mod clean;
pub mod plancheck;
pub mod version;

/// Open and parse the configuration at `path`.
///
/// Relative includes resolve against the configuration's directory.
pub fn load_config(path: &Path) -> CleanerResult<Config> {
    Config::load(path).map_err(|err| match err {
        ConfigError::Open { path, source } => CleanerError::Open { path, source },
        source => CleanerError::Config {
            path: path.to_path_buf(),
            source,
        },
    })
}
