//! Advisory run lock on the configuration file

use std::fs::File;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::error::{CleanerError, CleanerResult};

/// Exclusive advisory lock held for the duration of a run.
///
/// Two runs against the same configuration file cannot overlap. The lock
/// is released when the guard is dropped.
#[derive(Debug)]
pub struct ConfigLock {
    file: File,
    path: PathBuf,
}

impl ConfigLock {
    /// Take the lock without waiting.
    pub fn acquire(path: &Path) -> CleanerResult<Self> {
        let file = File::open(path).map_err(|source| CleanerError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        file.try_lock_exclusive()
            .map_err(|_| CleanerError::Locked {
                path: path.to_path_buf(),
            })?;

        debug!(path = %path.display(), "acquired run lock");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for ConfigLock {
    fn drop(&mut self) {
        if let Err(err) = self.file.unlock() {
            debug!(path = %self.path.display(), error = %err, "failed to release run lock");
        }
    }
}
