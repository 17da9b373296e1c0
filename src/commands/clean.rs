//! Clean command handler
//!
//! Destroys every snapshot the configured plans do not keep.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::info;

use zfs_cleaner::application::{CleanOptions, CleanUseCase};
use zfs_cleaner::infrastructure::{CommandZfsExecutor, ConfigLock};
use zfs_cleaner::Settings;

use super::load_config;

/// Execute the clean command
pub fn cmd_clean(
    config_path: &Path,
    dry_run: bool,
    verbose: u8,
    json: bool,
    settings: &Settings,
) -> Result<()> {
    let config = load_config(config_path)?;
    let _lock = ConfigLock::acquire(config_path)?;

    let options = CleanOptions::new()
        .with_dry_run(dry_run)
        .with_verbose(verbose > 0)
        .with_json(json)
        .with_check_holds(settings.check_holds)
        .with_now(Some(settings.now()));

    let zfs = CommandZfsExecutor::new(&settings.zfs_command);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let report = CleanUseCase::new(zfs).run(&config, &options, &mut out)?;
    out.flush()?;

    info!(
        total = report.total_count(),
        kept = report.kept.len(),
        destroyed = report.destroyed.len(),
        planned = report.planned.len(),
        "clean finished"
    );
    Ok(())
}
