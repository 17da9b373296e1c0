//! Plancheck command handler

use std::path::Path;

use anyhow::Result;

use zfs_cleaner::application::{no_plan_message, PlanCheckUseCase};
use zfs_cleaner::infrastructure::CommandZfsExecutor;
use zfs_cleaner::Settings;

use super::load_config;

/// Print every filesystem no plan covers
pub fn cmd_plancheck(
    config_path: &Path,
    ignore_empty: bool,
    settings: &Settings,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let zfs = CommandZfsExecutor::new(&settings.zfs_command);
    let unplanned = PlanCheckUseCase::new(zfs).unplanned(&config, ignore_empty)?;

    if json {
        for filesystem in &unplanned {
            println!(
                "{}",
                serde_json::json!({
                    "event": "unplanned",
                    "filesystem": filesystem,
                })
            );
        }
        println!(
            "{}",
            serde_json::json!({
                "event": "complete",
                "command": "plancheck",
                "unplanned": unplanned.len(),
            })
        );
    } else {
        for filesystem in &unplanned {
            println!("{}", no_plan_message(filesystem));
        }
    }

    Ok(())
}
