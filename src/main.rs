//! zfs-cleaner CLI - destroy ZFS snapshots after predefined retention periods
//!
//! Usage: zfs-cleaner [OPTIONS] <CONFIG>
//!
//! Commands:
//!   plancheck  Print filesystems that have no plan
//!   version    Print the version information

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zfs_cleaner::Settings;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.version {
        return commands::version::cmd_version(cli.verbose, cli.json);
    }

    let mut settings = Settings::from_env();
    if let Some(zfs) = cli.zfs.clone() {
        settings.zfs_command = zfs;
    }
    if cli.no_holds {
        settings.check_holds = false;
    }

    match cli.command {
        Some(Commands::Plancheck {
            ignore_empty,
            config,
        }) => commands::plancheck::cmd_plancheck(&config, ignore_empty, &settings, cli.json),
        Some(Commands::Version) => commands::version::cmd_version(cli.verbose, cli.json),
        None => {
            let config = cli
                .config
                .ok_or_else(|| anyhow!("zfs-cleaner /path/to/config.conf"))?;
            commands::clean::cmd_clean(&config, cli.dry_run, cli.verbose, cli.json, &settings)
        }
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `-v` raises the level.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
