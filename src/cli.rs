use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// zfs-cleaner - destroy ZFS snapshots after predefined retention periods
#[derive(Parser, Debug)]
#[command(name = "zfs-cleaner")]
#[command(about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Output one JSON object per line for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the zfs binary
    #[arg(long, value_name = "PATH", global = true)]
    pub zfs: Option<PathBuf>,

    /// Do nothing destructive, only print
    #[arg(short = 'n', long = "dryrun", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// Do not keep snapshots just because they carry a user hold
    #[arg(long)]
    pub no_holds: bool,

    /// Show version and exit
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Retention configuration file
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print filesystems that have no plan and exit
    Plancheck {
        /// Ignore filesystems with no snapshots
        #[arg(long)]
        ignore_empty: bool,

        /// Retention configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Print the version information and exit
    Version,
}
