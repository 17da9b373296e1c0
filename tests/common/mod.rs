//! Common test utilities for zfs-cleaner CLI tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated temp directory holding configuration files and
//!   a fake `zfs` script backed by plain files
//! - Helpers to run the binary against that fake

#![allow(dead_code)]

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

pub const DAY: i64 = 86_400;

/// Evaluation instant passed to every run
pub const NOW: i64 = 100 * DAY;

/// Stand-in for `zfs`. State lives next to the script:
/// - `filesystems` - output of `list -t filesystem`
/// - `listing.<dataset>` - `name<TAB>creation` records, `/` replaced by `_`
/// - `holds` - snapshots with a hold, one per line
/// - `fail` - snapshots whose destroy fails
/// - `destroyed` - appended to by every successful destroy
const FAKE_ZFS: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
last=""
for arg in "$@"; do last="$arg"; done
key=$(printf '%s' "$last" | tr '/' '_')
case "$1" in
  list)
    case "$*" in
      *"-t filesystem"*) cat "$dir/filesystems" 2>/dev/null ;;
      *"name,creation"*) cat "$dir/listing.$key" 2>/dev/null ;;
      *) cut -f1 "$dir/listing.$key" 2>/dev/null ;;
    esac
    ;;
  holds)
    if grep -qx "$last" "$dir/holds" 2>/dev/null; then
      printf '%s\tkeep\tThu Jan  1 00:00 1970\n' "$last"
    fi
    ;;
  destroy)
    if grep -qx "$last" "$dir/fail" 2>/dev/null; then
      echo "cannot destroy '$last': dataset is busy" >&2
      exit 1
    fi
    echo "$last" >> "$dir/destroyed"
    ;;
  *)
    echo "unsupported: $*" >&2
    exit 2
    ;;
esac
exit 0
"#;

/// Result of running the CLI
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with a fake `zfs`.
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        let zfs = root.path().join("zfs");
        fs::write(&zfs, FAKE_ZFS).expect("Failed to write fake zfs");
        fs::set_permissions(&zfs, fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake zfs executable");

        Self {
            root,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_zfs-cleaner")),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn zfs_path(&self) -> PathBuf {
        self.path("zfs")
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write a config file and return its path as a string.
    pub fn config(&self, content: &str) -> String {
        self.write("zfs-cleaner.conf", content)
            .to_string_lossy()
            .into_owned()
    }

    /// Snapshots `dataset@d<day>` for each given day.
    pub fn with_daily_snapshots(&self, dataset: &str, days: &[i64]) {
        let listing: String = days
            .iter()
            .map(|d| format!("{dataset}@d{d}\t{}\n", d * DAY))
            .collect();
        self.write(&format!("listing.{}", dataset.replace('/', "_")), &listing);
    }

    pub fn with_filesystems(&self, names: &[&str]) {
        let content: String = names.iter().map(|n| format!("{n}\n")).collect();
        self.write("filesystems", &content);
    }

    pub fn with_hold(&self, snapshot: &str) {
        self.append("holds", snapshot);
    }

    pub fn failing_destroy(&self, snapshot: &str) {
        self.append("fail", snapshot);
    }

    fn append(&self, relative: &str, line: &str) {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(relative))
            .expect("Failed to open file");
        writeln!(file, "{line}").expect("Failed to append");
    }

    /// Snapshots the fake has destroyed, in order.
    pub fn destroyed(&self) -> Vec<String> {
        fs::read_to_string(self.path("destroyed"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .env_remove("RUST_LOG")
            .env("ZFS_CLEANER_ZFS_COMMAND", self.zfs_path())
            .env("ZFS_CLEANER_NOW", NOW.to_string());

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute zfs-cleaner");
        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}
