//! Runtime settings
//!
//! Settings are resolved in this order (highest priority first):
//! 1. CLI flags
//! 2. Environment variables (ZFS_CLEANER_*)
//! 3. Built-in defaults

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::warn;

/// Default location of the zfs binary
pub const DEFAULT_ZFS_COMMAND: &str = "/sbin/zfs";

pub const ENV_ZFS_COMMAND: &str = "ZFS_CLEANER_ZFS_COMMAND";
pub const ENV_CHECK_HOLDS: &str = "ZFS_CLEANER_CHECK_HOLDS";
pub const ENV_NOW: &str = "ZFS_CLEANER_NOW";

/// Settings that control how a run talks to ZFS, separate from the
/// retention policy itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub zfs_command: PathBuf,
    /// Keep snapshots that carry a user hold
    pub check_holds: bool,
    /// Fixed evaluation instant; `None` means the wall clock
    pub now: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zfs_command: PathBuf::from(DEFAULT_ZFS_COMMAND),
            check_holds: true,
            now: None,
        }
    }
}

impl Settings {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        with_env_overrides(Self::default(), |key| std::env::var(key).ok())
    }

    /// The instant retention ages are measured from.
    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

/// Apply environment overrides using `lookup` to read variables.
pub fn with_env_overrides(
    mut settings: Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Settings {
    if let Some(command) = lookup(ENV_ZFS_COMMAND).filter(|c| !c.trim().is_empty()) {
        settings.zfs_command = PathBuf::from(command);
    }

    if let Some(value) = lookup(ENV_CHECK_HOLDS) {
        match parse_bool(&value) {
            Some(check) => settings.check_holds = check,
            None => warn!(variable = ENV_CHECK_HOLDS, %value, "ignoring invalid boolean"),
        }
    }

    if let Some(value) = lookup(ENV_NOW) {
        match value
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        {
            Some(now) => settings.now = Some(now),
            None => warn!(variable = ENV_NOW, %value, "ignoring invalid unix timestamp"),
        }
    }

    settings
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.zfs_command, PathBuf::from("/sbin/zfs"));
        assert!(settings.check_holds);
        assert!(settings.now.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let settings = with_env_overrides(
            Settings::default(),
            lookup_from(&[
                (ENV_ZFS_COMMAND, "/usr/local/sbin/zfs"),
                (ENV_CHECK_HOLDS, "off"),
                (ENV_NOW, "1492993419"),
            ]),
        );

        assert_eq!(settings.zfs_command, PathBuf::from("/usr/local/sbin/zfs"));
        assert!(!settings.check_holds);
        assert_eq!(settings.now().timestamp(), 1492993419);
    }

    #[test]
    fn test_env_overrides_ignore_invalid_values() {
        let settings = with_env_overrides(
            Settings::default(),
            lookup_from(&[
                (ENV_ZFS_COMMAND, "  "),
                (ENV_CHECK_HOLDS, "maybe"),
                (ENV_NOW, "yesterday"),
            ]),
        );

        assert_eq!(settings, Settings::default());
    }
}
