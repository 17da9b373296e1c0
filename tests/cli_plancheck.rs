//! Integration tests for `zfs-cleaner plancheck`.

#![cfg(unix)]

mod common;

use common::*;

const CONFIG: &str = "plan home {\npath tank/home\n}\nplan var {\npath tank/var\n}\n";

#[test]
fn plancheck_lists_unplanned_filesystems() {
    let env = TestEnv::new();
    env.with_filesystems(&["tank", "tank/home", "tank/scratch", "tank/var"]);
    let config = env.config(CONFIG);

    let result = env.run(&["plancheck", &config]);

    assert!(result.success, "{}", result.combined_output());
    insta::assert_snapshot!(result.stdout, @r"
    No plan found for path: 'tank'
    No plan found for path: 'tank/scratch'
    ");
}

#[test]
fn plancheck_ignore_empty_skips_filesystems_without_snapshots() {
    let env = TestEnv::new();
    env.with_filesystems(&["tank", "tank/home", "tank/scratch"]);
    env.with_daily_snapshots("tank/scratch", &[99]);
    let config = env.config(CONFIG);

    let result = env.run(&["plancheck", "--ignore-empty", &config]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(result.stdout, "No plan found for path: 'tank/scratch'\n");
}

#[test]
fn plancheck_everything_planned_prints_nothing() {
    let env = TestEnv::new();
    env.with_filesystems(&["tank/home", "tank/var"]);
    let config = env.config(CONFIG);

    let result = env.run(&["plancheck", &config]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.is_empty());
}

#[test]
fn plancheck_json() {
    let env = TestEnv::new();
    env.with_filesystems(&["tank", "tank/home"]);
    let config = env.config(CONFIG);

    let result = env.run(&["plancheck", &config, "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let events: Vec<serde_json::Value> = result
        .stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events[0]["filesystem"], "tank");
    assert_eq!(events[1]["unplanned"], 1);
}

#[test]
fn plancheck_reports_config_errors() {
    let env = TestEnv::new();
    env.with_filesystems(&["tank"]);
    let config = env.config("plan home {\nkeep latest 1\n}\n");

    let result = env.run(&["plancheck", &config]);

    assert!(!result.success);
    assert!(
        result.stderr.contains("no paths defined"),
        "{}",
        result.stderr
    );
}
