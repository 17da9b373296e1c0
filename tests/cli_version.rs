use std::process::Command;

fn run(args: &[&str]) -> (bool, String) {
    let bin = env!("CARGO_BIN_EXE_zfs-cleaner");
    let output = Command::new(bin).args(args).output().unwrap();
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).to_string(),
    )
}

#[test]
fn test_version_prints_package_version() {
    let (success, stdout) = run(&["version"]);
    assert!(success);
    assert_eq!(stdout, format!("{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_flag_exits_without_config() {
    let (success, stdout) = run(&["-V"]);
    assert!(success);
    assert_eq!(stdout.trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_version_verbose_includes_repository() {
    let (success, stdout) = run(&["version", "-v"]);
    assert!(success);
    assert!(stdout.starts_with(&format!("zfs-cleaner {}", env!("CARGO_PKG_VERSION"))));
    assert!(stdout.contains(env!("CARGO_PKG_REPOSITORY")));
}
