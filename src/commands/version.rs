use anyhow::Result;

/// Print the version; with `-v` also where the project lives.
pub fn cmd_version(verbose: u8, json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "version",
                "version": version,
                "repository": env!("CARGO_PKG_REPOSITORY"),
            })
        );
    } else if verbose > 0 {
        println!("zfs-cleaner {version}");
        println!();
        println!("{}", env!("CARGO_PKG_REPOSITORY"));
    } else {
        println!("{version}");
    }

    Ok(())
}
