// Entrypoint for `resolve-path`.
// - Prints the path of a local folder relative to the Drive mount root.
// - Purely local: no network, no credentials.

use anyhow::Context;
use clap::Parser;
use drivepost_cli::config::Config;
use drivepost_cli::resolve;
use std::path::PathBuf;

/// Print the path of a folder relative to the top-level Drive mount.
#[derive(Parser)]
#[command(name = "resolve-path", version)]
struct Args {
    /// Local directory where the Drive tree is mounted; holds the target
    /// instead when DRIVEPOST_MOUNT supplies the mount root
    mount_root: PathBuf,
    /// Full path to the folder of interest
    target: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = Config::from_env();

    let (mount_root, target) = cfg
        .mount_and_target(args.mount_root, args.target)
        .context("no mount root: pass <MOUNT_ROOT> <TARGET> or set DRIVEPOST_MOUNT")?;

    let segments = resolve::relative_segments(&mount_root, &target)?;
    // An empty segment list means the target is the mount root itself.
    let rel = if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    };
    println!("Relative path: {rel}");
    Ok(())
}
