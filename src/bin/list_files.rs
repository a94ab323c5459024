// Entrypoint for `list-files`.
// - Resolves a local folder under the Drive mount to its Drive folder ID,
//   lists the folder's contents and writes the `Gdrive.list` sidecar into
//   the target directory for a later `substitute-img` run.

use anyhow::Context;
use clap::Parser;
use drivepost_cli::api::{ChildLister, DriveClient};
use drivepost_cli::auth::Authenticator;
use drivepost_cli::config::Config;
use drivepost_cli::resolve::{self, ROOT_FOLDER_ID};
use drivepost_cli::{sidecar, ui};
use std::path::PathBuf;

/// Resolve a mounted Drive folder to its folder ID and list its files.
#[derive(Parser)]
#[command(name = "list-files", version)]
struct Args {
    /// Local directory where the Drive tree is mounted; holds the target
    /// instead when DRIVEPOST_MOUNT supplies the mount root
    mount_root: PathBuf,
    /// Full path to the folder whose files should be listed
    target: Option<PathBuf>,
    /// OAuth client secret JSON from the Google Cloud Console
    #[arg(long, default_value = "credentials.json")]
    credentials: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = Config::from_env();

    let (mount_root, target) = cfg
        .mount_and_target(args.mount_root, args.target)
        .context("no mount root: pass <MOUNT_ROOT> <TARGET> or set DRIVEPOST_MOUNT")?;

    let segments = resolve::relative_segments(&mount_root, &target)?;
    println!("Resolved relative path: {}", segments.join("/"));

    // Authenticate first; the consent flow may need to prompt.
    let auth = Authenticator::from_client_secret(&args.credentials, &cfg.api_scopes)?;
    let token = auth.access_token()?;
    let drive = DriveClient::new(token, cfg.page_size);

    let folder_id = ui::with_spinner("Resolving folder...", || {
        resolve::resolve_folder_id(&drive, ROOT_FOLDER_ID, &segments)
    })?;

    let entries = ui::with_spinner("Listing files...", || {
        drive.list_children(&folder_id, None, false)
    })?;

    for entry in &entries {
        println!("{} ({})", entry.name, entry.id);
    }

    let out_path = target.join(&cfg.sidecar_filename);
    sidecar::store(&out_path, &entries)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    println!("File list saved to: {}", out_path.display());
    Ok(())
}
