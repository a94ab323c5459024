// Entrypoint for `substitute-img`.
// - Rewrites <img src="..."> references in an HTML file to Drive-hosted
//   URLs using the `Gdrive.list` sidecar in the file's `images/`
//   directory, then writes `<stem>_Gdrive.<ext>` next to the input.
//   The original file is never touched.

use anyhow::Context;
use clap::Parser;
use drivepost_cli::config::Config;
use drivepost_cli::rewrite::rewrite_img_src;
use drivepost_cli::sidecar;
use std::fs;
use std::path::{Path, PathBuf};

/// Rewrite local image references in an HTML file to Drive URLs.
#[derive(Parser)]
#[command(name = "substitute-img", version)]
struct Args {
    /// HTML file whose image references should be rewritten
    html_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = Config::from_env();

    let html = fs::read_to_string(&args.html_file)
        .with_context(|| format!("failed to read {}", args.html_file.display()))?;

    let dir = args.html_file.parent().unwrap_or_else(|| Path::new("."));
    let sidecar_path = dir.join("images").join(&cfg.sidecar_filename);
    let map = sidecar::load(&sidecar_path)?;
    log::debug!("loaded {} sidecar entries", map.len());

    let updated = rewrite_img_src(&html, &map);

    let out_path = derived_output_path(&args.html_file);
    fs::write(&out_path, updated)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    println!("Updated HTML saved to: {}", out_path.display());
    Ok(())
}

/// `Nobel.html` becomes `Nobel_Gdrive.html`, keeping the extension.
fn derived_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "html".to_string());
    input.with_file_name(format!("{stem}_Gdrive.{ext}"))
}
