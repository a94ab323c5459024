// Entrypoint for `create-post`.
// - Reads an HTML file and publishes it as a new Blogger post. Images
//   referenced in the HTML must already be publicly accessible (Blogger
//   has no upload API); run `substitute-img` first if they live on Drive.

use anyhow::Context;
use clap::Parser;
use drivepost_cli::api::{BlogPost, BloggerClient};
use drivepost_cli::auth::Authenticator;
use drivepost_cli::config::Config;
use drivepost_cli::ui;
use std::fs;
use std::path::{Path, PathBuf};

/// Publish an HTML file as a new Blogger post.
#[derive(Parser)]
#[command(name = "create-post", version)]
struct Args {
    /// HTML file to publish as the post body
    html_file: PathBuf,
    /// Post title; derived from the filename when omitted
    title: Option<String>,
    /// Blog to post into; falls back to DRIVEPOST_BLOG_ID
    #[arg(long)]
    blog_id: Option<String>,
    /// OAuth client secret JSON from the Google Cloud Console
    #[arg(long, default_value = "client_secret.json")]
    credentials: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = Config::from_env().with_blogger_scope();

    let blog_id = args
        .blog_id
        .or_else(|| cfg.blog_id.clone())
        .context("no blog ID: pass --blog-id or set DRIVEPOST_BLOG_ID")?;

    let content = fs::read_to_string(&args.html_file)
        .with_context(|| format!("failed to read {}", args.html_file.display()))?;
    let title = args
        .title
        .unwrap_or_else(|| title_from_filename(&args.html_file));

    let auth = Authenticator::from_client_secret(&args.credentials, &cfg.api_scopes)?;
    let token = auth.access_token()?;
    let blogger = BloggerClient::new(token);

    let created = ui::with_spinner("Publishing post...", || {
        blogger.insert_post(&blog_id, &BlogPost { title, content })
    })?;

    println!("New post created: {}", created.url);
    Ok(())
}

/// `My_First_Post.html` becomes "My First Post".
fn title_from_filename(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
        .unwrap_or_else(|| "Untitled".to_string())
}
