// Runtime configuration for the tools. Everything that used to be a
// module-level constant in the original shell scripts lives here instead,
// so each collaborator receives an explicit record rather than reaching
// into globals.

use std::path::PathBuf;

/// Scope granting read access to Drive file metadata.
pub const DRIVE_METADATA_SCOPE: &str = "https://www.googleapis.com/auth/drive.metadata.readonly";

/// Scope granting full Blogger access.
pub const BLOGGER_SCOPE: &str = "https://www.googleapis.com/auth/blogger";

/// Configuration record shared by the binaries.
///
/// Built once per invocation from environment variables with sensible
/// defaults; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Local directory where the Drive tree is mounted. Used as the
    /// fallback when a resolving binary receives only a target path.
    pub root_mount: Option<PathBuf>,
    /// Blogger blog to post into.
    pub blog_id: Option<String>,
    /// OAuth scopes requested during the consent flow.
    pub api_scopes: Vec<String>,
    /// Page size for Drive listing requests.
    pub page_size: u32,
    /// Name of the sidecar mapping file written next to listed files.
    pub sidecar_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root_mount: None,
            blog_id: None,
            api_scopes: vec![DRIVE_METADATA_SCOPE.to_string()],
            page_size: 20,
            sidecar_filename: "Gdrive.list".to_string(),
        }
    }
}

impl Config {
    /// Build a config from the environment: `DRIVEPOST_MOUNT`,
    /// `DRIVEPOST_BLOG_ID`, `DRIVEPOST_PAGE_SIZE` and
    /// `DRIVEPOST_SIDECAR` are honored when set, defaults otherwise.
    pub fn from_env() -> Self {
        let mut cfg = Config::default();
        if let Ok(mount) = std::env::var("DRIVEPOST_MOUNT") {
            if !mount.is_empty() {
                cfg.root_mount = Some(PathBuf::from(mount));
            }
        }
        if let Ok(blog) = std::env::var("DRIVEPOST_BLOG_ID") {
            if !blog.is_empty() {
                cfg.blog_id = Some(blog);
            }
        }
        if let Ok(size) = std::env::var("DRIVEPOST_PAGE_SIZE") {
            if let Ok(n) = size.parse::<u32>() {
                cfg.page_size = n;
            }
        }
        if let Ok(name) = std::env::var("DRIVEPOST_SIDECAR") {
            if !name.is_empty() {
                cfg.sidecar_filename = name;
            }
        }
        cfg
    }

    /// Same config but requesting the Blogger scope instead of the Drive
    /// metadata scope. Used by `create-post`.
    pub fn with_blogger_scope(mut self) -> Self {
        self.api_scopes = vec![BLOGGER_SCOPE.to_string()];
        self
    }

    /// Split the positional paths of the resolving tools into mount root
    /// and target. Two paths are taken as given; a single path is the
    /// target, with the mount root coming from the configuration. `None`
    /// means no mount root is available from either source.
    pub fn mount_and_target(
        &self,
        first: PathBuf,
        second: Option<PathBuf>,
    ) -> Option<(PathBuf, PathBuf)> {
        match second {
            Some(target) => Some((first, target)),
            None => self.root_mount.clone().map(|mount| (mount, first)),
        }
    }
}
