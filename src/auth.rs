// OAuth2 for the Google APIs, installed-app flavor. First run prints the
// consent URL, asks for the pasted authorization code and exchanges it
// for tokens; later runs reuse the refresh token persisted in the user's
// home directory so the browser round trip happens once.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Redirect target for clients that cannot receive a loopback redirect;
/// Google shows the code for the user to copy.
const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Filename of the cached token in the home directory.
const TOKEN_FILENAME: &str = ".drivepost_token.json";

/// `client_secret.json` as downloaded from the Google Cloud Console
/// (desktop-app credentials).
#[derive(Deserialize)]
struct ClientSecretFile {
    installed: ClientSecret,
}

#[derive(Deserialize, Clone)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// Token material persisted between runs.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Response shape of the Google token endpoint, for both the initial
/// exchange and refreshes.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

/// Handles the consent flow and token persistence for one set of scopes.
pub struct Authenticator {
    secret: ClientSecret,
    scopes: Vec<String>,
    token_path: PathBuf,
    client: reqwest::blocking::Client,
}

impl Authenticator {
    /// Load the client secret from `path` and set up the default token
    /// cache location (`~/.drivepost_token.json`).
    pub fn from_client_secret(path: &Path, scopes: &[String]) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|_| {
            Error::Auth(format!(
                "client secret file not found: {} (download it from the Google Cloud Console)",
                path.display()
            ))
        })?;
        let parsed: ClientSecretFile = serde_json::from_str(&raw)?;
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Ok(Authenticator {
            secret: parsed.installed,
            scopes: scopes.to_vec(),
            token_path: dir.join(TOKEN_FILENAME),
            client: reqwest::blocking::Client::new(),
        })
    }

    /// Override the token cache path. Used by tests.
    pub fn with_token_path(mut self, path: PathBuf) -> Self {
        self.token_path = path;
        self
    }

    /// Produce a usable access token: refresh the cached one when
    /// possible, otherwise walk the user through the consent flow.
    pub fn access_token(&self) -> Result<String> {
        if let Some(stored) = self.load_token() {
            if let Some(refresh) = &stored.refresh_token {
                match self.refresh(refresh) {
                    Ok(token) => return Ok(token),
                    Err(e) => {
                        log::warn!("stored token refresh failed, re-running consent: {e}");
                    }
                }
            }
        }
        self.consent_flow()
    }

    /// Print the consent URL, collect the pasted code and exchange it.
    fn consent_flow(&self) -> Result<String> {
        let scope = self.scopes.join(" ");
        let url = reqwest::Url::parse_with_params(
            &self.secret.auth_uri,
            &[
                ("client_id", self.secret.client_id.as_str()),
                ("redirect_uri", OOB_REDIRECT_URI),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
            ],
        )
        .map_err(|e| Error::Auth(format!("bad auth URI: {e}")))?;

        println!("Open this URL in your browser and approve access:");
        println!("  {url}");
        let code: String = dialoguer::Input::new()
            .with_prompt("Paste the authorization code")
            .interact_text()?;

        let resp: TokenResponse = self.token_request(&[
            ("code", code.trim()),
            ("client_id", &self.secret.client_id),
            ("client_secret", &self.secret.client_secret),
            ("redirect_uri", OOB_REDIRECT_URI),
            ("grant_type", "authorization_code"),
        ])?;

        self.store_token(&StoredToken {
            access_token: resp.access_token.clone(),
            refresh_token: resp.refresh_token,
        })?;
        Ok(resp.access_token)
    }

    /// Exchange a refresh token for a fresh access token, keeping the
    /// refresh token in the cache.
    fn refresh(&self, refresh_token: &str) -> Result<String> {
        let resp: TokenResponse = self.token_request(&[
            ("refresh_token", refresh_token),
            ("client_id", &self.secret.client_id),
            ("client_secret", &self.secret.client_secret),
            ("grant_type", "refresh_token"),
        ])?;

        self.store_token(&StoredToken {
            access_token: resp.access_token.clone(),
            // Google omits the refresh token on refresh responses.
            refresh_token: resp
                .refresh_token
                .or_else(|| Some(refresh_token.to_string())),
        })?;
        Ok(resp.access_token)
    }

    fn token_request(&self, form: &[(&str, &str)]) -> Result<TokenResponse> {
        let res = self.client.post(&self.secret.token_uri).form(form).send()?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(Error::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }
        Ok(res.json()?)
    }

    fn load_token(&self) -> Option<StoredToken> {
        let raw = fs::read_to_string(&self.token_path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn store_token(&self, token: &StoredToken) -> Result<()> {
        fs::write(&self.token_path, serde_json::to_string_pretty(token)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator(dir: &Path) -> Authenticator {
        let secret_path = dir.join("client_secret.json");
        fs::write(
            &secret_path,
            r#"{"installed":{"client_id":"cid","client_secret":"sec"}}"#,
        )
        .unwrap();
        Authenticator::from_client_secret(&secret_path, &["scope-a".to_string()])
            .unwrap()
            .with_token_path(dir.join("token.json"))
    }

    #[test]
    fn client_secret_defaults_google_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let auth = authenticator(dir.path());
        assert_eq!(auth.secret.auth_uri, DEFAULT_AUTH_URI);
        assert_eq!(auth.secret.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn missing_client_secret_is_an_auth_error() {
        let err =
            Authenticator::from_client_secret(Path::new("/nonexistent/secret.json"), &[])
                .err()
                .unwrap();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[test]
    fn token_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let auth = authenticator(dir.path());
        let token = StoredToken {
            access_token: "acc".to_string(),
            refresh_token: Some("ref".to_string()),
        };
        auth.store_token(&token).unwrap();
        assert_eq!(auth.load_token(), Some(token));
    }

    #[test]
    fn corrupt_token_cache_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let auth = authenticator(dir.path());
        fs::write(dir.path().join("token.json"), "not json").unwrap();
        assert!(auth.load_token().is_none());
    }
}
