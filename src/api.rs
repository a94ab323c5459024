// API client module: small blocking HTTP clients for the two Google
// services the tools talk to, Drive (listing) and Blogger (posting).
// Both hold a reqwest blocking client, a base URL and a bearer token.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};

const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const BLOGGER_BASE_URL: &str = "https://www.googleapis.com/blogger/v3";

/// One file or folder as returned by the Drive listing endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DriveEntry {
    pub id: String,
    pub name: String,
}

/// Remote listing collaborator used by the path resolver. The production
/// implementation is `DriveClient`; tests substitute an in-memory tree.
pub trait ChildLister {
    /// Immediate children of `parent`, optionally filtered to an exact
    /// name and/or to folders only.
    fn list_children(
        &self,
        parent: &str,
        name_filter: Option<&str>,
        folders_only: bool,
    ) -> Result<Vec<DriveEntry>>;
}

/// Page shape of `GET /files`.
#[derive(Deserialize)]
struct FileListPage {
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
    #[serde(default)]
    files: Vec<DriveEntry>,
}

/// Blocking client for the Drive v3 files endpoint.
pub struct DriveClient {
    client: Client,
    base_url: String,
    token: String,
    page_size: u32,
}

impl DriveClient {
    pub fn new(token: String, page_size: u32) -> Self {
        DriveClient {
            client: Client::new(),
            base_url: DRIVE_BASE_URL.to_string(),
            token,
            page_size,
        }
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| Error::Auth("access token is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// One `GET /files` round trip fetching a single page of a listing.
    fn fetch_page(&self, url: &str, query: &str, page_token: Option<&str>) -> Result<FileListPage> {
        let mut request = self
            .client
            .get(url)
            .headers(self.auth_headers()?)
            .query(&[("q", query), ("fields", "nextPageToken, files(id, name)")])
            .query(&[("pageSize", self.page_size)]);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let res = request.send()?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(Error::Api(format!("Drive list failed: {status} - {body}")));
        }

        let page: FileListPage = res.json()?;
        log::debug!("drive page: {} entries", page.files.len());
        Ok(page)
    }
}

impl ChildLister for DriveClient {
    /// Lists children of `parent`, following `nextPageToken` until the
    /// listing is exhausted, so large folders are observed completely.
    fn list_children(
        &self,
        parent: &str,
        name_filter: Option<&str>,
        folders_only: bool,
    ) -> Result<Vec<DriveEntry>> {
        let query = build_query(parent, name_filter, folders_only);
        let url = format!("{}/files", self.base_url);
        collect_pages(|page_token| self.fetch_page(&url, &query, page_token))
    }
}

/// Drain a paged listing: call `fetch` with the continuation token from
/// the previous page (`None` on the first call) until a page carries no
/// `nextPageToken`, concatenating the entries in page order.
fn collect_pages<F>(mut fetch: F) -> Result<Vec<DriveEntry>>
where
    F: FnMut(Option<&str>) -> Result<FileListPage>,
{
    let mut entries = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = fetch(page_token.as_deref())?;
        entries.extend(page.files);
        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    Ok(entries)
}

/// Build the Drive `q` filter for a listing request.
fn build_query(parent: &str, name_filter: Option<&str>, folders_only: bool) -> String {
    let mut query = format!("'{}' in parents", escape_query_value(parent));
    if let Some(name) = name_filter {
        query.push_str(&format!(" and name = '{}'", escape_query_value(name)));
    }
    if folders_only {
        query.push_str(" and mimeType = 'application/vnd.google-apps.folder'");
    }
    query
}

/// Escape a value embedded in single quotes inside a Drive query.
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Request body for creating a post.
#[derive(Serialize, Debug)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
}

/// Fields of interest in the created-post response.
#[derive(Deserialize, Debug)]
pub struct PostCreated {
    pub id: String,
    pub url: String,
}

/// Blocking client for the Blogger v3 posts endpoint.
pub struct BloggerClient {
    client: Client,
    base_url: String,
    token: String,
}

impl BloggerClient {
    pub fn new(token: String) -> Self {
        BloggerClient {
            client: Client::new(),
            base_url: BLOGGER_BASE_URL.to_string(),
            token,
        }
    }

    /// Publish a new post on `blog_id` and return its id and public URL.
    pub fn insert_post(&self, blog_id: &str, post: &BlogPost) -> Result<PostCreated> {
        let url = format!("{}/blogs/{}/posts", self.base_url, blog_id);
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(post)
            .send()?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            return Err(Error::Api(format!(
                "Blogger insert failed: {status} - {body}"
            )));
        }
        Ok(res.json()?)
    }
}
