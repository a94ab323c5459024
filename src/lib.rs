// Library root
// -----------
// This crate exposes a small library surface shared by the binaries in
// `src/bin/`. Each binary is a single-shot tool; the library holds the
// logic they have in common.
//
// Module responsibilities:
// - `api`: Blocking HTTP clients for Drive listing and Blogger posting,
//   plus the `ChildLister` trait the resolver depends on.
// - `auth`: OAuth2 consent flow and token persistence.
// - `config`: Explicit configuration record (mount root, scopes, page
//   size, sidecar filename) built from the environment.
// - `resolve`: Maps a local path under the Drive mount to the matching
//   chain of Drive folder IDs.
// - `sidecar`: The `Gdrive.list` name-to-ID mapping file shared between
//   `list-files` and `substitute-img` runs.
// - `rewrite`: Rewrites `<img src="...">` references in an HTML document
//   to Drive-hosted URLs using the sidecar mapping.
// - `error`: Typed errors for the terminal conditions a run can hit.
// - `ui`: Spinner feedback shared by the binaries' network calls.
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod resolve;
pub mod rewrite;
pub mod sidecar;
pub mod ui;
