// Sidecar mapping file (`Gdrive.list`): one `<name> (<id>)` line per
// listed file. `list-files` writes it next to the listed directory;
// `substitute-img` reads it back in a later, independent run. The file is
// the only state the two invocations share.

use crate::api::DriveEntry;
use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Mapping from local filename (basename, case-sensitive) to Drive file ID.
pub type NameToIdMap = HashMap<String, String>;

/// Serialize a listing into sidecar text, one `<name> (<id>)` line per
/// entry, in listing order.
pub fn build(listing: &[DriveEntry]) -> String {
    let mut out = String::new();
    for entry in listing {
        out.push_str(&format!("{} ({})\n", entry.name, entry.id));
    }
    out
}

/// Parse sidecar text into a name-to-ID map.
///
/// Each trimmed line is matched against `<name><ws>(<id>)`; the first
/// space-then-parenthesized-ID pattern on the line wins. Lines that do not
/// match are skipped, never an error. Duplicate names resolve
/// last-write-wins, the usual map-building semantics.
pub fn parse(text: &str) -> NameToIdMap {
    // Unwrap is fine: the pattern is a compile-time constant.
    let line_re = Regex::new(r"^(.+?)\s+\(([^)]+)\)").unwrap();
    let mut map = NameToIdMap::new();
    for line in text.lines() {
        if let Some(caps) = line_re.captures(line.trim()) {
            map.insert(caps[1].to_string(), caps[2].to_string());
        }
    }
    map
}

/// Read and parse the sidecar file at `path`. A missing file is the
/// `SidecarMissing` terminal condition, not a generic I/O error.
pub fn load(path: &Path) -> Result<NameToIdMap> {
    if !path.is_file() {
        return Err(Error::SidecarMissing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    Ok(parse(&text))
}

/// Serialize `listing` and write the whole blob to `path` in one shot.
pub fn store(path: &Path, listing: &[DriveEntry]) -> Result<()> {
    fs::write(path, build(listing))?;
    Ok(())
}
