// Path resolution: maps a local directory under the Drive mount onto the
// chain of Drive folder IDs with the same names. This relies on folder
// names in the local path matching the corresponding Drive folder names
// exactly; if multiple folders share a name at one level, the first
// returned by the Drive listing is used.

use crate::api::ChildLister;
use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Sentinel folder ID for the Drive root.
pub const ROOT_FOLDER_ID: &str = "root";

/// Split `target` into path segments relative to `root`.
///
/// Both paths are made absolute (against the current directory) and
/// lexically normalized before comparison, so `..` and `.` components
/// never leak into the result. An empty vector means `target` is the
/// mount root itself. Fails with `PathNotUnderRoot` when `target` does
/// not live under `root`.
pub fn relative_segments(root: &Path, target: &Path) -> Result<Vec<String>> {
    let root_abs = normalize(root)?;
    let target_abs = normalize(target)?;

    let rel = target_abs
        .strip_prefix(&root_abs)
        .map_err(|_| Error::PathNotUnderRoot {
            path: target_abs.clone(),
            root: root_abs.clone(),
        })?;

    Ok(rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect())
}

/// Walk `segments` down from `root_id`, asking the lister for a folder
/// with each segment's name under the current parent.
///
/// One remote query per segment, strictly sequential since each lookup
/// needs the previous folder ID. An empty segment list returns `root_id`
/// without touching the network. The first match wins when the listing
/// returns several folders of the same name. Resolution fails fast on the
/// first segment without a match, naming the segment and the parent ID it
/// was expected under.
pub fn resolve_folder_id(
    lister: &dyn ChildLister,
    root_id: &str,
    segments: &[String],
) -> Result<String> {
    let mut folder_id = root_id.to_string();

    for segment in segments {
        let folders = lister.list_children(&folder_id, Some(segment), true)?;
        match folders.into_iter().next() {
            Some(folder) => folder_id = folder.id,
            None => {
                return Err(Error::SegmentNotFound {
                    segment: segment.clone(),
                    parent: folder_id,
                })
            }
        }
    }

    Ok(folder_id)
}

/// Make a path absolute and resolve `.`/`..` lexically, without touching
/// the filesystem (the target may be a mount path that only exists on the
/// Drive side).
fn normalize(path: &Path) -> Result<PathBuf> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut out = PathBuf::new();
    for component in abs.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DriveEntry;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory folder tree keyed by (parent ID, folder name), counting
    /// how many list calls were issued.
    struct FakeLister {
        folders: HashMap<(String, String), Vec<DriveEntry>>,
        calls: RefCell<usize>,
    }

    impl FakeLister {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            let mut folders: HashMap<(String, String), Vec<DriveEntry>> = HashMap::new();
            for (parent, name, id) in entries {
                folders
                    .entry((parent.to_string(), name.to_string()))
                    .or_default()
                    .push(DriveEntry {
                        id: id.to_string(),
                        name: name.to_string(),
                    });
            }
            FakeLister {
                folders,
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl ChildLister for FakeLister {
        fn list_children(
            &self,
            parent: &str,
            name_filter: Option<&str>,
            _folders_only: bool,
        ) -> Result<Vec<DriveEntry>> {
            *self.calls.borrow_mut() += 1;
            let name = name_filter.expect("resolver always filters by name");
            Ok(self
                .folders
                .get(&(parent.to_string(), name.to_string()))
                .cloned()
                .unwrap_or_default())
        }
    }

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_chain_with_one_query_per_segment() {
        let lister = FakeLister::new(&[
            ("root", "Github", "id-github"),
            ("id-github", "Private", "id-private"),
            ("id-private", "Blog", "id-blog"),
        ]);
        let id = resolve_folder_id(&lister, ROOT_FOLDER_ID, &segs(&["Github", "Private", "Blog"]))
            .unwrap();
        assert_eq!(id, "id-blog");
        assert_eq!(lister.calls(), 3);
    }

    #[test]
    fn empty_segments_short_circuit_to_root() {
        let lister = FakeLister::new(&[]);
        let id = resolve_folder_id(&lister, ROOT_FOLDER_ID, &[]).unwrap();
        assert_eq!(id, ROOT_FOLDER_ID);
        assert_eq!(lister.calls(), 0);
    }

    #[test]
    fn failure_names_segment_and_parent_reached() {
        let lister = FakeLister::new(&[("root", "A", "id-a")]);
        let err = resolve_folder_id(&lister, ROOT_FOLDER_ID, &segs(&["A", "Missing", "C"]))
            .unwrap_err();
        match err {
            Error::SegmentNotFound { segment, parent } => {
                assert_eq!(segment, "Missing");
                assert_eq!(parent, "id-a");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Gave up after the failing lookup, never queried for "C".
        assert_eq!(lister.calls(), 2);
    }

    #[test]
    fn first_match_wins_on_duplicate_names() {
        let mut lister = FakeLister::new(&[]);
        lister.folders.insert(
            ("root".to_string(), "Dup".to_string()),
            vec![
                DriveEntry {
                    id: "id-first".to_string(),
                    name: "Dup".to_string(),
                },
                DriveEntry {
                    id: "id-second".to_string(),
                    name: "Dup".to_string(),
                },
            ],
        );
        let id = resolve_folder_id(&lister, ROOT_FOLDER_ID, &segs(&["Dup"])).unwrap();
        assert_eq!(id, "id-first");
    }

    #[test]
    fn relative_segments_under_root() {
        let segs =
            relative_segments(Path::new("/home/u/Mount"), Path::new("/home/u/Mount/A/B")).unwrap();
        assert_eq!(segs, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn relative_segments_of_root_itself_is_empty() {
        let segs =
            relative_segments(Path::new("/home/u/Mount"), Path::new("/home/u/Mount")).unwrap();
        assert!(segs.is_empty());
    }

    #[test]
    fn relative_segments_outside_root_fails() {
        let err = relative_segments(Path::new("/home/u/Mount"), Path::new("/home/u2/Other"))
            .unwrap_err();
        assert!(matches!(err, Error::PathNotUnderRoot { .. }));
    }

    #[test]
    fn relative_segments_strips_dot_components() {
        let segs = relative_segments(
            Path::new("/home/u/Mount"),
            Path::new("/home/u/Mount/A/./B/../B"),
        )
        .unwrap();
        assert_eq!(segs, vec!["A".to_string(), "B".to_string()]);
    }
}
