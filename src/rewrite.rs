// Reference rewriting: swaps the `src` of `<img>` tags from local paths
// to public Google Drive image links, using the sidecar mapping. A plain
// string transformation over the HTML; nothing is parsed as a tree and
// nothing outside the matched tags changes.

use crate::sidecar::NameToIdMap;
use regex::{Captures, Regex};
use std::path::Path;

/// URL template Blogger accepts for Drive-hosted images. The `=s400`
/// suffix requests a 400px rendition.
const DRIVE_IMG_PREFIX: &str = "https://lh3.google.com/u/0/d/";
const DRIVE_IMG_SUFFIX: &str = "=s400";

/// Rewrite every `<img ... src="..." ...>` whose src basename appears in
/// `map`, replacing only the src value inside the tag. Tags whose
/// basename is absent from the map are left byte-identical; files that
/// were never uploaded simply keep their local reference.
pub fn rewrite_img_src(html: &str, map: &NameToIdMap) -> String {
    // Unwrap is fine: the pattern is a compile-time constant.
    let img_re = Regex::new(r#"<img[^>]*src="([^"]+)"[^>]*>"#).unwrap();

    img_re
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[0];
            let src = &caps[1];
            match map.get(basename(src)) {
                Some(id) => {
                    let new_src = format!("{DRIVE_IMG_PREFIX}{id}{DRIVE_IMG_SUFFIX}");
                    tag.replace(src, &new_src)
                }
                None => tag.to_string(),
            }
        })
        .into_owned()
}

/// Final path component of a src value, or the value itself when it has
/// no separator.
fn basename(src: &str) -> &str {
    Path::new(src)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> NameToIdMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn rewrites_mapped_src_in_place() {
        let out = rewrite_img_src(r#"<img src="images/a.png">"#, &map(&[("a.png", "ID1")]));
        assert_eq!(out, r#"<img src="https://lh3.google.com/u/0/d/ID1=s400">"#);
    }

    #[test]
    fn surrounding_text_and_attributes_untouched() {
        let html = r#"<p>Intro</p><img class="wide" src="images/a.png" alt="a"><p>Outro</p>"#;
        let out = rewrite_img_src(html, &map(&[("a.png", "ID1")]));
        assert_eq!(
            out,
            r#"<p>Intro</p><img class="wide" src="https://lh3.google.com/u/0/d/ID1=s400" alt="a"><p>Outro</p>"#
        );
    }

    #[test]
    fn unmapped_src_left_byte_identical() {
        let html = r#"<img src="images/missing.png" alt="x">"#;
        let out = rewrite_img_src(html, &map(&[("a.png", "ID1")]));
        assert_eq!(out, html);
    }

    #[test]
    fn every_occurrence_rewritten_identically() {
        let html = r#"<img src="images/a.png"> text <img src="other/dir/a.png">"#;
        let out = rewrite_img_src(html, &map(&[("a.png", "ID1")]));
        assert_eq!(
            out,
            r#"<img src="https://lh3.google.com/u/0/d/ID1=s400"> text <img src="https://lh3.google.com/u/0/d/ID1=s400">"#
        );
    }

    #[test]
    fn absolute_local_path_uses_basename() {
        let out = rewrite_img_src(
            r#"<img src="/home/u/Mount/images/b.jpg">"#,
            &map(&[("b.jpg", "ID2")]),
        );
        assert_eq!(out, r#"<img src="https://lh3.google.com/u/0/d/ID2=s400">"#);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        // After the first rewrite the src is a Drive URL whose basename no
        // longer matches a mapping entry, so a second pass misses.
        let m = map(&[("a.png", "ID1")]);
        let once = rewrite_img_src(r#"<img src="images/a.png">"#, &m);
        let twice = rewrite_img_src(&once, &m);
        assert_eq!(once, twice);
    }

    #[test]
    fn non_img_tags_are_ignored() {
        let html = r#"<a href="images/a.png">link</a>"#;
        let out = rewrite_img_src(html, &map(&[("a.png", "ID1")]));
        assert_eq!(out, html);
    }
}
