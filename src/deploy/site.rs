//! Rewriting entry HTML asset references under the deployment base path.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::{Captures, Regex};

use crate::naming::make_public_asset_url;
use crate::profile::FinishProfile;

/// Rewrite root-relative asset references in the entry HTML so they resolve
/// under the deployment base path.
///
/// Only `src` and `href` attributes pointing into the assets directory are
/// touched; external URLs and references that already carry the base path are
/// left alone. Returns `true` when the file changed.
pub fn apply_base_to_index(profile: &FinishProfile, dist_dir: &Path) -> Result<bool> {
    let index_path = dist_dir.join(&profile.index_html_file);
    let text = fs::read_to_string(&index_path)
        .with_context(|| format!("failed to read {}", index_path.display()))?;

    let escaped_assets_dir = regex::escape(&profile.assets_dir);
    let reference_pattern = Regex::new(&format!(
        r#"(?i)\b(src|href)="(/?{escaped_assets_dir}/[^"]+)""#
    ))
    .expect("invalid asset reference regex");

    let rewritten = reference_pattern.replace_all(&text, |caps: &Captures<'_>| {
        let attribute = &caps[1];
        let reference = &caps[2];
        format!(
            r#"{attribute}="{url}""#,
            url = make_public_asset_url(&profile.base, reference)
        )
    });

    let changed = rewritten != text;
    if changed {
        fs::write(&index_path, rewritten.as_bytes())
            .with_context(|| format!("failed to write {}", index_path.display()))?;
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn patch(html: &str) -> (String, bool) {
        let temp = tempdir().unwrap();
        let profile = FinishProfile::default();
        let index_path = temp.path().join(&profile.index_html_file);
        fs::write(&index_path, html).unwrap();

        let changed = apply_base_to_index(&profile, temp.path()).unwrap();
        (fs::read_to_string(&index_path).unwrap(), changed)
    }

    #[test]
    fn rewrites_script_and_stylesheet_references() {
        let (updated, changed) = patch(
            r#"<html><head>
              <link rel="stylesheet" href="/assets/style-a1.css">
            </head><body>
              <script src="assets/main-def456.js"></script>
            </body></html>"#,
        );

        assert!(changed);
        assert!(updated.contains(r#"href="/github-follow-manager/assets/style-a1.css""#));
        assert!(updated.contains(r#"src="/github-follow-manager/assets/main-def456.js""#));
    }

    #[test]
    fn leaves_external_urls_alone() {
        let original = r#"<script src="https://cdn.example.com/assets/lib.js"></script>"#;
        let (updated, changed) = patch(original);

        assert!(!changed);
        assert_eq!(updated, original);
    }

    #[test]
    fn already_based_references_are_untouched() {
        let original =
            r#"<script src="/github-follow-manager/assets/main-def456.js"></script>"#;
        let (updated, changed) = patch(original);

        assert!(!changed);
        assert_eq!(updated, original);
    }

    #[test]
    fn missing_index_is_an_error() {
        let temp = tempdir().unwrap();
        let profile = FinishProfile::default();

        assert!(apply_base_to_index(&profile, temp.path()).is_err());
    }
}
