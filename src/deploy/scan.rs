//! Rebuilding a manifest view from an existing bundle output directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{ArtifactKind, BundleManifest, OutputArtifact};
use crate::profile::FinishProfile;

/// Read an existing output directory back into a manifest.
///
/// Entry bundles and shared chunks are indistinguishable once they sit on
/// disk, so every script is classified as a chunk; the distinction does not
/// affect finishing. Hidden files and the summary JSON from a previous run
/// are skipped.
pub fn scan_output_dir(profile: &FinishProfile, dist_dir: &Path) -> Result<BundleManifest> {
    let mut manifest = BundleManifest::new();
    collect_output_files(dist_dir, Path::new(""), &profile.summary_json, &mut manifest)?;
    Ok(manifest)
}

fn collect_output_files(
    root: &Path,
    relative: &Path,
    summary_json: &str,
    manifest: &mut BundleManifest,
) -> Result<()> {
    let current_path = root.join(relative);
    let entries = fs::read_dir(&current_path)
        .with_context(|| format!("failed to read {}", current_path.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read {}", current_path.display()))?;
        let file_name = entry.file_name();
        if file_name.to_string_lossy().starts_with('.') {
            continue;
        }

        let child_relative = relative.join(&file_name);
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?;

        if file_type.is_dir() {
            collect_output_files(root, &child_relative, summary_json, manifest)?;
        } else if file_type.is_file() {
            let relative_name = child_relative.to_string_lossy().replace('\\', "/");
            if relative_name == summary_json {
                continue;
            }

            let content = fs::read(entry.path())
                .with_context(|| format!("failed to read {}", entry.path().display()))?;
            let kind = if relative_name.ends_with(".js") {
                ArtifactKind::Chunk
            } else {
                ArtifactKind::Asset
            };
            manifest.insert(relative_name, OutputArtifact { kind, content });
        }
    }

    Ok(())
}
