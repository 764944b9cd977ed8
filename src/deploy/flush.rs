//! Writing the finished manifest into the bundle output directory.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::{BundleManifest, ManifestSummary};
use crate::profile::FinishProfile;

/// Write every manifest entry under `dist_dir` and return the names written.
///
/// Files whose on-disk content already matches are left untouched so repeated
/// runs do not churn timestamps. Hashed outputs from previous runs that are
/// no longer in the manifest are swept from the assets directory; files
/// outside it are never removed. A prettified summary of the final output
/// set is written next to the bundle.
pub fn flush_manifest(
  profile: &FinishProfile,
  dist_dir: &Path,
  manifest: &BundleManifest,
) -> Result<Vec<String>> {
  fs::create_dir_all(dist_dir)
    .with_context(|| format!("failed to create {}", dist_dir.display()))?;

  let mut written = Vec::new();
  for (file_name, artifact) in manifest.iter() {
    let destination = dist_dir.join(file_name);
    if let Some(parent) = destination.parent() {
      fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    if !file_is_current(&destination, &artifact.content) {
      fs::write(&destination, &artifact.content)
        .with_context(|| format!("failed to write {}", destination.display()))?;
    }
    written.push(file_name.clone());
  }

  sweep_stale_outputs(profile, dist_dir, manifest)
    .with_context(|| format!("failed to sweep stale outputs in {}", dist_dir.display()))?;
  write_summary(profile, dist_dir, manifest)?;

  Ok(written)
}

fn file_is_current(path: &Path, content: &[u8]) -> bool {
  match fs::read(path) {
    Ok(existing) => existing == content,
    Err(_) => false,
  }
}

/// Remove hashed outputs from previous runs that are no longer in the manifest.
fn sweep_stale_outputs(
  profile: &FinishProfile,
  dist_dir: &Path,
  manifest: &BundleManifest,
) -> std::io::Result<()> {
  let keep: BTreeSet<PathBuf> = manifest.file_names().map(PathBuf::from).collect();
  let assets_relative = PathBuf::from(&profile.assets_dir);
  if !dist_dir.join(&assets_relative).exists() {
    return Ok(());
  }

  sweep_subtree(dist_dir, &assets_relative, &keep)?;
  Ok(())
}

/// Recursively delete files absent from `keep`, reporting whether the whole
/// subtree ended up empty and was therefore safe to remove.
fn sweep_subtree(
  root: &Path,
  relative: &Path,
  keep: &BTreeSet<PathBuf>,
) -> std::io::Result<bool> {
  let current_path = root.join(relative);

  let mut has_kept_descendants = false;
  let entries = match fs::read_dir(&current_path) {
    Ok(entries) => entries,
    Err(err) if err.kind() == ErrorKind::NotFound => return Ok(true),
    Err(err) => return Err(err),
  };

  for entry in entries {
    let entry = entry?;
    let child_relative = relative.join(entry.file_name());
    let file_type = entry.file_type()?;
    let entry_path = entry.path();

    if file_type.is_dir() {
      if sweep_subtree(root, &child_relative, keep)? {
        fs::remove_dir_all(&entry_path)?;
      } else {
        has_kept_descendants = true;
      }
    } else if keep.contains(&child_relative) {
      has_kept_descendants = true;
    } else {
      fs::remove_file(&entry_path)?;
    }
  }

  Ok(!has_kept_descendants)
}

fn write_summary(
  profile: &FinishProfile,
  dist_dir: &Path,
  manifest: &BundleManifest,
) -> Result<()> {
  let summary = ManifestSummary::from_manifest(&profile.base, manifest);
  let json = serde_json::to_string_pretty(&summary)
    .context("failed to serialise the manifest summary")?;
  let path = dist_dir.join(&profile.summary_json);
  fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))
}
