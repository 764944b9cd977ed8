//! Finishing orchestrator applying cleanup and deployment steps in order.

use log::{debug, info};

use crate::deploy::flush::flush_manifest;
use crate::deploy::public_assets::mirror_public_dir;
use crate::deploy::site::apply_base_to_index;
use crate::models::BundleManifest;
use crate::postprocess::prune_manifest;
use crate::profile::FinishContext;

/// Generic result type used across the crate.
pub type FinishResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Summary of one finishing run.
#[derive(Debug)]
pub struct FinishOutcome {
  /// Output names removed by the post-processing rule.
  pub dropped: Vec<String>,
  /// Relative paths written into the output directory.
  pub written: Vec<String>,
  /// Relative paths mirrored from the public directory.
  pub public_installed: Vec<String>,
  /// Whether the entry HTML was rewritten for the base path.
  pub index_patched: bool,
}

/// High-level helper applying the full finishing pipeline to a manifest.
pub struct BundleFinisher<'a> {
  context: FinishContext<'a>,
}

impl<'a> BundleFinisher<'a> {
  /// Create a finisher for the provided context.
  pub fn new(context: FinishContext<'a>) -> Self {
    Self { context }
  }

  /// Prune superseded default bundles, flush the manifest to disk, rewrite
  /// the entry HTML for the base path, and mirror the public directory.
  ///
  /// The manifest is finalised in place; after this call no entry in it
  /// matches the profile's exclusion rule.
  pub fn finish(&self, manifest: &mut BundleManifest) -> FinishResult<FinishOutcome> {
    let profile = self.context.profile;
    let dist_dir = self.context.dist_dir;

    let dropped = prune_manifest(manifest, &profile.exclusion);
    let written = flush_manifest(profile, dist_dir, manifest)?;

    let index_patched = if dist_dir.join(&profile.index_html_file).exists() {
      apply_base_to_index(profile, dist_dir)?
    } else {
      debug!(
        "no {} in {}, skipping base rewrite",
        profile.index_html_file,
        dist_dir.display()
      );
      false
    };

    let public_installed = match self.context.public_dir {
      Some(public_dir) if public_dir.exists() => mirror_public_dir(public_dir, dist_dir)?,
      Some(public_dir) => {
        debug!("public directory {} does not exist", public_dir.display());
        Vec::new()
      }
      None => Vec::new(),
    };

    info!(
      "finished {}: {} written, {} dropped, {} public asset(s)",
      dist_dir.display(),
      written.len(),
      dropped.len(),
      public_installed.len()
    );

    Ok(FinishOutcome {
      dropped,
      written,
      public_installed,
      index_patched,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::OutputArtifact;
  use crate::profile::FinishProfile;
  use std::fs;
  use tempfile::tempdir;

  #[test]
  fn finish_prunes_flushes_and_patches() {
    let temp = tempdir().unwrap();
    let dist_dir = temp.path().join("dist");
    fs::create_dir_all(&dist_dir).unwrap();
    fs::write(
      dist_dir.join("index.html"),
      r#"<script src="/assets/main-def456.js"></script>"#,
    )
    .unwrap();

    let profile = FinishProfile::default();
    let mut manifest = BundleManifest::new();
    manifest.insert("index.html", OutputArtifact::asset(
      br#"<script src="/assets/main-def456.js"></script>"#.to_vec(),
    ));
    manifest.insert("assets/index-abc123.js", OutputArtifact::entry("stale".to_string()));
    manifest.insert("assets/index-abc123.css", OutputArtifact::asset(b"stale".to_vec()));
    manifest.insert("assets/main-def456.js", OutputArtifact::entry("boot()".to_string()));
    manifest.insert("assets/logo-789.png", OutputArtifact::asset(b"png".to_vec()));

    let finisher = BundleFinisher::new(FinishContext {
      profile: &profile,
      dist_dir: &dist_dir,
      public_dir: None,
    });
    let outcome = finisher.finish(&mut manifest).unwrap();

    assert_eq!(outcome.dropped.len(), 2);
    assert!(!manifest.contains("assets/index-abc123.js"));
    assert!(!manifest.contains("assets/index-abc123.css"));
    assert!(manifest.contains("assets/main-def456.js"));

    assert!(dist_dir.join("assets/main-def456.js").exists());
    assert!(dist_dir.join("assets/logo-789.png").exists());
    assert!(!dist_dir.join("assets/index-abc123.js").exists());

    assert!(outcome.index_patched);
    let index = fs::read_to_string(dist_dir.join("index.html")).unwrap();
    assert!(index.contains("/github-follow-manager/assets/main-def456.js"));
  }

  #[test]
  fn finish_mirrors_the_public_directory() {
    let temp = tempdir().unwrap();
    let dist_dir = temp.path().join("dist");
    let public_dir = temp.path().join("public");
    fs::create_dir_all(&dist_dir).unwrap();
    fs::create_dir_all(&public_dir).unwrap();
    fs::write(public_dir.join("robots.txt"), "ok").unwrap();

    let profile = FinishProfile::default();
    let mut manifest = BundleManifest::new();
    manifest.insert("assets/main-1.js", OutputArtifact::entry("main".to_string()));

    let finisher = BundleFinisher::new(FinishContext {
      profile: &profile,
      dist_dir: &dist_dir,
      public_dir: Some(&public_dir),
    });
    let outcome = finisher.finish(&mut manifest).unwrap();

    assert_eq!(outcome.public_installed, vec!["robots.txt"]);
    assert!(dist_dir.join("robots.txt").exists());
    assert!(!outcome.index_patched);
  }
}
