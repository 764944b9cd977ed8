//! Post-bundle cleanup removing superseded default entry bundles.

use log::warn;

use crate::models::BundleManifest;

/// Removal predicate for generated files that should not reach deployment.
///
/// The default rule matches the index bundles a bundler emits for its default
/// entry point, which the build replaces with custom-named outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
  /// Literal prefix an output name must start with.
  pub prefix: String,
  /// File suffixes the rule applies to. An empty list disables the rule.
  pub suffixes: Vec<String>,
}

impl Default for ExclusionRule {
  fn default() -> Self {
    Self {
      prefix: "assets/index-".to_string(),
      suffixes: vec![".js".to_string(), ".css".to_string()],
    }
  }
}

impl ExclusionRule {
  /// Returns `true` when the named output should be dropped from the final set.
  pub fn is_excluded(&self, file_name: &str) -> bool {
    file_name.starts_with(&self.prefix)
      && self
        .suffixes
        .iter()
        .any(|suffix| file_name.ends_with(suffix.as_str()))
  }
}

/// Remove every manifest entry matching the exclusion rule, mutating the
/// manifest in place, and return the names that were dropped.
///
/// Total over any manifest shape: empty manifests and manifests without a
/// single match are no-ops. Applying the operation twice yields the same
/// result as applying it once.
pub fn prune_manifest(manifest: &mut BundleManifest, rule: &ExclusionRule) -> Vec<String> {
  let mut dropped = Vec::new();
  manifest.retain(|file_name, _| {
    if rule.is_excluded(file_name) {
      dropped.push(file_name.to_string());
      false
    } else {
      true
    }
  });

  if !dropped.is_empty() {
    warn!(
      "dropped {} superseded default bundle(s): {}",
      dropped.len(),
      dropped.join(", ")
    );
    if manifest.is_empty() {
      warn!("post-processing removed every output file; the deployable set is now empty");
    }
  }

  dropped
}
