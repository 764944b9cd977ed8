//! Data structures describing the finished bundle output set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Classification of an emitted output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
  /// Entry-point bundle produced for a configured input.
  Entry,
  /// Intermediate chunk containing grouped module code.
  Chunk,
  /// Static asset emitted alongside the code bundles.
  Asset,
}

/// In-memory representation of a single emitted output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
  /// Classification of the artifact.
  pub kind: ArtifactKind,
  /// Emitted content, code or asset bytes.
  pub content: Vec<u8>,
}

impl OutputArtifact {
  /// Entry-point bundle with the provided code.
  pub fn entry(code: impl Into<Vec<u8>>) -> Self {
    Self {
      kind: ArtifactKind::Entry,
      content: code.into(),
    }
  }

  /// Shared chunk with the provided code.
  pub fn chunk(code: impl Into<Vec<u8>>) -> Self {
    Self {
      kind: ArtifactKind::Chunk,
      content: code.into(),
    }
  }

  /// Static asset with the provided payload.
  pub fn asset(bytes: impl Into<Vec<u8>>) -> Self {
    Self {
      kind: ArtifactKind::Asset,
      content: bytes.into(),
    }
  }
}

/// Mapping of output file name to emitted artifact.
///
/// Keys are bundle-relative paths using forward slashes; names are normalised
/// on insertion so that manifests built on Windows match the ones built
/// elsewhere. The map is ordered so that flushing and summaries are stable
/// across runs.
#[derive(Debug, Clone, Default)]
pub struct BundleManifest {
  entries: BTreeMap<String, OutputArtifact>,
}

impl BundleManifest {
  /// Create an empty manifest.
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert an artifact under the given output name, returning any previous
  /// artifact stored under the same name.
  pub fn insert(
    &mut self,
    file_name: impl Into<String>,
    artifact: OutputArtifact,
  ) -> Option<OutputArtifact> {
    let file_name = file_name.into().replace('\\', "/");
    self.entries.insert(file_name, artifact)
  }

  /// Look up an artifact by output name.
  pub fn get(&self, file_name: &str) -> Option<&OutputArtifact> {
    self.entries.get(file_name)
  }

  /// Returns `true` when an artifact is stored under the given name.
  pub fn contains(&self, file_name: &str) -> bool {
    self.entries.contains_key(file_name)
  }

  /// Remove an artifact by output name.
  pub fn remove(&mut self, file_name: &str) -> Option<OutputArtifact> {
    self.entries.remove(file_name)
  }

  /// Number of output files currently in the manifest.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when the manifest holds no output files.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Iterate over the output names in the manifest, in sorted order.
  pub fn file_names(&self) -> impl Iterator<Item = &String> {
    self.entries.keys()
  }

  /// Iterate over name and artifact pairs, in sorted order.
  pub fn iter(&self) -> impl Iterator<Item = (&String, &OutputArtifact)> {
    self.entries.iter()
  }

  /// Keep only the entries for which `keep` returns `true`, mutating the
  /// manifest in place.
  pub fn retain(&mut self, mut keep: impl FnMut(&str, &OutputArtifact) -> bool) {
    self.entries.retain(|file_name, artifact| keep(file_name, artifact));
  }
}

/// Serializable record of one written output file.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ArtifactSummary {
  /// Bundle-relative output file name.
  pub file_name: String,
  /// Classification of the artifact.
  pub kind: ArtifactKind,
  /// Size of the emitted content in bytes.
  pub bytes: usize,
}

/// Serializable summary of the flushed manifest written next to the output.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ManifestSummary {
  /// Deployment base path the output was finished for.
  pub base: String,
  /// Records of every file in the final output set.
  pub files: Vec<ArtifactSummary>,
}

impl ManifestSummary {
  /// Build a summary of the provided manifest.
  pub fn from_manifest(base: &str, manifest: &BundleManifest) -> Self {
    Self {
      base: base.to_string(),
      files: manifest
        .iter()
        .map(|(file_name, artifact)| ArtifactSummary {
          file_name: file_name.clone(),
          kind: artifact.kind,
          bytes: artifact.content.len(),
        })
        .collect(),
    }
  }
}
