//! Project configuration loader describing how bundle output is finished.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::chunking::ChunkPolicy;
use crate::naming::FileNameTemplate;
use crate::postprocess::ExclusionRule;
use crate::profile::FinishProfile;

const DEFAULT_CONFIG_FILE: &str = "bundle.config.json";

/// Discoverable project configuration driving the finishing pipeline.
///
/// The defaults reproduce the build this crate grew out of: hashed output
/// names under `assets/`, a single shared vendor chunk, and superseded
/// default index bundles dropped before deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Deployment base path applied to all emitted asset references.
    pub base: String,
    /// Naming template for entry bundle files.
    pub entry_file_names: String,
    /// Naming template for shared chunk files.
    pub chunk_file_names: String,
    /// Naming template for static asset files.
    pub asset_file_names: String,
    /// Name of the shared chunk receiving dependency-store modules.
    pub vendor_chunk_name: String,
    /// Path fragment identifying modules sourced from the dependency store.
    pub vendor_path_fragment: String,
    /// Literal prefix of output names dropped after bundling.
    pub exclude_prefix: String,
    /// File suffixes the exclusion rule applies to.
    pub exclude_suffixes: Vec<String>,
    /// Directory name holding hashed outputs inside the bundle.
    pub assets_dir: String,
    /// File name of the application entry point HTML.
    pub index_html_file: String,
    /// Name of the serialized manifest summary JSON file.
    pub summary_json: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base: "/github-follow-manager/".into(),
            entry_file_names: "assets/[name]-[hash].js".into(),
            chunk_file_names: "assets/[name]-[hash].js".into(),
            asset_file_names: "assets/[name]-[hash].[ext]".into(),
            vendor_chunk_name: "vendor".into(),
            vendor_path_fragment: "node_modules".into(),
            exclude_prefix: "assets/index-".into(),
            exclude_suffixes: vec![".js".into(), ".css".into()],
            assets_dir: "assets".into(),
            index_html_file: "index.html".into(),
            summary_json: "bundle_manifest.json".into(),
        }
    }
}

impl BuildConfig {
    /// Attempt to load configuration from the provided project directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall
    /// back to default values so downstream callers can continue operating
    /// with sensible assumptions.
    pub fn discover(project_dir: &Path) -> Self {
        let candidate = project_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Read configuration from an explicitly requested JSON file.
    ///
    /// Unlike [`BuildConfig::discover`] there is no fallback: callers asked
    /// for this exact file, so a missing or malformed one is reported with
    /// enough detail to tell the two apart.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;

        serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            source: err,
        })
    }

    /// Convert the configuration into an owned finishing profile.
    pub fn into_profile(self) -> FinishProfile {
        FinishProfile {
            base: self.base,
            entry_file_names: FileNameTemplate::parse(&self.entry_file_names),
            chunk_file_names: FileNameTemplate::parse(&self.chunk_file_names),
            asset_file_names: FileNameTemplate::parse(&self.asset_file_names),
            chunk_policy: ChunkPolicy {
                vendor_path_fragment: self.vendor_path_fragment,
                vendor_chunk_name: self.vendor_chunk_name,
            },
            exclusion: ExclusionRule {
                prefix: self.exclude_prefix,
                suffixes: self.exclude_suffixes,
            },
            assets_dir: self.assets_dir,
            index_html_file: self.index_html_file,
            summary_json: self.summary_json,
        }
    }

    /// Borrowing conversion into a finishing profile, cloning the strings.
    pub fn to_profile(&self) -> FinishProfile {
        self.clone().into_profile()
    }
}

/// Errors that can occur while loading an explicitly requested configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        source: std::io::Error,
    },
    /// Failed to parse the JSON configuration file.
    Parse {
        /// Path that caused the error.
        path: PathBuf,
        /// Source parse error.
        source: serde_json::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_reproduce_the_original_build_values() {
        let config = BuildConfig::default();

        assert_eq!(config.base, "/github-follow-manager/");
        assert_eq!(config.entry_file_names, "assets/[name]-[hash].js");
        assert_eq!(config.chunk_file_names, "assets/[name]-[hash].js");
        assert_eq!(config.asset_file_names, "assets/[name]-[hash].[ext]");
        assert_eq!(config.vendor_chunk_name, "vendor");
        assert_eq!(config.vendor_path_fragment, "node_modules");
        assert_eq!(config.exclude_prefix, "assets/index-");
        assert_eq!(config.exclude_suffixes, vec![".js", ".css"]);
    }

    #[test]
    fn discover_falls_back_to_defaults_for_missing_file() {
        let temp = tempdir().expect("failed to create temp dir");

        let config = BuildConfig::discover(temp.path());

        assert_eq!(config.base, "/github-follow-manager/");
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let temp = tempdir().expect("failed to create temp dir");
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"{"base": "/elsewhere/", "vendor_chunk_name": "deps"}"#)
            .expect("failed to write config");

        let config = BuildConfig::discover(temp.path());

        assert_eq!(config.base, "/elsewhere/");
        assert_eq!(config.vendor_chunk_name, "deps");
        assert_eq!(config.exclude_prefix, "assets/index-");
    }

    #[test]
    fn load_from_path_distinguishes_missing_from_malformed() {
        let temp = tempdir().expect("failed to create temp dir");
        let missing = temp.path().join("nope.json");
        assert!(matches!(
            BuildConfig::load_from_path(&missing),
            Err(ConfigError::Io { .. })
        ));

        let malformed = temp.path().join("bad.json");
        fs::write(&malformed, "{not json").expect("failed to write config");
        assert!(matches!(
            BuildConfig::load_from_path(&malformed),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn into_profile_parses_the_templates() {
        let profile = BuildConfig::default().into_profile();

        assert_eq!(profile.entry_file_names.raw(), "assets/[name]-[hash].js");
        assert_eq!(profile.chunk_policy.vendor_chunk_name, "vendor");
        assert_eq!(profile.exclusion.prefix, "assets/index-");
    }
}
