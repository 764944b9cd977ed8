//! Owned runtime description of the finishing pipeline.

use std::path::Path;

use crate::chunking::ChunkPolicy;
use crate::naming::FileNameTemplate;
use crate::postprocess::ExclusionRule;

/// Resolved configuration driving manifest planning and deployment finishing.
///
/// Usually produced from [`crate::BuildConfig`]; constructing one by hand is
/// only needed when embedding the pipeline in other build tooling.
#[derive(Debug, Clone)]
pub struct FinishProfile {
    /// Deployment base path applied to all emitted asset references.
    pub base: String,
    /// Naming template for entry bundle files.
    pub entry_file_names: FileNameTemplate,
    /// Naming template for shared chunk files.
    pub chunk_file_names: FileNameTemplate,
    /// Naming template for static asset files.
    pub asset_file_names: FileNameTemplate,
    /// Chunk assignment policy applied before output names are rendered.
    pub chunk_policy: ChunkPolicy,
    /// Removal predicate applied once the manifest is complete.
    pub exclusion: ExclusionRule,
    /// Directory name holding hashed outputs inside the bundle.
    pub assets_dir: String,
    /// File name of the application entry point HTML.
    pub index_html_file: String,
    /// Name of the serialized manifest summary JSON file.
    pub summary_json: String,
}

impl Default for FinishProfile {
    fn default() -> Self {
        crate::config::BuildConfig::default().into_profile()
    }
}

/// Filesystem locations for a single finishing run.
#[derive(Debug)]
pub struct FinishContext<'a> {
    /// Resolved profile driving the run.
    pub profile: &'a FinishProfile,
    /// Bundler output directory being finished.
    pub dist_dir: &'a Path,
    /// Optional static directory mirrored verbatim into the output.
    pub public_dir: Option<&'a Path>,
}
