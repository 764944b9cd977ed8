//! Assembling a bundle manifest from logical bundler outputs.

use log::warn;

use crate::chunking::{ModuleSource, group_modules};
use crate::models::{BundleManifest, OutputArtifact};
use crate::naming::{RenderValues, content_hash};
use crate::profile::FinishProfile;

/// Code produced for one configured entry point.
#[derive(Debug, Clone)]
pub struct EntrySource {
    /// Logical entry name substituted for `[name]` during rendering.
    pub name: String,
    /// Bundled entry code.
    pub code: String,
}

/// Static asset emitted alongside the code bundles.
#[derive(Debug, Clone)]
pub struct AssetSource {
    /// Logical asset name substituted for `[name]` during rendering.
    pub name: String,
    /// Original file extension, without the leading dot.
    pub ext: String,
    /// Asset payload.
    pub content: Vec<u8>,
}

/// Logical bundler outputs awaiting final names.
#[derive(Debug, Clone, Default)]
pub struct PlannedSources {
    /// Entry points in the order the bundler produced them.
    pub entries: Vec<EntrySource>,
    /// Resolved modules awaiting chunk assignment.
    pub modules: Vec<ModuleSource>,
    /// Static assets referenced by the build.
    pub assets: Vec<AssetSource>,
}

/// Render final output names for every source and collect the results into a
/// fresh manifest.
///
/// Modules are grouped through the chunk policy first, then every artifact's
/// name is rendered from the matching template with its own content hash.
/// When two artifacts render to the same output name the first one wins and
/// the collision is logged.
pub fn plan_manifest(profile: &FinishProfile, sources: &PlannedSources) -> BundleManifest {
    let mut manifest = BundleManifest::new();

    for entry in &sources.entries {
        let hash = content_hash(entry.code.as_bytes());
        let file_name = profile.entry_file_names.render(RenderValues {
            name: &entry.name,
            hash: &hash,
            ext: "js",
        });
        insert_planned(
            &mut manifest,
            file_name,
            OutputArtifact::entry(entry.code.clone()),
        );
    }

    for chunk in group_modules(&profile.chunk_policy, &sources.modules) {
        let hash = content_hash(chunk.code.as_bytes());
        let file_name = profile.chunk_file_names.render(RenderValues {
            name: &chunk.name,
            hash: &hash,
            ext: "js",
        });
        insert_planned(&mut manifest, file_name, OutputArtifact::chunk(chunk.code));
    }

    for asset in &sources.assets {
        let hash = content_hash(&asset.content);
        let file_name = profile.asset_file_names.render(RenderValues {
            name: &asset.name,
            hash: &hash,
            ext: &asset.ext,
        });
        insert_planned(
            &mut manifest,
            file_name,
            OutputArtifact::asset(asset.content.clone()),
        );
    }

    manifest
}

fn insert_planned(manifest: &mut BundleManifest, file_name: String, artifact: OutputArtifact) {
    if manifest.contains(&file_name) {
        warn!("output name collision, keeping the first artifact: {file_name}");
        return;
    }
    manifest.insert(file_name, artifact);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtifactKind;

    fn profile() -> FinishProfile {
        FinishProfile::default()
    }

    #[test]
    fn plans_entries_chunks_and_assets_under_their_templates() {
        let sources = PlannedSources {
            entries: vec![EntrySource {
                name: "main".to_string(),
                code: "boot()".to_string(),
            }],
            modules: vec![
                ModuleSource {
                    origin: "/repo/node_modules/react/index.js".to_string(),
                    code: "react".to_string(),
                },
                ModuleSource {
                    origin: "/repo/src/followers.js".to_string(),
                    code: "followers".to_string(),
                },
            ],
            assets: vec![AssetSource {
                name: "logo".to_string(),
                ext: "png".to_string(),
                content: b"png-bytes".to_vec(),
            }],
        };

        let manifest = plan_manifest(&profile(), &sources);

        assert_eq!(manifest.len(), 4);

        let names: Vec<&String> = manifest.file_names().collect();
        let main = names.iter().find(|name| name.contains("main-")).unwrap();
        assert!(main.starts_with("assets/main-"));
        assert!(main.ends_with(".js"));
        assert_eq!(manifest.get(main.as_str()).unwrap().kind, ArtifactKind::Entry);

        let vendor = names.iter().find(|name| name.contains("vendor-")).unwrap();
        assert!(vendor.starts_with("assets/vendor-"));
        assert_eq!(manifest.get(vendor.as_str()).unwrap().kind, ArtifactKind::Chunk);

        let logo = names.iter().find(|name| name.contains("logo-")).unwrap();
        assert!(logo.ends_with(".png"));
        assert_eq!(manifest.get(logo.as_str()).unwrap().kind, ArtifactKind::Asset);
    }

    #[test]
    fn vendor_modules_collapse_into_one_output() {
        let sources = PlannedSources {
            modules: vec![
                ModuleSource {
                    origin: "/repo/node_modules/a/index.js".to_string(),
                    code: "a".to_string(),
                },
                ModuleSource {
                    origin: "/repo/node_modules/b/index.js".to_string(),
                    code: "b".to_string(),
                },
            ],
            ..PlannedSources::default()
        };

        let manifest = plan_manifest(&profile(), &sources);

        assert_eq!(manifest.len(), 1);
        let name = manifest.file_names().next().unwrap();
        assert!(name.starts_with("assets/vendor-"));
        assert_eq!(manifest.get(name).unwrap().content, b"a\nb".to_vec());
    }

    #[test]
    fn name_collisions_keep_the_first_artifact() {
        let sources = PlannedSources {
            entries: vec![
                EntrySource {
                    name: "main".to_string(),
                    code: "same".to_string(),
                },
                EntrySource {
                    name: "main".to_string(),
                    code: "same".to_string(),
                },
            ],
            ..PlannedSources::default()
        };

        let manifest = plan_manifest(&profile(), &sources);

        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn identical_names_with_distinct_content_get_distinct_hashes() {
        let sources = PlannedSources {
            entries: vec![
                EntrySource {
                    name: "main".to_string(),
                    code: "one".to_string(),
                },
                EntrySource {
                    name: "main".to_string(),
                    code: "two".to_string(),
                },
            ],
            ..PlannedSources::default()
        };

        let manifest = plan_manifest(&profile(), &sources);

        assert_eq!(manifest.len(), 2);
    }
}
