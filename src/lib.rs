#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod chunking;
pub mod config;
pub mod deploy;
pub mod finisher;
pub mod models;
pub mod naming;
pub mod plan;
pub mod postprocess;
pub mod profile;

pub use config::BuildConfig;
pub use finisher::{BundleFinisher, FinishOutcome, FinishResult};
pub use models::{ArtifactKind, BundleManifest, OutputArtifact};
pub use postprocess::{ExclusionRule, prune_manifest};
pub use profile::{FinishContext, FinishProfile};
