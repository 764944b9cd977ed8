//! Output file naming: templates, content hashes and public URLs.
//!
//! The submodules are deliberately small so that template parsing, hash
//! generation, and base-path joining can be tested independently. The same
//! helpers serve both the manifest planner and the deployment steps.

mod base_path;
mod hash;
mod template;

pub use base_path::make_public_asset_url;
pub use hash::{HASH_LEN, content_hash};
pub use template::{FileNameTemplate, RenderValues};
