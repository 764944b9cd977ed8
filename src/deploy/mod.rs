//! Realising a finished manifest on disk: flushing, HTML patching, scanning
//! and public asset mirroring.

pub mod flush;
pub mod public_assets;
pub mod scan;
pub mod site;
