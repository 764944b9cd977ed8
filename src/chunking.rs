//! Chunk assignment applied to module sources before output names exist.

/// Policy deciding whether a module is forced into the shared vendor chunk.
///
/// Classification is a pure function of the module origin path: anything that
/// came out of the third-party dependency store is grouped together, every
/// other module keeps default chunking. The fragment check is a plain
/// substring match over the normalised origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPolicy {
    /// Path fragment identifying modules sourced from the dependency store.
    pub vendor_path_fragment: String,
    /// Name of the shared chunk receiving dependency-store modules.
    pub vendor_chunk_name: String,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            vendor_path_fragment: "node_modules".to_string(),
            vendor_chunk_name: "vendor".to_string(),
        }
    }
}

impl ChunkPolicy {
    /// Classify a module origin, returning the forced chunk name if any.
    pub fn classify(&self, module_origin: &str) -> Option<&str> {
        let normalised = module_origin.replace('\\', "/");
        normalised
            .contains(&self.vendor_path_fragment)
            .then_some(self.vendor_chunk_name.as_str())
    }
}

/// A resolved module delivered by the bundler, before chunk grouping.
#[derive(Debug, Clone)]
pub struct ModuleSource {
    /// Origin path of the module on disk or in the dependency store.
    pub origin: String,
    /// Module code after resolution and transformation.
    pub code: String,
}

/// Grouped code ready to be named and emitted as a single chunk.
#[derive(Debug, Clone)]
pub struct ChunkSource {
    /// Logical chunk name substituted for `[name]` during rendering.
    pub name: String,
    /// Concatenated module code forming the chunk body.
    pub code: String,
}

/// Partition module sources into chunk sources according to the policy.
///
/// Vendor-classified modules concatenate, in input order, into one chunk
/// named after the policy's vendor chunk. Every other module becomes its own
/// chunk named after its file stem; no grouping is forced on them.
pub fn group_modules(policy: &ChunkPolicy, modules: &[ModuleSource]) -> Vec<ChunkSource> {
    let mut chunks = Vec::new();
    let mut vendor_code = String::new();

    for module in modules {
        match policy.classify(&module.origin) {
            Some(_) => {
                if !vendor_code.is_empty() {
                    vendor_code.push('\n');
                }
                vendor_code.push_str(&module.code);
            }
            None => chunks.push(ChunkSource {
                name: module_stem(&module.origin),
                code: module.code.clone(),
            }),
        }
    }

    if !vendor_code.is_empty() {
        chunks.push(ChunkSource {
            name: policy.vendor_chunk_name.clone(),
            code: vendor_code,
        });
    }

    chunks
}

/// Derive the logical `[name]` of a module from its origin path.
fn module_stem(origin: &str) -> String {
    let normalised = origin.replace('\\', "/");
    let file_name = normalised.rsplit('/').next().unwrap_or(&normalised);
    let stem = file_name
        .split_once('.')
        .map_or(file_name, |(stem, _)| stem);

    if stem.is_empty() {
        "chunk".to_string()
    } else {
        stem.to_string()
    }
}
