use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// Number of characters kept from the encoded digest.
pub const HASH_LEN: usize = 8;

/// Compute the content hash substituted for `[hash]` in naming templates.
///
/// The digest is rendered as url-safe base64 without padding and truncated,
/// so hashes are filesystem- and URL-safe on every platform.
pub fn content_hash(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let mut encoded = URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(HASH_LEN);
    encoded
}
