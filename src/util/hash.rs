//! Content digests for written outputs.

use sha2::{Digest, Sha256};

/// SHA-256 of a byte slice, lowercase hex.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// SHA-256 of a string's UTF-8 bytes.
pub fn sha256_str(s: &str) -> String {
    sha256_bytes(s.as_bytes())
}
