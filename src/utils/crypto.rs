//! Cryptographic utilities

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `input`
pub fn sha256_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}
