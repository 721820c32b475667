// src/checksum.rs
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Hex digests of a file's raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksums {
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
}

impl Checksums {
    /// Hashes `content` exactly as stored. Line endings are not normalized.
    #[must_use]
    pub fn of(content: &[u8]) -> Self {
        Self {
            md5: hex_digest::<Md5>(content),
            sha1: hex_digest::<Sha1>(content),
            sha256: hex_digest::<Sha256>(content),
        }
    }
}

fn hex_digest<D: Digest>(content: &[u8]) -> String {
    let mut hasher = D::new();
    hasher.update(content);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
