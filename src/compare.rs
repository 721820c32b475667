// src/compare.rs
//! Hamming-distance comparison between fingerprints.

use crate::error::Result;
use crate::simhash;

/// Number of differing bits between two fingerprints, in `[0, 64]`.
#[must_use]
pub fn distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Fingerprints both texts as whole raw files and returns their distance.
///
/// Neither side is normalized first.
#[must_use]
pub fn compare_texts(a: &str, b: &str) -> u32 {
    distance(
        simhash::fingerprint(a.as_bytes()),
        simhash::fingerprint(b.as_bytes()),
    )
}

/// Distance between two stored hex fingerprints.
///
/// # Errors
/// Returns `InvalidFingerprint` if either side is not 1-16 hex digits.
pub fn distance_hex(a: &str, b: &str) -> Result<u32> {
    Ok(distance(simhash::parse_hex(a)?, simhash::parse_hex(b)?))
}

/// Fraction of matching bits, `1.0` for identical fingerprints.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: u64, b: u64) -> f64 {
    1.0 - f64::from(distance(a, b)) / simhash::BITS as f64
}
