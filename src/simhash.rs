// src/simhash.rs
//! Line-voting SimHash.
//!
//! Every line of the input votes once on each of the 64 output bits: its
//! XXH64 hash pushes a counter up where the bit is set and down where it is
//! clear. The final fingerprint keeps a bit when its counter ended at zero or
//! above. Adding, removing, or reordering a minority of lines moves only a few
//! counters across zero, while a substantial rewrite flips many of them.

use xxhash_rust::xxh64::xxh64;

use crate::error::{Result, SimprintError};

/// Width of the fingerprint in bits.
pub const BITS: usize = 64;

/// Per-bit vote counters for one content blob.
pub type Vector = [i64; BITS];

/// Seed of the per-line XXH64. Changing it invalidates every stored fingerprint.
pub const LINE_SEED: u64 = 13_776;

/// Hashes a single line.
#[must_use]
pub fn line_hash(line: &[u8]) -> u64 {
    xxh64(line, LINE_SEED)
}

/// Adds one line's votes into `acc`.
pub fn vote(acc: &mut Vector, line: &[u8]) {
    let h = line_hash(line);
    for (i, counter) in acc.iter_mut().enumerate() {
        if (h >> i) & 1 == 1 {
            *counter += 1;
        } else {
            *counter -= 1;
        }
    }
}

/// Sums the votes of every `\n`-separated line in `content`.
#[must_use]
pub fn vectorize(content: &[u8]) -> Vector {
    let mut acc = [0i64; BITS];
    for line in content.split(|&b| b == b'\n') {
        vote(&mut acc, line);
    }
    acc
}

/// Collapses a vote vector into the 64-bit fingerprint.
#[must_use]
pub fn collapse(v: &Vector) -> u64 {
    v.iter()
        .enumerate()
        .filter(|&(_, &c)| c >= 0)
        .fold(0u64, |f, (i, _)| f | (1u64 << i))
}

/// Computes the fingerprint of `content` as an integer.
#[must_use]
pub fn fingerprint(content: &[u8]) -> u64 {
    collapse(&vectorize(content))
}

/// Renders a fingerprint as unpadded lowercase hex.
///
/// Stored fingerprints depend on this width-less form, so a value with zero
/// high nibbles yields fewer than 16 digits.
#[must_use]
pub fn to_hex(value: u64) -> String {
    format!("{value:x}")
}

/// Computes the hex fingerprint of `content`.
#[must_use]
pub fn digest(content: &[u8]) -> String {
    to_hex(fingerprint(content))
}

/// Parses a stored fingerprint back into its integer form.
///
/// # Errors
/// Returns `InvalidFingerprint` for empty input, more than 16 digits, or non-hex characters.
pub fn parse_hex(s: &str) -> Result<u64> {
    let s = s.trim();
    if s.is_empty() || s.len() > BITS / 4 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SimprintError::InvalidFingerprint(s.to_string()));
    }
    u64::from_str_radix(s, 16).map_err(|_| SimprintError::InvalidFingerprint(s.to_string()))
}
