// src/matcher.rs
//! Near-duplicate matching between two fingerprint documents.

use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;

use crate::compare;
use crate::error::Result;
use crate::types::{FileFingerprint, Fingerprint};

/// Default maximum Hamming distance for a reported match.
pub const DEFAULT_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub base_file: String,
    pub target_file: String,
    pub language: String,
    pub distance: u32,
    /// Raw bytes are identical (same SHA-256).
    pub exact: bool,
}

struct Parsed<'a> {
    file: &'a FileFingerprint,
    hash: u64,
}

fn parse_all(fp: &Fingerprint) -> Result<Vec<Parsed<'_>>> {
    fp.files
        .iter()
        .map(|file| file.simhash().map(|hash| Parsed { file, hash }))
        .collect()
}

/// Pairs every target file with the base files within `threshold` bits.
///
/// Only files tagged with the same language are compared. Results are
/// sorted by distance, then target path, then base path.
///
/// # Errors
/// Returns `InvalidFingerprint` if either document holds a malformed hash.
pub fn find_matches(base: &Fingerprint, target: &Fingerprint, threshold: u32) -> Result<Vec<Match>> {
    let base = parse_all(base)?;
    let target = parse_all(target)?;

    let mut matches: Vec<Match> = target
        .par_iter()
        .flat_map_iter(|t| {
            base.iter()
                .filter(|b| b.file.language == t.file.language)
                .filter_map(|b| {
                    let distance = compare::distance(b.hash, t.hash);
                    (distance <= threshold).then(|| Match {
                        base_file: b.file.file.clone(),
                        target_file: t.file.file.clone(),
                        language: t.file.language.clone(),
                        distance,
                        exact: b.file.sha256 == t.file.sha256,
                    })
                })
                .collect::<Vec<_>>()
        })
        .collect();

    matches.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| a.target_file.cmp(&b.target_file))
            .then_with(|| a.base_file.cmp(&b.base_file))
    });
    Ok(matches)
}
