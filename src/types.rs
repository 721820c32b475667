// src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::checksum::Checksums;
use crate::error::Result;

pub const ALGO_NAME: &str = "simhash";
pub const ALGO_VERSION: &str = "1.0";

/// Hex SimHash of the normalized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintHash {
    pub file: String,
}

/// Fingerprint of one file. Size, lines and checksums describe the raw
/// bytes; the SimHash describes the normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFingerprint {
    pub file: String,
    pub size: u64,
    pub lines: u64,
    pub md5: String,
    pub sha1: String,
    pub sha256: String,
    pub language: String,
    pub fingerprint: FingerprintHash,
}

impl FileFingerprint {
    #[must_use]
    pub fn checksums(&self) -> Checksums {
        Checksums {
            md5: self.md5.clone(),
            sha1: self.sha1.clone(),
            sha256: self.sha256.clone(),
        }
    }

    /// Parses the stored hex SimHash.
    ///
    /// # Errors
    /// Returns `InvalidFingerprint` if the stored value is not hex.
    pub fn simhash(&self) -> Result<u64> {
        crate::simhash::parse_hex(&self.fingerprint.file)
    }
}

/// Provenance of a fingerprint document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub name: String,
    pub tool_name: String,
    pub tool_version: String,
    pub algo_name: String,
    pub algo_version: String,
}

impl Default for Vendor {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            algo_name: ALGO_NAME.to_string(),
            algo_version: ALGO_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Directory,
    File,
}

impl OutputMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Files present in `files`.
    pub total_files: u64,
    /// Candidates the walker produced, including files later skipped.
    pub total_count: u64,
    pub total_size: u64,
    pub total_lines: u64,
    pub language: Vec<String>,
    /// Unix milliseconds.
    pub created_at: i64,
    pub output_mode: String,
    pub vendor: Vendor,
}

/// Aggregate fingerprint of a run: metadata plus files sorted by path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    pub metadata: Metadata,
    pub files: Vec<FileFingerprint>,
}

impl Fingerprint {
    /// Builds the aggregate in one step. Files are sorted by path before any
    /// total is computed.
    #[must_use]
    pub fn assemble(
        mut files: Vec<FileFingerprint>,
        total_count: u64,
        mode: OutputMode,
        vendor: Vendor,
    ) -> Self {
        files.sort_by(|a, b| a.file.cmp(&b.file));

        let language: BTreeSet<&str> = files.iter().map(|f| f.language.as_str()).collect();
        let metadata = Metadata {
            total_files: files.len() as u64,
            total_count,
            total_size: files.iter().map(|f| f.size).sum(),
            total_lines: files.iter().map(|f| f.lines).sum(),
            language: language.into_iter().map(str::to_string).collect(),
            created_at: chrono::Utc::now().timestamp_millis(),
            output_mode: mode.as_str().to_string(),
            vendor,
        };

        Self { metadata, files }
    }

    /// Serializes to JSON.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parses a document produced by [`Fingerprint::to_json`].
    ///
    /// # Errors
    /// Returns error if the JSON does not match the document shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
