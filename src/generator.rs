// src/generator.rs
//! Fingerprint of a single file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::checksum::Checksums;
use crate::error::{Result, SimprintError};
use crate::lang::Registry;
use crate::simhash;
use crate::types::{FileFingerprint, FingerprintHash};

/// How a caller treats per-file failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Skip files that cannot be read or have no normalizer (directory runs).
    BestEffort,
    /// Propagate every failure (single-file runs).
    Strict,
}

impl Mode {
    /// Applies the policy to one generator result. `Ok(None)` means skipped.
    ///
    /// # Errors
    /// Returns the original error in `Strict` mode, or in `BestEffort` mode
    /// when the error is not a per-file failure.
    pub fn apply(self, result: Result<FileFingerprint>) -> Result<Option<FileFingerprint>> {
        match (self, result) {
            (_, Ok(fp)) => Ok(Some(fp)),
            (Self::BestEffort, Err(e)) if e.is_per_file() => {
                debug!(error = %e, "skipping file");
                Ok(None)
            }
            (_, Err(e)) => Err(e),
        }
    }
}

/// Normalizes a path for output: relative, forward slashes.
#[must_use]
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Fingerprints `path`, recording it under `relative` in the output.
///
/// # Errors
/// `FileUnreadable` if the file cannot be stat'ed or read,
/// `UnsupportedLanguage` if no active normalizer claims its extension.
pub fn fingerprint_file(path: &Path, relative: &Path, registry: &Registry) -> Result<FileFingerprint> {
    let unreadable = |source| SimprintError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let meta = fs::metadata(path).map_err(unreadable)?;
    let content = fs::read(path).map_err(unreadable)?;

    let Some(normalizer) = registry.select_for(path) else {
        return Err(SimprintError::UnsupportedLanguage {
            path: path.to_path_buf(),
        });
    };

    let lines = content.iter().filter(|&&b| b == b'\n').count() as u64;
    let checksums = Checksums::of(&content);
    let normalized = normalizer.normalize(&String::from_utf8_lossy(&content));

    Ok(FileFingerprint {
        file: display_path(relative),
        size: meta.len(),
        lines,
        md5: checksums.md5,
        sha1: checksums.sha1,
        sha256: checksums.sha256,
        language: normalizer.name().to_string(),
        fingerprint: FingerprintHash {
            file: simhash::digest(normalized.as_bytes()),
        },
    })
}

/// Fingerprint hex of one file, normalized unless `raw`.
///
/// # Errors
/// `FileUnreadable`, or `UnsupportedLanguage` when normalizing a file no
/// active normalizer claims.
pub fn digest_file(path: &Path, registry: &Registry, raw: bool) -> Result<String> {
    let content = fs::read(path).map_err(|source| SimprintError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    if raw {
        return Ok(simhash::digest(&content));
    }
    let normalizer = registry
        .select_for(path)
        .ok_or_else(|| SimprintError::UnsupportedLanguage {
            path: path.to_path_buf(),
        })?;
    let normalized = normalizer.normalize(&String::from_utf8_lossy(&content));
    Ok(simhash::digest(normalized.as_bytes()))
}

/// Relative output path for a single-file run: the file name alone.
#[must_use]
pub fn single_file_name(path: &Path) -> PathBuf {
    path.file_name()
        .map_or_else(|| path.to_path_buf(), PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        write!(f, "{content}").unwrap();
        path
    }

    #[test]
    fn raw_metrics_and_normalized_hash() {
        let dir = TempDir::new().unwrap();
        let raw = "package main\n\n// hi\nfunc main() {\n}\n";
        let path = write(&dir, "main.go", raw);
        let registry = Registry::builtin().unwrap();

        let fp = fingerprint_file(&path, Path::new("cmd/main.go"), &registry).unwrap();
        assert_eq!(fp.file, "cmd/main.go");
        assert_eq!(fp.size, raw.len() as u64);
        assert_eq!(fp.lines, 5);
        assert_eq!(fp.language, "go");
        assert_eq!(fp.sha256, Checksums::of(raw.as_bytes()).sha256);
        assert_eq!(fp.fingerprint.file, simhash::digest(b"func main() {"));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.txt", "hello");
        let registry = Registry::builtin().unwrap();
        let err = fingerprint_file(&path, Path::new("notes.txt"), &registry).unwrap_err();
        assert!(matches!(err, SimprintError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let registry = Registry::builtin().unwrap();
        let err = fingerprint_file(Path::new("/nonexistent/x.rs"), Path::new("x.rs"), &registry)
            .unwrap_err();
        assert!(matches!(err, SimprintError::FileUnreadable { .. }));
    }

    #[test]
    fn digest_normalizes_unless_raw() {
        let dir = TempDir::new().unwrap();
        let raw = "package main\n\n// hi\nfunc main() {\n}\n";
        let path = write(&dir, "main.go", raw);
        let registry = Registry::builtin().unwrap();

        let normalized = digest_file(&path, &registry, false).unwrap();
        assert_eq!(normalized, simhash::digest(b"func main() {"));
        assert_eq!(digest_file(&path, &registry, true).unwrap(), simhash::digest(raw.as_bytes()));

        let txt = write(&dir, "notes.txt", "hello");
        assert!(digest_file(&txt, &registry, false).is_err());
        assert!(digest_file(&txt, &registry, true).is_ok());
    }

    #[test]
    fn mode_policy() {
        let unsupported = || {
            Err(SimprintError::UnsupportedLanguage {
                path: PathBuf::from("a"),
            })
        };
        assert!(matches!(Mode::BestEffort.apply(unsupported()), Ok(None)));
        assert!(Mode::Strict.apply(unsupported()).is_err());
        assert!(Mode::BestEffort
            .apply(Err(SimprintError::Walk("x".into())))
            .is_err());
    }
}
