// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimprintError {
    #[error("root is missing or inaccessible: {path}: {source}")]
    RootInvalid {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(String),

    #[error("cannot read {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no normalizer supports {path}")]
    UnsupportedLanguage { path: PathBuf },

    #[error("fingerprinting was cancelled")]
    Cancelled,

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(std::time::Duration),

    #[error("invalid fingerprint: {0}")]
    InvalidFingerprint(String),

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Glob error: {0}")]
    Glob(#[from] globset::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SimprintError>;

// Allow `?` on std::io::Error by converting to SimprintError::Io with unknown path.
impl From<std::io::Error> for SimprintError {
    fn from(source: std::io::Error) -> Self {
        SimprintError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

// A walker error aborts the whole batch, so keep the offending path in the message.
impl From<walkdir::Error> for SimprintError {
    fn from(e: walkdir::Error) -> Self {
        match e.path() {
            Some(p) => SimprintError::Walk(format!("{}: {e}", p.display())),
            None => SimprintError::Walk(e.to_string()),
        }
    }
}

impl SimprintError {
    /// True for per-file failures that batch mode skips instead of aborting.
    #[must_use]
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::FileUnreadable { .. } | Self::UnsupportedLanguage { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_file_errors_are_classified() {
        let unsupported = SimprintError::UnsupportedLanguage {
            path: PathBuf::from("a.bin"),
        };
        assert!(unsupported.is_per_file());
        assert!(!SimprintError::Walk("boom".into()).is_per_file());
        assert!(!SimprintError::Cancelled.is_per_file());
    }
}
