// src/exit.rs
//! Process exit codes for `simprint`.
//!
//! Scripts can branch on these; the numbering is stable.

use std::process::Termination;

use crate::error::SimprintError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SimprintExit {
    Success = 0,
    /// Generic error (I/O, config, JSON).
    Error = 1,
    /// Malformed user input (bad hex, bad glob).
    InvalidInput = 2,
    /// Single-file run on a file no normalizer claims.
    UnsupportedLanguage = 3,
    /// Directory traversal failed; no output was produced.
    WalkFailure = 4,
    /// Run was cancelled or hit its deadline.
    Cancelled = 5,
}

impl SimprintExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Exit code for an error surfaced through `anyhow`.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        err.downcast_ref::<SimprintError>()
            .map_or(Self::Error, Self::from)
    }
}

impl From<&SimprintError> for SimprintExit {
    fn from(err: &SimprintError) -> Self {
        match err {
            SimprintError::UnsupportedLanguage { .. } => Self::UnsupportedLanguage,
            SimprintError::Walk(_) => Self::WalkFailure,
            SimprintError::Cancelled | SimprintError::DeadlineExceeded(_) => Self::Cancelled,
            SimprintError::RootInvalid { .. }
            | SimprintError::InvalidFingerprint(_)
            | SimprintError::Glob(_) => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for SimprintExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
