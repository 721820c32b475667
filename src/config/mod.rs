// src/config/mod.rs
pub mod types;

pub use self::types::{Config, VendorConfig};

use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::discovery::IgnoreMatcher;
use crate::error::{Result, SimprintError};
use crate::lang::Registry;
use crate::pipeline::Options;

pub const CONFIG_FILE: &str = "simprint.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `explicit` if given, otherwise `simprint.toml` from the working
    /// directory when present, otherwise defaults.
    ///
    /// # Errors
    /// Returns error if an explicit file is missing, or any file fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_file(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load_file(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    /// # Errors
    /// Returns error if the file cannot be read or is not valid config TOML.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SimprintError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        debug!(path = %path.display(), "loaded config");
        Self::parse_toml(&content)
    }

    /// # Errors
    /// Returns `Config` if the TOML is malformed or has wrongly typed fields.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| SimprintError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `Config` if parallelism is zero.
    pub fn validate(&self) -> Result<()> {
        if self.parallelism == 0 {
            return Err(SimprintError::Config("parallelism must be at least 1".into()));
        }
        Ok(())
    }

    /// Built-in normalizers narrowed to `languages`.
    ///
    /// # Errors
    /// Returns error if a built-in pattern fails to compile.
    pub fn registry(&self) -> Result<Registry> {
        Ok(Registry::builtin()?.filter(&self.languages))
    }

    /// # Errors
    /// Returns error if an ignore glob is invalid.
    pub fn ignore_matcher(&self) -> Result<IgnoreMatcher> {
        Ok(IgnoreMatcher::new(&self.ignore, self.include_hidden)?.with_prune(self.prune.clone()))
    }

    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            parallelism: self.parallelism,
            deadline: self.timeout_secs.map(Duration::from_secs),
            vendor: self.vendor.to_vendor(),
            ..Options::default()
        }
    }
}
