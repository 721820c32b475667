use serde::{Deserialize, Serialize};

use crate::discovery::DEFAULT_PRUNE;
use crate::types::{Vendor, ALGO_NAME, ALGO_VERSION};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorConfig {
    #[serde(default = "default_vendor_name")]
    pub name: String,
    #[serde(default = "default_tool_name")]
    pub tool_name: String,
    #[serde(default = "default_tool_version")]
    pub tool_version: String,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            name: default_vendor_name(),
            tool_name: default_tool_name(),
            tool_version: default_tool_version(),
        }
    }
}

impl VendorConfig {
    /// Provenance record; algorithm identity is fixed.
    #[must_use]
    pub fn to_vendor(&self) -> Vendor {
        Vendor {
            name: self.name.clone(),
            tool_name: self.tool_name.clone(),
            tool_version: self.tool_version.clone(),
            algo_name: ALGO_NAME.to_string(),
            algo_version: ALGO_VERSION.to_string(),
        }
    }
}

/// Contents of `simprint.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Comma-separated normalizer names, or `*`.
    #[serde(default = "default_languages")]
    pub languages: String,
    #[serde(default = "crate::pipeline::default_parallelism")]
    pub parallelism: usize,
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Directory names skipped anywhere in the tree. Empty walks everything.
    #[serde(default = "default_prune")]
    pub prune: Vec<String>,
    #[serde(default)]
    pub include_hidden: bool,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub vendor: VendorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            parallelism: crate::pipeline::default_parallelism(),
            ignore: Vec::new(),
            prune: default_prune(),
            include_hidden: false,
            timeout_secs: None,
            vendor: VendorConfig::default(),
        }
    }
}

fn default_languages() -> String { "*".to_string() }
fn default_prune() -> Vec<String> {
    DEFAULT_PRUNE.iter().map(|d| (*d).to_string()).collect()
}
fn default_vendor_name() -> String { env!("CARGO_PKG_NAME").to_string() }
fn default_tool_name() -> String { env!("CARGO_PKG_NAME").to_string() }
fn default_tool_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
