// src/lang/mod.rs
//! Per-language content normalizers and the registry that selects them.

pub mod builtin;
pub mod pattern;

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;

pub use self::pattern::{LangSpec, PatternNormalizer};

/// A language capability: strips comments and boilerplate so cosmetic edits
/// do not move the fingerprint.
pub trait Normalizer: Send + Sync {
    /// Stable identifier, used as the language tag in output.
    fn name(&self) -> &str;

    /// Lowercase extensions without the leading dot.
    fn extensions(&self) -> &[&'static str];

    /// Pure and infallible. Input that no pattern recognises passes through.
    fn normalize(&self, raw: &str) -> String;

    fn supports(&self, ext: &str) -> bool {
        self.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Immutable, ordered list of active normalizers.
///
/// Order matters: when two normalizers claim the same extension the one
/// registered later wins.
#[derive(Clone)]
pub struct Registry {
    normalizers: Vec<Arc<dyn Normalizer>>,
}

impl Registry {
    #[must_use]
    pub fn new(normalizers: Vec<Arc<dyn Normalizer>>) -> Self {
        Self { normalizers }
    }

    /// Every built-in language, in registration order.
    ///
    /// # Errors
    /// Returns error if a built-in comment pattern fails to compile.
    pub fn builtin() -> Result<Self> {
        let normalizers = builtin::specs()
            .into_iter()
            .map(|spec| PatternNormalizer::new(spec).map(|n| Arc::new(n) as Arc<dyn Normalizer>))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(normalizers))
    }

    /// Keeps the normalizers named in a comma-separated list, or all for `"*"`.
    ///
    /// Unknown names are dropped silently. Registration order is kept.
    #[must_use]
    pub fn filter(&self, names: &str) -> Self {
        let wanted: BTreeSet<String> = names
            .split(',')
            .map(|n| n.trim().to_ascii_lowercase())
            .filter(|n| !n.is_empty())
            .collect();

        if wanted.contains("*") {
            return self.clone();
        }

        Self::new(
            self.normalizers
                .iter()
                .filter(|n| wanted.contains(&n.name().to_ascii_lowercase()))
                .cloned()
                .collect(),
        )
    }

    /// Resolves an extension to a normalizer, scanning the whole list and
    /// keeping the last match.
    #[must_use]
    pub fn select(&self, ext: &str) -> Option<&dyn Normalizer> {
        let mut found = None;
        for n in &self.normalizers {
            if n.supports(ext) {
                found = Some(n.as_ref());
            }
        }
        found
    }

    /// Resolves a path by its extension.
    #[must_use]
    pub fn select_for(&self, path: &Path) -> Option<&dyn Normalizer> {
        let ext = path.extension().and_then(|e| e.to_str())?;
        self.select(ext)
    }

    /// Union of supported extensions, used to prune the tree walk.
    #[must_use]
    pub fn extensions(&self) -> BTreeSet<String> {
        self.normalizers
            .iter()
            .flat_map(|n| n.extensions().iter().map(|e| e.to_ascii_lowercase()))
            .collect()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.normalizers.iter().map(|n| n.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Normalizer> {
        self.normalizers.iter().map(|n| n.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
