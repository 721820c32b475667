// src/lang/pattern.rs
//! Regex-driven normalizer shared by every built-in language.
//!
//! Normalization runs in three passes:
//! 1. Remove comments with the language's patterns, in declaration order
//!    (block comments are listed before line comments).
//! 2. Trim each line; drop blank lines and lines starting with a boilerplate
//!    prefix such as `import` or a lone brace.
//! 3. Optionally collapse runs of whitespace inside a line.
//!
//! Surviving lines are joined with `\n` and no trailing newline.

use regex::Regex;

use super::Normalizer;
use crate::error::Result;

/// Static description of a language, compiled into a [`PatternNormalizer`].
#[derive(Debug, Clone, Copy)]
pub struct LangSpec {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub comments: &'static [&'static str],
    pub skip_prefixes: &'static [&'static str],
    pub collapse_whitespace: bool,
}

#[derive(Debug)]
pub struct PatternNormalizer {
    name: &'static str,
    extensions: &'static [&'static str],
    comments: Vec<Regex>,
    skip_prefixes: &'static [&'static str],
    whitespace: Option<Regex>,
}

impl PatternNormalizer {
    /// Compiles the language's patterns once; the instance is immutable afterwards.
    ///
    /// # Errors
    /// Returns error if any comment pattern is not a valid regex.
    pub fn new(spec: LangSpec) -> Result<Self> {
        let comments = spec
            .comments
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let whitespace = if spec.collapse_whitespace {
            Some(Regex::new(r"\s+")?)
        } else {
            None
        };

        Ok(Self {
            name: spec.name,
            extensions: spec.extensions,
            comments,
            skip_prefixes: spec.skip_prefixes,
            whitespace,
        })
    }

    fn strip_comments(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for re in &self.comments {
            if re.is_match(&text) {
                text = re.replace_all(&text, "").into_owned();
            }
        }
        text
    }

    fn is_boilerplate(&self, line: &str) -> bool {
        self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    fn clean_line(&self, line: &str) -> String {
        match &self.whitespace {
            Some(ws) => ws.replace_all(line, " ").into_owned(),
            None => line.to_string(),
        }
    }
}

impl Normalizer for PatternNormalizer {
    fn name(&self) -> &str {
        self.name
    }

    fn extensions(&self) -> &[&'static str] {
        self.extensions
    }

    fn normalize(&self, raw: &str) -> String {
        let stripped = self.strip_comments(raw);
        stripped
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !self.is_boilerplate(l))
            .map(|l| self.clean_line(l))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
