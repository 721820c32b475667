// src/discovery.rs
//! Tree walking: the producer stage of the directory pipeline.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{select, Receiver, Sender};
use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, SimprintError};

/// Directories pruned unless the config names its own list: VCS metadata only.
pub const DEFAULT_PRUNE: &[&str] = &[".git", ".hg", ".svn"];

/// Decides which paths (relative to the root) are excluded from the walk.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    globs: GlobSet,
    prune: Vec<String>,
    include_hidden: bool,
}

impl IgnoreMatcher {
    /// Matcher pruning [`DEFAULT_PRUNE`].
    ///
    /// # Errors
    /// Returns error if any pattern is not a valid glob.
    pub fn new(patterns: &[String], include_hidden: bool) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            globs: builder.build()?,
            prune: DEFAULT_PRUNE.iter().map(|d| (*d).to_string()).collect(),
            include_hidden,
        })
    }

    /// Replaces the pruned directory names. An empty list prunes nothing.
    #[must_use]
    pub fn with_prune(mut self, prune: Vec<String>) -> Self {
        self.prune = prune;
        self
    }

    /// True when `rel` (or one of its directories) is ignored.
    ///
    /// Prune names and the dot-entry rule apply to directories only, so
    /// `.eslintrc.js` is kept while `.cache/x.js` is not. `is_dir` says
    /// whether the last component is itself a directory.
    #[must_use]
    pub fn matches(&self, rel: &Path, is_dir: bool) -> bool {
        let names: Vec<_> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect();
        let dirs = if is_dir {
            names.as_slice()
        } else {
            names.split_last().map_or(&[][..], |(_, parents)| parents)
        };

        let pruned = dirs.iter().any(|name| {
            self.prune.iter().any(|p| p.as_str() == &**name)
                || (!self.include_hidden && name.starts_with('.'))
        });
        pruned || self.globs.is_match(normalize_path(rel))
    }
}

impl Default for IgnoreMatcher {
    fn default() -> Self {
        Self {
            globs: GlobSet::empty(),
            prune: DEFAULT_PRUNE.iter().map(|d| (*d).to_string()).collect(),
            include_hidden: false,
        }
    }
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// A file discovered by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub relative: PathBuf,
}

/// Running walker: a live stream of candidates plus a terminal error signal.
pub struct Walk {
    pub candidates: Receiver<Candidate>,
    pub errors: Receiver<SimprintError>,
    handle: JoinHandle<usize>,
}

impl Walk {
    /// Wraps an already running producer. `handle` yields the number of
    /// candidates sent; at most one error is read from `errors`.
    #[must_use]
    pub fn new(
        candidates: Receiver<Candidate>,
        errors: Receiver<SimprintError>,
        handle: JoinHandle<usize>,
    ) -> Self {
        Self {
            candidates,
            errors,
            handle,
        }
    }

    /// Waits for the walker thread and returns how many candidates it sent.
    ///
    /// # Errors
    /// Returns `Walk` if the walker thread panicked.
    pub fn join(self) -> Result<(usize, Option<SimprintError>)> {
        let sent = self
            .handle
            .join()
            .map_err(|_| SimprintError::Walk("walker thread panicked".into()))?;
        Ok((sent, self.errors.try_recv().ok()))
    }
}

/// Starts walking `root` on its own thread.
///
/// Only regular files whose extension is in `suffixes` (when given) and that
/// the ignore matcher lets through are sent. The first walk error is posted
/// on `errors` and stops the walk. A closed `done` signal also stops it.
///
/// # Errors
/// Returns error if the walker thread cannot be spawned.
pub fn spawn(
    root: &Path,
    ignore: Arc<IgnoreMatcher>,
    suffixes: Option<BTreeSet<String>>,
    done: Receiver<()>,
    capacity: usize,
) -> Result<Walk> {
    let (tx, candidates) = crossbeam_channel::bounded(capacity.max(1));
    let (err_tx, errors) = crossbeam_channel::bounded(1);
    let root = root.to_path_buf();

    let handle = thread::Builder::new()
        .name("fingerprint-walker".into())
        .spawn(move || walk(&root, &ignore, suffixes.as_ref(), &tx, &err_tx, &done))?;

    Ok(Walk {
        candidates,
        errors,
        handle,
    })
}

fn walk(
    root: &Path,
    ignore: &IgnoreMatcher,
    suffixes: Option<&BTreeSet<String>>,
    tx: &Sender<Candidate>,
    err_tx: &Sender<SimprintError>,
    done: &Receiver<()>,
) -> usize {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !ignore.matches(relative_to(root, e.path()), e.file_type().is_dir())
        });

    let mut sent = 0;
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "walk failed");
                let _ = err_tx.try_send(e.into());
                break;
            }
        };

        if !entry.file_type().is_file() || !has_suffix(entry.path(), suffixes) {
            continue;
        }

        let candidate = Candidate {
            path: entry.path().to_path_buf(),
            relative: relative_to(root, entry.path()).to_path_buf(),
        };

        select! {
            send(tx, candidate) -> res => {
                if res.is_err() {
                    break;
                }
                sent += 1;
            }
            recv(done) -> _ => {
                debug!("walk stopped by done signal");
                break;
            }
        }
    }
    sent
}

fn relative_to<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn has_suffix(path: &Path, suffixes: Option<&BTreeSet<String>>) -> bool {
    let Some(suffixes) = suffixes else {
        return true;
    };
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| suffixes.contains(&e.to_ascii_lowercase()))
}
