// src/pipeline.rs
//! Directory fingerprint pipeline.
//!
//! ```text
//! walker thread ──candidates──▶ worker 0..N ──results──▶ collector (caller thread)
//!        ▲                          ▲                        │
//!        └────────── done signal (CancelToken) ◀─────────────┘ closed on return
//! ```
//!
//! Workers share nothing but the channels. Completion order is arbitrary;
//! the collector sorts by path once every worker has hung up, which is the
//! only point where output order is fixed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{select, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::discovery::{self, Candidate, IgnoreMatcher, Walk};
use crate::error::{Result, SimprintError};
use crate::generator::{self, Mode};
use crate::lang::Registry;
use crate::types::{FileFingerprint, Fingerprint, OutputMode, Vendor};

/// Gets a reasonable worker count based on available CPUs.
#[must_use]
pub fn default_parallelism() -> usize {
    thread::available_parallelism()
        .map(|n| n.get().min(16))
        .unwrap_or(4)
}

#[derive(Debug, Clone)]
pub struct Options {
    pub parallelism: usize,
    /// Upper bound on a directory run; `None` waits indefinitely.
    pub deadline: Option<Duration>,
    pub channel_capacity: usize,
    pub vendor: Vendor,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            deadline: None,
            channel_capacity: 256,
            vendor: Vendor::default(),
        }
    }
}

pub struct Pipeline {
    registry: Registry,
    ignore: Arc<IgnoreMatcher>,
    options: Options,
}

impl Pipeline {
    #[must_use]
    pub fn new(registry: Registry, ignore: IgnoreMatcher, options: Options) -> Self {
        Self {
            registry,
            ignore: Arc::new(ignore),
            options,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Fingerprints `root`, a directory or a single file.
    ///
    /// # Errors
    /// See [`Pipeline::run_with`].
    pub fn run(&self, root: &Path) -> Result<Fingerprint> {
        self.run_with(root, &CancelToken::new())
    }

    /// Fingerprints `root` under a caller-held cancellation token.
    ///
    /// The token is cancelled when this call returns, on every path.
    ///
    /// # Errors
    /// - `RootInvalid` if `root` cannot be stat'ed.
    /// - For a single file: any generator error, including `UnsupportedLanguage`.
    /// - For a directory: `Walk` if traversal fails (all collected results are
    ///   discarded), `Cancelled`, or `DeadlineExceeded`.
    pub fn run_with(&self, root: &Path, cancel: &CancelToken) -> Result<Fingerprint> {
        let _guard = cancel.guard();

        let meta = fs::metadata(root).map_err(|source| SimprintError::RootInvalid {
            path: root.to_path_buf(),
            source,
        })?;

        if meta.is_file() {
            return self.run_file(root);
        }
        self.run_dir(root, cancel)
    }

    /// Single-file mode: bypasses the worker pool and fails loudly.
    ///
    /// # Errors
    /// Propagates every generator error.
    pub fn run_file(&self, path: &Path) -> Result<Fingerprint> {
        let relative = generator::single_file_name(path);
        let result = generator::fingerprint_file(path, &relative, &self.registry);
        let files: Vec<_> = Mode::Strict.apply(result)?.into_iter().collect();
        Ok(Fingerprint::assemble(
            files,
            1,
            OutputMode::File,
            self.options.vendor.clone(),
        ))
    }

    fn run_dir(&self, root: &Path, cancel: &CancelToken) -> Result<Fingerprint> {
        info!(
            root = %root.display(),
            parallelism = self.options.parallelism,
            languages = ?self.registry.names(),
            "fingerprinting directory"
        );

        let walk = discovery::spawn(
            root,
            Arc::clone(&self.ignore),
            Some(self.registry.extensions()),
            cancel.done().clone(),
            self.options.channel_capacity,
        )?;
        self.run_walk(walk, cancel)
    }

    /// Drains a running walk through the worker pool.
    ///
    /// The walk's terminal error, if any, is checked only after every worker
    /// has finished, and it discards whatever was collected.
    ///
    /// # Errors
    /// `Walk` (or whatever the producer posted), `Cancelled`, or `DeadlineExceeded`.
    pub fn run_walk(&self, walk: Walk, cancel: &CancelToken) -> Result<Fingerprint> {
        let _guard = cancel.guard();
        let start = Instant::now();

        let files = self.execute(&walk.candidates, cancel)?;

        let (discovered, walk_error) = walk.join()?;
        if let Some(e) = walk_error {
            warn!(error = %e, collected = files.len(), "discarding batch after walk failure");
            return Err(e);
        }

        let fingerprint = Fingerprint::assemble(
            files,
            discovered as u64,
            OutputMode::Directory,
            self.options.vendor.clone(),
        );
        info!(
            files = fingerprint.metadata.total_files,
            discovered,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "fingerprinting finished"
        );
        Ok(fingerprint)
    }

    /// Runs the worker pool over an explicit candidate list instead of a walk.
    ///
    /// # Errors
    /// `Cancelled` or `DeadlineExceeded`.
    pub fn run_candidates(
        &self,
        candidates: Vec<Candidate>,
        cancel: &CancelToken,
    ) -> Result<Fingerprint> {
        let _guard = cancel.guard();
        let total = candidates.len() as u64;

        let (tx, rx) = crossbeam_channel::bounded(self.options.channel_capacity.max(1));
        let done = cancel.done().clone();
        let feeder = thread::Builder::new()
            .name("fingerprint-feeder".into())
            .spawn(move || feed(candidates, &tx, &done))?;

        let files = self.execute(&rx, cancel)?;
        feeder
            .join()
            .map_err(|_| SimprintError::Walk("feeder thread panicked".into()))?;

        Ok(Fingerprint::assemble(
            files,
            total,
            OutputMode::Directory,
            self.options.vendor.clone(),
        ))
    }

    /// Fans candidates out to the worker pool and drains the results.
    fn execute(
        &self,
        candidates: &Receiver<Candidate>,
        cancel: &CancelToken,
    ) -> Result<Vec<FileFingerprint>> {
        let (result_tx, result_rx) =
            crossbeam_channel::bounded(self.options.channel_capacity.max(1));

        let workers = (0..self.options.parallelism.max(1))
            .map(|idx| {
                spawn_worker(
                    idx,
                    candidates.clone(),
                    result_tx.clone(),
                    cancel.done().clone(),
                    self.registry.clone(),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        // The result stream ends once every worker has dropped its sender.
        drop(result_tx);

        let files = self.collect(&result_rx, cancel)?;

        for handle in workers {
            handle
                .join()
                .map_err(|_| SimprintError::Walk("worker thread panicked".into()))?;
        }
        Ok(files)
    }

    fn collect(
        &self,
        results: &Receiver<Result<FileFingerprint>>,
        cancel: &CancelToken,
    ) -> Result<Vec<FileFingerprint>> {
        let timeout = match self.options.deadline {
            Some(d) => crossbeam_channel::at(Instant::now() + d),
            None => crossbeam_channel::never(),
        };

        let mut files = Vec::new();
        loop {
            select! {
                recv(results) -> msg => match msg {
                    Ok(Ok(fp)) => files.push(fp),
                    Ok(Err(e)) => return Err(e),
                    Err(_) => break,
                },
                recv(cancel.done()) -> _ => return Err(SimprintError::Cancelled),
                recv(timeout) -> _ => {
                    let limit = self.options.deadline.unwrap_or_default();
                    return Err(SimprintError::DeadlineExceeded(limit));
                }
            }
        }

        // Workers also stop on cancellation, which can close the result
        // stream before the done branch is picked.
        if cancel.is_cancelled() {
            return Err(SimprintError::Cancelled);
        }
        Ok(files)
    }
}

fn spawn_worker(
    idx: usize,
    candidates: Receiver<Candidate>,
    results: Sender<Result<FileFingerprint>>,
    done: Receiver<()>,
    registry: Registry,
) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name(format!("fingerprint-worker-{idx}"))
        .spawn(move || work(&candidates, &results, &done, &registry))?;
    Ok(handle)
}

fn work(
    candidates: &Receiver<Candidate>,
    results: &Sender<Result<FileFingerprint>>,
    done: &Receiver<()>,
    registry: &Registry,
) {
    loop {
        let candidate = select! {
            recv(candidates) -> msg => match msg {
                Ok(c) => c,
                Err(_) => return,
            },
            recv(done) -> _ => return,
        };

        let result = generator::fingerprint_file(&candidate.path, &candidate.relative, registry);
        let message = match Mode::BestEffort.apply(result) {
            Ok(Some(fp)) => Ok(fp),
            Ok(None) => continue,
            Err(e) => Err(e),
        };

        select! {
            send(results, message) -> res => {
                if res.is_err() {
                    return;
                }
            }
            recv(done) -> _ => {
                debug!(path = %candidate.relative.display(), "dropping result after done");
                return;
            }
        }
    }
}

fn feed(candidates: Vec<Candidate>, tx: &Sender<Candidate>, done: &Receiver<()>) {
    for candidate in candidates {
        select! {
            send(tx, candidate) -> res => {
                if res.is_err() {
                    return;
                }
            }
            recv(done) -> _ => return,
        }
    }
}

/// Convenience for callers holding plain paths under `root`.
#[must_use]
pub fn candidates_under(root: &Path, paths: &[PathBuf]) -> Vec<Candidate> {
    paths
        .iter()
        .map(|p| Candidate {
            path: root.join(p),
            relative: p.clone(),
        })
        .collect()
}
