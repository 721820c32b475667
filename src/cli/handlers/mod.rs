// src/cli/handlers/mod.rs
//! Command handlers. Results go to stdout; diagnostics go through `tracing`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::compare;
use crate::config::Config;
use crate::exit::SimprintExit;
use crate::generator;
use crate::matcher::{self, Match};
use crate::pipeline::Pipeline;
use crate::types::Fingerprint;

pub struct FingerprintArgs {
    pub path: PathBuf,
    pub languages: Option<String>,
    pub parallelism: Option<usize>,
    pub ignore: Vec<String>,
    pub output: Option<PathBuf>,
    pub pretty: bool,
    pub timeout: Option<u64>,
}

impl FingerprintArgs {
    /// Folds command-line overrides into the file config.
    fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(languages) = &self.languages {
            config.languages.clone_from(languages);
        }
        if let Some(n) = self.parallelism {
            config.parallelism = n;
        }
        if self.timeout.is_some() {
            config.timeout_secs = self.timeout;
        }
        config.ignore.extend(self.ignore.iter().cloned());
        config.validate()?;
        Ok(config)
    }
}

/// Handles the fingerprint command.
///
/// # Errors
/// Returns error if the run fails or the output cannot be written.
pub fn handle_fingerprint(config: Config, args: &FingerprintArgs) -> Result<SimprintExit> {
    let config = args.apply(config)?;
    let pipeline = Pipeline::new(config.registry()?, config.ignore_matcher()?, config.options());

    let fingerprint = pipeline.run(&args.path)?;
    let json = fingerprint.to_json(args.pretty)?;

    match &args.output {
        Some(out) => {
            fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
            eprintln!(
                "{} {} files -> {}",
                "✓".green(),
                fingerprint.metadata.total_files,
                out.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(SimprintExit::Success)
}

/// Handles the digest command.
///
/// # Errors
/// Returns error if the file is unreadable or, unless `raw`, unsupported.
pub fn handle_digest(config: &Config, file: &Path, raw: bool) -> Result<SimprintExit> {
    let registry = config.registry()?;
    println!("{}", generator::digest_file(file, &registry, raw)?);
    Ok(SimprintExit::Success)
}

/// Handles the compare command.
///
/// # Errors
/// Returns error if either file cannot be read.
pub fn handle_compare(a: &Path, b: &Path) -> Result<SimprintExit> {
    let left = read_text(a)?;
    let right = read_text(b)?;
    println!("{}", compare::compare_texts(&left, &right));
    Ok(SimprintExit::Success)
}

/// Handles the distance command.
///
/// # Errors
/// Returns error if either argument is not a hex fingerprint.
pub fn handle_distance(a: &str, b: &str) -> Result<SimprintExit> {
    println!("{}", compare::distance_hex(a, b)?);
    Ok(SimprintExit::Success)
}

/// Handles the match command.
///
/// # Errors
/// Returns error if a document cannot be loaded or holds a malformed hash.
pub fn handle_match(base: &Path, target: &Path, threshold: u32, json: bool) -> Result<SimprintExit> {
    let base = load_fingerprint(base)?;
    let target = load_fingerprint(target)?;
    let matches = matcher::find_matches(&base, &target, threshold)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print_matches(&matches, threshold);
    }
    Ok(SimprintExit::Success)
}

/// Handles the languages command.
///
/// # Errors
/// Returns error if the registry cannot be built.
pub fn handle_languages(config: &Config) -> Result<SimprintExit> {
    let registry = config.registry()?;
    for normalizer in registry.iter() {
        println!(
            "{:<12} {}",
            normalizer.name().bold(),
            normalizer.extensions().join(", ").dimmed()
        );
    }
    Ok(SimprintExit::Success)
}

fn print_matches(matches: &[Match], threshold: u32) {
    if matches.is_empty() {
        println!("{}", format!("No matches within {threshold} bits.").green());
        return;
    }
    for m in matches {
        let tag = if m.exact {
            "exact".red().bold()
        } else {
            format!("d={}", m.distance).yellow()
        };
        println!("{tag}  {} ~ {}  ({})", m.target_file, m.base_file, m.language);
    }
    println!("\n{} match(es)", matches.len());
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load_fingerprint(path: &Path) -> Result<Fingerprint> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(Fingerprint::from_json(&json)?)
}
