use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::matcher::DEFAULT_THRESHOLD;

#[derive(Parser)]
#[command(name = "simprint", version, about = "Source code similarity fingerprints")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Log progress to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Config file (default: ./simprint.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fingerprint a directory tree or a single file
    Fingerprint {
        path: PathBuf,
        /// Comma-separated language names, or `*`
        #[arg(long)]
        languages: Option<String>,
        /// Worker threads
        #[arg(long, short = 'j')]
        parallelism: Option<usize>,
        /// Extra ignore glob, relative to PATH (repeatable)
        #[arg(long, value_name = "GLOB")]
        ignore: Vec<String>,
        /// Write JSON here instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
        /// Give up after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },
    /// Print the fingerprint of one file
    Digest {
        file: PathBuf,
        /// Hash raw bytes, skipping normalization
        #[arg(long)]
        raw: bool,
    },
    /// Hamming distance between two files' raw contents
    Compare { a: PathBuf, b: PathBuf },
    /// Hamming distance between two hex fingerprints
    Distance { a: String, b: String },
    /// Near-duplicate files between two fingerprint documents
    Match {
        base: PathBuf,
        target: PathBuf,
        #[arg(long, short, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u32,
        /// Emit matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// List supported languages and their extensions
    Languages,
}
