//! Command dispatch, kept out of the binary.

use std::path::Path;

use anyhow::Result;

use super::args::Commands;
use super::handlers::{self, FingerprintArgs};
use crate::config::Config;
use crate::exit::SimprintExit;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the config cannot be loaded or the handler fails.
pub fn execute(command: Commands, config_path: Option<&Path>) -> Result<SimprintExit> {
    match command {
        Commands::Fingerprint {
            path,
            languages,
            parallelism,
            ignore,
            output,
            pretty,
            timeout,
        } => {
            let config = Config::load(config_path)?;
            handlers::handle_fingerprint(
                config,
                &FingerprintArgs {
                    path,
                    languages,
                    parallelism,
                    ignore,
                    output,
                    pretty,
                    timeout,
                },
            )
        }
        Commands::Digest { file, raw } => {
            let config = Config::load(config_path)?;
            handlers::handle_digest(&config, &file, raw)
        }
        Commands::Compare { a, b } => handlers::handle_compare(&a, &b),
        Commands::Distance { a, b } => handlers::handle_distance(&a, &b),
        Commands::Match {
            base,
            target,
            threshold,
            json,
        } => handlers::handle_match(&base, &target, threshold, json),
        Commands::Languages => {
            let config = Config::load(config_path)?;
            handlers::handle_languages(&config)
        }
    }
}
