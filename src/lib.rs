// src/lib.rs
//! Similarity fingerprints for source trees.
//!
//! Every supported file is normalized per language, hashed line by line into a
//! 64-bit SimHash, and collected into a [`types::Fingerprint`] document that
//! can be compared against others with [`matcher`].

pub mod cancel;
pub mod checksum;
pub mod cli;
pub mod compare;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod generator;
pub mod lang;
pub mod matcher;
pub mod pipeline;
pub mod simhash;
pub mod types;
