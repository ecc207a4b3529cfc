//! # cgats-tests
//!
//! Integration testing framework for cgats.
//!
//! This crate provides:
//! - A fixture corpus with a manifest of expected parse outcomes
//! - Deterministic generation of random CGATS documents
//! - Reference delta-E values computed with `palette`
//!
//! ## Test Categories
//!
//! 1. **Corpus**: every fixture parses (or fails) as the manifest says
//! 2. **Properties**: row width and print/parse round trips over generated files
//! 3. **Concurrency**: parallel parsing matches sequential parsing
//! 4. **Color**: delta-E against the reference and multi-file operations

pub mod corpus;
pub mod patterns;
pub mod reference;

pub use corpus::{CorpusEntry, Expectation, TestCorpus, error_name, testdata_dir};
pub use patterns::{Document, TestPattern, generate};

/// Install a test logger; repeated calls are harmless
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
