//! Test corpus management
//!
//! Fixture files live in `testdata/cgats/` next to a `manifest.json`
//! describing what parsing each of them must produce.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cgats::CgatsError;
use log::debug;
use serde::Deserialize;

/// Expected outcome of parsing a fixture
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Parses successfully
    Ok,
    /// Fails with the named error kind (see [`error_name`])
    Error(String),
}

/// One fixture and its expected outcome
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusEntry {
    /// File name relative to the corpus directory
    pub file: String,
    pub expect: Expectation,
    /// Dialect name as printed by `CgatsType`'s Display, `None` if not inferred
    #[serde(default)]
    pub cgats_type: Option<String>,
    #[serde(default)]
    pub samples: Option<usize>,
    #[serde(default)]
    pub fields: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    entries: Vec<CorpusEntry>,
}

/// Fixture files together with their manifest
pub struct TestCorpus {
    entries: Vec<CorpusEntry>,
    base_path: PathBuf,
}

/// Default corpus location, `testdata/cgats` at the workspace root
pub fn testdata_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("testdata")
        .join("cgats")
}

impl TestCorpus {
    /// Load the manifest from `base_path/manifest.json`
    pub fn load(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        let manifest_path = base_path.join("manifest.json");
        let text = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("reading {}", manifest_path.display()))?;
        let manifest: Manifest = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", manifest_path.display()))?;

        debug!(
            "loaded {} corpus entries from {}",
            manifest.entries.len(),
            base_path.display()
        );

        Ok(Self {
            entries: manifest.entries,
            base_path,
        })
    }

    /// Load the default corpus
    pub fn load_default() -> Result<Self> {
        Self::load(testdata_dir())
    }

    /// All manifest entries
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    /// Entries expected to parse
    pub fn valid(&self) -> impl Iterator<Item = &CorpusEntry> {
        self.entries.iter().filter(|e| e.expect == Expectation::Ok)
    }

    /// Get entry by file name
    pub fn get(&self, file: &str) -> Option<&CorpusEntry> {
        self.entries.iter().find(|e| e.file == file)
    }

    /// Absolute path of a fixture
    pub fn path(&self, file: &str) -> PathBuf {
        self.base_path.join(file)
    }

    /// Fixture files present on disk, excluding the manifest
    pub fn files_on_disk(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.base_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name != "manifest.json" {
                files.push(name);
            }
        }
        files.sort();
        Ok(files)
    }
}

/// Stable name of an error kind, as used in the manifest
pub fn error_name(err: &CgatsError) -> &'static str {
    match err {
        CgatsError::NoData => "NoData",
        CgatsError::NoDataFormat => "NoDataFormat",
        CgatsError::FormatDataMismatch => "FormatDataMismatch",
        CgatsError::UnknownFormatType(_) => "UnknownFormatType",
        CgatsError::DuplicateFormatType(_) => "DuplicateFormatType",
        CgatsError::FileError(_) => "FileError",
        CgatsError::EmptyFile => "EmptyFile",
        CgatsError::InvalidID => "InvalidID",
        CgatsError::CannotCompare => "CannotCompare",
        _ => "Other",
    }
}
