use std::path::PathBuf;

use crate::catalog::CacheEntry;
use crate::sources::{FieldSet, Source};

/// Inputs of one cache build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub directory_url: String,
    pub script_base_url: String,
    pub output_path: PathBuf,
    pub fields: FieldSet,
    pub show_progress: bool,
}

impl BuildConfig {
    pub fn new(
        directory_url: impl Into<String>,
        script_base_url: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            directory_url: directory_url.into(),
            script_base_url: script_base_url.into(),
            output_path: output_path.into(),
            fields: FieldSet::default(),
            show_progress: false,
        }
    }

    pub fn with_fields(mut self, fields: FieldSet) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

impl From<&Source> for BuildConfig {
    fn from(source: &Source) -> Self {
        BuildConfig::new(source.url(), source.script_base(), source.output()).with_fields(source.fields())
    }
}

/// Why a listing record produced no cache entry.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("listing record has no download_url")]
    NoDownloadUrl,
    #[error("not a descriptor file")]
    NotDescriptor,
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("malformed descriptor: {0}")]
    Malformed(String),
    #[error("descriptor has no slug")]
    MissingSlug,
    #[error("first install method has no script")]
    MissingScript,
}

/// Result of processing one listing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Kept(CacheEntry),
    Skipped(SkipReason),
}

impl ItemOutcome {
    pub fn entry(&self) -> Option<&CacheEntry> {
        match self {
            ItemOutcome::Kept(entry) => Some(entry),
            ItemOutcome::Skipped(_) => None,
        }
    }

    pub fn into_entry(self) -> Option<CacheEntry> {
        match self {
            ItemOutcome::Kept(entry) => Some(entry),
            ItemOutcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            ItemOutcome::Kept(_) => None,
            ItemOutcome::Skipped(reason) => Some(reason),
        }
    }
}

/// Summary of a finished build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub entry_count: usize,
    pub skipped: usize,
    pub output_path: PathBuf,
    /// Hex SHA-256 of the bytes written.
    pub sha256: String,
}
