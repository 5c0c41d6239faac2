mod models;

use url::Url;

pub use models::{FieldSet, Source, SourceParameters};

/// Profiles compiled into the binary.
const BUILTIN_SOURCES: &str = include_str!("../../resources/sources.json");

/// Profile used when the binary runs without further input.
pub const DEFAULT_SOURCE: &str = "proxmoxve";

/// Parsed set of source profiles.
#[derive(Debug, Clone)]
pub struct Sources {
    items: Vec<Source>,
}

impl Sources {
    /// Load the built-in profiles.
    pub fn builtin() -> Result<Self, SourcesError> {
        Self::from_json_str(BUILTIN_SOURCES)
    }

    /// Parse profiles from a JSON array and validate their URLs.
    pub fn from_json_str(json: &str) -> Result<Self, SourcesError> {
        let items: Vec<Source> = serde_json::from_str(json)?;
        for source in &items {
            validate_url(source.name(), source.url())?;
            validate_url(source.name(), source.script_base())?;
            if source.parameters.output.trim().is_empty() {
                return Err(SourcesError::EmptyOutput(source.name().to_string()));
            }
        }
        Ok(Self { items })
    }

    pub fn all(&self) -> &[Source] {
        &self.items
    }

    pub fn by_name(&self, name: &str) -> Result<&Source, SourcesError> {
        self.items
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| SourcesError::Unknown(name.to_string()))
    }
}

fn validate_url(source: &str, value: &str) -> Result<(), SourcesError> {
    Url::parse(value).map_err(|err| SourcesError::InvalidUrl {
        source_name: source.to_string(),
        url: value.to_string(),
        reason: err.to_string(),
    })?;
    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum SourcesError {
    #[error("unknown source: {0}")]
    Unknown(String),
    #[error("source '{source_name}' has an invalid URL '{url}': {reason}")]
    InvalidUrl {
        source_name: String,
        url: String,
        reason: String,
    },
    #[error("source '{0}' has an empty output path")]
    EmptyOutput(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
