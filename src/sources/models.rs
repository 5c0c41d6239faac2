use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional descriptor fields copied into each cache entry.
///
/// `slug`, `desc`, `script`, `script_url`, `categories` and `notes` are always
/// written; these toggles cover the fields that varied between cache layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSet {
    pub name: bool,
    #[serde(rename = "type")]
    pub kind: bool,
    pub default_credentials: bool,
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FieldSet {
    pub const fn all() -> Self {
        Self {
            name: true,
            kind: true,
            default_credentials: true,
        }
    }

    pub const fn minimal() -> Self {
        Self {
            name: false,
            kind: false,
            default_credentials: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceParameters {
    pub(crate) script_base: String,
    pub(crate) output: String,
}

/// One indexed script repository: where to list descriptors, where the
/// scripts live and where the cache is written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) parameters: SourceParameters,
    #[serde(default)]
    pub(crate) fields: FieldSet,
}

impl Source {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Listing endpoint returning one record per descriptor file.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn script_base(&self) -> &str {
        &self.parameters.script_base
    }

    pub fn output(&self) -> &Path {
        Path::new(&self.parameters.output)
    }

    pub fn fields(&self) -> FieldSet {
        self.fields
    }
}
