use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Credentials;

/// Record persisted to the helpers cache file.
///
/// Field order here is the key order of the written JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub slug: String,
    pub desc: String,
    pub script: String,
    pub script_url: String,
    pub categories: Vec<Value>,
    pub notes: Vec<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_credentials: Option<Credentials>,
}
