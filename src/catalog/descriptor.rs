use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Remote metadata document describing one installable script.
///
/// Everything is optional at this level; mandatory fields are checked when
/// the descriptor is projected into a cache entry. A field of the wrong type
/// reads as absent instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptDescriptor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub(crate) name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(crate) slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub(crate) description: Option<String>,
    // passed through untouched; upstream mixes names and numeric ids
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) categories: Option<Vec<Value>>,
    // non-record entries are dropped when flattened
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) notes: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) install_methods: Option<Vec<Value>>,
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub(crate) kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) default_credentials: Option<Credentials>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: Option<String>,
}

/// Decode `T`, falling back to its default when the value has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Strings as-is, numbers and booleans in their JSON spelling, anything else
/// absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

impl Credentials {
    /// True when at least one of username/password is non-blank.
    pub fn is_meaningful(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.username) || filled(&self.password)
    }
}

impl ScriptDescriptor {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Slug, if present and non-empty.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn categories(&self) -> &[Value] {
        self.categories.as_deref().unwrap_or_default()
    }

    pub fn notes(&self) -> &[Value] {
        self.notes.as_deref().unwrap_or_default()
    }

    /// Script path of the first install method, if it is a non-empty string.
    pub fn script(&self) -> Option<&str> {
        self.install_methods
            .as_deref()
            .and_then(|methods| methods.first())
            .and_then(|method| method.as_object()?.get("script")?.as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn default_credentials(&self) -> Option<&Credentials> {
        self.default_credentials.as_ref()
    }
}
