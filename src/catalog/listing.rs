use serde::Deserialize;

/// Suffix a listed file must carry to be treated as a descriptor.
pub const DESCRIPTOR_SUFFIX: &str = ".json";

/// One record of the remote directory listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
}

impl ListingEntry {
    pub fn new(name: Option<String>, download_url: Option<String>) -> Self {
        Self { name, download_url }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    /// The download URL, if this record points at a JSON descriptor.
    pub fn descriptor_url(&self) -> Option<&str> {
        self.download_url().filter(|url| url.ends_with(DESCRIPTOR_SUFFIX))
    }
}
