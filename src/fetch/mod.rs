use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;

use crate::catalog::ListingEntry;

/// User agent sent with every request; the GitHub API refuses anonymous
/// clients without one.
pub const USER_AGENT: &str = concat!("helpers-cache/", env!("CARGO_PKG_VERSION"));

/// Where listings and descriptors come from.
#[async_trait]
pub trait DescriptorSource {
    /// Fetch the directory listing at `url`.
    async fn list(&self, url: &str) -> Result<Vec<ListingEntry>>;

    /// Fetch and parse one descriptor document.
    async fn fetch(&self, url: &str) -> Result<Value>;
}

/// `DescriptorSource` backed by plain HTTP GETs.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        Self::from_builder(Client::builder())
    }

    /// Finish `builder` with the crate's user agent.
    pub fn from_builder(builder: ClientBuilder) -> Result<Self> {
        let client = builder
            .user_agent(USER_AGENT)
            .build()
            .context("build HTTP client")?;
        Ok(Self { client })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = res.status();
        if !status.is_success() {
            bail!("HTTP {status} for {url}");
        }

        let bytes = res
            .bytes()
            .await
            .with_context(|| format!("read body from {url}"))?;

        serde_json::from_slice(&bytes).with_context(|| format!("parse JSON from {url}"))
    }
}

#[async_trait]
impl DescriptorSource for HttpSource {
    async fn list(&self, url: &str) -> Result<Vec<ListingEntry>> {
        self.get_json(url).await
    }

    async fn fetch(&self, url: &str) -> Result<Value> {
        self.get_json(url).await
    }
}
