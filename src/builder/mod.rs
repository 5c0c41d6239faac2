mod models;

pub use models::{BuildConfig, BuildReport, ItemOutcome, SkipReason};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::catalog::{CacheEntry, ListingEntry, ScriptDescriptor};
use crate::fetch::DescriptorSource;
use crate::sources::FieldSet;

/// List, fetch, project and write the cache in one sequential pass.
///
/// Only a failing listing request or a failing write aborts the run; every
/// per-descriptor problem is absorbed as a [`SkipReason`].
pub async fn build<S>(source: &S, config: &BuildConfig) -> Result<BuildReport>
where
    S: DescriptorSource + Sync + ?Sized,
{
    let outcomes = collect(source, config).await?;
    let skipped = outcomes.iter().filter(|o| o.skip_reason().is_some()).count();
    let entries: Vec<CacheEntry> = outcomes.into_iter().filter_map(ItemOutcome::into_entry).collect();

    let sha256 = write_cache(&config.output_path, &entries)?;

    info!(
        operation = "write",
        status = "success",
        path = %config.output_path.display(),
        entry_count = entries.len(),
        skipped,
        sha256 = %sha256,
        "cache written"
    );

    Ok(BuildReport {
        entry_count: entries.len(),
        skipped,
        output_path: config.output_path.clone(),
        sha256,
    })
}

/// Run the fetch and projection steps, returning one outcome per listing
/// record in listing order. Nothing is written.
pub async fn collect<S>(source: &S, config: &BuildConfig) -> Result<Vec<ItemOutcome>>
where
    S: DescriptorSource + Sync + ?Sized,
{
    info!(operation = "list", url = %config.directory_url, "listing descriptors");

    let listing = source
        .list(&config.directory_url)
        .await
        .with_context(|| format!("fetch descriptor listing from {}", config.directory_url))?;

    info!(operation = "list", status = "success", entry_count = listing.len(), "listing fetched");

    let pb = progress_bar(listing.len() as u64, config.show_progress)?;
    let mut outcomes = Vec::with_capacity(listing.len());

    for item in &listing {
        if let Some(name) = item.name() {
            pb.set_message(name.to_string());
        }

        let outcome = process_listing_entry(source, item, config).await;
        if let ItemOutcome::Skipped(reason) = &outcome {
            debug!(
                operation = "fetch",
                status = "skipped",
                url = item.download_url().unwrap_or("<none>"),
                reason = %reason,
                "skipped listing record"
            );
        }
        outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(outcomes)
}

async fn process_listing_entry<S>(source: &S, item: &ListingEntry, config: &BuildConfig) -> ItemOutcome
where
    S: DescriptorSource + Sync + ?Sized,
{
    let Some(download_url) = item.download_url() else {
        return ItemOutcome::Skipped(SkipReason::NoDownloadUrl);
    };
    let Some(url) = item.descriptor_url() else {
        debug!(url = download_url, "not a descriptor");
        return ItemOutcome::Skipped(SkipReason::NotDescriptor);
    };

    match source.fetch(url).await {
        Ok(document) => process_descriptor(document, &config.script_base_url, config.fields),
        Err(err) => ItemOutcome::Skipped(SkipReason::Fetch(format!("{err:#}"))),
    }
}

/// Validate one parsed document and project it into a cache entry.
pub fn process_descriptor(document: Value, script_base_url: &str, fields: FieldSet) -> ItemOutcome {
    if !document.is_object() {
        return ItemOutcome::Skipped(SkipReason::NotAnObject);
    }

    let descriptor: ScriptDescriptor = match serde_json::from_value(document) {
        Ok(d) => d,
        Err(err) => return ItemOutcome::Skipped(SkipReason::Malformed(err.to_string())),
    };

    let Some(slug) = descriptor.slug() else {
        return ItemOutcome::Skipped(SkipReason::MissingSlug);
    };
    let Some(script) = descriptor.script() else {
        return ItemOutcome::Skipped(SkipReason::MissingScript);
    };

    let default_credentials = if fields.default_credentials {
        descriptor.default_credentials().filter(|c| c.is_meaningful()).cloned()
    } else {
        None
    };

    ItemOutcome::Kept(CacheEntry {
        name: fields.name.then(|| descriptor.name().to_string()),
        slug: slug.to_string(),
        desc: descriptor.description().to_string(),
        script: script.to_string(),
        script_url: script_url(script_base_url, script),
        categories: descriptor.categories().to_vec(),
        notes: flatten_notes(descriptor.notes()),
        kind: if fields.kind { descriptor.kind().map(str::to_string) } else { None },
        default_credentials,
    })
}

/// Keep the `text` of every record note, in order. Anything else is dropped.
pub fn flatten_notes(notes: &[Value]) -> Vec<String> {
    notes
        .iter()
        .filter_map(|note| note.as_object()?.get("text")?.as_str())
        .map(str::to_string)
        .collect()
}

/// Absolute URL of a script: the base, a `/`, then the relative path.
pub fn script_url(base: &str, script: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), script)
}

/// Write `entries` as pretty-printed JSON, replacing `path` atomically.
/// Returns the hex SHA-256 of the written bytes.
pub fn write_cache(path: &Path, entries: &[CacheEntry]) -> Result<String> {
    let mut bytes = serde_json::to_vec_pretty(entries).context("serialize cache entries")?;
    bytes.push(b'\n');

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;

    // Write atomically: the temp file lives next to the target and is removed
    // on drop if anything below fails.
    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    tmp.write_all(&bytes)
        .with_context(|| format!("write file {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("move temp file -> {}", path.display()))?;

    Ok(hex::encode(Sha256::digest(&bytes)))
}

fn progress_bar(len: u64, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        .context("build progress style")?
        .progress_chars("#>-");
    pb.set_style(style);
    Ok(pb)
}
