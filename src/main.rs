use anyhow::Result;
use std::io::IsTerminal;

use helpers_cache::{BuildConfig, DEFAULT_SOURCE, HttpSource, Sources, build, logging};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let sources = Sources::builtin()?;
    let source = sources.by_name(DEFAULT_SOURCE)?;

    let config = BuildConfig::from(source).with_progress(std::io::stderr().is_terminal());
    let http = HttpSource::new()?;

    let report = build(&http, &config).await?;

    let file_name = report
        .output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.output_path.display().to_string());
    println!("{file_name} created with {} valid scripts.", report.entry_count);

    Ok(())
}
