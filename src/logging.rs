//! Tracing setup.
//!
//! Events carry structured fields so runs in CI can be grepped or shipped as
//! JSON:
//!
//! - `operation`: pipeline step (`list`, `fetch`, `write`)
//! - `status`: `success` or `skipped`
//! - `url`: remote resource involved
//! - `entry_count`: number of records handled
//! - `reason`: why a listing record was skipped

use std::io;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "HELPERS_CACHE_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, coloured
    Pretty,
    /// Single line, no colour (CI)
    Compact,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    pub fn parse(value: &str, ci: bool) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            "pretty" => Self::Pretty,
            _ if ci => Self::Compact,
            _ => Self::Pretty,
        }
    }

    pub fn from_env() -> Self {
        let value = std::env::var(LOG_FORMAT_ENV).unwrap_or_default();
        Self::parse(&value, std::env::var("CI").is_ok())
    }
}

/// Install the global subscriber. Logs go to stderr so stdout only carries the
/// summary line.
///
/// `RUST_LOG` sets the filter (default `info`); use `RUST_LOG=debug` to see
/// every skipped descriptor.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match LogFormat::from_env() {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(io::stderr))
                .init();
        }
        LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(io::stderr),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_file(false)
                        .with_line_number(false)
                        .with_ansi(false)
                        .with_writer(io::stderr)
                        .json(),
                )
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing() {
        assert_eq!(LogFormat::parse("JSON", false), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact", false), LogFormat::Compact);
        assert_eq!(LogFormat::parse("pretty", true), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("", true), LogFormat::Compact);
        assert_eq!(LogFormat::parse("whatever", false), LogFormat::Pretty);
    }
}
