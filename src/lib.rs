//! Builds `helpers_cache.json`: lists a remote directory of script
//! descriptors, fetches each one, keeps the valid ones and writes them out as a
//! single JSON array.

pub mod builder;
pub mod catalog;
pub mod fetch;
pub mod logging;
pub mod sources;

pub use builder::{BuildConfig, BuildReport, ItemOutcome, SkipReason, build};
pub use fetch::{DescriptorSource, HttpSource};
pub use sources::{DEFAULT_SOURCE, FieldSet, Source, Sources};
