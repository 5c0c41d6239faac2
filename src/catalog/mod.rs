mod descriptor;
mod entry;
mod listing;

pub use descriptor::{Credentials, ScriptDescriptor};
pub use entry::CacheEntry;
pub use listing::{DESCRIPTOR_SUFFIX, ListingEntry};
