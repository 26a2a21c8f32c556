//! TTL file cache for brandbeat.
//!
//! One JSON file per key inside a cache directory. Entries expire on read:
//! a lookup past the TTL deletes the file and reports a miss. Unreadable or
//! corrupt entries are likewise removed and treated as misses so a damaged
//! cache never takes the service down.

pub mod error;
pub mod store;

pub use error::CacheError;
pub use store::CacheStore;
