//! Outbound HTML plumbing for brandbeat.
//!
//! Two jobs: discover candidate article links from a search-results page
//! (cache-checked, bounded to the first 10), and extract a title/body/image
//! tuple from an arbitrary article page. Extraction failures are soft — a
//! bad URL yields [`ExtractOutcome::Skipped`], never an error, so one dead
//! link cannot abort a batch.

pub mod client;
pub mod error;
pub mod extract;
pub mod search;
pub mod types;

pub use client::PageClient;
pub use error::ScraperError;
pub use extract::{extract, NoiseFilter};
pub use search::discover;
pub use types::{ExtractOutcome, ExtractedArticle, SkipReason};
