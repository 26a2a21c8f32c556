//! Brand-news aggregation pipeline for brandbeat.
//!
//! Orchestrates link discovery, concurrent article extraction, and batch
//! relevance classification per brand query, with the composed result cached
//! under `"<brand>_data"`. Per-article failures degrade the result; only
//! link discovery failure fails the run.

pub mod error;
pub mod pipeline;

pub use error::NewsError;
pub use pipeline::NewsService;
