//! Client for a hosted zero-shot text-classification endpoint.
//!
//! One POST per batch carries all texts plus a fixed candidate-label set;
//! the response holds one `{labels[], scores[]}` pair per input, sorted
//! descending by score. Any endpoint failure degrades the whole batch to
//! [`brandbeat_core::Relevance::Unknown`] verdicts — this component never
//! errors outward from classification.

pub mod client;
pub mod error;
pub mod types;

pub use client::ClassifyClient;
pub use error::ClassifyError;
pub use types::{ClassifyConfig, ZeroShotPrediction, DEFAULT_LABELS};
