use thiserror::Error;

/// Errors from the classification endpoint. These stay internal to the
/// crate's public surface: `classify_batch` converts them into all-`Unknown`
/// verdict batches.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classification endpoint returned status {status}")]
    UnexpectedStatus { status: u16 },
}
