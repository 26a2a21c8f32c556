use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("cache error: {0}")]
    Cache(#[from] brandbeat_cache::CacheError),

    /// During a pipeline run this means link discovery failed — the one
    /// outbound call whose failure is fatal to the run.
    #[error("scraper error: {0}")]
    Scraper(#[from] brandbeat_scraper::ScraperError),

    #[error("classification client error: {0}")]
    Classify(#[from] brandbeat_classify::ClassifyError),
}
