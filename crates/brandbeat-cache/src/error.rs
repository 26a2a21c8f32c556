use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache serialization error for key \"{key}\": {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
