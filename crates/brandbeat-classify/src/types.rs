use serde::Deserialize;

/// Candidate labels sent with every batch. The sentinel `"unrelated"` label
/// is what a text falls into when it has nothing to do with brand business
/// news.
pub const DEFAULT_LABELS: &[&str] = &[
    "business",
    "finance",
    "economy",
    "earnings",
    "stock",
    "unrelated",
];

/// Label under which an off-topic text scores highest.
pub(crate) const UNRELATED_LABEL: &str = "unrelated";

/// One input's classification: labels and scores aligned by index, sorted
/// descending by score.
#[derive(Debug, Clone, Deserialize)]
pub struct ZeroShotPrediction {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

/// Configuration for the classification client.
#[derive(Clone)]
pub struct ClassifyConfig {
    pub endpoint_url: String,
    pub api_token: String,
    /// A text is relevant only when its top score exceeds this.
    pub threshold: f64,
    pub labels: Vec<String>,
}

impl ClassifyConfig {
    /// Config with the default label set and a 0.4 relevance threshold.
    #[must_use]
    pub fn new(endpoint_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            api_token: api_token.into(),
            threshold: 0.4,
            labels: DEFAULT_LABELS.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl std::fmt::Debug for ClassifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifyConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("api_token", &"[redacted]")
            .field("threshold", &self.threshold)
            .field("labels", &self.labels)
            .finish()
    }
}
