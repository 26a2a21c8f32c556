//! Zero-shot classification HTTP client.

use std::time::Duration;

use serde::Serialize;

use brandbeat_core::Relevance;

use crate::error::ClassifyError;
use crate::types::{ClassifyConfig, ZeroShotPrediction, UNRELATED_LABEL};

/// Endpoint-side timeout. The pipeline has no timeout of its own for
/// classification, so this is the only bound on a hung call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a [&'a str],
    parameters: Parameters<'a>,
}

#[derive(Serialize)]
struct Parameters<'a> {
    candidate_labels: &'a [String],
}

/// Client for the hosted zero-shot classification endpoint.
pub struct ClassifyClient {
    client: reqwest::Client,
    config: ClassifyConfig,
}

impl ClassifyClient {
    /// Create a `ClassifyClient`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: ClassifyConfig) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    /// Classify a batch of texts, returning one verdict per text in input
    /// order.
    ///
    /// Issues exactly one endpoint call for the whole batch (and none for an
    /// empty batch). If the call fails — transport error, non-2xx status,
    /// malformed body, or a response whose length does not match the input —
    /// every text gets [`Relevance::Unknown`]. Never partial results, never
    /// an error out of this method.
    pub async fn classify_batch(&self, texts: &[&str]) -> Vec<Relevance> {
        if texts.is_empty() {
            return Vec::new();
        }

        match self.request_predictions(texts).await {
            Ok(predictions) if predictions.len() == texts.len() => predictions
                .iter()
                .map(|p| verdict_for(p, self.config.threshold))
                .collect(),
            Ok(predictions) => {
                tracing::warn!(
                    expected = texts.len(),
                    got = predictions.len(),
                    "classification response length mismatch; marking batch unknown"
                );
                vec![Relevance::Unknown; texts.len()]
            }
            Err(e) => {
                tracing::warn!(error = %e, "classification call failed; marking batch unknown");
                vec![Relevance::Unknown; texts.len()]
            }
        }
    }

    async fn request_predictions(
        &self,
        texts: &[&str],
    ) -> Result<Vec<ZeroShotPrediction>, ClassifyError> {
        let request = ClassifyRequest {
            inputs: texts,
            parameters: Parameters {
                candidate_labels: &self.config.labels,
            },
        };

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .bearer_auth(&self.config.api_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Relevant iff the top label is not the `"unrelated"` sentinel AND its score
/// clears the threshold. A prediction with no label/score pairs cannot be
/// judged and comes back `Unknown`.
fn verdict_for(prediction: &ZeroShotPrediction, threshold: f64) -> Relevance {
    let (Some(top_label), Some(top_score)) =
        (prediction.labels.first(), prediction.scores.first())
    else {
        return Relevance::Unknown;
    };

    if top_label != UNRELATED_LABEL && *top_score > threshold {
        Relevance::Relevant
    } else {
        Relevance::NotRelevant
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
