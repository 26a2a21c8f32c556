//! Pipeline orchestration.

use std::time::Duration;

use futures::stream::{self, StreamExt};

use brandbeat_cache::CacheStore;
use brandbeat_classify::{ClassifyClient, ClassifyConfig};
use brandbeat_core::{AppConfig, Article, BrandResult, Relevance};
use brandbeat_scraper::{discover, extract, ExtractOutcome, NoiseFilter, PageClient};

use crate::error::NewsError;

/// Cache key for one brand's composed result.
fn brand_cache_key(brand: &str) -> String {
    format!("{brand}_data")
}

/// The aggregation pipeline and the collaborators it owns: cache store,
/// page client, noise filter, and classification client. Constructed once at
/// process start and shared across requests.
pub struct NewsService {
    cache: CacheStore,
    pages: PageClient,
    classifier: ClassifyClient,
    filter: NoiseFilter,
    search_url: String,
}

impl NewsService {
    /// Build the service from application configuration, ensuring the cache
    /// directory exists.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError`] if the cache directory cannot be created or
    /// either HTTP client fails to construct.
    pub fn from_config(config: &AppConfig) -> Result<Self, NewsError> {
        let cache = CacheStore::new(
            &config.cache_dir,
            Duration::from_secs(config.cache_ttl_secs),
        )?;
        let pages = PageClient::new(config.scraper_timeout_secs, &config.scraper_user_agent)?;
        let classifier = ClassifyClient::new(
            ClassifyConfig::new(&config.classify_url, &config.classify_api_token)
                .with_threshold(config.relevance_threshold),
        )?;
        Ok(Self::new(cache, pages, classifier, &config.search_url))
    }

    /// Assemble a service from already-built collaborators.
    #[must_use]
    pub fn new(
        cache: CacheStore,
        pages: PageClient,
        classifier: ClassifyClient,
        search_url: &str,
    ) -> Self {
        Self {
            cache,
            pages,
            classifier,
            filter: NoiseFilter::default(),
            search_url: search_url.to_string(),
        }
    }

    /// The cache store backing the pipeline.
    #[must_use]
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Run the full pipeline for one brand query.
    ///
    /// 1. Return the cached composed result on a hit.
    /// 2. Discover candidate links (cache-checked itself). Discovery failure
    ///    is fatal to the run.
    /// 3. Extract every link concurrently, joining in link order; skipped
    ///    URLs are logged and dropped.
    /// 4. An empty survivor set composes an empty (still cached) result.
    /// 5. Classify the survivors' content in one batch; verdict `i` attaches
    ///    to article `i`. A classifier outage marks every article `Unknown`.
    /// 6. Cache and return. Article order equals link order minus drops.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Scraper`] if link discovery fails.
    pub async fn run(&self, brand: &str) -> Result<BrandResult, NewsError> {
        let cache_key = brand_cache_key(brand);

        // Step 1: composed-result cache.
        if let Some(result) = self.cache.get::<BrandResult>(&cache_key) {
            tracing::debug!(brand, "brand result cache hit");
            return Ok(result);
        }

        // Step 2: link discovery.
        let links = discover(&self.pages, &self.cache, &self.search_url, brand).await?;

        // Step 3: fan out extraction over every link. The fan-out width is
        // the link count (at most 10), and `buffered` joins results back in
        // link order so survivors keep discovery order.
        let width = links.len().max(1);
        let fetches: Vec<_> = links
            .iter()
            .map(|url| extract(&self.pages, &self.filter, url))
            .collect();
        let outcomes: Vec<ExtractOutcome> = stream::iter(fetches)
            .buffered(width)
            .collect()
            .await;

        let mut articles: Vec<Article> = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                ExtractOutcome::Found(a) => articles.push(Article {
                    url: a.url,
                    title: a.title,
                    content: a.content,
                    image: a.image,
                    relevance: Relevance::Unknown,
                }),
                ExtractOutcome::Skipped { url, reason } => {
                    tracing::warn!(brand, url = %url, reason = %reason, "dropping article");
                }
            }
        }

        // Steps 4 + 5: one classification call for the whole batch, verdicts
        // zipped back on by index. No survivors means no call.
        if !articles.is_empty() {
            let texts: Vec<&str> = articles.iter().map(|a| a.content.as_str()).collect();
            let verdicts = self.classifier.classify_batch(&texts).await;
            for (article, verdict) in articles.iter_mut().zip(verdicts) {
                article.relevance = verdict;
            }
        }

        tracing::info!(
            brand,
            discovered = links.len(),
            kept = articles.len(),
            "composed brand result"
        );

        let result = BrandResult {
            brand: brand.to_string(),
            articles,
        };

        // Step 6: cache and return. A failed write degrades to a recompute
        // on the next request, not a failed response.
        if let Err(e) = self.cache.put(&cache_key, &result) {
            tracing::warn!(brand, error = %e, "failed to cache brand result");
        }

        Ok(result)
    }
}
