//! Search-engine link discovery.

use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;

use brandbeat_cache::CacheStore;

use crate::client::PageClient;
use crate::error::ScraperError;

/// Upper bound on discovered links per query.
const MAX_LINKS: usize = 10;

/// Search-result anchors wrap destinations in a `/url?q=<dest>` redirect.
static REDIRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"/url\?q=(https?://[^&"'<>\s]+)"#).expect("valid redirect regex"));

/// Cache key for one query's discovered link list.
#[must_use]
pub fn search_cache_key(query: &str) -> String {
    format!("{query}_search")
}

/// Resolve up to [`MAX_LINKS`] candidate article URLs for `query`.
///
/// Consults the cache under `"<query>_search"` first; on a miss, issues one
/// search request, unwraps every redirect-wrapped anchor destination in
/// document order, writes the bounded list back to the cache, and returns it.
///
/// A search page with no matching anchors — or a non-2xx search response —
/// yields an empty list, not an error. Only transport failure is fatal:
/// without links nothing downstream can run, so it propagates to the caller.
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the search request itself fails.
pub async fn discover(
    client: &PageClient,
    cache: &CacheStore,
    search_base: &str,
    query: &str,
) -> Result<Vec<String>, ScraperError> {
    let cache_key = search_cache_key(query);
    if let Some(links) = cache.get::<Vec<String>>(&cache_key) {
        tracing::debug!(query, count = links.len(), "link discovery cache hit");
        return Ok(links);
    }

    let encoded = utf8_percent_encode(&format!("{query} news"), NON_ALPHANUMERIC).to_string();
    let url = format!("{search_base}?q={encoded}&tbm=nws&lr=lang_en&cr=countryPH");

    let (status, body) = client.get_page(&url).await?;
    if !status.is_success() {
        tracing::warn!(query, status = status.as_u16(), "search returned non-success status");
        return Ok(Vec::new());
    }

    let links = extract_redirect_links(&body);
    tracing::debug!(query, count = links.len(), "discovered article links");

    if let Err(e) = cache.put(&cache_key, &links) {
        tracing::warn!(query, error = %e, "failed to cache discovered links");
    }

    Ok(links)
}

/// Unwrap every `/url?q=<dest>` redirect target in `html`, keeping the first
/// [`MAX_LINKS`] in document order.
fn extract_redirect_links(html: &str) -> Vec<String> {
    REDIRECT_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .take(MAX_LINKS)
        .collect()
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
