//! Per-URL article extraction.
//!
//! Regex-over-HTML scanning: title from `<title>`, body from `<p>` elements
//! with boilerplate paragraphs dropped, representative image from `og:image`
//! / `twitter:image` meta tags or the first `<img>` inside `<article>`.

use std::sync::LazyLock;

use regex::Regex;

use crate::client::PageClient;
use crate::error::ScraperError;
use crate::types::{ExtractOutcome, ExtractedArticle, SkipReason};

/// Body text cap, in characters.
const MAX_CONTENT_CHARS: usize = 500;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("valid paragraph regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta regex"));
static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid img regex"));
static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<article\b[^>]*>(.*?)</article>").expect("valid article regex")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));

/// Paragraphs matching any of these are site chrome, not article text.
const DEFAULT_NOISE_PATTERNS: &[&str] = &[
    r"(?i)subscribe (now|today|to continue|for full access)",
    r"(?i)sign (in|up) (to|for)",
    r"(?i)already a (member|subscriber)",
    r"(?i)accept (all )?cookies",
    r"(?i)this (summary|article) was generated (by|using) ai",
    r"(?i)ai[ -]generated summary",
    r"(?i)all rights reserved",
    r"(?i)enable javascript",
];

/// Compiled set of boilerplate patterns used to drop noise paragraphs.
pub struct NoiseFilter {
    patterns: Vec<Regex>,
}

impl NoiseFilter {
    /// Compile a custom pattern set.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPattern`] for the first pattern that
    /// fails to compile.
    pub fn new(patterns: &[&str]) -> Result<Self, ScraperError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ScraperError::InvalidPattern {
                    pattern: (*p).to_string(),
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    fn is_noise(&self, paragraph: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(paragraph))
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_PATTERNS).expect("default noise patterns compile")
    }
}

/// Fetch `url` and extract an article from it.
///
/// Every failure mode is soft: non-2xx statuses, transport errors, and pages
/// with no usable title or body all produce [`ExtractOutcome::Skipped`] with
/// a recorded reason. One bad URL must never abort the batch it belongs to.
pub async fn extract(client: &PageClient, filter: &NoiseFilter, url: &str) -> ExtractOutcome {
    let (status, html) = match client.get_page(url).await {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(url, error = %e, "article fetch failed; skipping");
            return ExtractOutcome::Skipped {
                url: url.to_string(),
                reason: SkipReason::Transport(e.to_string()),
            };
        }
    };

    if !status.is_success() {
        tracing::warn!(url, status = status.as_u16(), "article returned non-success status; skipping");
        return ExtractOutcome::Skipped {
            url: url.to_string(),
            reason: SkipReason::Status(status.as_u16()),
        };
    }

    let title = extract_title(&html);
    let content = extract_body(&html, filter);

    if title.is_empty() || content.is_empty() {
        tracing::debug!(url, "page had no usable title or body; skipping");
        return ExtractOutcome::Skipped {
            url: url.to_string(),
            reason: SkipReason::EmptyContent,
        };
    }

    ExtractOutcome::Found(ExtractedArticle {
        url: url.to_string(),
        title,
        content,
        image: extract_image(&html),
    })
}

fn extract_title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| clean_text(m.as_str()))
        .unwrap_or_default()
}

/// Concatenate paragraph texts, dropping boilerplate, and cap the result at
/// [`MAX_CONTENT_CHARS`] characters.
fn extract_body(html: &str, filter: &NoiseFilter) -> String {
    let joined = PARAGRAPH_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .map(|m| clean_text(m.as_str()))
        .filter(|p| !p.is_empty() && !filter.is_noise(p))
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&joined, MAX_CONTENT_CHARS)
}

/// Representative image: `og:image` meta, then `twitter:image` meta, then the
/// first `<img>` inside the `<article>` region.
fn extract_image(html: &str) -> Option<String> {
    find_meta_content(html, "property", "og:image")
        .or_else(|| find_meta_content(html, "name", "twitter:image"))
        .or_else(|| first_article_image(html))
        .map(|url| normalize_image_url(&url))
}

fn find_meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if key.eq_ignore_ascii_case(key_value) {
            extract_attr(tag, "content")
        } else {
            None
        }
    })
}

fn first_article_image(html: &str) -> Option<String> {
    let region = ARTICLE_RE.captures(html)?.get(1)?;
    let img_tag = IMG_TAG_RE.find(region.as_str())?;
    extract_attr(img_tag.as_str(), "src")
}

fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!(r#"(?is)\b{}\s*=\s*["']([^"']+)["']"#, regex::escape(attr));
    let re = Regex::new(&pattern).expect("valid attr regex");
    re.captures(tag)
        .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
}

/// Protocol-relative image URLs get an `https:` prefix.
fn normalize_image_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

/// Strip tags, decode the common entities, and collapse whitespace runs to
/// single spaces.
fn clean_text(input: &str) -> String {
    let no_tags = TAG_RE.replace_all(input, " ");
    let decoded = no_tags
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `s` to at most `max` characters on a char boundary.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
