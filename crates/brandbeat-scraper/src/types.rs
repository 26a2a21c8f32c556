/// An article scraped from one URL, before relevance classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub url: String,
    /// Trimmed text of the page's `<title>` element.
    pub title: String,
    /// Concatenated paragraph text, whitespace-normalized, at most 500 chars.
    pub content: String,
    /// Representative image URL, when the page advertises one.
    pub image: Option<String>,
}

/// Why a URL produced no article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Non-2xx response (403 and 404 are the common cases).
    Status(u16),
    /// Network, TLS, or timeout failure before a response arrived.
    Transport(String),
    /// The page had no usable title or body after boilerplate filtering.
    EmptyContent,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Status(code) => write!(f, "HTTP status {code}"),
            SkipReason::Transport(detail) => write!(f, "transport failure: {detail}"),
            SkipReason::EmptyContent => write!(f, "no usable title or body"),
        }
    }
}

/// Outcome of extracting one URL. `Skipped` is a soft failure: the batch
/// continues and downstream filtering is a type-level match, not a null
/// check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Found(ExtractedArticle),
    Skipped { url: String, reason: SkipReason },
}

impl ExtractOutcome {
    /// The extracted article, if any.
    #[must_use]
    pub fn into_article(self) -> Option<ExtractedArticle> {
        match self {
            ExtractOutcome::Found(article) => Some(article),
            ExtractOutcome::Skipped { .. } => None,
        }
    }
}
