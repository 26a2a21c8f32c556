//! Shared types and configuration for brandbeat.

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod app_config;
mod config;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};

/// Relevance verdict attached to one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Relevant,
    NotRelevant,
    /// Classification was attempted but the endpoint failed; the article is
    /// still returned rather than dropped.
    Unknown,
}

/// One scraped news article with its relevance verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    /// Body text, whitespace-normalized and capped at 500 characters.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub relevance: Relevance,
}

/// The composed result for one brand query. Articles keep the discovery
/// order of the links they were scraped from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandResult {
    pub brand: String,
    pub articles: Vec<Article>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
