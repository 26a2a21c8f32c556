use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cache_dir: PathBuf,
    pub cache_ttl_secs: u64,
    pub search_url: String,
    pub classify_url: String,
    pub classify_api_token: String,
    pub relevance_threshold: f64,
    pub scraper_timeout_secs: u64,
    pub scraper_user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cache_dir", &self.cache_dir)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("search_url", &self.search_url)
            .field("classify_url", &self.classify_url)
            .field("classify_api_token", &"[redacted]")
            .field("relevance_threshold", &self.relevance_threshold)
            .field("scraper_timeout_secs", &self.scraper_timeout_secs)
            .field("scraper_user_agent", &self.scraper_user_agent)
            .finish()
    }
}
