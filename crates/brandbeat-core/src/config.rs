use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let classify_api_token = require("BRANDBEAT_CLASSIFY_API_TOKEN")?;

    let bind_addr = parse_addr("BRANDBEAT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BRANDBEAT_LOG_LEVEL", "info");
    let cache_dir = PathBuf::from(or_default("BRANDBEAT_CACHE_DIR", "./cache"));
    let cache_ttl_secs = parse_u64("BRANDBEAT_CACHE_TTL_SECS", "3600")?;

    let search_url = or_default("BRANDBEAT_SEARCH_URL", "https://www.google.com/search");
    let classify_url = or_default(
        "BRANDBEAT_CLASSIFY_URL",
        "https://api-inference.huggingface.co/models/facebook/bart-large-mnli",
    );

    let relevance_threshold = parse_f64("BRANDBEAT_RELEVANCE_THRESHOLD", "0.4")?;
    if !(0.0..=1.0).contains(&relevance_threshold) {
        return Err(ConfigError::InvalidEnvVar {
            var: "BRANDBEAT_RELEVANCE_THRESHOLD".to_string(),
            reason: format!("{relevance_threshold} is outside [0.0, 1.0]"),
        });
    }

    let scraper_timeout_secs = parse_u64("BRANDBEAT_SCRAPER_TIMEOUT_SECS", "10")?;
    let scraper_user_agent = or_default("BRANDBEAT_SCRAPER_USER_AGENT", "Mozilla/5.0");

    Ok(AppConfig {
        bind_addr,
        log_level,
        cache_dir,
        cache_ttl_secs,
        search_url,
        classify_url,
        classify_api_token,
        relevance_threshold,
        scraper_timeout_secs,
        scraper_user_agent,
    })
}
