//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard `std::env::var`
//! (after `dotenvy` has merged any local `.env` file). Collaborator credentials are optional:
//! a missing key disables that provider and the pipeline falls through to the next one.
//!
//! # Environment Variables
//!
//! ## Server
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `APP_ENV`: Deployment environment; `local` implies offline mode (default: "production")
//! - `OFFLINE_MODE`: Skip remote language detection and translation (default: false)
//! - `MAX_IMAGES_PER_REQUEST`: Images accepted per analysis request (default: 10)
//! - `MAX_UPLOAD_BYTES`: Request body limit in bytes (default: 20 MiB)
//! - `HTTP_TIMEOUT_SECONDS`: Timeout for every outbound collaborator call (default: 60)
//!
//! ## Text extraction
//! - `OPENAI_API_KEY`: Enables vision-based extraction
//! - `OPENAI_BASE_URL`: Chat-completions API root (default: "https://api.openai.com/v1")
//! - `OPENAI_MODEL`: Vision model (default: "gpt-4o-mini")
//! - `ENABLE_LOCAL_OCR`: Enable the Tesseract fallback (default: true)
//! - `TESSERACT_BIN`: Tesseract executable (default: "tesseract")
//! - `TESSERACT_LANGUAGES`: Script hint set (default: "eng+kor+jpn+chi_sim")
//!
//! ## Language & translation
//! - `LINGO_API_KEY`: Enables remote locale recognition and translation
//! - `LINGO_BASE_URL`: Engine root (default: "https://engine.lingo.dev")
//! - `MYMEMORY_URL`: Public fallback translation endpoint
//!
//! ## Product search
//! - `APIFY_API_KEY`: Search backend token (required for product search)
//! - `APIFY_BASE_URL`: API root (default: "https://api.apify.com/v2")
//! - `USE_CUSTOM_ACTOR`: Try the purpose-built product actor first (default: false)
//! - `PRODUCT_ACTOR_ID`: Purpose-built actor (default: "klar~product-scraper")
//! - `WEB_SEARCH_ACTOR_ID`: Generic search actor (default: "apify~google-search-scraper")
//! - `SEARCH_RESULTS_PER_PAGE`: Result-count hint for generic search (default: 5)
//! - `PRODUCT_ACTOR_MAX_RESULTS`: Result-count hint for the product actor (default: 1)
//! - `SEARCH_POLL_INTERVAL_MS`: Delay between status polls (default: 3000)
//! - `SEARCH_MAX_POLL_ATTEMPTS`: Polls before giving up (default: 18)

use serde::Deserialize;

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Deployment environment name
    pub app_env: String,

    /// Explicit offline switch, independent of `app_env`
    pub offline_mode: bool,

    /// Upper bound on images per analysis request
    pub max_images_per_request: usize,

    /// Request body limit in bytes
    pub max_upload_bytes: usize,

    /// Timeout applied to outbound HTTP calls
    pub http_timeout_seconds: u64,

    /// OpenAI-compatible API key for vision extraction
    pub openai_api_key: Option<String>,

    /// Chat-completions API root
    pub openai_base_url: String,

    /// Vision-capable model name
    pub openai_model: String,

    /// Enable local Tesseract OCR fallback
    pub enable_local_ocr: bool,

    /// Path or name of the tesseract executable
    pub tesseract_bin: String,

    /// `+`-separated tesseract language packs
    pub tesseract_languages: String,

    /// Lingo.dev API key for locale recognition and translation
    pub lingo_api_key: Option<String>,

    /// Lingo.dev engine root
    pub lingo_base_url: String,

    /// Public fallback translation endpoint
    pub mymemory_url: String,

    /// Apify API token
    pub apify_api_key: Option<String>,

    /// Apify API root
    pub apify_base_url: String,

    /// Whether to try the purpose-built product actor before generic search
    pub use_custom_actor: bool,

    /// Purpose-built product actor id
    pub product_actor_id: String,

    /// Generic web-search actor id
    pub web_search_actor_id: String,

    /// Generic search result-count hint
    pub search_results_per_page: u32,

    /// Product actor result-count hint
    pub product_actor_max_results: u32,

    /// Milliseconds between job status polls
    pub search_poll_interval_ms: u64,

    /// Number of polls before the search is abandoned
    pub search_max_poll_attempts: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            app_env: env_or("APP_ENV", "production".to_string())?,
            offline_mode: env_or("OFFLINE_MODE", false)?,
            max_images_per_request: env_or("MAX_IMAGES_PER_REQUEST", 10)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            http_timeout_seconds: env_or("HTTP_TIMEOUT_SECONDS", 60)?,
            openai_api_key: env_optional("OPENAI_API_KEY"),
            openai_base_url: env_or(
                "OPENAI_BASE_URL",
                "https://api.openai.com/v1".to_string(),
            )?,
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini".to_string())?,
            enable_local_ocr: env_or("ENABLE_LOCAL_OCR", true)?,
            tesseract_bin: env_or("TESSERACT_BIN", "tesseract".to_string())?,
            tesseract_languages: env_or(
                "TESSERACT_LANGUAGES",
                "eng+kor+jpn+chi_sim".to_string(),
            )?,
            lingo_api_key: env_optional("LINGO_API_KEY"),
            lingo_base_url: env_or("LINGO_BASE_URL", "https://engine.lingo.dev".to_string())?,
            mymemory_url: env_or(
                "MYMEMORY_URL",
                "https://api.mymemory.translated.net/get".to_string(),
            )?,
            apify_api_key: env_optional("APIFY_API_KEY"),
            apify_base_url: env_or("APIFY_BASE_URL", "https://api.apify.com/v2".to_string())?,
            use_custom_actor: env_or("USE_CUSTOM_ACTOR", false)?,
            product_actor_id: env_or("PRODUCT_ACTOR_ID", "klar~product-scraper".to_string())?,
            web_search_actor_id: env_or(
                "WEB_SEARCH_ACTOR_ID",
                "apify~google-search-scraper".to_string(),
            )?,
            search_results_per_page: env_or("SEARCH_RESULTS_PER_PAGE", 5)?,
            product_actor_max_results: env_or("PRODUCT_ACTOR_MAX_RESULTS", 1)?,
            search_poll_interval_ms: env_or("SEARCH_POLL_INTERVAL_MS", 3000)?,
            search_max_poll_attempts: env_or("SEARCH_MAX_POLL_ATTEMPTS", 18)?,
        })
    }

    /// Remote detection and translation are skipped when running locally or offline.
    pub fn is_offline(&self) -> bool {
        self.offline_mode || self.app_env.eq_ignore_ascii_case("local")
    }
}

impl Default for Config {
    /// Offline defaults with no credentials, used by tests and local tooling.
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            app_env: "local".to_string(),
            offline_mode: true,
            max_images_per_request: 10,
            max_upload_bytes: 20 * 1024 * 1024,
            http_timeout_seconds: 60,
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            enable_local_ocr: false,
            tesseract_bin: "tesseract".to_string(),
            tesseract_languages: "eng+kor+jpn+chi_sim".to_string(),
            lingo_api_key: None,
            lingo_base_url: "https://engine.lingo.dev".to_string(),
            mymemory_url: "https://api.mymemory.translated.net/get".to_string(),
            apify_api_key: None,
            apify_base_url: "https://api.apify.com/v2".to_string(),
            use_custom_actor: false,
            product_actor_id: "klar~product-scraper".to_string(),
            web_search_actor_id: "apify~google-search-scraper".to_string(),
            search_results_per_page: 5,
            product_actor_max_results: 1,
            search_poll_interval_ms: 3000,
            search_max_poll_attempts: 18,
        }
    }
}

/// Load an optional environment variable, treating blank values as unset.
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
