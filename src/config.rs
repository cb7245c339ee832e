use serde::Deserialize;

use crate::services::retry::RetryPolicy;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Gemini API key
    pub gemini_api_key: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Model used for chat, cold start and synopsis requests
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Redis connection URL; watchlist and history stay in memory when unset
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Retries allowed after the first failed model call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, doubled for each subsequent one
    #[serde(default = "default_initial_retry_delay_ms")]
    pub initial_retry_delay_ms: u64,

    /// HTTP timeout for a single model call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_initial_retry_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Retry settings for model calls
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.initial_retry_delay_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
