use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Environment variable holding the dashboard API key.
pub const API_KEY_ENV: &str = "MERAKI_API_KEY";

/// Environment variable overriding the dashboard base URL.
pub const BASE_URL_ENV: &str = "MERAKI_API_BASE";

/// Environment variable overriding the per-request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "MERAKI_HTTP_TIMEOUT";

const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the dashboard client, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Resolve the configuration from process environment variables (a
    /// `.env` file is honored when the caller has loaded it via dotenv).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = match lookup(API_KEY_ENV) {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => bail!("{API_KEY_ENV} is not set; export it or add it to a .env file"),
        };

        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup(TIMEOUT_ENV) {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("{TIMEOUT_ENV} must be a number of seconds: {raw}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(ApiConfig {
            api_key,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
