use std::time::Duration;

use crate::cache::DEFAULT_TTL;

pub const DEFAULT_BASE_URL: &str = "https://open.bymadata.com.ar";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Client settings. Zero values passed to the `with_*` builders keep the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub retry_attempts: u32,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            enable_cache: true,
            cache_ttl: DEFAULT_TTL,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `BYMADATA_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_url) = lookup("BYMADATA_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = lookup("BYMADATA_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(attempts) =
            lookup("BYMADATA_RETRY_ATTEMPTS").and_then(|v| v.trim().parse().ok())
        {
            config = config.with_retry_attempts(attempts);
        }
        if let Some(enabled) = lookup("BYMADATA_ENABLE_CACHE").and_then(|v| parse_flag(&v)) {
            config = config.with_cache(enabled);
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.base_url = trimmed.to_owned();
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    pub fn with_retry_attempts(mut self, retry_attempts: u32) -> Self {
        if retry_attempts > 0 {
            self.retry_attempts = retry_attempts;
        }
        self
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.enable_cache = enabled;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        if !ttl.is_zero() {
            self.cache_ttl = ttl;
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
