//! Remote data service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default per-request HTTP timeout in seconds.
const fn default_request_timeout_secs() -> u64 {
    10
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_base_delay_ms() -> u64 {
    100
}

const fn default_max_delay_ms() -> u64 {
    2_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Base URL of the data service (e.g., `https://abc.example.co`).
    #[serde(default)]
    pub url: String,

    /// Public API key sent with every request.
    #[serde(default)]
    pub anon_key: String,

    /// Privileged key for the unscoped orphan scan. Operators only.
    #[serde(default)]
    pub service_key: String,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            service_key: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            retry: RetrySettings::default(),
        }
    }
}

impl StoreConfig {
    /// Check if the store has the minimum required fields for remote access.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// Check if the privileged service key is available.
    pub fn has_service_key(&self) -> bool {
        !self.service_key.is_empty()
    }

    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.is_empty()
            && !(self.url.starts_with("http://") || self.url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidValue {
                field: "store.url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.request_timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        self.retry.validate()
    }
}

/// Backoff settings for transient store failures.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrySettings {
    /// Maximum number of attempts (including the initial one).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetrySettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.retry.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.max_delay_ms < self.base_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "store.retry.max_delay_ms".into(),
                reason: "must not be smaller than base_delay_ms".into(),
            });
        }
        Ok(())
    }
}
