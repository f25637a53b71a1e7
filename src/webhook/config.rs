//! Webhook configuration parsed from environment variables.

use std::time::Duration;

use super::types::ConfigError;

pub const DEFAULT_WEBHOOK_URL: &str = "https://n8n.srv934844.hstgr.cloud/webhook/silly";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub endpoint_url: String,
    /// `None` leaves the request unbounded in time.
    pub request_timeout: Option<Duration>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self { endpoint_url: DEFAULT_WEBHOOK_URL.to_string(), request_timeout: None }
    }
}

impl WebhookConfig {
    /// Config pointing at `endpoint_url` with no timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the URL is not absolute `http(s)`.
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint_url = parse_endpoint(&endpoint_url.into())?;
        Ok(Self { endpoint_url, request_timeout: None })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build typed webhook config from environment variables.
    ///
    /// Optional:
    /// - `CHAT_WEBHOOK_URL`: default [`DEFAULT_WEBHOOK_URL`]
    /// - `CHAT_WEBHOOK_TIMEOUT_SECS`: unset means no timeout
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint_url = parse_endpoint(
            std::env::var("CHAT_WEBHOOK_URL")
                .ok()
                .as_deref()
                .unwrap_or(DEFAULT_WEBHOOK_URL),
        )?;
        let request_timeout = parse_timeout(std::env::var("CHAT_WEBHOOK_TIMEOUT_SECS").ok().as_deref())?;
        Ok(Self { endpoint_url, request_timeout })
    }
}

pub(crate) fn parse_endpoint(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidUrl { url: trimmed.to_string(), reason: e.to_string() })?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::InvalidUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

pub(crate) fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
