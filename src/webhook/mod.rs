//! Webhook — outbound chat call and reply normalization.
//!
//! DESIGN
//! ======
//! `WebhookClient` issues exactly one POST per send and never retries. The
//! body is read as text before any parsing so servers that answer with plain
//! text still work. `ReplySource` is the seam the widget talks to, so tests can
//! stand in for the HTTP endpoint.

pub mod config;
pub mod normalize;
pub mod types;

use tracing::{debug, error, warn};

pub use config::WebhookConfig;
pub use types::{ConfigError, DeliveryError, SendOutcome};
use types::WebhookRequest;

// =============================================================================
// REPLY SOURCE TRAIT
// =============================================================================

/// Anything that can turn user text into a reply. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ReplySource: Send + Sync {
    /// Send `text` and return the normalized reply.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] if the transport fails or the reply
    /// carries no recognized field.
    async fn fetch_reply(&self, text: &str) -> Result<String, DeliveryError>;

    /// Send `text` and fold any failure into a [`SendOutcome`]. Never fails.
    async fn deliver(&self, text: &str) -> SendOutcome {
        match self.fetch_reply(text).await {
            Ok(reply) => {
                debug!(reply_len = reply.len(), "webhook reply delivered");
                SendOutcome::Delivered(reply)
            }
            Err(err @ DeliveryError::Transport(_)) => {
                error!(error = %err, "webhook fetch error");
                SendOutcome::Failed(err)
            }
            Err(err) => {
                warn!(error = %err, "webhook reply unrecognized");
                SendOutcome::Failed(err)
            }
        }
    }
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct WebhookClient {
    http: reqwest::Client,
    endpoint_url: String,
}

impl WebhookClient {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: WebhookConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint_url: config.endpoint_url })
    }

    #[must_use]
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// POST `{"message": text}` and return the raw response body.
    async fn post_message(&self, text: &str) -> Result<String, DeliveryError> {
        let response = self
            .http
            .post(&self.endpoint_url)
            .json(&WebhookRequest { message: text })
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %self.endpoint_url, "webhook returned non-success status");
        }
        response
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))
    }
}

#[async_trait::async_trait]
impl ReplySource for WebhookClient {
    async fn fetch_reply(&self, text: &str) -> Result<String, DeliveryError> {
        let body = self.post_message(text).await?;
        normalize::normalize_reply(&body)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
