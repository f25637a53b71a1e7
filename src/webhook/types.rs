//! Webhook types — wire request, delivery outcome, and errors.

use serde::Serialize;

/// Assistant text used when the body parsed but carried no usable reply field.
pub const NO_CONTENT_FALLBACK: &str = "⚠️ No valid response content found.";

/// Assistant text used when the request never completed.
pub const TRANSPORT_FALLBACK: &str = "❌ Error: Unable to connect to the server.";

// =============================================================================
// ERRORS
// =============================================================================

/// Why a send did not produce a reply. Never surfaced to the widget as an
/// `Err`; each variant degrades to a fixed assistant message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The HTTP request or body read failed at the transport layer.
    #[error("webhook transport failed: {0}")]
    Transport(String),

    /// The body was read, but none of the expected reply fields were present.
    #[error("webhook payload carried no reply field")]
    UnrecognizedPayload,
}

impl DeliveryError {
    /// Fixed assistant text shown to the user for this failure.
    #[must_use]
    pub fn fallback_text(&self) -> &'static str {
        match self {
            Self::Transport(_) => TRANSPORT_FALLBACK,
            Self::UnrecognizedPayload => NO_CONTENT_FALLBACK,
        }
    }
}

/// Errors raised while building a [`super::WebhookClient`]. These are the only
/// webhook errors that escape to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The endpoint is not an absolute `http`/`https` URL.
    #[error("invalid webhook URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The timeout value is not a positive integer number of seconds.
    #[error("invalid webhook timeout '{0}' (expected positive integer seconds)")]
    InvalidTimeout(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Terminal state of one send: `Sending → Delivered | Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The webhook answered with a usable reply.
    Delivered(String),
    /// The send failed; carries the fallback text to show.
    Failed(DeliveryError),
}

impl SendOutcome {
    /// The text the assistant message should carry.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Delivered(reply) => reply,
            Self::Failed(err) => err.fallback_text(),
        }
    }

    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Delivered(reply) => reply,
            Self::Failed(err) => err.fallback_text().to_owned(),
        }
    }

    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

impl From<Result<String, DeliveryError>> for SendOutcome {
    fn from(result: Result<String, DeliveryError>) -> Self {
        match result {
            Ok(reply) => Self::Delivered(reply),
            Err(err) => Self::Failed(err),
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Outbound body: `{"message": "<user text>"}`.
#[derive(Debug, Serialize)]
pub(crate) struct WebhookRequest<'a> {
    pub message: &'a str,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
