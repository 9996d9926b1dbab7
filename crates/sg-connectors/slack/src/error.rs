// error.rs: Error types for the Slack connector.

use thiserror::Error;

/// Errors talking to the Slack Web API.
#[derive(Debug, Error)]
pub enum SlackError {
    /// Transport-level failure (DNS, TLS, timeout, non-2xx status).
    #[error("HTTP error calling Slack: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack answered `"ok": false`.
    #[error("Slack API {method} failed: {error}")]
    Api { method: String, error: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response from Slack API {method}: {source}")]
    Decode {
        method: String,
        source: serde_json::Error,
    },
}
