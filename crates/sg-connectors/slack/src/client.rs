// client.rs: Minimal blocking Slack Web API client.
//
// Every Web API method answers HTTP 200 with a JSON body carrying `"ok"`.
// `"ok": false` plus an `error` string is how Slack reports failures, so the
// body is checked before it is decoded into the caller's type.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::SlackError;

/// Default Slack Web API base URL.
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size for cursor-paginated list methods.
pub(crate) const PAGE_LIMIT: &str = "100";

/// Cursor metadata attached to paginated responses.
#[derive(Debug, Default, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

/// Authenticated handle to the Slack Web API.
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: reqwest::blocking::Client,
    token: String,
    base_url: String,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Result<Self, SlackError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API root (e.g. an Enterprise Grid
    /// proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Call a read method with query parameters.
    pub fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SlackError> {
        tracing::debug!(method, "Slack GET");
        let body: serde_json::Value = self
            .http
            .get(self.url(method))
            .bearer_auth(&self.token)
            .query(query)
            .send()?
            .error_for_status()?
            .json()?;
        decode_response(method, body)
    }

    /// Call a write method with a JSON body.
    pub fn post<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
    ) -> Result<T, SlackError> {
        tracing::debug!(method, "Slack POST");
        let body: serde_json::Value = self
            .http
            .post(self.url(method))
            .bearer_auth(&self.token)
            .json(payload)
            .send()?
            .error_for_status()?
            .json()?;
        decode_response(method, body)
    }
}

/// Check `"ok"` and decode the rest of the body.
pub(crate) fn decode_response<T: DeserializeOwned>(
    method: &str,
    body: serde_json::Value,
) -> Result<T, SlackError> {
    let ok = body.get("ok").and_then(|v| v.as_bool()).unwrap_or(false);
    if !ok {
        let error = body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown_error")
            .to_string();
        return Err(SlackError::Api {
            method: method.to_string(),
            error,
        });
    }

    serde_json::from_value(body).map_err(|source| SlackError::Decode {
        method: method.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Ts {
        ts: String,
    }

    #[test]
    fn ok_body_decodes() {
        let t: Ts = decode_response("chat.postMessage", json!({"ok": true, "ts": "1.2"})).unwrap();
        assert_eq!(t.ts, "1.2");
    }

    #[test]
    fn not_ok_surfaces_slack_error() {
        let err = decode_response::<Ts>(
            "chat.postMessage",
            json!({"ok": false, "error": "channel_not_found"}),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Slack API chat.postMessage failed: channel_not_found"
        );
    }

    #[test]
    fn wrong_shape_is_decode_error() {
        let err = decode_response::<Ts>("chat.postMessage", json!({"ok": true})).unwrap_err();
        assert!(matches!(err, SlackError::Decode { .. }));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = SlackClient::new("xoxb-test")
            .unwrap()
            .with_base_url("http://localhost:9999/api/");
        assert_eq!(client.url("users.list"), "http://localhost:9999/api/users.list");
    }
}
