// notifier.rs: Post grade announcements and digests via chat.postMessage.

use serde::Deserialize;
use serde_json::json;
use sg_ledger::{Notifier, NotifyError, Student};

use crate::client::SlackClient;

/// Bot identity shown on posted messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEnvelope {
    pub username: String,
    pub icon_emoji: String,
}

impl Default for MessageEnvelope {
    fn default() -> Self {
        Self {
            username: "grader".to_string(),
            icon_emoji: ":farnsworth:".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    #[serde(default)]
    ts: Option<String>,
}

/// [`Notifier`] backed by the Slack Web API.
pub struct SlackNotifier {
    client: SlackClient,
    envelope: MessageEnvelope,
}

impl SlackNotifier {
    pub fn new(client: SlackClient) -> Self {
        Self {
            client,
            envelope: MessageEnvelope::default(),
        }
    }

    pub fn with_envelope(mut self, envelope: MessageEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    fn payload(&self, destination: &str, text: &str) -> serde_json::Value {
        json!({
            "channel": destination,
            "text": text,
            "as_user": false,
            "username": self.envelope.username,
            "icon_emoji": self.envelope.icon_emoji,
        })
    }
}

impl Notifier for SlackNotifier {
    fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError> {
        let response: PostMessageResponse = self
            .client
            .post("chat.postMessage", &self.payload(destination, text))
            .map_err(|e| NotifyError::new(destination, e.to_string()))?;
        tracing::debug!(destination, ts = ?response.ts, "message posted");
        Ok(())
    }

    /// `<@U123>` when the Slack user id is known, plain `@name` otherwise.
    fn mention(&self, student: &Student) -> String {
        match &student.external_id {
            Some(id) => format!("<@{}>", id),
            None => format!("@{}", student.name),
        }
    }

    fn name(&self) -> &str {
        "slack"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier() -> SlackNotifier {
        SlackNotifier::new(SlackClient::new("xoxb-test").unwrap())
    }

    #[test]
    fn mention_prefers_user_id() {
        let n = notifier();
        assert_eq!(n.mention(&Student::new("alice").with_external_id("U42")), "<@U42>");
        assert_eq!(n.mention(&Student::new("alice")), "@alice");
    }

    #[test]
    fn payload_carries_envelope() {
        let n = notifier().with_envelope(MessageEnvelope {
            username: "ta-bot".into(),
            icon_emoji: ":robot_face:".into(),
        });
        let p = n.payload("#general", "<@U1> : nice");
        assert_eq!(p["channel"], "#general");
        assert_eq!(p["text"], "<@U1> : nice");
        assert_eq!(p["as_user"], false);
        assert_eq!(p["username"], "ta-bot");
        assert_eq!(p["icon_emoji"], ":robot_face:");
    }
}
