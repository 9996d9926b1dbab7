//! # sg-connector-slack
//!
//! Slack delivery for slackgrade.
//!
//! - [`SlackNotifier`]: posts grade announcements to channels and digests
//!   to DM channels through `chat.postMessage`.
//! - [`SlackRoster`]: builds the class roster from `users.list` and
//!   attaches DM channels from `conversations.list`.
//!
//! Both share one [`SlackClient`], a blocking client authenticated with a
//! bot token.
//!
//! ```rust,no_run
//! use sg_connector_slack::{SlackClient, SlackNotifier, SlackRoster};
//! use sg_ledger::{Notifier, RosterProvider};
//!
//! let client = SlackClient::new("xoxb-...").unwrap();
//! let roster = SlackRoster::new(client.clone()).fetch().unwrap();
//! let notifier = SlackNotifier::new(client);
//! notifier.send("#general", "hello class").unwrap();
//! # let _ = roster;
//! ```

pub mod client;
pub mod error;
pub mod notifier;
pub mod roster;

pub use client::{SlackClient, DEFAULT_BASE_URL};
pub use error::SlackError;
pub use notifier::{MessageEnvelope, SlackNotifier};
pub use roster::SlackRoster;
