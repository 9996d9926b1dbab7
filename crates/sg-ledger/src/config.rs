// config.rs: Class settings as seen by the core.
//
// Where settings live and how they are written is up to the `ConfigStore`
// implementation (the CLI keeps them in a TOML file). The core only needs a
// resolved ledger path, a notifier credential and a default channel.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::grade::DEFAULT_CHANNEL;

/// Resolved settings for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSettings {
    pub class_name: String,
    /// Existing, writable ledger file.
    pub grade_log: PathBuf,
    /// Credential handed to the notifier/roster provider.
    pub token: String,
    #[serde(default = "default_channel")]
    pub default_channel: String,
}

fn default_channel() -> String {
    DEFAULT_CHANNEL.to_string()
}

/// Supplies class settings.
pub trait ConfigStore {
    /// Settings for `class_name`, or for the first configured class when
    /// `None`.
    fn resolve(&self, class_name: Option<&str>) -> Result<ClassSettings, LedgerError>;
}
