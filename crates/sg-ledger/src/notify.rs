// notify.rs: The messaging seam.
//
// The core hands a notifier a destination and a fully rendered text. How the
// text reaches people (Slack, a webhook, stdout) and how a student is
// mentioned on that platform is the notifier's business.

use crate::error::NotifyError;
use crate::student::Student;

/// Delivers rendered messages to a channel or a student's DM destination.
pub trait Notifier {
    /// Deliver `text` to `destination`. One blocking attempt, no retries.
    fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError>;

    /// The platform's reference syntax for a student.
    fn mention(&self, student: &Student) -> String {
        format!("@{}", student.name)
    }

    /// Notifier display name (for log output).
    fn name(&self) -> &str;
}

/// Notifier that delivers nothing and prints what it would have sent.
///
/// Selected with `--dry-run`.
#[derive(Debug, Default)]
pub struct DryRunNotifier;

impl DryRunNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for DryRunNotifier {
    fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError> {
        tracing::debug!(destination, "DryRunNotifier: send() - no delivery");
        println!("[dry-run] to {}: {}", destination, text);
        Ok(())
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
