// dispatch.rs: Drive the notifier and the ledger for the two write paths.
//
// Posting a grade notifies first and records only after the notifier
// confirms delivery, so the ledger never holds a grade the class was not
// told about. The reverse gap remains: if the append fails after a
// successful send, the error names the missing ledger and the caller exits
// non-zero.

use crate::error::{LedgerError, NotifyError};
use crate::grade::GradeEvent;
use crate::notify::Notifier;
use crate::report::Report;
use crate::resolver;
use crate::store::LedgerStore;
use crate::student::{Roster, Student};

/// Send the grade to its channel, then append one record per student.
///
/// Returns the number of records written.
pub fn post_grade(
    event: &GradeEvent,
    notifier: &dyn Notifier,
    store: &LedgerStore,
) -> Result<usize, LedgerError> {
    let text = event.render_notification(notifier);
    notifier.send(event.channel(), &text)?;
    tracing::info!(
        channel = %event.channel(),
        notifier = notifier.name(),
        "grade posted"
    );

    let records = event.to_records();
    store.append_all(&records)?;
    Ok(records.len())
}

/// Result of [`send_digests`].
#[derive(Debug, Default)]
pub struct DigestOutcome {
    /// Students whose digest was delivered.
    pub sent: Vec<String>,
    /// Students with no known DM destination.
    pub skipped: Vec<String>,
    /// Students whose delivery failed.
    pub failed: Vec<(String, NotifyError)>,
}

impl DigestOutcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Roster entry for a ledger name: exact match first, then a unique
/// substring match.
fn roster_entry<'r>(name: &str, roster: &'r Roster) -> Option<&'r Student> {
    roster
        .find_by_name(name)
        .or_else(|| resolver::resolve(name, roster).ok())
}

/// DM every graded student their own participation history.
///
/// Students without a DM destination are skipped, and one failed delivery
/// does not stop the rest.
pub fn send_digests(report: &Report, roster: &Roster, notifier: &dyn Notifier) -> DigestOutcome {
    let mut outcome = DigestOutcome::default();

    for name in report.students() {
        let destination = roster_entry(name, roster).and_then(|s| s.dm_destination.as_deref());
        let Some(destination) = destination else {
            tracing::warn!(student = name, "no direct message channel, skipping digest");
            outcome.skipped.push(name.to_string());
            continue;
        };

        match notifier.send(destination, &report.digest_message(name)) {
            Ok(()) => outcome.sent.push(name.to_string()),
            Err(e) => {
                tracing::error!(student = name, error = %e, "digest delivery failed");
                outcome.failed.push((name.to_string(), e));
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        sent: RefCell<Vec<(String, String)>>,
        fail_for: Option<String>,
    }

    impl Notifier for Recorder {
        fn send(&self, destination: &str, text: &str) -> Result<(), NotifyError> {
            if self.fail_for.as_deref() == Some(destination) {
                return Err(NotifyError::new(destination, "channel_not_found"));
            }
            self.sent
                .borrow_mut()
                .push((destination.to_string(), text.to_string()));
            Ok(())
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    fn report() -> Report {
        Report::new(vec![
            Record::new("2024-01-01 10:00:00", "alice smith", "#general", "a"),
            Record::new("2024-01-01 10:00:00", "bob lee", "#general", "b"),
            Record::new("2024-01-01 10:00:00", "carol king", "#general", "c"),
        ])
    }

    fn roster() -> Roster {
        Roster::new(vec![
            Student::new("alice smith").with_dm_destination("D1"),
            Student::new("bob lee").with_dm_destination("D2"),
            Student::new("carol king"),
        ])
    }

    #[test]
    fn digests_skip_students_without_dm() {
        let n = Recorder::default();
        let outcome = send_digests(&report(), &roster(), &n);

        assert_eq!(outcome.sent, vec!["alice smith", "bob lee"]);
        assert_eq!(outcome.skipped, vec!["carol king"]);
        assert!(outcome.is_success());

        let sent = n.sent.borrow();
        assert_eq!(sent[0].0, "D1");
        assert!(sent[0].1.contains("(alice smith)"));
    }

    #[test]
    fn digest_failure_does_not_stop_loop() {
        let n = Recorder {
            fail_for: Some("D1".into()),
            ..Default::default()
        };
        let outcome = send_digests(&report(), &roster(), &n);

        assert_eq!(outcome.sent, vec!["bob lee"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "alice smith");
        assert!(!outcome.is_success());
    }
}
