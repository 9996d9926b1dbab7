// error.rs: Error types for the grade ledger.
//
// Uses `thiserror` to derive the standard Rust `Error` trait automatically.
// Each variant maps to a specific failure mode: resolving a student token,
// reading or appending the ledger file, or handing a message to the notifier.

use std::path::PathBuf;

use thiserror::Error;

/// A failure reported by a [`Notifier`](crate::notify::Notifier).
///
/// The core treats delivery failures as opaque: it only knows where the
/// message was going and what the collaborator said went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to deliver message to {destination}: {message}")]
pub struct NotifyError {
    pub destination: String,
    pub message: String,
}

impl NotifyError {
    pub fn new(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while grading or reporting.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The token does not appear in any roster name.
    #[error("student '{token}' does not exist")]
    NotFound { token: String },

    /// The token appears in more than one roster name.
    #[error("multiple students match '{token}': {}", .matches.join(", "))]
    AmbiguousMatch { token: String, matches: Vec<String> },

    /// The ledger file has not been created yet (run setup first).
    #[error("grade log {path} does not exist; run `slackgrade setup` first")]
    LedgerMissing { path: PathBuf },

    /// A ledger line did not parse into exactly four fields.
    #[error("malformed grade log line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The messaging collaborator rejected or failed to deliver a message.
    #[error(transparent)]
    Notify(#[from] NotifyError),

    /// Any other file I/O failure on the ledger.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Class settings could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The roster provider could not produce a roster.
    #[error("roster error: {0}")]
    Roster(String),
}

impl LedgerError {
    /// Wrap an I/O error, mapping `NotFound` to [`LedgerError::LedgerMissing`].
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            LedgerError::LedgerMissing { path }
        } else {
            LedgerError::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_match_lists_candidates() {
        let err = LedgerError::AmbiguousMatch {
            token: "li".into(),
            matches: vec!["alice li".into(), "bob li".into()],
        };
        assert_eq!(
            err.to_string(),
            "multiple students match 'li': alice li, bob li"
        );
    }

    #[test]
    fn missing_file_maps_to_ledger_missing() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = LedgerError::from_io("/tmp/x.log", io);
        assert!(matches!(err, LedgerError::LedgerMissing { .. }));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = LedgerError::from_io("/tmp/x.log", io);
        assert!(matches!(err, LedgerError::Io { .. }));
    }
}
