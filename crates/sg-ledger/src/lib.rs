//! # sg-ledger
//!
//! Participation grade ledger for slackgrade.
//!
//! An instructor posts a short remark ("+1, great question") for one or more
//! students. Each posting resolves free-text names against the class roster,
//! is announced to a channel through a [`Notifier`], and is appended to a
//! plain-text ledger as one [`Record`] per student. Reports, per-student
//! histories and DM digests are rebuilt from that ledger.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use sg_ledger::{dispatch, DryRunNotifier, GradeEvent, LedgerStore, Roster, Student};
//!
//! let roster: Roster = vec![Student::new("alice smith"), Student::new("bob lee")]
//!     .into_iter()
//!     .collect();
//! let event = GradeEvent::create(&["alice"], "great question", "general", &roster).unwrap();
//! let store = LedgerStore::new("/tmp/phys-slackgrades.log");
//! dispatch::post_grade(&event, &DryRunNotifier::new(), &store).unwrap();
//! ```
//!
//! The core performs no network I/O and never reads the environment. Roster
//! lookups, settings and message delivery come in through
//! [`RosterProvider`], [`ConfigStore`] and [`Notifier`].

pub mod config;
pub mod dispatch;
pub mod error;
pub mod grade;
pub mod notify;
pub mod record;
pub mod report;
pub mod resolver;
pub mod store;
pub mod student;

pub use config::{ClassSettings, ConfigStore};
pub use dispatch::DigestOutcome;
pub use error::{LedgerError, NotifyError};
pub use grade::{normalize_channel, GradeEvent, DEFAULT_CHANNEL};
pub use notify::{DryRunNotifier, Notifier};
pub use record::{Record, TIMESTAMP_FORMAT};
pub use report::Report;
pub use resolver::{resolve, resolve_all, strip_sigil};
pub use store::{Created, LedgerStore};
pub use student::{Roster, RosterProvider, StaticRoster, Student};
