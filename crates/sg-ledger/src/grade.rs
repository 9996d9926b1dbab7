// grade.rs: A single "post a grade" action.
//
// A GradeEvent resolves every student token up front, so a typo or an
// ambiguous name aborts the whole event before anything is sent or written.
// It performs no I/O of its own; `dispatch::post_grade` drives the notifier
// and the ledger.

use chrono::{DateTime, Local, TimeZone};

use crate::error::LedgerError;
use crate::notify::Notifier;
use crate::record::{Record, TIMESTAMP_FORMAT};
use crate::resolver;
use crate::student::{Roster, Student};

/// Channel used when none is given.
pub const DEFAULT_CHANNEL: &str = "#general";

/// Ensure a channel carries its leading `#`.
pub fn normalize_channel(channel: &str) -> String {
    let channel = channel.trim();
    if channel.is_empty() {
        DEFAULT_CHANNEL.to_string()
    } else if channel.starts_with('#') {
        channel.to_string()
    } else {
        format!("#{}", channel)
    }
}

/// One grading action for one or more students.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeEvent {
    students: Vec<Student>,
    remark: String,
    channel: String,
    timestamp: String,
}

impl GradeEvent {
    /// Resolve `tokens` against `roster` and stamp the current local time.
    pub fn create<S: AsRef<str>>(
        tokens: &[S],
        remark: &str,
        channel: &str,
        roster: &Roster,
    ) -> Result<Self, LedgerError> {
        Self::create_at(tokens, remark, channel, roster, &Local::now())
    }

    /// Like [`GradeEvent::create`] with an explicit timestamp.
    pub fn create_at<S, Tz>(
        tokens: &[S],
        remark: &str,
        channel: &str,
        roster: &Roster,
        at: &DateTime<Tz>,
    ) -> Result<Self, LedgerError>
    where
        S: AsRef<str>,
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if tokens.is_empty() {
            return Err(LedgerError::NotFound {
                token: String::new(),
            });
        }

        let students = resolver::resolve_all(tokens, roster)?;
        let event = Self {
            students,
            remark: remark.to_string(),
            channel: normalize_channel(channel),
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        };

        tracing::debug!(
            students = event.students.len(),
            channel = %event.channel,
            "created grade event"
        );
        Ok(event)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn remark(&self) -> &str {
        &self.remark
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// `"<mention-1> <mention-2> ... : <remark>"`, mentions in token order.
    pub fn render_notification(&self, notifier: &dyn Notifier) -> String {
        let mentions: Vec<String> = self.students.iter().map(|s| notifier.mention(s)).collect();
        format!("{} : {}", mentions.join(" "), self.remark)
    }

    /// One record per resolved student, sharing timestamp, channel and remark.
    pub fn to_records(&self) -> Vec<Record> {
        self.students
            .iter()
            .map(|s| Record::new(&self.timestamp, &s.name, &self.channel, &self.remark))
            .collect()
    }
}
