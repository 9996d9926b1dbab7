// record.rs: One persisted grading event for one student.
//
// On disk a record is a single line: `timestamp, student, channel, remark`.
// Fields are bare text unless they would confuse the reader (a comma, a
// quote, a backslash, a control character, or surrounding whitespace), in
// which case they are written as JSON string literals. Bare-only lines are
// exactly what older grade logs contain, so those still load unchanged.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// strftime format of [`Record::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator written between fields.
pub const FIELD_SEPARATOR: &str = ", ";

const FIELD_COUNT: usize = 4;

/// An immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub student_name: String,
    /// Always carries a leading `#`.
    pub channel: String,
    pub remark: String,
}

impl Record {
    pub fn new(
        timestamp: impl Into<String>,
        student_name: impl Into<String>,
        channel: impl Into<String>,
        remark: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            student_name: student_name.into(),
            channel: channel.into(),
            remark: remark.into(),
        }
    }

    /// Render the record as one ledger line, without the line terminator.
    pub fn to_line(&self) -> String {
        [
            &self.timestamp,
            &self.student_name,
            &self.channel,
            &self.remark,
        ]
        .iter()
        .map(|f| encode_field(f))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
    }

    /// Parse one non-comment ledger line. `line_no` is 1-based and only used
    /// in error messages.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self, LedgerError> {
        let fields = split_fields(line);
        if fields.len() != FIELD_COUNT {
            return Err(LedgerError::MalformedRecord {
                line: line_no,
                reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
            });
        }

        let mut fields = fields.into_iter();
        // Length checked above.
        let mut next = || fields.next().unwrap_or_default();
        Ok(Self {
            timestamp: next(),
            student_name: next(),
            channel: next(),
            remark: next(),
        })
    }
}

fn needs_quoting(field: &str) -> bool {
    field != field.trim()
        || field
            .chars()
            .any(|c| c == ',' || c == '"' || c == '\\' || c.is_control())
}

fn encode_field(field: &str) -> String {
    if needs_quoting(field) {
        serde_json::Value::String(field.to_string()).to_string()
    } else {
        field.to_string()
    }
}

/// A JSON-quoted field at the start of `text`, with whatever follows its
/// separating comma (`None` at end of line). Anything that does not decode
/// cleanly or is followed by more text is not a quoted field.
fn quoted_field(text: &str) -> Option<(String, Option<&str>)> {
    if !text.starts_with('"') {
        return None;
    }
    let mut stream = serde_json::Deserializer::from_str(text).into_iter::<String>();
    let value = stream.next()?.ok()?;
    let after = text[stream.byte_offset()..].trim_start();

    if after.is_empty() {
        Some((value, None))
    } else {
        after.strip_prefix(',').map(|tail| (value, Some(tail)))
    }
}

/// Split a line into fields. Quoted fields are tried first; older logs
/// wrote remarks such as `"great question" - nice` bare, so a quote that
/// does not close a whole field falls back to plain comma splitting.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut rest = line;

    loop {
        if let Some((value, tail)) = quoted_field(rest.trim_start()) {
            fields.push(value);
            match tail {
                Some(tail) => rest = tail,
                None => break,
            }
            continue;
        }

        match rest.split_once(',') {
            Some((field, tail)) => {
                fields.push(field.trim().to_string());
                rest = tail;
            }
            None => {
                fields.push(rest.trim().to_string());
                break;
            }
        }
    }

    fields
}
