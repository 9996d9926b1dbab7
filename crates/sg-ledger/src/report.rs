// report.rs: Aggregation over the full record sequence.
//
// Everything here is a pure function of the records loaded from the ledger;
// nothing writes back.

use std::collections::{BTreeMap, BTreeSet};

use crate::record::Record;

/// Read-only view over a loaded ledger.
#[derive(Debug, Clone, Default)]
pub struct Report {
    records: Vec<Record>,
}

impl Report {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records per student name, sorted by name (byte order).
    pub fn summary(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.records {
            *counts.entry(r.student_name.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// `summary()` as printable lines: `"<name:30>, <count>"`.
    pub fn render_summary(&self) -> String {
        self.summary()
            .iter()
            .map(|(name, count)| format!("{:30}, {}\n", name, count))
            .collect()
    }

    /// Distinct student names, sorted.
    pub fn students(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.student_name.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct student names containing `query`, sorted.
    pub fn matching_students(&self, query: &str) -> Vec<&str> {
        self.students()
            .into_iter()
            .filter(|name| name.contains(query))
            .collect()
    }

    /// Records of every student whose name contains `query`, in ledger order.
    ///
    /// Unlike grading, several matching students is not an error: their
    /// records are merged into one history.
    pub fn history(&self, query: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.student_name.contains(query))
            .collect()
    }

    /// Records for exactly `student_name`, in ledger order.
    pub fn digest(&self, student_name: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|r| r.student_name == student_name)
            .collect()
    }

    /// The DM text summarizing one student's participation.
    pub fn digest_message(&self, student_name: &str) -> String {
        let mut text = format!(
            "Here is your class participation summary ({}):\n",
            student_name
        );
        for r in self.digest(student_name) {
            text.push_str(&digest_line(r));
            text.push('\n');
        }
        text
    }
}

/// `"(<timestamp>; <channel>) <remark>"`. The student is the addressee so
/// the name is left out.
pub fn digest_line(record: &Record) -> String {
    format!("({}; {}) {}", record.timestamp, record.channel, record.remark)
}

/// `"<student>: (<timestamp>; <channel>) <remark>"`.
pub fn history_line(record: &Record) -> String {
    format!("{}: {}", record.student_name, digest_line(record))
}
