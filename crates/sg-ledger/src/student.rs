// student.rs: Student identities and the roster snapshot they live in.
//
// A roster is fetched once per invocation by a `RosterProvider` and then
// handed to the resolver as a plain in-memory snapshot. The core never
// talks to a user directory itself.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// A known student identity.
///
/// `name` is the identity; `external_id` (e.g. a Slack user id) and
/// `dm_destination` (a private-message channel) are filled in by the roster
/// provider when it knows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub external_id: Option<String>,
    pub dm_destination: Option<String>,
}

impl Student {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_id: None,
            dm_destination: None,
        }
    }

    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    pub fn with_dm_destination(mut self, destination: impl Into<String>) -> Self {
        self.dm_destination = Some(destination.into());
        self
    }
}

/// An in-memory roster snapshot, in provider order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new(students: Vec<Student>) -> Self {
        Self { students }
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn find_by_external_id(&self, id: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|s| s.external_id.as_deref() == Some(id))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.name == name)
    }

    /// Attach a DM destination to the student with `external_id`.
    ///
    /// Returns `false` when no student carries that id.
    pub fn attach_dm(&mut self, external_id: &str, destination: impl Into<String>) -> bool {
        match self
            .students
            .iter_mut()
            .find(|s| s.external_id.as_deref() == Some(external_id))
        {
            Some(student) => {
                student.dm_destination = Some(destination.into());
                true
            }
            None => false,
        }
    }
}

impl FromIterator<Student> for Roster {
    fn from_iter<I: IntoIterator<Item = Student>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Supplies the roster of known identities for a class.
///
/// Fetching, pagination and caching belong to the implementation; callers
/// get back a complete snapshot or an error.
pub trait RosterProvider {
    fn fetch(&self) -> Result<Roster, LedgerError>;
}

/// A provider backed by a roster built up front.
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    roster: Roster,
}

impl StaticRoster {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }

    /// Build a roster of bare names (no external ids or DM channels).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Student::new).collect())
    }
}

impl RosterProvider for StaticRoster {
    fn fetch(&self) -> Result<Roster, LedgerError> {
        Ok(self.roster.clone())
    }
}
