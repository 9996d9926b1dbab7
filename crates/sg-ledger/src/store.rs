// store.rs: Append-only grade ledger backed by a plain text file.
//
// One record per line, `#` comment lines and blank lines ignored. The file
// is created once by `LedgerStore::create` during setup; after that it is
// only ever appended to. Appends never create the file, so a grade posted
// against a class that was never set up fails loudly instead of starting a
// fresh, headerless log somewhere unexpected.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::LedgerError;
use crate::record::Record;

/// Outcome of [`LedgerStore::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    /// A new file was written with the class header.
    New,
    /// The file already existed and was left untouched.
    Existing,
}

/// Handle to a ledger file. Holds no open file between calls.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create the ledger for `class_name` if it does not exist yet.
    pub fn create(path: impl AsRef<Path>, class_name: &str) -> Result<(Self, Created), LedgerError> {
        let store = Self::new(path);
        if store.path.exists() {
            tracing::info!(path = %store.path.display(), "grade log already exists, will append");
            return Ok((store, Created::Existing));
        }

        let header = format!("# slack grade log for class: {}\n", class_name.trim());
        std::fs::write(&store.path, header).map_err(|source| LedgerError::Io {
            path: store.path.clone(),
            source,
        })?;
        tracing::info!(path = %store.path.display(), "created grade log");
        Ok((store, Created::New))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record.
    ///
    /// The fully formatted line and its terminator go out in a single
    /// `write_all` on a file opened in append mode, so concurrent appenders
    /// interleave whole lines.
    pub fn append(&self, record: &Record) -> Result<(), LedgerError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| LedgerError::from_io(&self.path, source))?;

        let mut line = record.to_line();
        line.push('\n');

        file.write_all(line.as_bytes())
            .map_err(|source| LedgerError::Io {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            student = %record.student_name,
            "appended grade record"
        );
        Ok(())
    }

    /// Append several records in order. Stops at the first failure.
    pub fn append_all(&self, records: &[Record]) -> Result<(), LedgerError> {
        for record in records {
            self.append(record)?;
        }
        Ok(())
    }

    /// Read every record in file order.
    ///
    /// A single malformed line fails the whole load; no partial list is
    /// returned.
    pub fn load(&self) -> Result<Vec<Record>, LedgerError> {
        let file = File::open(&self.path).map_err(|source| LedgerError::from_io(&self.path, source))?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| LedgerError::Io {
                path: self.path.clone(),
                source,
            })?;
            let content = line.trim_end();
            if content.trim_start().is_empty() || content.starts_with('#') {
                continue;
            }
            records.push(Record::parse_line(content, idx + 1)?);
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded grade log");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(student: &str, remark: &str) -> Record {
        Record::new("2024-01-01 10:00:00", student, "#general", remark)
    }

    #[test]
    fn create_writes_header_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("phys-slackgrades.log");

        let (store, created) = LedgerStore::create(&path, "phys").unwrap();
        assert_eq!(created, Created::New);
        store.append(&record("alice smith", "hi")).unwrap();

        let (_, created) = LedgerStore::create(&path, "phys").unwrap();
        assert_eq!(created, Created::Existing);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# slack grade log for class: phys\n"));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn append_to_missing_file_is_ledger_missing() {
        let dir = tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("nope.log"));

        let err = store.append(&record("alice smith", "hi")).unwrap_err();
        assert!(matches!(err, LedgerError::LedgerMissing { .. }));
        // Append must not have created it.
        assert!(!store.path().exists());
    }

    #[test]
    fn load_missing_file_is_ledger_missing() {
        let dir = tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("nope.log"));
        assert!(matches!(
            store.load(),
            Err(LedgerError::LedgerMissing { .. })
        ));
    }

    #[test]
    fn load_skips_comments_and_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.log");
        std::fs::write(
            &path,
            "# class: phys\n\n2024-01-01 10:00:00, alice smith, #general, nice work\n   \n# trailing\n",
        )
        .unwrap();

        let records = LedgerStore::new(&path).load().unwrap();
        assert_eq!(records, vec![record("alice smith", "nice work")]);
    }

    #[test]
    fn append_then_load_keeps_order() {
        let dir = tempdir().unwrap();
        let (store, _) = LedgerStore::create(dir.path().join("g.log"), "phys").unwrap();

        let first = record("alice smith", "first");
        let second = record("bob lee", "second, with comma");
        store.append_all(&[first.clone(), second.clone()]).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records, vec![first, second]);
    }

    #[test]
    fn malformed_line_fails_whole_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.log");
        std::fs::write(
            &path,
            "2024-01-01 10:00:00, alice smith, #general, ok\n2024-01-01 10:00:00, bob lee, #general\n",
        )
        .unwrap();

        match LedgerStore::new(&path).load() {
            Err(LedgerError::MalformedRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed record, got {:?}", other),
        }
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.log");
        std::fs::write(&path, "2024-01-01 10:00:00, alice smith, #general, nice work\r\n").unwrap();

        let records = LedgerStore::new(&path).load().unwrap();
        assert_eq!(records[0].remark, "nice work");
    }
}
