// settings.rs: Per-user class settings file.
//
// Lives at ~/.slackgrader unless overridden with --settings. One TOML table
// per class, kept in file order so the first table doubles as the default
// class:
//
//   [physics-101]
//   token = "xoxb-..."
//   grade-log = "/home/me/physics-101-slackgrades.log"
//   channel = "#general"    # optional

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sg_ledger::{ClassSettings, ConfigStore, LedgerError, DEFAULT_CHANNEL};
use thiserror::Error;

/// File name of the settings file in the home directory.
pub const SETTINGS_FILE_NAME: &str = ".slackgrader";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot determine home directory for the settings file")]
    NoHome,

    #[error("unable to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("unable to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("unable to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no classes configured in {path}; run `slackgrade setup` first")]
    NoClasses { path: PathBuf },

    #[error("class '{name}' is not configured (known: {})", .known.join(", "))]
    UnknownClass { name: String, known: Vec<String> },
}

/// One class table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSection {
    pub token: String,
    #[serde(rename = "grade-log")]
    pub grade_log: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

/// The settings file on disk.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `~/.slackgrader`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::home_dir()
            .map(|home| home.join(SETTINGS_FILE_NAME))
            .ok_or(SettingsError::NoHome)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All class sections in file order. A missing file has no classes.
    pub fn load(&self) -> Result<Vec<(String, ClassSection)>, SettingsError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;
        let parse_err = |source: toml::de::Error| SettingsError::Parse {
            path: self.path.clone(),
            source,
        };

        let table: toml::Table = toml::from_str(&content).map_err(parse_err)?;
        table
            .into_iter()
            .map(|(name, value)| -> Result<_, SettingsError> {
                let section: ClassSection = value.try_into().map_err(parse_err)?;
                Ok((name, section))
            })
            .collect()
    }

    /// Replace (or add) the section for `class_name`. A replaced section
    /// moves to the end of the file.
    pub fn upsert(&self, class_name: &str, section: ClassSection) -> Result<(), SettingsError> {
        let mut classes = self.load()?;
        classes.retain(|(name, _)| name != class_name);
        classes.push((class_name.to_string(), section));

        let mut table = toml::Table::new();
        for (name, section) in classes {
            table.insert(name, toml::Value::try_from(section)?);
        }
        let content = toml::to_string(&table)?;

        std::fs::write(&self.path, content).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), class = class_name, "saved class settings");
        Ok(())
    }

    /// Settings for `class_name`, or the first class when `None`.
    pub fn lookup(&self, class_name: Option<&str>) -> Result<ClassSettings, SettingsError> {
        let classes = self.load()?;
        let (name, section) = match class_name {
            Some(wanted) => classes
                .iter()
                .find(|(name, _)| name == wanted)
                .ok_or_else(|| SettingsError::UnknownClass {
                    name: wanted.to_string(),
                    known: classes.iter().map(|(n, _)| n.clone()).collect(),
                })?,
            None => classes.first().ok_or_else(|| SettingsError::NoClasses {
                path: self.path.clone(),
            })?,
        };

        Ok(ClassSettings {
            class_name: name.clone(),
            grade_log: section.grade_log.clone(),
            token: section.token.clone(),
            default_channel: section
                .channel
                .clone()
                .unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
        })
    }
}

impl ConfigStore for SettingsFile {
    fn resolve(&self, class_name: Option<&str>) -> Result<ClassSettings, LedgerError> {
        self.lookup(class_name)
            .map_err(|e| LedgerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn section(log: &str) -> ClassSection {
        ClassSection {
            token: "xoxb-1".into(),
            grade_log: PathBuf::from(log),
            channel: None,
        }
    }

    #[test]
    fn first_class_is_default() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join(SETTINGS_FILE_NAME));
        file.upsert("zoology", section("/tmp/z.log")).unwrap();
        file.upsert("algebra", section("/tmp/a.log")).unwrap();

        let settings = file.resolve(None).unwrap();
        assert_eq!(settings.class_name, "zoology");
        assert_eq!(settings.default_channel, "#general");

        let settings = file.resolve(Some("algebra")).unwrap();
        assert_eq!(settings.grade_log, PathBuf::from("/tmp/a.log"));
    }

    #[test]
    fn upsert_replaces_existing_class() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join(SETTINGS_FILE_NAME));
        file.upsert("phys", section("/tmp/old.log")).unwrap();
        file.upsert("chem", section("/tmp/c.log")).unwrap();
        file.upsert("phys", section("/tmp/new.log")).unwrap();

        let classes = file.load().unwrap();
        let names: Vec<&str> = classes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["chem", "phys"]);
        assert_eq!(classes[1].1.grade_log, PathBuf::from("/tmp/new.log"));
    }

    #[test]
    fn hand_written_file_with_channel() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(
            &path,
            "[phys]\ntoken = \"xoxb-9\"\ngrade-log = \"/tmp/p.log\"\nchannel = \"#lab\"\n",
        )
        .unwrap();

        let settings = SettingsFile::new(&path).lookup(None).unwrap();
        assert_eq!(settings.token, "xoxb-9");
        assert_eq!(settings.default_channel, "#lab");
    }

    #[test]
    fn missing_file_and_unknown_class() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join(SETTINGS_FILE_NAME));
        assert!(matches!(file.lookup(None), Err(SettingsError::NoClasses { .. })));

        file.upsert("phys", section("/tmp/p.log")).unwrap();
        match file.lookup(Some("bio")) {
            Err(SettingsError::UnknownClass { known, .. }) => assert_eq!(known, vec!["phys"]),
            other => panic!("expected unknown class, got {:?}", other),
        }
    }
}
