// mod.rs: Shared command context and collaborator wiring.

pub mod digest;
pub mod history;
pub mod post;
pub mod report;
pub mod setup;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use sg_connector_slack::{SlackClient, SlackNotifier, SlackRoster};
use sg_ledger::{
    ClassSettings, ConfigStore, DryRunNotifier, LedgerStore, Notifier, Report, Roster,
    RosterProvider, StaticRoster,
};

use crate::settings::SettingsFile;

/// Global options every command sees.
pub struct Context {
    pub settings: SettingsFile,
    pub class_name: Option<String>,
    pub roster_file: Option<PathBuf>,
    pub dry_run: bool,
}

impl Context {
    /// Settings for the selected class.
    pub fn class(&self) -> anyhow::Result<ClassSettings> {
        let class = self.settings.resolve(self.class_name.as_deref())?;
        tracing::debug!(class = %class.class_name, log = %class.grade_log.display(), "using class");
        Ok(class)
    }

    pub fn notifier(&self, class: &ClassSettings) -> anyhow::Result<Box<dyn Notifier>> {
        if self.dry_run {
            return Ok(Box::new(DryRunNotifier::new()));
        }
        Ok(Box::new(SlackNotifier::new(SlackClient::new(&class.token)?)))
    }

    pub fn roster(&self, class: &ClassSettings) -> anyhow::Result<Roster> {
        let provider: Box<dyn RosterProvider> = match &self.roster_file {
            Some(path) => Box::new(read_roster_file(path)?),
            None => Box::new(SlackRoster::new(SlackClient::new(&class.token)?)),
        };
        Ok(provider.fetch()?)
    }

    /// Load the whole ledger for the selected class.
    pub fn report(&self, class: &ClassSettings) -> anyhow::Result<Report> {
        let records = LedgerStore::new(&class.grade_log)
            .load()
            .with_context(|| format!("reading grade log for class '{}'", class.class_name))?;
        Ok(Report::new(records))
    }
}

/// One name per line; blank lines and `#` comments skipped.
pub fn read_roster_file(path: &Path) -> anyhow::Result<StaticRoster> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading roster file {}", path.display()))?;
    Ok(parse_roster(&content))
}

fn parse_roster(content: &str) -> StaticRoster {
    StaticRoster::from_names(
        content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#')),
    )
}

/// Test fixture: a class "phys" with an empty grade log and a roster file.
#[cfg(test)]
pub(crate) fn test_context(dir: &Path, names: &[&str]) -> Context {
    use crate::settings::ClassSection;

    let settings = SettingsFile::new(dir.join(".slackgrader"));
    let grade_log = dir.join("phys-slackgrades.log");
    settings
        .upsert(
            "phys",
            ClassSection {
                token: "xoxb-1".into(),
                grade_log: grade_log.clone(),
                channel: None,
            },
        )
        .unwrap();
    LedgerStore::create(&grade_log, "phys").unwrap();

    let roster_file = dir.join("roster.txt");
    std::fs::write(&roster_file, names.join("\n")).unwrap();

    Context {
        settings,
        class_name: Some("phys".into()),
        roster_file: Some(roster_file),
        dry_run: true,
    }
}
