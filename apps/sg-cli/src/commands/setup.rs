// setup.rs: `slackgrade setup` creates a class grade log and saves its
// settings.
//
// Anything not given on the command line is asked for on stdin. Re-running
// setup for an existing class keeps the existing log and replaces the
// settings section.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use sg_ledger::{Created, LedgerStore};

use super::Context;
use crate::settings::ClassSection;

/// `<log_dir>/<class>-slackgrades.log`.
pub fn log_name(log_dir: &Path, class_name: &str) -> PathBuf {
    log_dir.join(format!("{}-slackgrades.log", class_name.trim()))
}

fn prompt(question: &str) -> anyhow::Result<String> {
    print!("{}", question);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn execute(ctx: &Context, token: Option<&str>, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let class_name = match &ctx.class_name {
        Some(name) => name.trim().to_string(),
        None => prompt("Enter the name of the class: ")?,
    };
    if class_name.is_empty() {
        anyhow::bail!("class name cannot be empty");
    }

    let token = match token {
        Some(t) => t.to_string(),
        None => prompt("Enter your slack token: ")?,
    };

    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => {
            let home = dirs::home_dir().context("cannot determine home directory")?;
            let answer = prompt(&format!(
                "Enter the full path to the grade log [{}]: ",
                home.display()
            ))?;
            if answer.is_empty() {
                home
            } else {
                PathBuf::from(answer)
            }
        }
    };

    let grade_log = log_name(&log_dir, &class_name);
    let (store, created) = LedgerStore::create(&grade_log, &class_name)
        .with_context(|| format!("unable to create the log file {}", grade_log.display()))?;
    match created {
        Created::New => println!("Created grade log: {}", store.path().display()),
        Created::Existing => {
            println!("Grade log already exists.  We'll append");
            println!("using logfile: {}", store.path().display());
        }
    }

    ctx.settings.upsert(
        &class_name,
        ClassSection {
            token,
            grade_log,
            channel: None,
        },
    )?;
    println!(
        "Saved settings for '{}' in {}",
        class_name,
        ctx.settings.path().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsFile;
    use sg_ledger::ConfigStore;
    use tempfile::tempdir;

    #[test]
    fn log_name_joins_class() {
        assert_eq!(
            log_name(Path::new("/home/me"), " phys "),
            PathBuf::from("/home/me/phys-slackgrades.log")
        );
    }

    #[test]
    fn non_interactive_setup_creates_log_and_settings() {
        let dir = tempdir().unwrap();
        let ctx = Context {
            settings: SettingsFile::new(dir.path().join(".slackgrader")),
            class_name: Some("phys".into()),
            roster_file: None,
            dry_run: false,
        };

        execute(&ctx, Some("xoxb-1"), Some(dir.path())).unwrap();

        let class = ctx.settings.resolve(None).unwrap();
        assert_eq!(class.class_name, "phys");
        assert_eq!(class.grade_log, dir.path().join("phys-slackgrades.log"));
        let header = std::fs::read_to_string(&class.grade_log).unwrap();
        assert_eq!(header, "# slack grade log for class: phys\n");

        // Second run keeps the log.
        execute(&ctx, Some("xoxb-2"), Some(dir.path())).unwrap();
        assert_eq!(ctx.settings.resolve(None).unwrap().token, "xoxb-2");
        assert_eq!(std::fs::read_to_string(&class.grade_log).unwrap(), header);
    }
}
