//! # slackgrade
//!
//! Command-line interface for participation grading over Slack.
//!
//! - `slackgrade setup`: create a class grade log and save its settings
//! - `slackgrade post <students> <remark> [channel]`: announce and record a grade
//! - `slackgrade report`: points per student
//! - `slackgrade history <query>`: one student's activity
//! - `slackgrade digest`: DM every student their own summary

mod commands;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::Context;
use crate::settings::SettingsFile;

/// Post "+1"-style participation grades to Slack and keep the record.
#[derive(Parser)]
#[command(name = "slackgrade", version, about)]
struct Cli {
    /// Class to grade (defaults to the first class in the settings file).
    #[arg(long, global = true)]
    class_name: Option<String>,

    /// Settings file (defaults to ~/.slackgrader).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Roster file with one student name per line, used instead of the
    /// Slack user directory.
    #[arg(long, global = true)]
    roster_file: Option<PathBuf>,

    /// Print messages instead of sending them; nothing is recorded.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Define or modify the settings for a class.
    Setup {
        /// Slack bot token (prompted for when omitted).
        #[arg(long)]
        token: Option<String>,
        /// Directory for the grade log (prompted for when omitted).
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
    /// Grade one or more students.
    Post {
        /// Student name(s); separate several with spaces inside one argument.
        students: String,
        /// Remark to post as the grade.
        remark: String,
        /// Channel to post to (defaults to the class channel, #general).
        channel: Option<String>,
    },
    /// Write out a summary of points by student.
    Report {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Output the history of a single student's activity.
    History {
        /// Name or part of a name.
        query: String,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Post grade summaries to each student's DM channel.
    Digest,
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    // Logs go to stderr so they don't interfere with reports on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("sg_ledger={}", level).parse()?)
                .add_directive(format!("sg_connector_slack={}", level).parse()?)
                .add_directive(format!("slackgrade={}", if verbose { "debug" } else { "info" }).parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let settings_path = match cli.settings {
        Some(path) => path,
        None => SettingsFile::default_path()?,
    };
    let ctx = Context {
        settings: SettingsFile::new(settings_path),
        class_name: cli.class_name,
        roster_file: cli.roster_file,
        dry_run: cli.dry_run,
    };

    match &cli.command {
        Commands::Setup { token, log_dir } => {
            commands::setup::execute(&ctx, token.as_deref(), log_dir.as_deref())
        }
        Commands::Post {
            students,
            remark,
            channel,
        } => commands::post::execute(&ctx, students, remark, channel.as_deref()),
        Commands::Report { json } => commands::report::execute(&ctx, *json),
        Commands::History { query, json } => commands::history::execute(&ctx, query, *json),
        Commands::Digest => commands::digest::execute(&ctx),
    }
}
