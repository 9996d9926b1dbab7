// post.rs: `slackgrade post` announces a grade and records it.

use sg_ledger::{dispatch, GradeEvent, LedgerStore};

use super::Context;

pub fn execute(
    ctx: &Context,
    students: &str,
    remark: &str,
    channel: Option<&str>,
) -> anyhow::Result<()> {
    let tokens: Vec<&str> = students.split_whitespace().collect();
    if tokens.is_empty() || remark.trim().is_empty() {
        anyhow::bail!("student and comment are required");
    }

    let class = ctx.class()?;
    let channel = channel.unwrap_or(&class.default_channel);
    let roster = ctx.roster(&class)?;
    let event = GradeEvent::create(&tokens, remark, channel, &roster)?;
    let notifier = ctx.notifier(&class)?;

    if ctx.dry_run {
        notifier.send(event.channel(), &event.render_notification(notifier.as_ref()))?;
        for record in event.to_records() {
            println!("[dry-run] would record: {}", record.to_line());
        }
        return Ok(());
    }

    let store = LedgerStore::new(&class.grade_log);
    let written = dispatch::post_grade(&event, notifier.as_ref(), &store)?;
    println!(
        "Posted to {} and recorded {} grade(s) in {}",
        event.channel(),
        written,
        store.path().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use tempfile::tempdir;

    #[test]
    fn dry_run_leaves_grade_log_untouched() {
        let dir = tempdir().unwrap();
        let ctx = test_context(dir.path(), &["alice smith", "bob lee"]);
        let log = ctx.class().unwrap().grade_log;
        let before = std::fs::read(&log).unwrap();

        execute(&ctx, "alice bob", "nice work", None).unwrap();

        assert_eq!(std::fs::read(&log).unwrap(), before);
    }

    #[test]
    fn unknown_student_is_rejected() {
        let dir = tempdir().unwrap();
        let ctx = test_context(dir.path(), &["alice smith"]);
        assert!(execute(&ctx, "carol", "nice", None).is_err());
    }

    #[test]
    fn blank_remark_is_rejected() {
        let dir = tempdir().unwrap();
        let ctx = test_context(dir.path(), &["alice smith"]);
        assert!(execute(&ctx, "alice", "   ", None).is_err());
    }
}
