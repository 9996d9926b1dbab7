// digest.rs: `slackgrade digest` DMs each student their participation summary.

use sg_ledger::dispatch;

use super::Context;

pub fn execute(ctx: &Context) -> anyhow::Result<()> {
    let class = ctx.class()?;
    let report = ctx.report(&class)?;
    let roster = ctx.roster(&class)?;
    let notifier = ctx.notifier(&class)?;

    let outcome = dispatch::send_digests(&report, &roster, notifier.as_ref());

    println!("Sent {} digest(s).", outcome.sent.len());
    if !outcome.skipped.is_empty() {
        println!(
            "No direct message channel for: {}",
            outcome.skipped.join(", ")
        );
    }
    for (student, err) in &outcome.failed {
        println!("FAILED {}: {}", student, err);
    }

    if !outcome.is_success() {
        anyhow::bail!("{} digest(s) could not be delivered", outcome.failed.len());
    }
    Ok(())
}
