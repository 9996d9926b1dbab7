// history.rs: `slackgrade history <query>` shows matching students' records.
//
// Every student whose name contains the query contributes, in ledger order.

use sg_ledger::report::history_line;

use super::Context;

pub fn execute(ctx: &Context, query: &str, json: bool) -> anyhow::Result<()> {
    let class = ctx.class()?;
    let report = ctx.report(&class)?;
    let records = report.history(query);

    if records.is_empty() {
        println!("student not found");
        println!("known students: {}", report.students().join(", "));
        anyhow::bail!("no records match '{}'", query);
    }

    let matched = report.matching_students(query);
    if matched.len() > 1 {
        tracing::info!(students = %matched.join(", "), "query matched several students");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in records {
            println!("{}", history_line(record));
        }
    }
    Ok(())
}
