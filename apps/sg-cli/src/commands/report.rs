// report.rs: `slackgrade report` prints points per student.

use super::Context;

pub fn execute(ctx: &Context, json: bool) -> anyhow::Result<()> {
    let class = ctx.class()?;
    let report = ctx.report(&class)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
        return Ok(());
    }

    if report.records().is_empty() {
        println!("No grades recorded for '{}'.", class.class_name);
        return Ok(());
    }
    print!("{}", report.render_summary());
    Ok(())
}
