use std::io::Write;

use anyhow::{Context, bail};
use kg2_config::Kg2Config;

use crate::cli::{GlobalFlags, QueryArgs};
use crate::output::{output, records_json};
use crate::pipeline;

/// Handle `kg2 query`.
pub async fn handle(args: &QueryArgs, config: &Kg2Config, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.list {
        return output(&config.queries.names(), flags.format);
    }

    let sql = match (&args.name, &args.sql) {
        (Some(name), None) => config.queries.render(name, &config.lookups)?,
        (None, Some(sql)) => sql.clone(),
        _ => bail!("pass either a query name or --sql"),
    };

    let status = pipeline::prepare_dataset(config).await?;
    let db = pipeline::open_dataset(status.dataset_dir())?;

    if !args.stream {
        let result = db.execute(&sql)?;
        return output(&records_json(&result), flags.format);
    }

    let mut prepared = db.prepare(&sql)?;
    let mut stream = prepared.stream()?;
    let mut stdout = std::io::stdout().lock();
    let mut count = 0_usize;
    while let Some(record) = stream.next_record()? {
        serde_json::to_writer(&mut stdout, &record.to_json())?;
        writeln!(stdout).context("failed to write record")?;
        count += 1;
    }
    tracing::debug!(records = count, "stream exhausted");
    Ok(())
}
