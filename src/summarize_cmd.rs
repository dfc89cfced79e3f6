//! Summarize command: exploratory summary of a raw series.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use climaqc_io::{read_table, to_json_string, write_json};
use climaqc_series::normalize_dates;
use climaqc_summary::summarize;

use crate::cli::SummarizeArgs;
use crate::config::ClimaqcConfig;
use crate::convert;

/// Summarize the configured input and emit JSON.
pub fn run(args: SummarizeArgs) -> Result<()> {
    let _cmd = info_span!("summarize").entered();
    let config = ClimaqcConfig::load(args.config.as_deref())?;

    let input = args
        .input
        .or_else(|| config.io.input.clone())
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    let reader = convert::build_reader_config(&config.io)?;
    let schema = convert::build_schema_config(&config.io);
    let summary_cfg = convert::build_summary_config(&config.summary);

    let table = read_table(&input, &reader)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let series = normalize_dates(&table, &schema)?;
    let summary = summarize(&series, &summary_cfg)?;

    match args.output {
        Some(path) => {
            write_json(&path, &summary)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "summary written");
        }
        None => println!("{}", to_json_string(&summary)?),
    }
    Ok(())
}
