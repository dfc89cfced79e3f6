//! Climatology command: monthly normals of a processed series.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use climaqc_climatology::climatology;
use climaqc_io::{read_series_csv, write_records_csv};

use crate::cli::ClimatologyArgs;
use crate::config::{ClimaqcConfig, ClimatologyToml};
use crate::convert;

/// Compute monthly normals from an enriched CSV.
///
/// Gap-filled values are used where the original value is missing.
pub fn run(args: ClimatologyArgs) -> Result<()> {
    let _cmd = info_span!("climatology").entered();
    let config = ClimaqcConfig::load(args.config.as_deref())?;

    let reader = convert::build_reader_config(&config.io)?;
    let writer = convert::build_writer_config(&config.io)?;
    let schema = convert::build_processed_schema_config(&config.io);

    let mut clim_toml = config.climatology.unwrap_or_else(ClimatologyToml::default);
    if let Some(aggregation) = args.aggregation {
        clim_toml.aggregation = aggregation;
    }
    let clim_cfg = convert::build_climatology_config(&clim_toml)?;

    let series = read_series_csv(&args.input, &reader, &schema)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let normals = climatology(&series, &clim_cfg)?;

    let output = args
        .output
        .or(clim_toml.output)
        .unwrap_or_else(|| args.input.with_extension("climatology.csv"));
    write_records_csv(&output, &normals, &writer)
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        path = %output.display(),
        aggregation = %clim_cfg.aggregation(),
        "climatology written"
    );
    Ok(())
}
