//! Run command: full QC pipeline from CSV to enriched CSV.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use climaqc_io::{write_json, write_records_csv, write_series_csv};
use climaqc_pipeline::run_daily_pipeline_csv;

use crate::cli::RunArgs;
use crate::config::ClimaqcConfig;
use crate::convert;

/// Run the pipeline and persist its outputs.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();
    let config = ClimaqcConfig::load(args.config.as_deref())?;

    let input = args
        .input
        .or_else(|| config.io.input.clone())
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    let output = args
        .output
        .or_else(|| config.io.output.clone())
        .unwrap_or_else(|| default_output(&input));

    let reader = convert::build_reader_config(&config.io)?;
    let writer = convert::build_writer_config(&config.io)?;
    let pipeline = convert::build_pipeline_config(&config, args.seed)?;

    info!(path = %input.display(), "running pipeline");
    let out = run_daily_pipeline_csv(&input, &reader, &pipeline)
        .with_context(|| format!("pipeline failed for {}", input.display()))?;

    write_series_csv(&output, &out.series, &writer)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let summary_path = output.with_extension("summary.json");
    write_json(&summary_path, &out.summary)
        .with_context(|| format!("failed to write {}", summary_path.display()))?;

    if let Some(normals) = &out.climatology {
        let path = config
            .climatology
            .as_ref()
            .and_then(|c| c.output.clone())
            .unwrap_or_else(|| output.with_extension("climatology.csv"));
        write_records_csv(&path, normals, &writer)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!(
        output = %output.display(),
        summary = %summary_path.display(),
        n_records = out.series.len(),
        log_transform = out.use_log_transform,
        "run complete"
    );
    Ok(())
}

/// `<dir>/<stem>_qc.csv` next to the input.
fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "series".to_string());
    input.with_file_name(format!("{stem}_qc.csv"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(
            default_output(Path::new("data/station_01.csv")),
            PathBuf::from("data/station_01_qc.csv")
        );
        assert_eq!(
            default_output(Path::new("raw.txt")),
            PathBuf::from("raw_qc.csv")
        );
    }

    #[test]
    fn sidecar_names() {
        let out = PathBuf::from("out/station_qc.csv");
        assert_eq!(
            out.with_extension("summary.json"),
            PathBuf::from("out/station_qc.summary.json")
        );
        assert_eq!(
            out.with_extension("climatology.csv"),
            PathBuf::from("out/station_qc.climatology.csv")
        );
    }

    #[test]
    fn end_to_end_writes_outputs() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let input = dir.path().join("station.csv");
        let mut text = String::from("fecha,valor\n");
        for (i, d) in chrono::NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .iter_days()
            .take(60)
            .enumerate()
        {
            let v = if i % 9 == 4 { String::new() } else { format!("{}", (i % 7) as f64 * 1.5) };
            text.push_str(&format!("{d},{v}\n"));
        }
        std::fs::write(&input, text).expect("write input");

        run(RunArgs {
            config: None,
            input: Some(input.clone()),
            output: None,
            seed: Some(5),
        })
        .unwrap();

        let output = dir.path().join("station_qc.csv");
        assert!(output.exists());
        assert!(dir.path().join("station_qc.summary.json").exists());
        assert!(!dir.path().join("station_qc.climatology.csv").exists());
    }
}
