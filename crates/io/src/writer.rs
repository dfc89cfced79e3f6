//! CSV and JSON writers for pipeline outputs.

use std::path::Path;

use climaqc_series::DailySeries;
use serde::Serialize;
use tracing::info;

use crate::columns::{ANNOTATION_COLUMNS, SERIES_DATE_FORMAT};
use crate::error::IoError;
use crate::validate::{ValidationCollector, check_separator};

/// Configuration for writing delimited-text output.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Field separator byte.
    separator: u8,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self { separator: b',' }
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field separator.
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn separator(&self) -> u8 {
        self.separator
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the separator is not a plain ASCII
    /// byte.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut c = ValidationCollector::new();
        check_separator(self.separator, &mut c);
        c.finish()
    }

    fn csv_writer(&self, path: &Path) -> Result<csv::Writer<std::fs::File>, IoError> {
        self.validate()?;
        create_parent(path)?;
        Ok(csv::WriterBuilder::new()
            .delimiter(self.separator)
            .from_path(path)?)
    }
}

fn create_parent(path: &Path) -> Result<(), IoError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| IoError::FileSystem {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })
        }
        _ => Ok(()),
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Writes an enriched series as CSV.
///
/// Columns are the date, the value, every pass-through column, then
/// `is_outlier`, `outlier_score`, `imputed_value` and `qc_flag`. Dates are
/// written as [`SERIES_DATE_FORMAT`] whatever the input format was. Undefined
/// cells are written empty. Parent directories are created as needed.
///
/// # Errors
///
/// Returns [`IoError::Validation`] for an invalid configuration,
/// [`IoError::FileSystem`] if the output directory cannot be created, or
/// [`IoError::Csv`] if writing fails.
pub fn write_series_csv(path: &Path, series: &DailySeries, config: &WriterConfig) -> Result<(), IoError> {
    let mut wtr = config.csv_writer(path)?;

    let mut header: Vec<&str> = vec![series.date_field(), series.value_field()];
    header.extend(series.extra_fields().iter().map(String::as_str));
    header.extend(ANNOTATION_COLUMNS);
    wtr.write_record(&header)?;

    for r in series.records() {
        let mut row: Vec<String> = Vec::with_capacity(header.len());
        row.push(r.date().format(SERIES_DATE_FORMAT).to_string());
        row.push(fmt_opt(r.value()));
        row.extend(r.extra().iter().cloned());
        row.push(r.is_outlier().map(|b| b.to_string()).unwrap_or_default());
        row.push(fmt_opt(r.outlier_score()));
        row.push(fmt_opt(r.imputed_value()));
        row.push(r.flag().to_string());
        wtr.write_record(&row)?;
    }
    wtr.flush().map_err(|e| IoError::FileSystem {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), n_records = series.len(), "wrote series csv");
    Ok(())
}

/// Writes serializable rows as CSV with a header derived from field names.
///
/// `None` fields are written as empty cells.
///
/// # Errors
///
/// Same as [`write_series_csv`].
pub fn write_records_csv<T: Serialize>(path: &Path, rows: &[T], config: &WriterConfig) -> Result<(), IoError> {
    let mut wtr = config.csv_writer(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| IoError::FileSystem {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), n_rows = rows.len(), "wrote csv");
    Ok(())
}

/// Renders `value` as pretty-printed JSON.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Writes `value` as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns [`IoError::Json`] if serialization fails or
/// [`IoError::FileSystem`] if the file cannot be written.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    let text = to_json_string(value)?;
    create_parent(path)?;
    std::fs::write(path, text + "\n").map_err(|e| IoError::FileSystem {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), "wrote json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        assert_eq!(WriterConfig::default().separator(), b',');
        assert_eq!(WriterConfig::new().with_separator(b';').separator(), b';');
    }

    #[test]
    fn validate_rejects_newline_separator() {
        let err = WriterConfig::new().with_separator(b'\n').validate().unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 1, .. }));
    }

    #[test]
    fn fmt_opt_empty_for_none() {
        assert_eq!(fmt_opt(None), "");
        assert_eq!(fmt_opt(Some(1.5)), "1.5");
        assert_eq!(fmt_opt(Some(2.0)), "2");
    }

    #[test]
    fn json_string_is_pretty() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
        }
        let text = to_json_string(&Point { x: 3 }).unwrap();
        assert_eq!(text, "{\n  \"x\": 3\n}");
    }
}
