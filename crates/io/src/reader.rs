//! Delimited-text reader configuration and table loading.

use std::path::Path;

use climaqc_series::{DailyRecord, DailySeries, QcFlag, SchemaConfig, Table, normalize_dates, parse_value};
use tracing::{debug, info};

use crate::columns::{IMPUTED_VALUE_COLUMN, IS_OUTLIER_COLUMN, OUTLIER_SCORE_COLUMN, QC_FLAG_COLUMN};
use crate::encoding::TextEncoding;
use crate::error::IoError;
use crate::validate::{ValidationCollector, check_separator};

/// Configuration for reading a delimited-text table.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field separator byte.
    separator: u8,
    /// Character encoding of the file.
    encoding: TextEncoding,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            separator: b',',
            encoding: TextEncoding::default(),
        }
    }
}

impl ReaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field separator, e.g. `b';'` for European exports.
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the character encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn separator(&self) -> u8 {
        self.separator
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
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
}

/// Reads a delimited-text file into a raw [`Table`].
///
/// Header names are trimmed of surrounding whitespace; cell values are kept
/// verbatim.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::Decode`] if the bytes are invalid for the configured encoding,
/// [`IoError::Csv`] on malformed quoting, and [`IoError::Series`] for
/// duplicate headers or ragged rows.
pub fn read_table(path: &Path, config: &ReaderConfig) -> Result<Table, IoError> {
    config.validate()?;
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| IoError::FileSystem {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let text = config.encoding.decode(bytes, path)?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(config.separator)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    let table = Table::new(headers, rows)?;
    info!(
        path = %path.display(),
        encoding = %config.encoding,
        n_rows = table.n_rows(),
        n_columns = table.headers().len(),
        "read table"
    );
    Ok(table)
}

/// Reads a daily series, restoring annotation columns when present.
///
/// Plain inputs yield an unannotated series. Files written by
/// [`write_series_csv`](crate::write_series_csv) carry `is_outlier`,
/// `outlier_score`, `imputed_value` and `qc_flag`; those columns are removed
/// from the pass-through set and replayed onto each record, and the stored
/// `qc_flag` must agree with the flag the replay produces.
///
/// # Errors
///
/// Any error from [`read_table`] or normalization, or
/// [`IoError::Validation`] listing every inconsistent annotation.
pub fn read_series_csv(
    path: &Path,
    reader: &ReaderConfig,
    schema: &SchemaConfig,
) -> Result<DailySeries, IoError> {
    let table = read_table(path, reader)?;
    let series = normalize_dates(&table, schema)?;
    restore_annotations(series)
}

/// Positions of annotation columns within a series' pass-through fields.
#[derive(Debug, Default)]
struct AnnotationIndices {
    is_outlier: Option<usize>,
    score: Option<usize>,
    imputed: Option<usize>,
    flag: Option<usize>,
}

impl AnnotationIndices {
    fn locate(fields: &[String]) -> Self {
        let find = |name: &str| fields.iter().position(|f| f == name);
        Self {
            is_outlier: find(IS_OUTLIER_COLUMN),
            score: find(OUTLIER_SCORE_COLUMN),
            imputed: find(IMPUTED_VALUE_COLUMN),
            flag: find(QC_FLAG_COLUMN),
        }
    }

    fn contains(&self, i: usize) -> bool {
        [self.is_outlier, self.score, self.imputed, self.flag].contains(&Some(i))
    }

    fn any(&self) -> bool {
        self.is_outlier.is_some() || self.score.is_some() || self.imputed.is_some() || self.flag.is_some()
    }
}

fn parse_bool_cell(raw: &str) -> Result<Option<bool>, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" => Ok(Some(true)),
        "false" | "0" => Ok(Some(false)),
        other => Err(format!("'{other}' is not a boolean")),
    }
}

fn restore_annotations(series: DailySeries) -> Result<DailySeries, IoError> {
    let idx = AnnotationIndices::locate(series.extra_fields());
    if !idx.any() {
        return Ok(series);
    }

    let kept: Vec<usize> = (0..series.extra_fields().len())
        .filter(|&i| !idx.contains(i))
        .collect();
    let extra_fields: Vec<String> = kept
        .iter()
        .map(|&i| series.extra_fields()[i].clone())
        .collect();

    let mut c = ValidationCollector::new();
    let cell = |r: &DailyRecord, at: Option<usize>| -> String {
        at.and_then(|i| r.extra().get(i)).cloned().unwrap_or_default()
    };

    let mut records = Vec::with_capacity(series.len());
    for r in series.records() {
        let date = r.date();
        let mut out = DailyRecord::new(date, r.value())
            .with_extra(kept.iter().map(|&i| r.extra()[i].clone()).collect());

        let is_outlier = match parse_bool_cell(&cell(r, idx.is_outlier)) {
            Ok(v) => v,
            Err(e) => {
                c.push(format!("{date}: {IS_OUTLIER_COLUMN} {e}"));
                None
            }
        };
        let score = parse_value(&cell(r, idx.score));
        match (is_outlier, score) {
            (Some(flagged), Some(s)) => out.mark_outlier(flagged, s),
            (Some(_), None) => out.mark_not_evaluated(),
            (None, Some(_)) => c.push(format!(
                "{date}: {OUTLIER_SCORE_COLUMN} present without {IS_OUTLIER_COLUMN}"
            )),
            (None, None) => {}
        }

        if let Some(imputed) = parse_value(&cell(r, idx.imputed))
            && !out.fill_missing(imputed)
        {
            c.push(format!("{date}: {IMPUTED_VALUE_COLUMN} set on an observed value"));
        }

        let raw_flag = cell(r, idx.flag);
        if idx.flag.is_some() && !raw_flag.trim().is_empty() {
            match raw_flag.parse::<QcFlag>() {
                Ok(stored) if stored != out.flag() => c.push(format!(
                    "{date}: {QC_FLAG_COLUMN} is {stored} but annotations imply {}",
                    out.flag()
                )),
                Ok(_) => {}
                Err(e) => c.push(format!("{date}: {e}")),
            }
        }
        records.push(out);
    }
    c.finish()?;

    let restored = records.iter().filter(|r| r.flag() != QcFlag::Ok).count();
    debug!(n_records = records.len(), n_flagged = restored, "restored annotations");
    Ok(DailySeries::new(
        series.date_field(),
        series.value_field(),
        extra_fields,
        records,
    ))
}
