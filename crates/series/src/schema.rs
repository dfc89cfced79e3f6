//! Schema validation and date normalization.
//!
//! Dates are all-or-nothing: a single unparseable value fails the call.
//! Values are lenient: anything that is not a finite number becomes missing.

use climaqc_calendar::{DateParser, NaiveDate};
use tracing::{debug, info};

use crate::error::SeriesError;
use crate::record::DailyRecord;
use crate::series::DailySeries;
use crate::table::Table;

/// Default name of the date column.
pub const DEFAULT_DATE_FIELD: &str = "fecha";

/// Default name of the value column.
pub const DEFAULT_VALUE_FIELD: &str = "valor";

/// Column names and date-parsing options for normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaConfig {
    date_field: String,
    value_field: String,
    date_format: Option<String>,
    day_first: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            date_field: DEFAULT_DATE_FIELD.to_string(),
            value_field: DEFAULT_VALUE_FIELD.to_string(),
            date_format: None,
            day_first: false,
        }
    }
}

impl SchemaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_field(mut self, name: impl Into<String>) -> Self {
        self.date_field = name.into();
        self
    }

    pub fn with_value_field(mut self, name: impl Into<String>) -> Self {
        self.value_field = name.into();
        self
    }

    /// Sets an explicit strftime format; `None` auto-detects.
    pub fn with_date_format(mut self, format: Option<String>) -> Self {
        self.date_format = format;
        self
    }

    pub fn with_day_first(mut self, day_first: bool) -> Self {
        self.day_first = day_first;
        self
    }

    pub fn date_field(&self) -> &str {
        &self.date_field
    }

    pub fn value_field(&self) -> &str {
        &self.value_field
    }

    pub fn date_format(&self) -> Option<&str> {
        self.date_format.as_deref()
    }

    pub fn day_first(&self) -> bool {
        self.day_first
    }

    /// Builds the date parser described by this configuration.
    pub fn date_parser(&self) -> DateParser {
        DateParser::new()
            .with_optional_format(self.date_format.clone())
            .with_day_first(self.day_first)
    }

    /// Checks that both column names are non-empty and distinct.
    pub fn validate(&self) -> Result<(), SeriesError> {
        if self.date_field.trim().is_empty() || self.value_field.trim().is_empty() {
            return Err(SeriesError::InvalidConfig {
                reason: "date and value column names must not be empty".to_string(),
            });
        }
        if self.date_field == self.value_field {
            return Err(SeriesError::InvalidConfig {
                reason: format!(
                    "date and value columns must differ (both are '{}')",
                    self.date_field
                ),
            });
        }
        Ok(())
    }
}

/// Positions of the two required columns in a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub date: usize,
    pub value: usize,
}

/// Checks that `date_field` and `value_field` are present.
///
/// # Errors
///
/// Returns [`SeriesError::MissingColumns`] naming every absent column.
pub fn validate_schema(
    table: &Table,
    date_field: &str,
    value_field: &str,
) -> Result<ColumnIndices, SeriesError> {
    let date = table.column_index(date_field);
    let value = table.column_index(value_field);
    match (date, value) {
        (Some(date), Some(value)) => Ok(ColumnIndices { date, value }),
        _ => {
            let missing = [(date, date_field), (value, value_field)]
                .into_iter()
                .filter(|(idx, _)| idx.is_none())
                .map(|(_, name)| name.to_string())
                .collect();
            Err(SeriesError::MissingColumns {
                missing,
                available: table.headers().to_vec(),
            })
        }
    }
}

/// Coerces a raw cell to a finite number, `None` otherwise.
///
/// ```
/// use climaqc_series::parse_value;
///
/// assert_eq!(parse_value(" 2.5 "), Some(2.5));
/// assert_eq!(parse_value("n/a"), None);
/// assert_eq!(parse_value("NaN"), None);
/// ```
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validates, parses and orders a raw table into a [`DailySeries`].
///
/// Steps, in order:
/// 1. both configured columns must exist;
/// 2. every date cell must parse, otherwise the call fails with the number
///    of bad cells;
/// 3. value cells are coerced with [`parse_value`];
/// 4. records are stably sorted by date and duplicate dates collapse to the
///    last occurrence in input order.
///
/// Columns other than date and value are carried through on each record.
#[tracing::instrument(skip(table, config), fields(n_rows = table.n_rows()))]
pub fn normalize_dates(table: &Table, config: &SchemaConfig) -> Result<DailySeries, SeriesError> {
    config.validate()?;
    let cols = validate_schema(table, config.date_field(), config.value_field())?;
    let parser = config.date_parser();

    let mut dates: Vec<NaiveDate> = Vec::with_capacity(table.n_rows());
    let mut bad_count = 0usize;
    let mut first_bad: Option<&str> = None;
    for row in table.rows() {
        let raw = row[cols.date].as_str();
        match parser.parse(raw) {
            Ok(d) => dates.push(d),
            Err(_) => {
                bad_count += 1;
                first_bad.get_or_insert(raw);
            }
        }
    }
    if bad_count > 0 {
        return Err(SeriesError::UnparseableDates {
            column: config.date_field().to_string(),
            count: bad_count,
            first_bad: first_bad.unwrap_or_default().to_string(),
        });
    }

    let extra_idx: Vec<usize> = (0..table.headers().len())
        .filter(|&i| i != cols.date && i != cols.value)
        .collect();
    let extra_fields: Vec<String> = extra_idx
        .iter()
        .map(|&i| table.headers()[i].clone())
        .collect();

    let mut n_coerced = 0usize;
    let mut records: Vec<DailyRecord> = table
        .rows()
        .iter()
        .zip(dates)
        .map(|(row, date)| {
            let raw = row[cols.value].as_str();
            let value = parse_value(raw);
            if value.is_none() && !raw.trim().is_empty() {
                n_coerced += 1;
            }
            let extra = extra_idx.iter().map(|&i| row[i].clone()).collect();
            DailyRecord::new(date, value).with_extra(extra)
        })
        .collect();

    let n_input = records.len();
    records.sort_by_key(DailyRecord::date);
    // Stable sort keeps input order among equal dates; reversing puts the
    // last occurrence first so dedup retains it.
    records.reverse();
    records.dedup_by_key(|r| r.date());
    records.reverse();
    let n_duplicates = n_input - records.len();

    if n_coerced > 0 {
        debug!(n_coerced, "non-numeric values treated as missing");
    }
    info!(
        n_records = records.len(),
        n_duplicates,
        n_missing = records.iter().filter(|r| r.value().is_none()).count(),
        "normalized daily series"
    );

    Ok(DailySeries::new(
        config.date_field(),
        config.value_field(),
        extra_fields,
        records,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::QcFlag;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_config() {
        let c = SchemaConfig::default();
        assert_eq!(c.date_field(), "fecha");
        assert_eq!(c.value_field(), "valor");
        assert_eq!(c.date_format(), None);
        assert!(!c.day_first());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn config_rejects_identical_columns() {
        let c = SchemaConfig::new().with_date_field("x").with_value_field("x");
        assert!(matches!(c.validate(), Err(SeriesError::InvalidConfig { .. })));
    }

    #[test]
    fn config_rejects_empty_column_name() {
        let c = SchemaConfig::new().with_value_field("  ");
        assert!(matches!(c.validate(), Err(SeriesError::InvalidConfig { .. })));
    }

    #[test]
    fn validate_schema_finds_indices() {
        let t = Table::from_strs(&["station", "valor", "fecha"], &[]).unwrap();
        let idx = validate_schema(&t, "fecha", "valor").unwrap();
        assert_eq!(idx, ColumnIndices { date: 2, value: 1 });
    }

    #[test]
    fn validate_schema_names_all_missing_columns() {
        let t = Table::from_strs(&["date", "value"], &[]).unwrap();
        let err = validate_schema(&t, "fecha", "valor").unwrap_err();
        assert_eq!(
            err,
            SeriesError::MissingColumns {
                missing: vec!["fecha".to_string(), "valor".to_string()],
                available: vec!["date".to_string(), "value".to_string()],
            }
        );
    }

    #[test]
    fn validate_schema_names_single_missing_column() {
        let t = Table::from_strs(&["fecha", "value"], &[]).unwrap();
        let err = validate_schema(&t, "fecha", "valor").unwrap_err();
        assert!(matches!(err, SeriesError::MissingColumns { missing, .. } if missing == ["valor"]));
    }

    #[test]
    fn parse_value_cases() {
        assert_eq!(parse_value("1.5"), Some(1.5));
        assert_eq!(parse_value("-3"), Some(-3.0));
        assert_eq!(parse_value("1e2"), Some(100.0));
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("   "), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("inf"), None);
    }

    #[test]
    fn normalize_sorts_and_coerces() {
        let t = Table::from_strs(
            &["fecha", "valor"],
            &[
                &["2020-01-03", "3"],
                &["2020-01-01", "x"],
                &["2020-01-02", ""],
            ],
        )
        .unwrap();
        let s = normalize_dates(&t, &SchemaConfig::default()).unwrap();
        let dates: Vec<NaiveDate> = s.dates().collect();
        assert_eq!(dates, vec![ymd(2020, 1, 1), ymd(2020, 1, 2), ymd(2020, 1, 3)]);
        assert_eq!(s.values(), vec![None, None, Some(3.0)]);
        assert!(s.records().iter().all(|r| r.flag() == QcFlag::Ok));
        assert!(s.records().iter().all(|r| r.is_outlier().is_none()));
    }

    #[test]
    fn normalize_keeps_last_duplicate() {
        let t = Table::from_strs(
            &["fecha", "valor"],
            &[
                &["2020-01-02", "1"],
                &["2020-01-01", "5"],
                &["2020-01-02", "2"],
                &["2020-01-02", "3"],
            ],
        )
        .unwrap();
        let s = normalize_dates(&t, &SchemaConfig::default()).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.values(), vec![Some(5.0), Some(3.0)]);
        assert!(s.check_order().is_ok());
    }

    #[test]
    fn normalize_fails_on_any_bad_date() {
        let t = Table::from_strs(
            &["fecha", "valor"],
            &[
                &["2020-01-01", "1"],
                &["not a date", "2"],
                &["2020-13-45", "3"],
            ],
        )
        .unwrap();
        let err = normalize_dates(&t, &SchemaConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SeriesError::UnparseableDates {
                column: "fecha".to_string(),
                count: 2,
                first_bad: "not a date".to_string(),
            }
        );
    }

    #[test]
    fn normalize_with_explicit_format_and_custom_columns() {
        let t = Table::from_strs(
            &["day", "tmax"],
            &[&["02/01/2020", "10.5"], &["01/01/2020", "9.0"]],
        )
        .unwrap();
        let config = SchemaConfig::new()
            .with_date_field("day")
            .with_value_field("tmax")
            .with_date_format(Some("%d/%m/%Y".to_string()));
        let s = normalize_dates(&t, &config).unwrap();
        assert_eq!(s.first_date(), Some(ymd(2020, 1, 1)));
        assert_eq!(s.values(), vec![Some(9.0), Some(10.5)]);
        assert_eq!(s.date_field(), "day");
    }

    #[test]
    fn normalize_passes_extra_columns_through() {
        let t = Table::from_strs(
            &["station", "fecha", "valor", "source"],
            &[&["S1", "2020-01-02", "1", "a"], &["S1", "2020-01-01", "2", "b"]],
        )
        .unwrap();
        let s = normalize_dates(&t, &SchemaConfig::default()).unwrap();
        assert_eq!(s.extra_fields(), ["station", "source"]);
        assert_eq!(s.records()[0].extra(), ["S1", "b"]);
        assert_eq!(s.records()[1].extra(), ["S1", "a"]);
    }

    #[test]
    fn normalize_empty_table() {
        let t = Table::from_strs(&["fecha", "valor"], &[]).unwrap();
        let s = normalize_dates(&t, &SchemaConfig::default()).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn normalize_missing_column_fails_before_parsing() {
        let t = Table::from_strs(&["fecha"], &[&["garbage"]]).unwrap();
        let err = normalize_dates(&t, &SchemaConfig::default()).unwrap_err();
        assert!(matches!(err, SeriesError::MissingColumns { .. }));
    }
}
