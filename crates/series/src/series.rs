//! Ordered collection of daily records.

use climaqc_calendar::NaiveDate;

use crate::error::SeriesError;
use crate::record::DailyRecord;

/// A single-station daily series.
///
/// Produced by [`normalize_dates`](crate::normalize_dates), which guarantees
/// strictly increasing dates. Later stages only mutate records in place
/// through [`records_mut`](Self::records_mut), so records are never added,
/// removed or reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    date_field: String,
    value_field: String,
    extra_fields: Vec<String>,
    records: Vec<DailyRecord>,
}

impl DailySeries {
    /// Creates a series from already-normalized records.
    ///
    /// Ordering is not checked here; use [`check_order`](Self::check_order)
    /// when the records come from elsewhere.
    pub fn new(
        date_field: impl Into<String>,
        value_field: impl Into<String>,
        extra_fields: Vec<String>,
        records: Vec<DailyRecord>,
    ) -> Self {
        Self {
            date_field: date_field.into(),
            value_field: value_field.into(),
            extra_fields,
            records,
        }
    }

    /// Name of the source date column.
    pub fn date_field(&self) -> &str {
        &self.date_field
    }

    /// Name of the source value column.
    pub fn value_field(&self) -> &str {
        &self.value_field
    }

    /// Names of the pass-through columns, aligned with each record's extra cells.
    pub fn extra_fields(&self) -> &[String] {
        &self.extra_fields
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [DailyRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.records.iter().map(DailyRecord::date)
    }

    /// Observed values in record order, `None` where missing.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.records.iter().map(DailyRecord::value).collect()
    }

    /// Observed (non-missing) values only.
    pub fn observed(&self) -> Vec<f64> {
        self.records.iter().filter_map(DailyRecord::value).collect()
    }

    pub fn n_missing(&self) -> usize {
        self.records.iter().filter(|r| r.value().is_none()).count()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(DailyRecord::date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(DailyRecord::date)
    }

    /// Verifies that dates are strictly increasing.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::UnorderedDates`] at the first violation.
    pub fn check_order(&self) -> Result<(), SeriesError> {
        match self
            .records
            .windows(2)
            .position(|w| w[0].date() >= w[1].date())
        {
            Some(i) => Err(SeriesError::UnorderedDates { position: i + 1 }),
            None => Ok(()),
        }
    }
}
