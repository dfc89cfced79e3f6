//! One annotated day of a daily series.

use climaqc_calendar::NaiveDate;

use crate::flag::{FlagEvent, QcFlag};

/// A single day with its observation and QC annotations.
///
/// The mutators keep the annotations consistent with the observation:
/// only observed values receive an outlier score, and only missing values
/// can be filled. An observed value is never overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    date: NaiveDate,
    value: Option<f64>,
    flag: QcFlag,
    is_outlier: Option<bool>,
    outlier_score: Option<f64>,
    imputed_value: Option<f64>,
    extra: Vec<String>,
}

impl DailyRecord {
    /// Creates an unannotated record with flag `OK`.
    ///
    /// Non-finite values are stored as missing.
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self {
            date,
            value: value.filter(|v| v.is_finite()),
            flag: QcFlag::Ok,
            is_outlier: None,
            outlier_score: None,
            imputed_value: None,
            extra: Vec::new(),
        }
    }

    /// Attaches pass-through cells from columns other than date and value.
    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Observed value, `None` when missing.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn flag(&self) -> QcFlag {
        self.flag
    }

    /// `None` until the outlier flagger has run.
    pub fn is_outlier(&self) -> Option<bool> {
        self.is_outlier
    }

    /// Detector decision value; lower is more anomalous.
    pub fn outlier_score(&self) -> Option<f64> {
        self.outlier_score
    }

    pub fn imputed_value(&self) -> Option<f64> {
        self.imputed_value
    }

    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    /// Observed value if present, else the imputed one.
    pub fn filled_value(&self) -> Option<f64> {
        self.value.or(self.imputed_value)
    }

    /// Records that the outlier flagger ran without scoring this record.
    pub fn mark_not_evaluated(&mut self) {
        self.is_outlier = Some(false);
        self.outlier_score = None;
    }

    /// Stores an outlier determination for an observed value.
    ///
    /// Records without an observed value are marked not evaluated instead,
    /// and their flag is left alone.
    pub fn mark_outlier(&mut self, is_outlier: bool, score: f64) {
        if self.value.is_none() {
            self.mark_not_evaluated();
            return;
        }
        self.is_outlier = Some(is_outlier);
        self.outlier_score = Some(score);
        if is_outlier {
            self.flag = self.flag.apply(FlagEvent::OutlierDetected);
        }
    }

    /// Fills a missing value and marks the record `CORRECTED`.
    ///
    /// Returns `false`, leaving the record unchanged, when the value was
    /// observed or `imputed` is not finite.
    pub fn fill_missing(&mut self, imputed: f64) -> bool {
        if self.value.is_some() || !imputed.is_finite() {
            return false;
        }
        self.imputed_value = Some(imputed);
        self.flag = self.flag.apply(FlagEvent::ValueImputed);
        true
    }
}
