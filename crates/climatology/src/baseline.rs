//! Baseline window and aggregation mode.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use climaqc_calendar::{Datelike, NaiveDate};
use climaqc_series::{DailyRecord, DailySeries};

use crate::error::ClimatologyError;

/// Minimum number of distinct calendar years in a baseline.
pub const MIN_BASELINE_YEARS: usize = 30;

/// How daily values are reduced to one number per calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Aggregation {
    /// Mean of all baseline daily values in the month.
    #[default]
    Mean,
    /// Mean over years of the per-(year, month) sums. A (year, month) with
    /// no values contributes no sum rather than a zero.
    Sum,
}

impl Aggregation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = ClimatologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            _ => Err(ClimatologyError::UnknownAggregation {
                name: s.to_string(),
            }),
        }
    }
}

/// Inclusive date window used as the climatological reference period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    start: NaiveDate,
    end: NaiveDate,
}

impl Default for Baseline {
    /// 1991-01-01 to 2020-12-31.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(1991, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2020, 12, 31).unwrap_or(NaiveDate::MAX),
        }
    }
}

impl Baseline {
    /// Creates a window, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ClimatologyError> {
        if start > end {
            return Err(ClimatologyError::InvalidBaselineWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// Records of `series` inside the window.
    pub fn select<'a>(&self, series: &'a DailySeries) -> impl Iterator<Item = &'a DailyRecord> + 'a {
        let window = *self;
        series.records().iter().filter(move |r| window.contains(r.date()))
    }

    /// Verifies the window holds records from at least
    /// [`MIN_BASELINE_YEARS`] distinct years and returns that count.
    ///
    /// # Errors
    ///
    /// [`ClimatologyError::EmptyBaseline`] if no record falls inside,
    /// [`ClimatologyError::InsufficientBaseline`] if too few years do.
    pub fn check(&self, series: &DailySeries) -> Result<usize, ClimatologyError> {
        let years: BTreeSet<i32> = self.select(series).map(|r| r.date().year()).collect();
        if years.is_empty() {
            return Err(ClimatologyError::EmptyBaseline {
                start: self.start,
                end: self.end,
            });
        }
        if years.len() < MIN_BASELINE_YEARS {
            return Err(ClimatologyError::InsufficientBaseline {
                years: years.len(),
                required: MIN_BASELINE_YEARS,
            });
        }
        Ok(years.len())
    }
}
