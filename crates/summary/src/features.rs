//! Calendar side-features and quarterly grouping.

use climaqc_calendar::CalendarFeatures;
use climaqc_series::DailySeries;

use crate::error::SummaryError;

/// Calendar features for every record, in record order.
///
/// Convenience API for callers that want the per-record calendar table of
/// a series; the QC stages build their own feature matrices from
/// [`CalendarFeatures::from_date`]. The date ordering is re-checked so the
/// function is safe to call on a series that did not come out of
/// normalization.
///
/// # Errors
///
/// Returns [`SummaryError::Series`] if dates are not strictly increasing.
pub fn derive_calendar_features(series: &DailySeries) -> Result<Vec<CalendarFeatures>, SummaryError> {
    series.check_order()?;
    Ok(series.dates().map(CalendarFeatures::from_date).collect())
}

/// Non-missing values grouped by calendar quarter, `[Q1, Q2, Q3, Q4]`.
pub fn quarterly_values(series: &DailySeries) -> [Vec<f64>; 4] {
    let mut quarters: [Vec<f64>; 4] = Default::default();
    for r in series.records() {
        if let Some(v) = r.value() {
            let q = CalendarFeatures::from_date(r.date()).quarter() as usize;
            quarters[q - 1].push(v);
        }
    }
    quarters
}

#[cfg(test)]
mod tests {
    use super::*;
    use climaqc_calendar::NaiveDate;
    use climaqc_series::{DailyRecord, SeriesError};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(points: &[(NaiveDate, Option<f64>)]) -> DailySeries {
        let records = points.iter().map(|&(d, v)| DailyRecord::new(d, v)).collect();
        DailySeries::new("fecha", "valor", Vec::new(), records)
    }

    #[test]
    fn features_align_with_records() {
        let s = series(&[(ymd(2024, 1, 1), None), (ymd(2024, 12, 31), Some(1.0))]);
        let f = derive_calendar_features(&s).unwrap();
        assert_eq!(f.len(), 2);
        assert_eq!(f[0].day_of_week(), 0);
        assert_eq!(f[1].day_of_year(), 366);
        assert_eq!(f[1].month(), 12);
    }

    #[test]
    fn rejects_unordered_series() {
        let s = series(&[(ymd(2024, 1, 2), None), (ymd(2024, 1, 1), None)]);
        assert_eq!(
            derive_calendar_features(&s).unwrap_err(),
            SummaryError::Series(SeriesError::UnorderedDates { position: 1 })
        );
    }

    #[test]
    fn groups_by_quarter() {
        let s = series(&[
            (ymd(2020, 1, 15), Some(1.0)),
            (ymd(2020, 3, 31), Some(2.0)),
            (ymd(2020, 4, 1), None),
            (ymd(2020, 7, 1), Some(3.0)),
            (ymd(2020, 12, 31), Some(4.0)),
        ]);
        let q = quarterly_values(&s);
        assert_eq!(q[0], vec![1.0, 2.0]);
        assert!(q[1].is_empty());
        assert_eq!(q[2], vec![3.0]);
        assert_eq!(q[3], vec![4.0]);
    }
}
