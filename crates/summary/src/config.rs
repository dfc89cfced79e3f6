//! Summary configuration.

use crate::error::SummaryError;

/// Percentiles reported when none are configured.
pub const DEFAULT_PERCENTILES: [f64; 11] =
    [0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0, 99.0, 100.0];

/// Configuration for [`summarize`](crate::summarize).
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    percentiles: Vec<f64>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            percentiles: DEFAULT_PERCENTILES.to_vec(),
        }
    }
}

impl SummaryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the reported percentiles (0..=100 scale).
    pub fn with_percentiles(mut self, percentiles: Vec<f64>) -> Self {
        self.percentiles = percentiles;
        self
    }

    pub fn percentiles(&self) -> &[f64] {
        &self.percentiles
    }

    /// Checks every percentile lies in `[0, 100]`.
    pub fn validate(&self) -> Result<(), SummaryError> {
        match self
            .percentiles
            .iter()
            .find(|p| !(0.0..=100.0).contains(*p))
        {
            Some(&value) => Err(SummaryError::InvalidPercentile { value }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_percentiles() {
        let c = SummaryConfig::default();
        assert_eq!(c.percentiles().len(), 11);
        assert_eq!(c.percentiles()[5], 50.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        let c = SummaryConfig::new().with_percentiles(vec![50.0, 150.0]);
        assert_eq!(
            c.validate().unwrap_err(),
            SummaryError::InvalidPercentile { value: 150.0 }
        );
    }

    #[test]
    fn rejects_nan() {
        let c = SummaryConfig::new().with_percentiles(vec![f64::NAN]);
        assert!(c.validate().is_err());
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(SummaryConfig::new().with_percentiles(vec![]).validate().is_ok());
    }
}
