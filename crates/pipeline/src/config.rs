//! Pipeline configuration.

use climaqc_climatology::ClimatologyConfig;
use climaqc_impute::ImputeConfig;
use climaqc_io::ANNOTATION_COLUMNS;
use climaqc_outlier::OutlierConfig;
use climaqc_series::SchemaConfig;
use climaqc_summary::SummaryConfig;

use crate::error::PipelineError;

/// Variable label assumed when none is configured.
pub const DEFAULT_VARIABLE_LABEL: &str = "precipitacion_diaria";

/// Substrings of a variable label that switch on the log transform.
const PRECIPITATION_MARKERS: [&str; 2] = ["precip", "precipit"];

/// Whether `label` names a precipitation-like variable.
///
/// Case-insensitive substring match on `"precip"` or `"precipit"`.
pub fn infer_log_transform(label: &str) -> bool {
    let label = label.to_lowercase();
    PRECIPITATION_MARKERS.iter().any(|m| label.contains(m))
}

/// Configuration for [`run_daily_pipeline`](crate::run_daily_pipeline).
///
/// Bundles the per-stage configurations. The log transform used by the
/// outlier stage is decided by [`PipelineConfig::use_log_transform`]; the
/// flag carried by the nested [`OutlierConfig`] is ignored.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    schema: SchemaConfig,
    summary: SummaryConfig,
    outlier: OutlierConfig,
    impute: ImputeConfig,
    climatology: Option<ClimatologyConfig>,
    variable_label: String,
    log_transform: Option<bool>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schema: SchemaConfig::default(),
            summary: SummaryConfig::default(),
            outlier: OutlierConfig::default(),
            impute: ImputeConfig::default(),
            climatology: None,
            variable_label: DEFAULT_VARIABLE_LABEL.to_string(),
            log_transform: None,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, schema: SchemaConfig) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_summary(mut self, summary: SummaryConfig) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_outlier(mut self, outlier: OutlierConfig) -> Self {
        self.outlier = outlier;
        self
    }

    pub fn with_impute(mut self, impute: ImputeConfig) -> Self {
        self.impute = impute;
        self
    }

    /// Also computes monthly normals of the final series.
    pub fn with_climatology(mut self, climatology: Option<ClimatologyConfig>) -> Self {
        self.climatology = climatology;
        self
    }

    /// Label used by the log-transform heuristic.
    pub fn with_variable_label(mut self, label: impl Into<String>) -> Self {
        self.variable_label = label.into();
        self
    }

    /// Forces the log transform on or off; `None` restores the heuristic.
    pub fn with_log_transform(mut self, log_transform: Option<bool>) -> Self {
        self.log_transform = log_transform;
        self
    }

    /// Seeds both stochastic stages.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.outlier = self.outlier.with_seed(seed);
        self.impute = self.impute.with_seed(seed);
        self
    }

    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    pub fn summary(&self) -> &SummaryConfig {
        &self.summary
    }

    pub fn outlier(&self) -> &OutlierConfig {
        &self.outlier
    }

    pub fn impute(&self) -> &ImputeConfig {
        &self.impute
    }

    pub fn climatology(&self) -> Option<&ClimatologyConfig> {
        self.climatology.as_ref()
    }

    pub fn variable_label(&self) -> &str {
        &self.variable_label
    }

    pub fn log_transform(&self) -> Option<bool> {
        self.log_transform
    }

    /// Explicit override if set, otherwise [`infer_log_transform`] on the
    /// variable label.
    pub fn use_log_transform(&self) -> bool {
        self.log_transform
            .unwrap_or_else(|| infer_log_transform(&self.variable_label))
    }

    /// Outlier configuration with the resolved log-transform choice.
    pub(crate) fn resolved_outlier(&self) -> OutlierConfig {
        self.outlier.clone().with_log_transform(self.use_log_transform())
    }

    /// Validates every stage configuration.
    ///
    /// # Errors
    ///
    /// The first failing stage's error, or
    /// [`PipelineError::InvalidConfig`] if the date or value column is
    /// named like an output annotation column.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.schema.validate()?;
        for (role, name) in [
            ("date", self.schema.date_field()),
            ("value", self.schema.value_field()),
        ] {
            if ANNOTATION_COLUMNS.contains(&name) {
                return Err(PipelineError::InvalidConfig {
                    reason: format!("{role} column '{name}' is reserved for output"),
                });
            }
        }
        self.summary.validate()?;
        self.outlier.validate()?;
        self.impute.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_matches_precipitation_labels() {
        assert!(infer_log_transform("precipitacion_diaria"));
        assert!(infer_log_transform("Daily_PRECIPITATION"));
        assert!(infer_log_transform("precip"));
        assert!(!infer_log_transform("temperatura_max"));
        assert!(!infer_log_transform(""));
    }

    #[test]
    fn default_label_enables_log_transform() {
        let c = PipelineConfig::default();
        assert_eq!(c.variable_label(), DEFAULT_VARIABLE_LABEL);
        assert_eq!(c.log_transform(), None);
        assert!(c.use_log_transform());
        assert!(c.climatology().is_none());
    }

    #[test]
    fn override_wins_over_heuristic() {
        let c = PipelineConfig::new()
            .with_variable_label("tmax")
            .with_log_transform(Some(true));
        assert!(c.use_log_transform());

        let c = PipelineConfig::new().with_log_transform(Some(false));
        assert!(!c.use_log_transform());
        assert!(!c.resolved_outlier().use_log_transform());
    }

    #[test]
    fn seed_reaches_both_stages() {
        let c = PipelineConfig::new().with_seed(7);
        assert_eq!(c.outlier().seed(), 7);
        assert_eq!(c.impute().seed(), 7);
    }

    #[test]
    fn reserved_value_column_rejected() {
        let c = PipelineConfig::new()
            .with_schema(SchemaConfig::new().with_value_field("qc_flag"));
        assert!(matches!(
            c.validate(),
            Err(PipelineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn stage_validation_propagates() {
        let c = PipelineConfig::new()
            .with_outlier(OutlierConfig::new().with_contamination(0.6));
        assert!(matches!(c.validate(), Err(PipelineError::Outlier(_))));
        assert!(PipelineConfig::default().validate().is_ok());
    }
}
