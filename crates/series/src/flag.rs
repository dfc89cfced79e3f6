//! QC flag enumeration and the flag transition function.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeriesError;

/// Data-quality status of one record.
///
/// Variants are ordered by severity, so `Ok < Suspect < Corrected`.
/// A flag only ever moves up this order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum QcFlag {
    /// Observed value accepted as-is.
    #[default]
    Ok,
    /// Observed value judged anomalous.
    Suspect,
    /// Missing value filled by imputation.
    Corrected,
}

/// Event that may raise a record's flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagEvent {
    /// The outlier flagger classified the observed value as anomalous.
    OutlierDetected,
    /// The imputation engine filled a missing value.
    ValueImputed,
}

impl FlagEvent {
    /// Flag that this event asserts.
    pub fn target(self) -> QcFlag {
        match self {
            Self::OutlierDetected => QcFlag::Suspect,
            Self::ValueImputed => QcFlag::Corrected,
        }
    }
}

impl QcFlag {
    /// All flags in severity order.
    pub const ALL: [QcFlag; 3] = [QcFlag::Ok, QcFlag::Suspect, QcFlag::Corrected];

    /// Returns the flag after `event`.
    ///
    /// The result is the more severe of the current flag and the event's
    /// target, which makes the transition monotone and order-independent.
    ///
    /// ```
    /// use climaqc_series::{FlagEvent, QcFlag};
    ///
    /// let flag = QcFlag::Ok.apply(FlagEvent::ValueImputed);
    /// assert_eq!(flag.apply(FlagEvent::OutlierDetected), QcFlag::Corrected);
    /// ```
    #[must_use]
    pub fn apply(self, event: FlagEvent) -> QcFlag {
        self.max(event.target())
    }

    /// Canonical upper-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Suspect => "SUSPECT",
            Self::Corrected => "CORRECTED",
        }
    }
}

impl fmt::Display for QcFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QcFlag {
    type Err = SeriesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OK" => Ok(Self::Ok),
            "SUSPECT" => Ok(Self::Suspect),
            "CORRECTED" => Ok(Self::Corrected),
            _ => Err(SeriesError::UnknownFlag {
                label: s.to_string(),
            }),
        }
    }
}
