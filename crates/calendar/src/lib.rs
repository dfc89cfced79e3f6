//! # climaqc-calendar
//!
//! Gregorian date handling for daily climate series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["raw text"] -->|"DateParser::parse()"| B["NaiveDate"]
//!     B -->|"CalendarFeatures::from_date()"| C["year, month, day, doy, dow"]
//!     C -->|".quarter()"| D["1..=4"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use climaqc_calendar::{CalendarFeatures, DateParser};
//!
//! // Auto-detection, preferring day-first for ambiguous slashed dates
//! let parser = DateParser::new().with_day_first(true);
//! let date = parser.parse("05/01/2020").unwrap();
//! assert_eq!(date.to_string(), "2020-01-05");
//!
//! let features = CalendarFeatures::from_date(date);
//! assert_eq!(features.day_of_year(), 5);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `parse` | Explicit-format and auto-detecting date parser |
//! | `features` | Calendar side-information derived from a date |
//! | `error` | Error types |

mod error;
mod features;
mod parse;

pub use chrono::{Datelike, NaiveDate};
pub use error::CalendarError;
pub use features::CalendarFeatures;
pub use parse::DateParser;
