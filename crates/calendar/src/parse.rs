//! Explicit-format and auto-detecting date parser.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CalendarError;

/// Year-first layouts that are never ambiguous.
const YEAR_FIRST_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Day-first numeric layouts (`05/01/2020` = 5 January).
const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Month-first numeric layouts (`05/01/2020` = 1 May).
const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y"];

/// Layouts that spell out the month name.
const NAMED_MONTH_FORMATS: &[&str] = &["%d %b %Y", "%d-%b-%Y", "%b %d %Y", "%B %d, %Y", "%d %B %Y"];

/// Parses date text into [`NaiveDate`].
///
/// With an explicit format the parser is strict: the text must match that
/// strftime layout (a trailing time-of-day is allowed when the format
/// describes one). Without a format the parser auto-detects among ISO,
/// compact `YYYYMMDD`, numeric day/month layouts and named-month layouts.
/// `day_first` only decides the order in which ambiguous numeric layouts are
/// tried; an input that is invalid in the preferred order still parses in the
/// other one.
///
/// # Example
///
/// ```
/// use climaqc_calendar::DateParser;
///
/// let parser = DateParser::new().with_format("%d/%m/%Y");
/// assert_eq!(parser.parse("31/12/1999").unwrap().to_string(), "1999-12-31");
/// assert!(parser.parse("1999-12-31").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateParser {
    format: Option<String>,
    day_first: bool,
}

impl DateParser {
    /// Creates an auto-detecting, month-first parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit strftime-style format, disabling auto-detection.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets or clears the explicit format.
    pub fn with_optional_format(mut self, format: Option<impl Into<String>>) -> Self {
        self.format = format.map(Into::into);
        self
    }

    /// Prefers day-first interpretation for ambiguous numeric dates.
    pub fn with_day_first(mut self, day_first: bool) -> Self {
        self.day_first = day_first;
        self
    }

    /// Returns the explicit format, if any.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    /// Returns whether ambiguous dates are read day-first.
    pub fn day_first(&self) -> bool {
        self.day_first
    }

    /// Parses one date value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::EmptyInput`] for blank text,
    /// [`CalendarError::FormatMismatch`] when an explicit format does not
    /// match, or [`CalendarError::Unparseable`] when auto-detection fails.
    pub fn parse(&self, raw: &str) -> Result<NaiveDate, CalendarError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(CalendarError::EmptyInput);
        }

        match &self.format {
            Some(format) => {
                parse_with_format(text, format).ok_or_else(|| CalendarError::FormatMismatch {
                    input: text.to_string(),
                    format: format.clone(),
                })
            }
            None => self
                .detect(text)
                .or_else(|| strip_time_of_day(text).and_then(|date_part| self.detect(date_part)))
                .ok_or_else(|| CalendarError::Unparseable {
                    input: text.to_string(),
                }),
        }
    }

    /// Tries every known layout in preference order.
    fn detect(&self, text: &str) -> Option<NaiveDate> {
        if let Some(date) = parse_compact(text) {
            return Some(date);
        }

        let (preferred, fallback) = if self.day_first {
            (DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS)
        } else {
            (MONTH_FIRST_FORMATS, DAY_FIRST_FORMATS)
        };

        YEAR_FIRST_FORMATS
            .iter()
            .chain(preferred)
            .chain(fallback)
            .chain(NAMED_MONTH_FORMATS)
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    }
}

/// Parses with an explicit format, accepting date-time layouts too.
fn parse_with_format(text: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, format)
                .ok()
                .map(|dt| dt.date())
        })
}

/// Parses the compact `YYYYMMDD` layout.
fn parse_compact(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = text[0..4].parse().ok()?;
    let month: u32 = text[4..6].parse().ok()?;
    let day: u32 = text[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns the date part of a `date<sep>time` value, where `<sep>` is a
/// space or `T` and the time contains a colon.
fn strip_time_of_day(text: &str) -> Option<&str> {
    let colon = text.find(':')?;
    let sep = text[..colon].rfind([' ', 'T'])?;
    let head = text[..sep].trim();
    (!head.is_empty()).then_some(head)
}
