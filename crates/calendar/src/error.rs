//! Error types for the climaqc-calendar crate.

/// Error type for all fallible operations in the climaqc-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when the input is empty or whitespace only.
    #[error("empty date value")]
    EmptyInput,

    /// Returned when the input matches no accepted date layout.
    #[error("unparseable date: {input:?}")]
    Unparseable {
        /// The raw text that could not be parsed.
        input: String,
    },

    /// Returned when the input does not match an explicitly requested format.
    #[error("date {input:?} does not match format {format:?}")]
    FormatMismatch {
        /// The raw text that could not be parsed.
        input: String,
        /// The strftime-style format that was requested.
        format: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_empty_input() {
        assert_eq!(CalendarError::EmptyInput.to_string(), "empty date value");
    }

    #[test]
    fn error_unparseable() {
        let err = CalendarError::Unparseable {
            input: "not a date".to_string(),
        };
        assert_eq!(err.to_string(), "unparseable date: \"not a date\"");
    }

    #[test]
    fn error_format_mismatch() {
        let err = CalendarError::FormatMismatch {
            input: "2020-01-05".to_string(),
            format: "%d/%m/%Y".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "date \"2020-01-05\" does not match format \"%d/%m/%Y\""
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
