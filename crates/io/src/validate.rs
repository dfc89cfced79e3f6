//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`].

use crate::error::IoError;

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` if nothing was recorded, otherwise every message joined
    /// with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Checks that a field separator is a single ASCII byte other than a
/// quote or line break.
pub(crate) fn check_separator(separator: u8, c: &mut ValidationCollector) {
    if !separator.is_ascii() || matches!(separator, b'"' | b'\n' | b'\r') {
        c.push(format!(
            "separator {:?} must be an ASCII character other than a quote or line break",
            separator as char
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_empty_is_ok() {
        let c = ValidationCollector::new();
        assert_eq!(c.len(), 0);
        assert!(c.finish().is_ok());
    }

    #[test]
    fn collector_non_empty_is_err_with_correct_count() {
        let mut c = ValidationCollector::new();
        c.push("error one");
        c.push("error two");
        assert_eq!(c.len(), 2);

        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert_eq!(details, "error one; error two");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn common_separators_accepted() {
        for sep in [b',', b';', b'\t', b'|'] {
            let mut c = ValidationCollector::new();
            check_separator(sep, &mut c);
            assert_eq!(c.len(), 0, "separator {sep}");
        }
    }

    #[test]
    fn quote_and_newline_rejected() {
        let mut c = ValidationCollector::new();
        check_separator(b'"', &mut c);
        check_separator(b'\n', &mut c);
        check_separator(0xE9, &mut c);
        assert_eq!(c.len(), 3);
    }
}
