#![forbid(unsafe_code)]

//! Harness error type.

use std::fmt;

use cactat_core::FormError;
use cactat_page::{AvailabilityError, PageError};

/// Errors raised while driving the form or running a scenario.
#[derive(Debug)]
pub enum HarnessError {
    /// A form operation addressed something that does not exist.
    Form(FormError),
    /// A page operation addressed something that does not exist.
    Page(PageError),
    /// The remote availability contract failed.
    Availability(AvailabilityError),
    /// The selector string could not be parsed or matches nothing.
    UnknownSelector(String),
    /// The command does not apply to what the selector matched.
    UnsupportedCommand { command: &'static str, selector: String },
    /// No fixture file or alias with this name.
    UnknownFixture(String),
    /// I/O error while reading a fixture or writing the run log.
    Io(std::io::Error),
    /// A scenario's expectation did not hold.
    AssertionFailed { scenario: String, detail: String },
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Form(e) => write!(f, "form error: {e}"),
            HarnessError::Page(e) => write!(f, "page error: {e}"),
            HarnessError::Availability(e) => write!(f, "availability check failed: {e}"),
            HarnessError::UnknownSelector(s) => write!(f, "selector matches nothing: {s}"),
            HarnessError::UnsupportedCommand { command, selector } => {
                write!(f, "cannot {command} {selector}")
            }
            HarnessError::UnknownFixture(name) => write!(f, "unknown fixture: {name}"),
            HarnessError::Io(e) => write!(f, "I/O error: {e}"),
            HarnessError::AssertionFailed { scenario, detail } => {
                write!(f, "{scenario}: {detail}")
            }
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Form(e) => Some(e),
            HarnessError::Page(e) => Some(e),
            HarnessError::Availability(e) => Some(e),
            HarnessError::Io(e) => Some(e),
            HarnessError::UnknownSelector(_)
            | HarnessError::UnsupportedCommand { .. }
            | HarnessError::UnknownFixture(_)
            | HarnessError::AssertionFailed { .. } => None,
        }
    }
}

impl From<FormError> for HarnessError {
    fn from(e: FormError) -> Self {
        HarnessError::Form(e)
    }
}

impl From<PageError> for HarnessError {
    fn from(e: PageError) -> Self {
        HarnessError::Page(e)
    }
}

impl From<AvailabilityError> for HarnessError {
    fn from(e: AvailabilityError) -> Self {
        HarnessError::Availability(e)
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(e: std::io::Error) -> Self {
        HarnessError::Io(e)
    }
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn wraps_form_errors_with_source() {
        let err: HarnessError = FormError::UnknownRadio("urgente".into()).into();
        assert_eq!(err.to_string(), "form error: unknown radio: urgente");
        assert!(err.source().is_some());
    }

    #[test]
    fn assertion_failure_names_scenario() {
        let err = HarnessError::AssertionFailed {
            scenario: "checks the page title".into(),
            detail: "expected \"x\"".into(),
        };
        assert_eq!(err.to_string(), "checks the page title: expected \"x\"");
        assert!(err.source().is_none());
    }
}
