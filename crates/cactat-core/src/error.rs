#![forbid(unsafe_code)]

//! Errors raised by the stringly-typed driver surface.
//!
//! Typed operations on known fields never fail. These errors only appear when
//! a caller addresses something by DOM id, option text, or value string and
//! that name does not resolve.

use std::fmt;

/// Errors that can occur while resolving a field, option, or panel by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// No text field with this id exists.
    UnknownField(String),
    /// The id names a control that does not accept text input.
    NotATextField(String),
    /// No select option matches this label or value.
    UnknownOption(String),
    /// An ordinal selector past the end of the option list.
    OptionIndexOutOfRange { index: usize, len: usize },
    /// The option exists but cannot be selected (e.g. the placeholder).
    DisabledOption(String),
    /// No radio button with this value exists.
    UnknownRadio(String),
    /// No checkbox with this value exists.
    UnknownCheckbox(String),
    /// No outcome panel with this name exists.
    UnknownPanel(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownField(id) => write!(f, "unknown field: {id}"),
            FormError::NotATextField(id) => write!(f, "not a text field: {id}"),
            FormError::UnknownOption(name) => write!(f, "no option matches {name:?}"),
            FormError::OptionIndexOutOfRange { index, len } => {
                write!(f, "option index {index} out of range (len {len})")
            }
            FormError::DisabledOption(label) => write!(f, "option {label:?} is disabled"),
            FormError::UnknownRadio(value) => write!(f, "unknown radio: {value}"),
            FormError::UnknownCheckbox(value) => write!(f, "unknown checkbox: {value}"),
            FormError::UnknownPanel(name) => write!(f, "unknown message panel: {name}"),
        }
    }
}

impl std::error::Error for FormError {}

/// Result type for name-resolving form operations.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_name() {
        let err = FormError::UnknownField("nickname".into());
        assert_eq!(err.to_string(), "unknown field: nickname");

        let err = FormError::OptionIndexOutOfRange { index: 9, len: 5 };
        assert_eq!(err.to_string(), "option index 9 out of range (len 5)");
    }
}
