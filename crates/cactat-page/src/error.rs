#![forbid(unsafe_code)]

//! Errors raised while addressing page elements and documents.

use std::fmt;

/// Errors that can occur while resolving an element, attribute, or document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// No element with this id exists on the current document.
    UnknownElement(String),
    /// The anchor carries no attribute with this name.
    MissingAttribute(String),
    /// No document is served at this href.
    UnknownDocument(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::UnknownElement(id) => write!(f, "unknown element: {id}"),
            PageError::MissingAttribute(name) => write!(f, "missing attribute: {name}"),
            PageError::UnknownDocument(href) => write!(f, "no document at {href:?}"),
        }
    }
}

impl std::error::Error for PageError {}

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_culprit() {
        assert_eq!(
            PageError::UnknownElement("dog".into()).to_string(),
            "unknown element: dog"
        );
        assert_eq!(
            PageError::UnknownDocument("terms.html".into()).to_string(),
            "no document at \"terms.html\""
        );
    }
}
