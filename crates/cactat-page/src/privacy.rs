#![forbid(unsafe_code)]

//! Documents reachable from the form page.
//!
//! Only two documents exist: the form itself and the privacy-policy page.
//! [`Document::resolve`] maps an href to one of them.

use crate::error::{PageError, PageResult};

/// Href of the form page.
pub const INDEX_HREF: &str = "index.html";
/// Href of the privacy-policy page.
pub const PRIVACY_HREF: &str = "privacy.html";
/// Document title of the privacy-policy page.
pub const PRIVACY_TITLE: &str = "Central de Atendimento ao Cliente TAT - Política de privacidade";
/// Text of the privacy-policy page's `h1`.
pub const PRIVACY_HEADING: &str = "CAC TAT - Política de Privacidade";

/// A visible or hidden `h1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub text: String,
    pub visible: bool,
}

/// The privacy-policy page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivacyPage {
    heading: Heading,
}

impl Default for PrivacyPage {
    fn default() -> Self {
        Self::new()
    }
}

impl PrivacyPage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heading: Heading {
                text: PRIVACY_HEADING.to_string(),
                visible: true,
            },
        }
    }

    #[must_use]
    pub fn heading(&self) -> &Heading {
        &self.heading
    }
}

/// The document loaded in a browsing context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Document {
    /// The contact form.
    #[default]
    Index,
    /// The privacy-policy page.
    Privacy(PrivacyPage),
}

impl Document {
    /// Resolve an href relative to the site root.
    ///
    /// Leading `./` and `/` are ignored.
    pub fn resolve(href: &str) -> PageResult<Self> {
        let path = href.trim_start_matches("./").trim_start_matches('/');
        match path {
            "" | INDEX_HREF => Ok(Document::Index),
            PRIVACY_HREF => Ok(Document::Privacy(PrivacyPage::new())),
            _ => Err(PageError::UnknownDocument(href.to_string())),
        }
    }

    /// Href this document is served at.
    #[must_use]
    pub fn href(&self) -> &'static str {
        match self {
            Document::Index => INDEX_HREF,
            Document::Privacy(_) => PRIVACY_HREF,
        }
    }

    /// The privacy page, if that is what is loaded.
    #[must_use]
    pub fn as_privacy(&self) -> Option<&PrivacyPage> {
        match self {
            Document::Privacy(page) => Some(page),
            Document::Index => None,
        }
    }

    /// Whether a visible `h1` contains `text`.
    #[must_use]
    pub fn contains_visible_heading(&self, text: &str) -> bool {
        self.as_privacy()
            .map(PrivacyPage::heading)
            .is_some_and(|h| h.visible && h.text.contains(text))
    }
}
