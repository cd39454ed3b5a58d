#![forbid(unsafe_code)]

//! Hyperlink anchors with mutable attributes.
//!
//! An [`Anchor`] is a text label plus an ordered attribute map. Activating it
//! yields a [`Navigation`]: `target="_blank"` opens a new browsing context,
//! anything else navigates the current one.
//!
//! # Usage
//!
//! ```
//! use cactat_page::anchor::{Anchor, Navigation};
//!
//! let mut link = Anchor::new("Docs", "docs.html").with_attr("target", "_blank");
//! assert_eq!(link.activate(), Navigation::NewTab { href: "docs.html".into() });
//!
//! link.remove_attr("target");
//! assert_eq!(link.activate(), Navigation::CurrentContext { href: "docs.html".into() });
//! ```

use std::collections::BTreeMap;

use crate::error::{PageError, PageResult};

/// `target` value that opens a new browsing context.
pub const TARGET_BLANK: &str = "_blank";

/// Where activating an anchor sends the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// A new tab was opened; the current context is unchanged.
    NewTab { href: String },
    /// The current context navigates to `href`.
    CurrentContext { href: String },
    /// The anchor has no `href`; nothing happens.
    None,
}

impl Navigation {
    /// Target href, if any navigation occurs.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match self {
            Navigation::NewTab { href } | Navigation::CurrentContext { href } => Some(href),
            Navigation::None => None,
        }
    }
}

/// A text link with named attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    text: String,
    attrs: BTreeMap<String, String>,
}

impl Anchor {
    /// Create an anchor with its text and `href`.
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        let mut attrs = BTreeMap::new();
        attrs.insert("href".to_string(), href.into());
        Self {
            text: text.into(),
            attrs,
        }
    }

    /// Set an attribute (builder).
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Visible link text.
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute value, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attribute value, or [`PageError::MissingAttribute`].
    pub fn require_attr(&self, name: &str) -> PageResult<&str> {
        self.attr(name)
            .ok_or_else(|| PageError::MissingAttribute(name.to_string()))
    }

    /// Whether the attribute is present with exactly this value.
    #[must_use]
    pub fn has_attr(&self, name: &str, value: &str) -> bool {
        self.attr(name) == Some(value)
    }

    /// All attributes in name order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set or replace an attribute.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its old value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let removed = self.attrs.remove(name);
        if removed.is_some() {
            tracing::debug!(attr = name, text = %self.text, "anchor attribute removed");
        }
        removed
    }

    /// Whether activation opens a new browsing context.
    #[must_use]
    pub fn opens_new_tab(&self) -> bool {
        self.has_attr("target", TARGET_BLANK)
    }

    /// Resolve what a click does given the current attributes.
    #[must_use]
    pub fn activate(&self) -> Navigation {
        let Some(href) = self.attr("href") else {
            return Navigation::None;
        };
        let href = href.to_string();
        if self.opens_new_tab() {
            Navigation::NewTab { href }
        } else {
            Navigation::CurrentContext { href }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privacy() -> Anchor {
        Anchor::new("Política de Privacidade", "privacy.html").with_attr("target", "_blank")
    }

    #[test]
    fn attributes_are_independently_observable() {
        let link = privacy();
        assert!(link.has_attr("href", "privacy.html"));
        assert!(link.has_attr("target", "_blank"));
        assert_eq!(link.attr("rel"), None);
        let names: Vec<&str> = link.attrs().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["href", "target"]);
    }

    #[test]
    fn blank_target_opens_new_tab() {
        assert!(matches!(privacy().activate(), Navigation::NewTab { .. }));
    }

    #[test]
    fn removing_target_navigates_in_place() {
        let mut link = privacy();
        assert_eq!(link.remove_attr("target").as_deref(), Some("_blank"));
        assert_eq!(link.remove_attr("target"), None);
        let nav = link.activate();
        assert_eq!(
            nav,
            Navigation::CurrentContext {
                href: "privacy.html".into()
            }
        );
        assert_eq!(nav.href(), Some("privacy.html"));
    }

    #[test]
    fn other_targets_stay_in_context() {
        let link = Anchor::new("x", "a.html").with_attr("target", "_self");
        assert!(!link.opens_new_tab());
        assert!(matches!(link.activate(), Navigation::CurrentContext { .. }));
    }

    #[test]
    fn missing_href_does_nothing() {
        let mut link = privacy();
        link.remove_attr("href");
        assert_eq!(link.activate(), Navigation::None);
        assert_eq!(
            link.require_attr("href"),
            Err(PageError::MissingAttribute("href".into()))
        );
    }
}
