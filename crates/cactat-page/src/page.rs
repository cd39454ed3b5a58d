#![forbid(unsafe_code)]

//! The form page's chrome: document title, header text nodes, the hidden
//! cat, and the privacy-policy link.
//!
//! None of this touches form state. The page tracks which document is loaded
//! in the current browsing context and which hrefs were opened in new tabs.

use std::fmt;
use std::str::FromStr;

use crate::anchor::{Anchor, Navigation, TARGET_BLANK};
use crate::error::{PageError, PageResult};
use crate::privacy::{Document, PRIVACY_HREF, PRIVACY_TITLE};

/// Document title of the form page.
pub const PAGE_TITLE: &str = "Central de Atendimento ao Cliente TAT";
/// Initial text of `#title`.
pub const TITLE_TEXT: &str = "CAC TAT";
/// Initial text of `#subtitle`.
pub const SUBTITLE_TEXT: &str = "Forneça o máximo de informações, por favor.";
/// Content of the hidden `#cat` element.
pub const CAT_TEXT: &str = "🐈";
/// Text of the privacy-policy anchor.
pub const PRIVACY_LINK_TEXT: &str = "Política de Privacidade";

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

/// Addressable chrome elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Title,
    Subtitle,
    Cat,
}

impl ElementId {
    pub const ALL: [ElementId; 3] = [ElementId::Title, ElementId::Subtitle, ElementId::Cat];

    /// DOM id without the leading `#`.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            ElementId::Title => "title",
            ElementId::Subtitle => "subtitle",
            ElementId::Cat => "cat",
        }
    }

    const fn index(self) -> usize {
        match self {
            ElementId::Title => 0,
            ElementId::Subtitle => 1,
            ElementId::Cat => 2,
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

impl FromStr for ElementId {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.strip_prefix('#').unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|e| e.dom_id() == id)
            .ok_or_else(|| PageError::UnknownElement(s.to_string()))
    }
}

/// A text-bearing element with CSS visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: ElementId,
    text: String,
    visible: bool,
}

impl Element {
    fn new(id: ElementId, text: &str, visible: bool) -> Self {
        Self {
            id,
            text: text.to_string(),
            visible,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// The page surrounding the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    elements: [Element; 3],
    privacy_link: Anchor,
    document: Document,
    opened_tabs: Vec<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A freshly loaded form page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: [
                Element::new(ElementId::Title, TITLE_TEXT, true),
                Element::new(ElementId::Subtitle, SUBTITLE_TEXT, true),
                Element::new(ElementId::Cat, CAT_TEXT, false),
            ],
            privacy_link: Anchor::new(PRIVACY_LINK_TEXT, PRIVACY_HREF)
                .with_attr("target", TARGET_BLANK),
            document: Document::Index,
            opened_tabs: Vec::new(),
        }
    }

    /// Title of the document in the current context.
    #[must_use]
    pub fn title(&self) -> &str {
        match self.document {
            Document::Index => PAGE_TITLE,
            Document::Privacy(_) => PRIVACY_TITLE,
        }
    }

    /// Document loaded in the current context.
    #[inline]
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Hrefs opened in new tabs, oldest first.
    #[must_use]
    pub fn opened_tabs(&self) -> &[String] {
        &self.opened_tabs
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    /// Look an element up by DOM id (`#cat` or `cat`).
    pub fn find(&self, dom_id: &str) -> PageResult<&Element> {
        Ok(self.element(dom_id.parse()?))
    }

    /// Overwrite an element's text content.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        tracing::debug!(element = %id, text, "element text replaced");
        self.elements[id.index()].text = text.to_string();
    }

    pub fn show(&mut self, id: ElementId) {
        self.set_visible(id, true);
    }

    pub fn hide(&mut self, id: ElementId) {
        self.set_visible(id, false);
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        let element = &mut self.elements[id.index()];
        if element.visible != visible {
            tracing::trace!(element = %id, visible, "element toggled");
        }
        element.visible = visible;
    }

    /// The privacy-policy anchor.
    #[must_use]
    pub fn privacy_link(&self) -> &Anchor {
        &self.privacy_link
    }

    /// Find an anchor by (part of) its text.
    pub fn link_containing(&mut self, text: &str) -> PageResult<&mut Anchor> {
        if self.privacy_link.text().contains(text) {
            Ok(&mut self.privacy_link)
        } else {
            Err(PageError::UnknownElement(format!("a:contains({text:?})")))
        }
    }

    /// Click the privacy-policy link.
    pub fn click_privacy_link(&mut self) -> PageResult<Navigation> {
        let navigation = self.privacy_link.activate();
        self.follow(&navigation)?;
        Ok(navigation)
    }

    /// Apply a navigation to this page's browsing contexts.
    pub fn follow(&mut self, navigation: &Navigation) -> PageResult<()> {
        match navigation {
            Navigation::NewTab { href } => {
                Document::resolve(href)?;
                tracing::debug!(href = %href, "opened in new tab");
                self.opened_tabs.push(href.clone());
            }
            Navigation::CurrentContext { href } => {
                self.document = Document::resolve(href)?;
                tracing::debug!(href = %href, "navigated current context");
            }
            Navigation::None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::privacy::PRIVACY_HEADING;

    #[test]
    fn fresh_page_chrome() {
        let page = Page::new();
        assert_eq!(page.title(), PAGE_TITLE);
        assert_eq!(page.element(ElementId::Title).text(), "CAC TAT");
        assert!(page.element(ElementId::Subtitle).is_visible());
        assert!(!page.element(ElementId::Cat).is_visible());
    }

    #[test]
    fn find_accepts_hash_prefix() {
        let page = Page::new();
        assert_eq!(page.find("#cat").unwrap().id(), ElementId::Cat);
        assert_eq!(page.find("subtitle").unwrap().id(), ElementId::Subtitle);
        assert_eq!(
            page.find("#dog"),
            Err(PageError::UnknownElement("#dog".into()))
        );
    }

    #[test]
    fn hidden_cat_can_be_shown_and_renamed() {
        let mut page = Page::new();
        page.show(ElementId::Cat);
        page.set_text(ElementId::Title, "CAT TAT");
        page.set_text(ElementId::Subtitle, "Eu 🩷 gatos!");
        assert!(page.element(ElementId::Cat).is_visible());
        assert_eq!(page.element(ElementId::Title).text(), "CAT TAT");
        assert_eq!(page.element(ElementId::Subtitle).text(), "Eu 🩷 gatos!");
        page.hide(ElementId::Cat);
        assert!(!page.element(ElementId::Cat).is_visible());
    }

    #[test]
    fn privacy_link_opens_new_tab_by_default() {
        let mut page = Page::new();
        let nav = page.click_privacy_link().unwrap();
        assert!(matches!(nav, Navigation::NewTab { .. }));
        assert_eq!(page.document(), &Document::Index);
        assert_eq!(page.opened_tabs(), ["privacy.html".to_string()]);
    }

    #[test]
    fn privacy_link_without_target_navigates() {
        let mut page = Page::new();
        page.link_containing("Política").unwrap().remove_attr("target");
        page.click_privacy_link().unwrap();
        assert!(page.document().contains_visible_heading(PRIVACY_HEADING));
        assert_eq!(page.title(), PRIVACY_TITLE);
        assert!(page.opened_tabs().is_empty());
    }

    #[test]
    fn broken_href_leaves_context_alone() {
        let mut page = Page::new();
        let link = page.link_containing("Privacidade").unwrap();
        link.remove_attr("target");
        link.set_attr("href", "terms.html");
        assert!(page.click_privacy_link().is_err());
        assert_eq!(page.document(), &Document::Index);
    }

    #[test]
    fn unknown_link_text() {
        let mut page = Page::new();
        assert!(page.link_containing("Termos").is_err());
    }
}
