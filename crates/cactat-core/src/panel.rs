#![forbid(unsafe_code)]

//! Success and error message panels.
//!
//! Both panels start hidden. [`OutcomePanels::settle`] makes exactly one of
//! them visible; `show`/`hide` toggle a single panel directly and may leave
//! both visible or both hidden.

use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

/// Text of the success panel.
pub const SUCCESS_TEXT: &str = "Mensagem enviada com sucesso.";
/// Text of the error panel.
pub const ERROR_TEXT: &str = "Valide os campos obrigatórios!";

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Success,
    Error,
}

impl Outcome {
    /// The panel that reports this outcome.
    #[must_use]
    pub const fn panel(self) -> PanelKind {
        match self {
            Outcome::Success => PanelKind::Success,
            Outcome::Error => PanelKind::Error,
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Which message panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Success,
    Error,
}

impl PanelKind {
    /// CSS class of the panel element.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            PanelKind::Success => "success",
            PanelKind::Error => "error",
        }
    }

    /// Fixed message text.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            PanelKind::Success => SUCCESS_TEXT,
            PanelKind::Error => ERROR_TEXT,
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class())
    }
}

impl FromStr for PanelKind {
    type Err = FormError;

    /// Parse a class name, with or without a leading `.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('.').unwrap_or(s) {
            "success" => Ok(PanelKind::Success),
            "error" => Ok(PanelKind::Error),
            other => Err(FormError::UnknownPanel(other.to_string())),
        }
    }
}

/// One message panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomePanel {
    kind: PanelKind,
    visible: bool,
}

impl OutcomePanel {
    fn hidden(kind: PanelKind) -> Self {
        Self {
            kind,
            visible: false,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The panel's fixed text.
    #[must_use]
    pub fn text(&self) -> &'static str {
        self.kind.text()
    }

    /// The text a reader sees: the message while visible, nothing otherwise.
    #[must_use]
    pub fn visible_text(&self) -> Option<&'static str> {
        self.visible.then(|| self.text())
    }
}

/// The pair of singleton message panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomePanels {
    success: OutcomePanel,
    error: OutcomePanel,
}

impl Default for OutcomePanels {
    fn default() -> Self {
        Self {
            success: OutcomePanel::hidden(PanelKind::Success),
            error: OutcomePanel::hidden(PanelKind::Error),
        }
    }
}

impl OutcomePanels {
    /// Access a panel.
    #[must_use]
    pub fn get(&self, kind: PanelKind) -> &OutcomePanel {
        match kind {
            PanelKind::Success => &self.success,
            PanelKind::Error => &self.error,
        }
    }

    fn get_mut(&mut self, kind: PanelKind) -> &mut OutcomePanel {
        match kind {
            PanelKind::Success => &mut self.success,
            PanelKind::Error => &mut self.error,
        }
    }

    /// Make one panel visible without touching the other.
    pub fn show(&mut self, kind: PanelKind) {
        self.set_visible(kind, true);
    }

    /// Hide one panel without touching the other.
    pub fn hide(&mut self, kind: PanelKind) {
        self.set_visible(kind, false);
    }

    /// Set one panel's visibility.
    pub fn set_visible(&mut self, kind: PanelKind, visible: bool) {
        let panel = self.get_mut(kind);
        if panel.visible != visible {
            tracing::trace!(panel = %kind, visible, "message panel toggled");
        }
        panel.visible = visible;
    }

    /// Show the panel for `outcome` and hide the other one.
    pub fn settle(&mut self, outcome: Outcome) {
        let shown = outcome.panel();
        let hidden = match shown {
            PanelKind::Success => PanelKind::Error,
            PanelKind::Error => PanelKind::Success,
        };
        self.set_visible(hidden, false);
        self.set_visible(shown, true);
    }

    /// The outcome currently on display, if exactly one panel is visible.
    #[must_use]
    pub fn displayed_outcome(&self) -> Option<Outcome> {
        match (self.success.visible, self.error.visible) {
            (true, false) => Some(Outcome::Success),
            (false, true) => Some(Outcome::Error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_hidden_initially() {
        let panels = OutcomePanels::default();
        assert!(!panels.get(PanelKind::Success).is_visible());
        assert!(!panels.get(PanelKind::Error).is_visible());
        assert_eq!(panels.displayed_outcome(), None);
    }

    #[test]
    fn settle_is_exclusive() {
        let mut panels = OutcomePanels::default();
        panels.settle(Outcome::Success);
        assert_eq!(panels.displayed_outcome(), Some(Outcome::Success));
        panels.settle(Outcome::Error);
        assert!(!panels.get(PanelKind::Success).is_visible());
        assert!(panels.get(PanelKind::Error).is_visible());
    }

    #[test]
    fn settle_overrides_manual_show() {
        let mut panels = OutcomePanels::default();
        panels.show(PanelKind::Success);
        panels.show(PanelKind::Error);
        assert_eq!(panels.displayed_outcome(), None);
        panels.settle(Outcome::Success);
        assert_eq!(panels.displayed_outcome(), Some(Outcome::Success));
    }

    #[test]
    fn show_then_hide() {
        let mut panels = OutcomePanels::default();
        panels.show(PanelKind::Success);
        assert_eq!(
            panels.get(PanelKind::Success).visible_text(),
            Some("Mensagem enviada com sucesso.")
        );
        panels.hide(PanelKind::Success);
        assert!(!panels.get(PanelKind::Success).is_visible());
        assert_eq!(panels.get(PanelKind::Success).visible_text(), None);
        assert!(!panels.get(PanelKind::Error).is_visible());
    }

    #[test]
    fn fixed_texts() {
        assert_eq!(PanelKind::Success.text(), SUCCESS_TEXT);
        assert_eq!(PanelKind::Error.text(), "Valide os campos obrigatórios!");
    }

    #[test]
    fn parse_class_names() {
        assert_eq!(".success".parse::<PanelKind>(), Ok(PanelKind::Success));
        assert_eq!("error".parse::<PanelKind>(), Ok(PanelKind::Error));
        assert_eq!(
            ".warning".parse::<PanelKind>(),
            Err(FormError::UnknownPanel("warning".into()))
        );
    }

    #[test]
    fn outcome_maps_to_panel() {
        assert_eq!(Outcome::Success.panel(), PanelKind::Success);
        assert_eq!(Outcome::Error.panel(), PanelKind::Error);
        assert!(Outcome::Success.is_success());
        assert!(!Outcome::Error.is_success());
    }
}
