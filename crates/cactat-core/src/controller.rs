#![forbid(unsafe_code)]

//! The form controller: field state, submit, and message panels.
//!
//! # Submission
//!
//! ```text
//! [Unsubmitted] --submit(), valid-->   [Success: success visible, error hidden]
//! [Unsubmitted] --submit(), invalid--> [Error:   error visible, success hidden]
//! [Success|Error] --submit()--> re-evaluated from the current fields
//! ```
//!
//! A submit is one synchronous pass over the rule set. Fields are never
//! changed by it, and nothing about earlier submits is remembered besides
//! which panel is visible. Validation failure is a normal outcome, reported
//! through the error panel and the returned [`Submission`], never as `Err`.

use crate::choice::{ContactPreference, ServiceType};
use crate::config::FormConfig;
use crate::debug_trace;
use crate::error::FormResult;
use crate::field::FieldId;
use crate::file::{DeliveryMode, FileRef};
use crate::form::FormFields;
use crate::panel::{Outcome, OutcomePanel, OutcomePanels, PanelKind};
use crate::select::{OptionSelector, Product};
use crate::validation::{RuleSet, Violation, derive_outcome};

/// What one submit attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Which panel the submit made visible.
    pub outcome: Outcome,
    /// Failed rules, in evaluation order. Empty on success.
    pub violations: Vec<Violation>,
}

impl Submission {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Owns field state and decides pass or fail on submit.
#[derive(Debug)]
pub struct FormController {
    config: FormConfig,
    fields: FormFields,
    panels: OutcomePanels,
    rules: RuleSet,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

impl FormController {
    /// A freshly loaded form with the standard rules.
    #[must_use]
    pub fn new(config: FormConfig) -> Self {
        Self::with_rules(config, RuleSet::standard(&config))
    }

    /// A freshly loaded form with a custom rule set.
    #[must_use]
    pub fn with_rules(config: FormConfig, rules: RuleSet) -> Self {
        Self {
            config,
            fields: FormFields::new(config.radio_mode),
            panels: OutcomePanels::default(),
            rules,
        }
    }

    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// All field state.
    #[must_use]
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    // -------------------------------------------------------------------------
    // Text fields
    // -------------------------------------------------------------------------

    /// Current value of a text field.
    #[must_use]
    pub fn value(&self, id: FieldId) -> &str {
        self.fields.text.value(id)
    }

    /// Replace a field's value. The phone field keeps only digits.
    pub fn set_field(&mut self, id: FieldId, raw: &str) {
        let input = self.fields.text.get_mut(id);
        input.set(raw);
        tracing::debug!(field = %id, len = input.value().len(), "field set");
    }

    /// Append typed text to a field, one character at a time.
    ///
    /// Characters the field's filter rejects are dropped silently.
    pub fn type_text(&mut self, id: FieldId, text: &str) {
        let accepted = self.fields.text.get_mut(id).type_text(text);
        tracing::debug!(
            field = %id,
            typed = text.chars().count(),
            accepted,
            "field typed"
        );
    }

    /// Reset a field to the empty string.
    pub fn clear_field(&mut self, id: FieldId) {
        self.fields.text.get_mut(id).clear();
        tracing::debug!(field = %id, "field cleared");
    }

    /// Write the open text area directly, bypassing typing semantics.
    pub fn set_text_area_direct(&mut self, value: &str) {
        self.fields
            .text
            .get_mut(FieldId::OpenTextArea)
            .set_unfiltered(value);
        tracing::debug!(len = value.len(), "text area written directly");
    }

    // -------------------------------------------------------------------------
    // Checkboxes and radios
    // -------------------------------------------------------------------------

    /// Check or uncheck a contact-preference box by value.
    pub fn set_checkbox(&mut self, value: &str, checked: bool) -> FormResult<()> {
        self.fields.contact_preferences.set(value, checked)?;
        tracing::debug!(checkbox = value, checked, "checkbox set");
        Ok(())
    }

    /// Whether a contact-preference box is checked.
    pub fn is_checkbox_checked(&self, value: &str) -> FormResult<bool> {
        self.fields.contact_preferences.is_checked(value)
    }

    /// Check or uncheck a contact preference.
    pub fn set_contact(&mut self, preference: ContactPreference, checked: bool) {
        let result = self.set_checkbox(preference.value(), checked);
        debug_assert!(result.is_ok(), "contact preference missing from group: {result:?}");
        if let Err(err) = result {
            tracing::warn!(error = %err, "contact preference not in group");
        }
    }

    /// Toggle whether the phone field is required (the phone contact box).
    pub fn set_phone_required(&mut self, required: bool) {
        self.set_contact(ContactPreference::Phone, required);
    }

    #[must_use]
    pub fn phone_required(&self) -> bool {
        self.fields.phone_required()
    }

    /// Check a service-type radio by value.
    pub fn set_radio(&mut self, value: &str) -> FormResult<()> {
        self.fields.service_type.check(value)?;
        tracing::debug!(radio = value, "radio checked");
        Ok(())
    }

    /// Check a service type.
    pub fn check_service(&mut self, service: ServiceType) {
        let result = self.set_radio(service.value());
        debug_assert!(result.is_ok(), "service type missing from group: {result:?}");
        if let Err(err) = result {
            tracing::warn!(error = %err, "service type not in group");
        }
    }

    /// Whether a service-type radio is checked.
    pub fn is_radio_checked(&self, value: &str) -> FormResult<bool> {
        self.fields.service_type.is_checked(value)
    }

    // -------------------------------------------------------------------------
    // Product select and file input
    // -------------------------------------------------------------------------

    /// Select a product by label, value, or index.
    ///
    /// Returns the canonical product, identical for every addressing mode.
    pub fn select_product(
        &mut self,
        selector: impl Into<OptionSelector>,
    ) -> FormResult<Option<Product>> {
        let selector = selector.into();
        let value = self.fields.product.select(&selector)?.value.clone();
        tracing::debug!(%selector, value = %value, "product selected");
        Ok(Product::from_value(&value))
    }

    /// The selected product, `None` while the placeholder is shown.
    #[must_use]
    pub fn product(&self) -> Option<Product> {
        self.fields.product()
    }

    /// Value of the product select (`""` for the placeholder).
    #[must_use]
    pub fn product_value(&self) -> &str {
        self.fields.product.value()
    }

    /// Attach a file through either delivery surface.
    pub fn attach_file(&mut self, file: FileRef, mode: DeliveryMode) {
        tracing::debug!(name = %file.name, ?mode, "file attached");
        self.fields.file_upload.attach(file, mode);
    }

    /// Name of the attached file.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.fields.file_upload.file_name()
    }

    // -------------------------------------------------------------------------
    // Submit and panels
    // -------------------------------------------------------------------------

    /// Evaluate the rules without touching the panels.
    #[must_use]
    pub fn validate(&self) -> Vec<Violation> {
        self.rules.evaluate(&self.fields)
    }

    /// Validate every field and show exactly one outcome panel.
    pub fn submit(&mut self) -> Submission {
        let violations = self.validate();
        let outcome = derive_outcome(&violations);
        self.panels.settle(outcome);

        tracing::info!(
            outcome = ?outcome,
            violations = violations.len(),
            "form submitted"
        );
        for violation in &violations {
            tracing::debug!(field = %violation.field, code = violation.error.code, "rule failed");
        }
        debug_trace!("submit outcome={outcome:?} violations={}", violations.len());

        Submission {
            outcome,
            violations,
        }
    }

    /// Show a panel directly, bypassing submit.
    pub fn show_message(&mut self, kind: PanelKind) {
        self.panels.show(kind);
        debug_trace!("show {kind}");
    }

    /// Hide a panel directly, bypassing submit.
    pub fn hide_message(&mut self, kind: PanelKind) {
        self.panels.hide(kind);
        debug_trace!("hide {kind}");
    }

    /// Access one message panel.
    #[must_use]
    pub fn panel(&self, kind: PanelKind) -> &OutcomePanel {
        self.panels.get(kind)
    }

    /// Both message panels.
    #[must_use]
    pub fn panels(&self) -> &OutcomePanels {
        &self.panels
    }

    #[cfg(feature = "serde")]
    pub(crate) fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    #[cfg(feature = "serde")]
    pub(crate) fn panels_mut(&mut self) -> &mut OutcomePanels {
        &mut self.panels
    }
}
