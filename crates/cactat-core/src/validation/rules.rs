#![forbid(unsafe_code)]

//! Form-level rules: which field is checked, by what, and under which condition.
//!
//! The standard rule set runs in a fixed order:
//!
//! 1. `firstName` is non-empty.
//! 2. `lastName` is non-empty.
//! 3. `email` is non-empty and has the `local@domain` shape.
//! 4. `open-text-area` is non-empty.
//! 5. `phone` is non-empty while the phone contact box is checked.
//!
//! Every rule is evaluated on every pass; the outcome is an error as soon as
//! any of them reports a violation.

use std::fmt;

use crate::config::FormConfig;
use crate::field::FieldId;
use crate::form::FormFields;
use crate::panel::Outcome;

use super::validators::{All, ValidationError, Validator, ValidatorBuilder};

/// A predicate over the whole form gating a conditional rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Active while the phone contact checkbox is checked.
    PhoneRequested,
}

impl Condition {
    /// Whether the condition holds for the given form state.
    #[must_use]
    pub fn holds(self, fields: &FormFields) -> bool {
        match self {
            Condition::PhoneRequested => fields.phone_required(),
        }
    }

    /// Stable name, reported in the `when` parameter of violations.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Condition::PhoneRequested => "phone-checkbox",
        }
    }
}

/// One validation rule.
pub struct Rule {
    field: FieldId,
    when: Option<Condition>,
    validator: All<str>,
}

impl Rule {
    /// A rule that always applies.
    #[must_use]
    pub fn new(field: FieldId, validator: All<str>) -> Self {
        Self {
            field,
            when: None,
            validator,
        }
    }

    /// Restrict the rule to form states where `condition` holds.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.when = Some(condition);
        self
    }

    /// The field this rule checks.
    #[must_use]
    pub fn field(&self) -> FieldId {
        self.field
    }

    /// The gating condition, if any.
    #[must_use]
    pub fn condition(&self) -> Option<Condition> {
        self.when
    }

    /// Check the rule against a form state.
    ///
    /// Returns `None` when the rule passes or its condition does not hold.
    #[must_use]
    pub fn check(&self, fields: &FormFields) -> Option<Violation> {
        if let Some(condition) = self.when
            && !condition.holds(fields)
        {
            return None;
        }
        let mut error = self
            .validator
            .validate(fields.text.value(self.field))
            .into_error()?
            .with_param("field", self.field.dom_id());
        if let Some(condition) = self.when {
            error = error.with_param("when", condition.name());
        }
        Some(Violation {
            field: self.field,
            error,
        })
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("when", &self.when)
            .field("validator", &self.validator)
            .finish()
    }
}

/// A failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The offending field.
    pub field: FieldId,
    /// What went wrong.
    pub error: ValidationError,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// An ordered list of rules.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// An empty rule set; every form passes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The contact form's rules.
    #[must_use]
    pub fn standard(config: &FormConfig) -> Self {
        let trim = config.required_trims_whitespace;
        let required = || ValidatorBuilder::<str>::new().required(trim).build();
        Self::new()
            .rule(Rule::new(FieldId::FirstName, required()))
            .rule(Rule::new(FieldId::LastName, required()))
            .rule(Rule::new(
                FieldId::Email,
                ValidatorBuilder::<str>::new().required(trim).email().build(),
            ))
            .rule(Rule::new(FieldId::OpenTextArea, required()))
            .rule(Rule::new(FieldId::Phone, required()).when(Condition::PhoneRequested))
    }

    /// Append a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate every rule, returning violations in rule order.
    #[must_use]
    pub fn evaluate(&self, fields: &FormFields) -> Vec<Violation> {
        self.rules.iter().filter_map(|r| r.check(fields)).collect()
    }
}

/// Derive the submit outcome from a pass's violations.
#[must_use]
pub fn derive_outcome(violations: &[Violation]) -> Outcome {
    if violations.is_empty() {
        Outcome::Success
    } else {
        Outcome::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ERROR_CODE_EMAIL, ERROR_CODE_REQUIRED};

    fn filled() -> FormFields {
        let mut fields = FormFields::default();
        fields.text.get_mut(FieldId::FirstName).set("Alexandre");
        fields.text.get_mut(FieldId::LastName).set("Boer");
        fields.text.get_mut(FieldId::Email).set("teste.ale@gmail.com");
        fields.text.get_mut(FieldId::OpenTextArea).set("Hello, world!");
        fields
    }

    fn standard() -> RuleSet {
        RuleSet::standard(&FormConfig::default())
    }

    #[test]
    fn standard_rule_order() {
        let order: Vec<FieldId> = standard().rules().iter().map(Rule::field).collect();
        assert_eq!(
            order,
            vec![
                FieldId::FirstName,
                FieldId::LastName,
                FieldId::Email,
                FieldId::OpenTextArea,
                FieldId::Phone,
            ]
        );
    }

    #[test]
    fn filled_form_passes() {
        let violations = standard().evaluate(&filled());
        assert!(violations.is_empty());
        assert_eq!(derive_outcome(&violations), Outcome::Success);
    }

    #[test]
    fn empty_form_reports_every_required_field_in_order() {
        let violations = standard().evaluate(&FormFields::default());
        let fields: Vec<FieldId> = violations.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec![
                FieldId::FirstName,
                FieldId::LastName,
                FieldId::Email,
                FieldId::OpenTextArea,
            ]
        );
        assert!(violations.iter().all(|v| v.error.code == ERROR_CODE_REQUIRED));
        assert_eq!(derive_outcome(&violations), Outcome::Error);
    }

    #[test]
    fn malformed_email_reports_email_code() {
        let mut fields = filled();
        fields.text.get_mut(FieldId::Email).set("teste.alegmail.com");
        let violations = standard().evaluate(&fields);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, FieldId::Email);
        assert_eq!(violations[0].error.code, ERROR_CODE_EMAIL);
        assert_eq!(violations[0].error.param("field"), Some("email"));
    }

    #[test]
    fn phone_rule_is_conditional() {
        let mut fields = filled();
        assert!(standard().evaluate(&fields).is_empty());

        fields.contact_preferences.set("phone", true).unwrap();
        let violations = standard().evaluate(&fields);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, FieldId::Phone);
        assert_eq!(violations[0].error.param("when"), Some("phone-checkbox"));

        fields.text.get_mut(FieldId::Phone).set("51999998888");
        assert!(standard().evaluate(&fields).is_empty());
    }

    #[test]
    fn trimming_config_rejects_blank_names() {
        let mut fields = filled();
        fields.text.get_mut(FieldId::FirstName).set("   ");
        assert!(standard().evaluate(&fields).is_empty());

        let trimming = RuleSet::standard(&FormConfig::default().trim_required(true));
        assert_eq!(trimming.evaluate(&fields).len(), 1);
    }

    #[test]
    fn empty_rule_set_passes_anything() {
        assert!(RuleSet::new().evaluate(&FormFields::default()).is_empty());
    }

    #[test]
    fn violation_display() {
        let violations = standard().evaluate(&FormFields::default());
        assert_eq!(violations[0].to_string(), "firstName: This field is required");
    }
}
