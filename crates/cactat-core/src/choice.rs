#![forbid(unsafe_code)]

//! Radio and checkbox groups.
//!
//! Every member is an independently settable boolean. A [`RadioGroup`] in
//! [`RadioMode::Exclusive`] additionally unchecks its siblings on check; in
//! [`RadioMode::Independent`] (the default) checking one member leaves the
//! others untouched.

use crate::error::{FormError, FormResult};

/// A checkable member of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Submitted value, also used to address the member.
    pub value: String,
    /// Whether the member is checked.
    pub checked: bool,
}

impl Choice {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            checked: false,
        }
    }
}

/// Sibling behavior of a radio group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadioMode {
    /// Checking a member does not affect the others.
    #[default]
    Independent,
    /// Checking a member unchecks every sibling.
    Exclusive,
}

// ---------------------------------------------------------------------------
// RadioGroup
// ---------------------------------------------------------------------------

/// A group of radio buttons.
///
/// Radios cannot be unchecked by the user, only by checking a sibling in
/// exclusive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioGroup {
    mode: RadioMode,
    members: Vec<Choice>,
}

impl RadioGroup {
    /// Create a group with all members unchecked.
    #[must_use]
    pub fn new(values: &[&str], mode: RadioMode) -> Self {
        Self {
            mode,
            members: values.iter().map(|v| Choice::new(v)).collect(),
        }
    }

    /// The service-type group of the contact form.
    #[must_use]
    pub fn service_types(mode: RadioMode) -> Self {
        let values: Vec<&str> = ServiceType::ALL.iter().map(|s| s.value()).collect();
        Self::new(&values, mode)
    }

    /// Sibling behavior of this group.
    #[must_use]
    pub fn mode(&self) -> RadioMode {
        self.mode
    }

    /// Members in page order.
    #[must_use]
    pub fn members(&self) -> &[Choice] {
        &self.members
    }

    /// Check the member with the given value.
    pub fn check(&mut self, value: &str) -> FormResult<()> {
        let index = self
            .members
            .iter()
            .position(|m| m.value == value)
            .ok_or_else(|| FormError::UnknownRadio(value.to_string()))?;
        if self.mode == RadioMode::Exclusive {
            for member in &mut self.members {
                member.checked = false;
            }
        }
        self.members[index].checked = true;
        Ok(())
    }

    /// Whether the member with the given value is checked.
    pub fn is_checked(&self, value: &str) -> FormResult<bool> {
        self.members
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.checked)
            .ok_or_else(|| FormError::UnknownRadio(value.to_string()))
    }

    /// Values of all checked members.
    #[must_use]
    pub fn checked_values(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| m.checked)
            .map(|m| m.value.as_str())
            .collect()
    }

    /// Uncheck every member.
    pub(crate) fn reset(&mut self) {
        for member in &mut self.members {
            member.checked = false;
        }
    }
}

// ---------------------------------------------------------------------------
// CheckboxGroup
// ---------------------------------------------------------------------------

/// A set of independent checkboxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxGroup {
    members: Vec<Choice>,
}

impl CheckboxGroup {
    /// Create a group with all boxes unchecked.
    #[must_use]
    pub fn new(values: &[&str]) -> Self {
        Self {
            members: values.iter().map(|v| Choice::new(v)).collect(),
        }
    }

    /// The contact-preference checkboxes of the contact form.
    #[must_use]
    pub fn contact_preferences() -> Self {
        let values: Vec<&str> = ContactPreference::ALL.iter().map(|c| c.value()).collect();
        Self::new(&values)
    }

    /// Members in page order.
    #[must_use]
    pub fn members(&self) -> &[Choice] {
        &self.members
    }

    /// Check or uncheck one box.
    pub fn set(&mut self, value: &str, checked: bool) -> FormResult<()> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.value == value)
            .ok_or_else(|| FormError::UnknownCheckbox(value.to_string()))?;
        member.checked = checked;
        Ok(())
    }

    /// Whether one box is checked.
    pub fn is_checked(&self, value: &str) -> FormResult<bool> {
        self.members
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.checked)
            .ok_or_else(|| FormError::UnknownCheckbox(value.to_string()))
    }

    /// Values of all checked boxes.
    #[must_use]
    pub fn checked_values(&self) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| m.checked)
            .map(|m| m.value.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Catalogs
// ---------------------------------------------------------------------------

/// Kind of service requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    Ajuda,
    Elogio,
    Feedback,
}

impl ServiceType {
    /// Every service type, in page order.
    pub const ALL: [ServiceType; 3] = [ServiceType::Ajuda, ServiceType::Elogio, ServiceType::Feedback];

    /// Radio value.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            ServiceType::Ajuda => "ajuda",
            ServiceType::Elogio => "elogio",
            ServiceType::Feedback => "feedback",
        }
    }
}

/// Preferred contact channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPreference {
    Email,
    Phone,
}

impl ContactPreference {
    /// Every channel, in page order.
    pub const ALL: [ContactPreference; 2] = [ContactPreference::Email, ContactPreference::Phone];

    /// Checkbox value.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            ContactPreference::Email => "email",
            ContactPreference::Phone => "phone",
        }
    }

    /// Element id of the checkbox.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            ContactPreference::Email => "email-checkbox",
            ContactPreference::Phone => "phone-checkbox",
        }
    }

    /// Resolve a checkbox element id, with or without a leading `#`.
    #[must_use]
    pub fn from_dom_id(id: &str) -> Option<Self> {
        let id = id.strip_prefix('#').unwrap_or(id);
        Self::ALL.into_iter().find(|c| c.dom_id() == id)
    }
}
