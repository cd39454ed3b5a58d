#![forbid(unsafe_code)]

//! The complete field state of the contact form.

use crate::choice::{CheckboxGroup, ContactPreference, RadioGroup, RadioMode};
use crate::field::TextFields;
use crate::file::FileInput;
use crate::select::{Product, Select};

/// Every input on the form, as one explicit value.
///
/// Created empty on form load. Submitting never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub text: TextFields,
    pub product: Select,
    pub service_type: RadioGroup,
    pub contact_preferences: CheckboxGroup,
    pub file_upload: FileInput,
}

impl FormFields {
    /// Fresh form state.
    #[must_use]
    pub fn new(radio_mode: RadioMode) -> Self {
        Self {
            text: TextFields::default(),
            product: Select::products(),
            service_type: RadioGroup::service_types(radio_mode),
            contact_preferences: CheckboxGroup::contact_preferences(),
            file_upload: FileInput::default(),
        }
    }

    /// Whether the phone field is required: the phone contact box is checked.
    #[must_use]
    pub fn phone_required(&self) -> bool {
        self.contact_preferences
            .is_checked(ContactPreference::Phone.value())
            .unwrap_or(false)
    }

    /// The selected product, or `None` while the placeholder is selected.
    #[must_use]
    pub fn product(&self) -> Option<Product> {
        Product::from_value(self.product.value())
    }
}

impl Default for FormFields {
    fn default() -> Self {
        Self::new(RadioMode::default())
    }
}
