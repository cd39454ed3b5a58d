#![forbid(unsafe_code)]

//! Text fields of the contact form.
//!
//! Each field carries an [`InputFilter`] applied at entry time. The phone
//! field drops every non-digit character as it arrives, so its stored value
//! never contains one; every other field stores input verbatim.

use std::fmt;
use std::str::FromStr;

use crate::error::{FormError, FormResult};

// ---------------------------------------------------------------------------
// FieldId
// ---------------------------------------------------------------------------

/// Stable identifier of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FieldId {
    FirstName,
    LastName,
    Email,
    Phone,
    OpenTextArea,
}

impl FieldId {
    /// Every text field, in page order.
    pub const ALL: [FieldId; 5] = [
        FieldId::FirstName,
        FieldId::LastName,
        FieldId::Email,
        FieldId::Phone,
        FieldId::OpenTextArea,
    ];

    /// The element id on the page.
    #[must_use]
    pub const fn dom_id(self) -> &'static str {
        match self {
            FieldId::FirstName => "firstName",
            FieldId::LastName => "lastName",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::OpenTextArea => "open-text-area",
        }
    }

    /// Resolve an element id, with or without a leading `#`.
    ///
    /// The camel-case model name `openTextArea` is accepted as an alias.
    pub fn from_dom_id(id: &str) -> FormResult<Self> {
        let id = id.strip_prefix('#').unwrap_or(id);
        match id {
            "firstName" => Ok(FieldId::FirstName),
            "lastName" => Ok(FieldId::LastName),
            "email" => Ok(FieldId::Email),
            "phone" => Ok(FieldId::Phone),
            "open-text-area" | "openTextArea" => Ok(FieldId::OpenTextArea),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }

    /// The filter applied to characters entered into this field.
    #[must_use]
    pub const fn input_filter(self) -> InputFilter {
        match self {
            FieldId::Phone => InputFilter::DigitsOnly,
            _ => InputFilter::Verbatim,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

impl FromStr for FieldId {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dom_id(s)
    }
}

// ---------------------------------------------------------------------------
// InputFilter
// ---------------------------------------------------------------------------

/// Entry-time character filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFilter {
    /// Every character is kept.
    #[default]
    Verbatim,
    /// Only ASCII digits are kept; anything else is silently dropped.
    DigitsOnly,
}

impl InputFilter {
    /// Whether a single character survives the filter.
    #[must_use]
    pub fn accepts(self, c: char) -> bool {
        match self {
            InputFilter::Verbatim => true,
            InputFilter::DigitsOnly => c.is_ascii_digit(),
        }
    }

    /// Filter a whole string.
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        match self {
            InputFilter::Verbatim => raw.to_string(),
            InputFilter::DigitsOnly => raw.chars().filter(|c| c.is_ascii_digit()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// TextInput
// ---------------------------------------------------------------------------

/// A text input holding its current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    filter: InputFilter,
}

impl TextInput {
    /// Create an empty input with the given filter.
    #[must_use]
    pub fn new(filter: InputFilter) -> Self {
        Self {
            value: String::new(),
            filter,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The entry-time filter of this input.
    #[must_use]
    pub fn filter(&self) -> InputFilter {
        self.filter
    }

    /// Replace the value, filtering the new content.
    pub fn set(&mut self, raw: &str) {
        self.value = self.filter.apply(raw);
    }

    /// Append typed characters one at a time, dropping rejected ones.
    ///
    /// Returns the number of characters accepted.
    pub fn type_text(&mut self, text: &str) -> usize {
        let before = self.value.len();
        for c in text.chars() {
            if self.filter.accepts(c) {
                self.value.push(c);
            }
        }
        self.value[before..].chars().count()
    }

    /// Store a value without passing it through the filter.
    pub fn set_unfiltered(&mut self, value: &str) {
        self.value = value.to_string();
    }

    /// Reset to the empty string.
    pub fn clear(&mut self) {
        self.value.clear();
    }
}

// ---------------------------------------------------------------------------
// TextFields
// ---------------------------------------------------------------------------

/// The five text inputs of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFields {
    first_name: TextInput,
    last_name: TextInput,
    email: TextInput,
    phone: TextInput,
    open_text_area: TextInput,
}

impl Default for TextFields {
    fn default() -> Self {
        Self {
            first_name: TextInput::new(FieldId::FirstName.input_filter()),
            last_name: TextInput::new(FieldId::LastName.input_filter()),
            email: TextInput::new(FieldId::Email.input_filter()),
            phone: TextInput::new(FieldId::Phone.input_filter()),
            open_text_area: TextInput::new(FieldId::OpenTextArea.input_filter()),
        }
    }
}

impl TextFields {
    /// Access an input by id.
    #[must_use]
    pub fn get(&self, id: FieldId) -> &TextInput {
        match id {
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
            FieldId::OpenTextArea => &self.open_text_area,
        }
    }

    /// Access an input mutably by id.
    pub(crate) fn get_mut(&mut self, id: FieldId) -> &mut TextInput {
        match id {
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastName => &mut self.last_name,
            FieldId::Email => &mut self.email,
            FieldId::Phone => &mut self.phone,
            FieldId::OpenTextArea => &mut self.open_text_area,
        }
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, id: FieldId) -> &str {
        self.get(id).value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_ids_round_trip() {
        for id in FieldId::ALL {
            assert_eq!(FieldId::from_dom_id(id.dom_id()), Ok(id));
            assert_eq!(format!("#{id}").parse::<FieldId>(), Ok(id));
        }
    }

    #[test]
    fn text_area_accepts_model_name() {
        assert_eq!(FieldId::from_dom_id("openTextArea"), Ok(FieldId::OpenTextArea));
    }

    #[test]
    fn unknown_dom_id() {
        assert_eq!(
            FieldId::from_dom_id("#product"),
            Err(FormError::UnknownField("product".into()))
        );
    }

    #[test]
    fn only_phone_filters_digits() {
        for id in FieldId::ALL {
            let expected = if id == FieldId::Phone {
                InputFilter::DigitsOnly
            } else {
                InputFilter::Verbatim
            };
            assert_eq!(id.input_filter(), expected);
        }
    }

    #[test]
    fn digits_filter_drops_letters() {
        assert_eq!(InputFilter::DigitsOnly.apply("acbde"), "");
        assert_eq!(InputFilter::DigitsOnly.apply("(51) 9-8765"), "5198765");
        assert_eq!(InputFilter::DigitsOnly.apply("123456789"), "123456789");
    }

    #[test]
    fn digits_filter_rejects_non_ascii_digits() {
        assert_eq!(InputFilter::DigitsOnly.apply("١٢٣"), "");
    }

    #[test]
    fn verbatim_keeps_whitespace() {
        assert_eq!(InputFilter::Verbatim.apply("  Boer \n"), "  Boer \n");
    }

    #[test]
    fn type_text_appends() {
        let mut input = TextInput::new(InputFilter::Verbatim);
        assert_eq!(input.type_text("Ale"), 3);
        assert_eq!(input.type_text("xandre"), 6);
        assert_eq!(input.value(), "Alexandre");
    }

    #[test]
    fn type_text_counts_only_accepted() {
        let mut input = TextInput::new(InputFilter::DigitsOnly);
        assert_eq!(input.type_text("a1b2c3"), 3);
        assert_eq!(input.value(), "123");
    }

    #[test]
    fn set_replaces_and_filters() {
        let mut input = TextInput::new(InputFilter::DigitsOnly);
        input.type_text("99");
        input.set("x42");
        assert_eq!(input.value(), "42");
    }

    #[test]
    fn set_unfiltered_bypasses_filter() {
        let mut input = TextInput::new(InputFilter::DigitsOnly);
        input.set_unfiltered("abc");
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn clear_empties() {
        let mut input = TextInput::new(InputFilter::Verbatim);
        input.set("Boer");
        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn text_fields_start_empty() {
        let fields = TextFields::default();
        for id in FieldId::ALL {
            assert_eq!(fields.value(id), "");
        }
        assert_eq!(fields.get(FieldId::Phone).filter(), InputFilter::DigitsOnly);
    }
}
