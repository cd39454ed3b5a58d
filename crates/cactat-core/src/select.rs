#![forbid(unsafe_code)]

//! Single-choice select with label, value, and ordinal addressing.
//!
//! An option can be reached three ways: by its visible label, by its
//! underlying value, or by its zero-based position (placeholder included).
//! All three resolve to the same stored index, so the selected value does not
//! depend on how the option was addressed.

use std::fmt;

use crate::error::{FormError, FormResult};

/// One entry of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Text shown to the user.
    pub label: String,
    /// Value submitted with the form.
    pub value: String,
    /// Disabled options are shown but cannot be chosen.
    pub disabled: bool,
}

impl SelectOption {
    /// Create a selectable option.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
        }
    }

    /// Create a disabled placeholder with an empty value.
    #[must_use]
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            disabled: true,
        }
    }
}

/// How an option is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSelector {
    /// Match the visible label exactly.
    Label(String),
    /// Match the underlying value exactly.
    Value(String),
    /// Zero-based position in the option list.
    Index(usize),
    /// Match a value first, then a label.
    Text(String),
}

impl From<usize> for OptionSelector {
    fn from(index: usize) -> Self {
        OptionSelector::Index(index)
    }
}

impl From<&str> for OptionSelector {
    fn from(text: &str) -> Self {
        OptionSelector::Text(text.to_string())
    }
}

impl From<Product> for OptionSelector {
    fn from(product: Product) -> Self {
        OptionSelector::Value(product.value().to_string())
    }
}

impl fmt::Display for OptionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSelector::Label(label) => write!(f, "label {label:?}"),
            OptionSelector::Value(value) => write!(f, "value {value:?}"),
            OptionSelector::Index(index) => write!(f, "index {index}"),
            OptionSelector::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// A single-choice select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    options: Vec<SelectOption>,
    selected: usize,
}

impl Select {
    /// Create a select whose initial selection is the first option.
    #[must_use]
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            selected: 0,
        }
    }

    /// The product select of the contact form.
    ///
    /// The placeholder sits at index 0, so `Index(1)` is `blog`.
    #[must_use]
    pub fn products() -> Self {
        let mut options = vec![SelectOption::placeholder(PRODUCT_PLACEHOLDER)];
        options.extend(
            Product::ALL
                .iter()
                .map(|p| SelectOption::new(p.label(), p.value())),
        );
        Self::new(options)
    }

    /// All options in display order.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Index of the selected option.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected option, if the select has any options.
    #[must_use]
    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.get(self.selected)
    }

    /// Value of the selected option, or `""` for an empty select.
    #[must_use]
    pub fn value(&self) -> &str {
        self.selected_option().map_or("", |o| o.value.as_str())
    }

    /// Resolve a selector to an option index without changing the selection.
    pub fn resolve(&self, selector: &OptionSelector) -> FormResult<usize> {
        let found = match selector {
            OptionSelector::Index(index) => {
                if *index >= self.options.len() {
                    return Err(FormError::OptionIndexOutOfRange {
                        index: *index,
                        len: self.options.len(),
                    });
                }
                Some(*index)
            }
            OptionSelector::Label(label) => self.options.iter().position(|o| o.label == *label),
            OptionSelector::Value(value) => self.options.iter().position(|o| o.value == *value),
            OptionSelector::Text(text) => self
                .options
                .iter()
                .position(|o| o.value == *text)
                .or_else(|| self.options.iter().position(|o| o.label == *text)),
        };
        let index = found.ok_or_else(|| FormError::UnknownOption(selector.to_string()))?;
        if self.options[index].disabled {
            return Err(FormError::DisabledOption(self.options[index].label.clone()));
        }
        Ok(index)
    }

    /// Select the option a selector resolves to.
    pub fn select(&mut self, selector: &OptionSelector) -> FormResult<&SelectOption> {
        self.selected = self.resolve(selector)?;
        Ok(&self.options[self.selected])
    }

    /// Return to the initial selection.
    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

// ---------------------------------------------------------------------------
// Product catalog
// ---------------------------------------------------------------------------

/// Label of the product placeholder option.
pub const PRODUCT_PLACEHOLDER: &str = "Selecione";

/// A product the customer can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Blog,
    Cursos,
    Mentoria,
    YouTube,
}

impl Product {
    /// Every product, in select order.
    pub const ALL: [Product; 4] = [
        Product::Blog,
        Product::Cursos,
        Product::Mentoria,
        Product::YouTube,
    ];

    /// Submitted value.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Product::Blog => "blog",
            Product::Cursos => "cursos",
            Product::Mentoria => "mentoria",
            Product::YouTube => "youtube",
        }
    }

    /// Visible label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Product::Blog => "Blog",
            Product::Cursos => "Cursos",
            Product::Mentoria => "Mentoria",
            Product::YouTube => "YouTube",
        }
    }

    /// Look up a product by its submitted value.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == value)
    }
}
