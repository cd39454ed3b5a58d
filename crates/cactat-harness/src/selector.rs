#![forbid(unsafe_code)]

//! CSS-style selectors over the form page.
//!
//! Only the shapes a driver actually uses are understood:
//!
//! - `#id` for text fields, `#product`, `#file-upload`, the contact
//!   checkboxes, and the chrome elements;
//! - `.success` / `.error` for the outcome panels;
//! - `input[type="radio"]` and `input[type="checkbox"]`, optionally narrowed
//!   with `[value="..."]`.

use std::fmt;

use cactat_core::{ContactPreference, FieldId, PanelKind};
use cactat_page::ElementId;

use crate::error::{HarnessError, HarnessResult};

/// What a selector resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Field(FieldId),
    Product,
    FileUpload,
    /// One contact checkbox, by value.
    Checkbox(String),
    /// Every contact checkbox, in page order.
    Checkboxes,
    /// One service-type radio, by value.
    Radio(String),
    /// Every service-type radio, in page order.
    Radios,
    Panel(PanelKind),
    Element(ElementId),
}

impl Target {
    /// Parse a selector string.
    pub fn parse(selector: &str) -> HarnessResult<Self> {
        let selector = selector.trim();
        let unknown = || HarnessError::UnknownSelector(selector.to_string());

        if let Some(id) = selector.strip_prefix('#') {
            return match id {
                "product" => Ok(Target::Product),
                "file-upload" => Ok(Target::FileUpload),
                _ => {
                    if let Ok(field) = FieldId::from_dom_id(id) {
                        Ok(Target::Field(field))
                    } else if let Some(pref) = ContactPreference::from_dom_id(id) {
                        Ok(Target::Checkbox(pref.value().to_string()))
                    } else {
                        id.parse::<ElementId>()
                            .map(Target::Element)
                            .map_err(|_| unknown())
                    }
                }
            };
        }

        if selector.starts_with('.') {
            return selector
                .parse::<PanelKind>()
                .map(Target::Panel)
                .map_err(|_| unknown());
        }

        if let Some(rest) = selector.strip_prefix("input") {
            let attrs = parse_attrs(rest).ok_or_else(unknown)?;
            let mut kind = None;
            let mut value = None;
            for (name, val) in attrs {
                match name {
                    "type" => kind = Some(val),
                    "value" => value = Some(val.to_string()),
                    _ => return Err(unknown()),
                }
            }
            return match (kind, value) {
                (Some("radio"), Some(v)) => Ok(Target::Radio(v)),
                (Some("radio"), None) => Ok(Target::Radios),
                (Some("checkbox"), Some(v)) => Ok(Target::Checkbox(v)),
                (Some("checkbox"), None) => Ok(Target::Checkboxes),
                _ => Err(unknown()),
            };
        }

        Err(unknown())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Field(id) => write!(f, "#{id}"),
            Target::Product => f.write_str("#product"),
            Target::FileUpload => f.write_str("#file-upload"),
            Target::Checkbox(v) => write!(f, "input[type=\"checkbox\"][value=\"{v}\"]"),
            Target::Checkboxes => f.write_str("input[type=\"checkbox\"]"),
            Target::Radio(v) => write!(f, "input[type=\"radio\"][value=\"{v}\"]"),
            Target::Radios => f.write_str("input[type=\"radio\"]"),
            Target::Panel(kind) => write!(f, ".{}", kind.class()),
            Target::Element(id) => write!(f, "#{id}"),
        }
    }
}

/// Parse a run of `[name="value"]` groups. Quotes are optional.
fn parse_attrs(mut rest: &str) -> Option<Vec<(&str, &str)>> {
    let mut attrs = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let end = inner.find(']')?;
        let (name, value) = inner[..end].split_once('=')?;
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        attrs.push((name.trim(), value));
        rest = &inner[end + 1..];
    }
    Some(attrs)
}
