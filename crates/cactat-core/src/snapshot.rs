#![forbid(unsafe_code)]

//! Serializable snapshots of form state.
//!
//! A [`FormSnapshot`] is the flat, explicit record of everything a driver can
//! observe on the form: text values, select value, checked radios and boxes,
//! the attached file, and panel visibility. Restoring a snapshot re-applies it
//! through the same filters as user input, so a hand-edited snapshot cannot
//! put letters into the phone field.
//!
//! Feature-gated under `serde`.

use serde::{Deserialize, Serialize};

use crate::controller::FormController;
use crate::error::{FormError, FormResult};
use crate::field::FieldId;
use crate::file::{DeliveryMode, FileRef};
use crate::panel::PanelKind;
use crate::select::OptionSelector;

/// Observable state of a form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub open_text_area: String,
    /// Value of the product select; empty for the placeholder.
    pub product: String,
    /// Values of checked service-type radios.
    pub service_type: Vec<String>,
    /// Values of checked contact-preference boxes.
    pub contact_preferences: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_upload: Option<FileRef>,
    pub success_visible: bool,
    pub error_visible: bool,
}

impl FormSnapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Whether the phone field is required in this state.
    #[must_use]
    pub fn phone_required(&self) -> bool {
        self.contact_preferences.iter().any(|c| c == "phone")
    }
}

impl FormController {
    /// Capture the current observable state.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        let fields = self.fields();
        let text = |id| fields.text.value(id).to_string();
        FormSnapshot {
            first_name: text(FieldId::FirstName),
            last_name: text(FieldId::LastName),
            email: text(FieldId::Email),
            phone: text(FieldId::Phone),
            open_text_area: text(FieldId::OpenTextArea),
            product: fields.product.value().to_string(),
            service_type: owned(fields.service_type.checked_values()),
            contact_preferences: owned(fields.contact_preferences.checked_values()),
            file_upload: fields.file_upload.file().cloned(),
            success_visible: self.panel(PanelKind::Success).is_visible(),
            error_visible: self.panel(PanelKind::Error).is_visible(),
        }
    }

    /// Replace the current state with a snapshot.
    ///
    /// Unknown option, radio, or checkbox values are rejected; the form may
    /// be partially restored when that happens.
    pub fn restore(&mut self, snapshot: &FormSnapshot) -> FormResult<()> {
        let pairs = [
            (FieldId::FirstName, &snapshot.first_name),
            (FieldId::LastName, &snapshot.last_name),
            (FieldId::Email, &snapshot.email),
            (FieldId::Phone, &snapshot.phone),
            (FieldId::OpenTextArea, &snapshot.open_text_area),
        ];
        for (id, value) in pairs {
            self.set_field(id, value);
        }

        let fields = self.fields_mut();
        if snapshot.product.is_empty() {
            fields.product.reset();
        } else {
            fields
                .product
                .select(&OptionSelector::Value(snapshot.product.clone()))?;
        }

        fields.service_type.reset();
        for value in &snapshot.service_type {
            fields.service_type.check(value)?;
        }

        let contact_values: Vec<String> = fields
            .contact_preferences
            .members()
            .iter()
            .map(|m| m.value.clone())
            .collect();
        for value in &snapshot.contact_preferences {
            if !contact_values.contains(value) {
                return Err(FormError::UnknownCheckbox(value.clone()));
            }
        }
        for value in &contact_values {
            fields
                .contact_preferences
                .set(value, snapshot.contact_preferences.contains(value))?;
        }

        match &snapshot.file_upload {
            Some(file) => fields.file_upload.attach(file.clone(), DeliveryMode::Select),
            None => fields.file_upload.clear(),
        }

        let panels = self.panels_mut();
        panels.set_visible(PanelKind::Success, snapshot.success_visible);
        panels.set_visible(PanelKind::Error, snapshot.error_visible);
        Ok(())
    }
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}
