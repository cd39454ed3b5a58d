#![forbid(unsafe_code)]

//! A browser-like session over one freshly loaded form page.
//!
//! Commands take selector strings (see [`crate::selector`]) and mirror what a
//! user or an end-to-end driver does: type, clear, check, select, attach a
//! file, click. Observations read state back through the same selectors.
//!
//! ```
//! use cactat_harness::{HarnessConfig, MandatoryFields, Session};
//!
//! let mut session = Session::new(&HarnessConfig::default());
//! session.type_text("#phone", "abc123").unwrap();
//! assert_eq!(session.value("#phone").unwrap(), "123");
//!
//! session.fill_mandatory_fields_and_submit(&MandatoryFields::default()).unwrap();
//! assert!(session.is_visible(".success").unwrap());
//! ```

use cactat_core::{DeliveryMode, FieldId, FormController, OptionSelector, Submission};
use cactat_page::anchor::{Anchor, Navigation};
use cactat_page::{HttpFetch, HttpResponse, Page};

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::fixtures::FixtureRegistry;
use crate::selector::Target;

/// Label of the form's submit button.
pub const SUBMIT_LABEL: &str = "Enviar";

/// The four fields every successful submit needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandatoryFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub text: String,
}

impl Default for MandatoryFields {
    fn default() -> Self {
        Self {
            first_name: "Alexandre".into(),
            last_name: "Boer".into(),
            email: "test.ale@gmail.com".into(),
            text: "Hello, world!".into(),
        }
    }
}

/// jQuery-style `invoke` calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invoke {
    Show,
    Hide,
    /// Write a control's value directly.
    Val(String),
    /// Replace an element's text content.
    Text(String),
}

/// One page load: form, chrome, and fixtures.
#[derive(Debug)]
pub struct Session {
    form: FormController,
    page: Page,
    fixtures: FixtureRegistry,
}

impl Session {
    /// Load the page fresh.
    #[must_use]
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            form: FormController::new(config.form),
            page: Page::new(),
            fixtures: FixtureRegistry::new(config.fixtures_dir.clone()),
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormController {
        &self.form
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Document title of the current context.
    #[must_use]
    pub fn title(&self) -> &str {
        self.page.title()
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Type into a text field, keystroke by keystroke.
    pub fn type_text(&mut self, selector: &str, text: &str) -> HarnessResult<()> {
        let field = self.text_field(selector, "type into")?;
        self.form.type_text(field, text);
        Ok(())
    }

    pub fn clear(&mut self, selector: &str) -> HarnessResult<()> {
        let field = self.text_field(selector, "clear")?;
        self.form.clear_field(field);
        Ok(())
    }

    /// Check a radio or checkbox, or every member of a group.
    pub fn check(&mut self, selector: &str) -> HarnessResult<()> {
        match Target::parse(selector)? {
            Target::Radio(value) => self.form.set_radio(&value)?,
            Target::Checkbox(value) => self.form.set_checkbox(&value, true)?,
            Target::Radios => {
                for value in self.radio_values() {
                    self.form.set_radio(&value)?;
                }
            }
            Target::Checkboxes => {
                for value in self.checkbox_values() {
                    self.form.set_checkbox(&value, true)?;
                }
            }
            _ => return Err(unsupported("check", selector)),
        }
        Ok(())
    }

    /// Uncheck a checkbox, or every checkbox.
    pub fn uncheck(&mut self, selector: &str) -> HarnessResult<()> {
        match Target::parse(selector)? {
            Target::Checkbox(value) => self.form.set_checkbox(&value, false)?,
            Target::Checkboxes => {
                for value in self.checkbox_values() {
                    self.form.set_checkbox(&value, false)?;
                }
            }
            _ => return Err(unsupported("uncheck", selector)),
        }
        Ok(())
    }

    /// Select a product option; returns the select's new value.
    pub fn select(
        &mut self,
        selector: &str,
        option: impl Into<OptionSelector>,
    ) -> HarnessResult<String> {
        if Target::parse(selector)? != Target::Product {
            return Err(unsupported("select", selector));
        }
        self.form.select_product(option)?;
        Ok(self.form.product_value().to_string())
    }

    /// Attach a file by path or `@alias`.
    pub fn select_file(
        &mut self,
        selector: &str,
        source: &str,
        mode: DeliveryMode,
    ) -> HarnessResult<()> {
        if Target::parse(selector)? != Target::FileUpload {
            return Err(unsupported("selectFile", selector));
        }
        let file = self.fixtures.resolve(source)?;
        self.form.attach_file(file, mode);
        Ok(())
    }

    /// Register a fixture under an alias for later `@alias` sources.
    pub fn alias_fixture(&mut self, fixture: &str, alias: &str) -> HarnessResult<()> {
        self.fixtures.alias(fixture, alias)
    }

    /// Call a jQuery method on the matched element.
    pub fn invoke(&mut self, selector: &str, call: Invoke) -> HarnessResult<()> {
        let target = Target::parse(selector)?;
        match (&target, call) {
            (Target::Panel(kind), Invoke::Show) => self.form.show_message(*kind),
            (Target::Panel(kind), Invoke::Hide) => self.form.hide_message(*kind),
            (Target::Element(id), Invoke::Show) => self.page.show(*id),
            (Target::Element(id), Invoke::Hide) => self.page.hide(*id),
            (Target::Element(id), Invoke::Text(text)) => self.page.set_text(*id, &text),
            (Target::Field(FieldId::OpenTextArea), Invoke::Val(value)) => {
                self.form.set_text_area_direct(&value);
            }
            (Target::Field(id), Invoke::Val(value)) => self.form.set_field(*id, &value),
            (_, call) => {
                return Err(HarnessError::UnsupportedCommand {
                    command: invoke_name(&call),
                    selector: selector.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Click a button by its label.
    pub fn click_button(&mut self, label: &str) -> HarnessResult<Submission> {
        if label != SUBMIT_LABEL {
            return Err(HarnessError::UnknownSelector(format!("button:contains({label:?})")));
        }
        Ok(self.form.submit())
    }

    /// Find a link by (part of) its text.
    pub fn link(&mut self, text: &str) -> HarnessResult<&mut Anchor> {
        Ok(self.page.link_containing(text)?)
    }

    /// Find a link by text and click it.
    pub fn click_link(&mut self, text: &str) -> HarnessResult<Navigation> {
        self.page.link_containing(text)?;
        Ok(self.page.click_privacy_link()?)
    }

    /// Issue a GET outside the page.
    pub fn request<F: HttpFetch + ?Sized>(
        &self,
        fetcher: &F,
        url: &str,
    ) -> HarnessResult<HttpResponse> {
        Ok(fetcher.get(url)?)
    }

    /// Type the four mandatory fields and click submit.
    pub fn fill_mandatory_fields_and_submit(
        &mut self,
        data: &MandatoryFields,
    ) -> HarnessResult<Submission> {
        self.type_text("#firstName", &data.first_name)?;
        self.type_text("#lastName", &data.last_name)?;
        self.type_text("#email", &data.email)?;
        self.type_text("#open-text-area", &data.text)?;
        self.click_button(SUBMIT_LABEL)
    }

    // -------------------------------------------------------------------------
    // Observations
    // -------------------------------------------------------------------------

    /// Current value of a text field or the product select.
    pub fn value(&self, selector: &str) -> HarnessResult<String> {
        match Target::parse(selector)? {
            Target::Field(id) => Ok(self.form.value(id).to_string()),
            Target::Product => Ok(self.form.product_value().to_string()),
            _ => Err(unsupported("read the value of", selector)),
        }
    }

    /// Whether the matched element is visible. Form controls always are.
    pub fn is_visible(&self, selector: &str) -> HarnessResult<bool> {
        Ok(match Target::parse(selector)? {
            Target::Panel(kind) => self.form.panel(kind).is_visible(),
            Target::Element(id) => self.page.element(id).is_visible(),
            _ => true,
        })
    }

    /// Checked state; for a group, whether every member is checked.
    pub fn is_checked(&self, selector: &str) -> HarnessResult<bool> {
        match Target::parse(selector)? {
            Target::Radio(value) => Ok(self.form.is_radio_checked(&value)?),
            Target::Checkbox(value) => Ok(self.form.is_checkbox_checked(&value)?),
            Target::Radios => self.all_checked(&self.radio_values(), true),
            Target::Checkboxes => self.all_checked(&self.checkbox_values(), false),
            _ => Err(unsupported("read the checked state of", selector)),
        }
    }

    /// Text content of a panel or chrome element.
    pub fn text(&self, selector: &str) -> HarnessResult<String> {
        match Target::parse(selector)? {
            Target::Panel(kind) => Ok(self.form.panel(kind).text().to_string()),
            Target::Element(id) => Ok(self.page.element(id).text().to_string()),
            _ => Err(unsupported("read the text of", selector)),
        }
    }

    /// Name of the file held by the file input.
    pub fn file_name(&self, selector: &str) -> HarnessResult<Option<String>> {
        if Target::parse(selector)? != Target::FileUpload {
            return Err(unsupported("read the files of", selector));
        }
        Ok(self.form.file_name().map(str::to_string))
    }

    /// Individual selectors for each element a group selector matches.
    pub fn each(&self, selector: &str) -> HarnessResult<Vec<String>> {
        let members = match Target::parse(selector)? {
            Target::Radios => self.radio_values().into_iter().map(Target::Radio).collect(),
            Target::Checkboxes => self
                .checkbox_values()
                .into_iter()
                .map(Target::Checkbox)
                .collect(),
            single => vec![single],
        };
        Ok(members.iter().map(Target::to_string).collect())
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn text_field(&self, selector: &str, command: &'static str) -> HarnessResult<FieldId> {
        match Target::parse(selector)? {
            Target::Field(id) => Ok(id),
            _ => Err(unsupported(command, selector)),
        }
    }

    fn radio_values(&self) -> Vec<String> {
        self.form
            .fields()
            .service_type
            .members()
            .iter()
            .map(|m| m.value.clone())
            .collect()
    }

    fn checkbox_values(&self) -> Vec<String> {
        self.form
            .fields()
            .contact_preferences
            .members()
            .iter()
            .map(|m| m.value.clone())
            .collect()
    }

    fn all_checked(&self, values: &[String], radios: bool) -> HarnessResult<bool> {
        for value in values {
            let checked = if radios {
                self.form.is_radio_checked(value)?
            } else {
                self.form.is_checkbox_checked(value)?
            };
            if !checked {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

fn unsupported(command: &'static str, selector: &str) -> HarnessError {
    HarnessError::UnsupportedCommand {
        command,
        selector: selector.to_string(),
    }
}

fn invoke_name(call: &Invoke) -> &'static str {
    match call {
        Invoke::Show => "invoke('show') on",
        Invoke::Hide => "invoke('hide') on",
        Invoke::Val(_) => "invoke('val') on",
        Invoke::Text(_) => "invoke('text') on",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cactat_core::PanelKind;
    use std::path::Path;

    fn session() -> Session {
        let config = HarnessConfig::default()
            .fixtures_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures"));
        Session::new(&config)
    }

    #[test]
    fn typing_and_clearing() {
        let mut s = session();
        s.type_text("#firstName", "Alexandre").unwrap();
        assert_eq!(s.value("#firstName").unwrap(), "Alexandre");
        s.clear("#firstName").unwrap();
        assert_eq!(s.value("#firstName").unwrap(), "");
    }

    #[test]
    fn typing_into_non_field_is_unsupported() {
        let mut s = session();
        assert!(matches!(
            s.type_text(".success", "x"),
            Err(HarnessError::UnsupportedCommand { command: "type into", .. })
        ));
    }

    #[test]
    fn group_check_and_last_uncheck() {
        let mut s = session();
        s.check(r#"input[type="checkbox"]"#).unwrap();
        assert!(s.is_checked(r#"input[type="checkbox"]"#).unwrap());
        let members = s.each(r#"input[type="checkbox"]"#).unwrap();
        let last = members.last().unwrap();
        s.uncheck(last).unwrap();
        assert!(!s.is_checked(last).unwrap());
        assert!(s.is_checked(&members[0]).unwrap());
        assert!(!s.form().phone_required());
    }

    #[test]
    fn radios_cannot_be_unchecked() {
        let mut s = session();
        assert!(s.uncheck(r#"input[type="radio"][value="ajuda"]"#).is_err());
    }

    #[test]
    fn invoke_val_on_text_area() {
        let mut s = session();
        s.invoke("#open-text-area", Invoke::Val("um texto qualquer".into()))
            .unwrap();
        assert_eq!(s.value("#open-text-area").unwrap(), "um texto qualquer");
    }

    #[test]
    fn invoke_show_hide_on_panels() {
        let mut s = session();
        s.invoke(".error", Invoke::Show).unwrap();
        assert!(s.is_visible(".error").unwrap());
        assert_eq!(s.text(".error").unwrap(), PanelKind::Error.text());
        s.invoke(".error", Invoke::Hide).unwrap();
        assert!(!s.is_visible(".error").unwrap());
    }

    #[test]
    fn invoke_text_on_field_is_unsupported() {
        let mut s = session();
        let err = s.invoke("#email", Invoke::Text("x".into())).unwrap_err();
        assert_eq!(err.to_string(), "cannot invoke('text') on #email");
    }

    #[test]
    fn unknown_button() {
        let mut s = session();
        assert!(s.click_button("Cancelar").is_err());
    }

    #[test]
    fn select_file_by_alias() {
        let mut s = session();
        s.alias_fixture("example.json", "sampleFile").unwrap();
        s.select_file("#file-upload", "@sampleFile", DeliveryMode::DragDrop)
            .unwrap();
        assert_eq!(s.file_name("#file-upload").unwrap().as_deref(), Some("example.json"));
    }

    #[test]
    fn custom_command_submits() {
        let mut s = session();
        let submission = s
            .fill_mandatory_fields_and_submit(&MandatoryFields::default())
            .unwrap();
        assert!(submission.is_success());
        assert!(s.is_visible(".success").unwrap());
        assert!(!s.is_visible(".error").unwrap());
    }
}
