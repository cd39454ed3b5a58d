//! Client-side model of the CAC TAT customer-service contact form.
//!
//! # Role
//! `cactat-core` owns the form's field state, applies the validation rules on
//! submit, and flips exactly one of the two message panels (success or error)
//! to visible. Everything runs synchronously; there is no I/O and no shared
//! state between form instances.
//!
//! # How it fits in the system
//! An external driver (`cactat-harness`) sets fields, triggers
//! [`FormController::submit`], and reads panel visibility back. Page chrome and
//! the privacy page live in `cactat-page` and never touch this crate's state.
//!
//! # Quick Start
//!
//! ```rust
//! use cactat_core::{FieldId, FormController, PanelKind};
//!
//! let mut form = FormController::default();
//! form.type_text(FieldId::FirstName, "Alexandre");
//! form.type_text(FieldId::LastName, "Boer");
//! form.type_text(FieldId::Email, "teste.ale@gmail.com");
//! form.type_text(FieldId::OpenTextArea, "Hello, world!");
//!
//! assert!(form.submit().is_success());
//! assert!(form.panel(PanelKind::Success).is_visible());
//! assert!(!form.panel(PanelKind::Error).is_visible());
//! ```
//!
//! # Features
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `serde` | [`snapshot`] | Serializable `FormSnapshot` with JSON encode/decode |

#![forbid(unsafe_code)]

pub mod choice;
pub mod config;
pub mod controller;
pub mod debug_trace;
pub mod error;
pub mod field;
pub mod file;
pub mod form;
pub mod panel;
pub mod select;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod validation;

pub use choice::{CheckboxGroup, ContactPreference, RadioGroup, RadioMode, ServiceType};
pub use config::FormConfig;
pub use controller::{FormController, Submission};
pub use error::{FormError, FormResult};
pub use field::{FieldId, InputFilter};
pub use file::{DeliveryMode, FileInput, FileRef};
pub use form::FormFields;
pub use panel::{ERROR_TEXT, Outcome, OutcomePanel, OutcomePanels, PanelKind, SUCCESS_TEXT};
pub use select::{OptionSelector, Product, Select, SelectOption};
#[cfg(feature = "serde")]
pub use snapshot::FormSnapshot;
pub use validation::{Violation, derive_outcome};
