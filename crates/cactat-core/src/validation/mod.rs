#![forbid(unsafe_code)]

//! Validation framework with composable validators and form-level rules.
//!
//! ```rust
//! use cactat_core::validation::{Email, Required, Validator};
//!
//! assert!(Email::new().validate("a@b.c").is_valid());
//! assert!(Email::new().validate("ab.com").is_invalid());
//! assert!(Required::new().validate("").is_invalid());
//! ```

mod rules;
mod validators;

pub use rules::{Condition, Rule, RuleSet, Violation, derive_outcome};
pub use validators::{
    All, ERROR_CODE_EMAIL, ERROR_CODE_REQUIRED, Email, Required, ValidationError,
    ValidationResult, Validator, ValidatorBuilder,
};
