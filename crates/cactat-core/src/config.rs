#![forbid(unsafe_code)]

//! Form behavior configuration.
//!
//! Defaults match the observed page: radios are independently checkable and
//! values are stored verbatim, so whitespace counts as content.
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `CACTAT_RADIO_MODE` | `independent`, `exclusive` | `independent` |
//! | `CACTAT_REQUIRED_TRIM` | `1`, `true` | off |

use crate::choice::RadioMode;

/// Environment variable selecting the radio group mode.
pub const ENV_RADIO_MODE: &str = "CACTAT_RADIO_MODE";
/// Environment variable making whitespace-only values count as empty.
pub const ENV_REQUIRED_TRIM: &str = "CACTAT_REQUIRED_TRIM";

/// Configuration for a [`FormController`](crate::FormController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    /// How the service-type radio group treats siblings. Default: independent.
    pub radio_mode: RadioMode,
    /// Treat whitespace-only values as empty in required checks. Default: false.
    pub required_trims_whitespace: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            radio_mode: RadioMode::Independent,
            required_trims_whitespace: false,
        }
    }
}

impl FormConfig {
    /// Build configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unrecognized values fall back to the default for that key.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(mode) = lookup(ENV_RADIO_MODE) {
            match mode.trim().to_ascii_lowercase().as_str() {
                "exclusive" => config.radio_mode = RadioMode::Exclusive,
                "independent" => config.radio_mode = RadioMode::Independent,
                other => {
                    tracing::warn!(value = other, "ignoring unrecognized {ENV_RADIO_MODE}");
                }
            }
        }
        if let Some(trim) = lookup(ENV_REQUIRED_TRIM) {
            config.required_trims_whitespace = trim == "1" || trim.eq_ignore_ascii_case("true");
        }
        config
    }

    /// Set the radio group mode.
    #[must_use]
    pub fn radio_mode(mut self, mode: RadioMode) -> Self {
        self.radio_mode = mode;
        self
    }

    /// Treat whitespace-only values as empty.
    #[must_use]
    pub fn trim_required(mut self, trim: bool) -> Self {
        self.required_trims_whitespace = trim;
        self
    }
}
