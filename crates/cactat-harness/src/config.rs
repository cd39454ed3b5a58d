#![forbid(unsafe_code)]

//! Harness configuration.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `CACTAT_FIXTURES_DIR` | Directory fixtures are loaded from | this crate's `fixtures/` |
//! | `CACTAT_LIVE_HTTP` | Run the availability scenario against the network | off |
//!
//! Form and availability settings are read by their own crates and carried
//! here so one lookup configures a whole run.

use std::path::PathBuf;

use cactat_core::FormConfig;
use cactat_page::AvailabilityConfig;

pub const ENV_FIXTURES_DIR: &str = "CACTAT_FIXTURES_DIR";
pub const ENV_LIVE_HTTP: &str = "CACTAT_LIVE_HTTP";
/// Fixtures shipped with the crate; independent of the working directory.
pub const DEFAULT_FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");

/// Configuration for a suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub fixtures_dir: PathBuf,
    /// Whether the availability scenario may use the network.
    pub live_http: bool,
    pub form: FormConfig,
    pub availability: AvailabilityConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
            live_http: false,
            form: FormConfig::default(),
            availability: AvailabilityConfig::default(),
        }
    }
}

impl HarnessConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fixtures_dir = lookup(ENV_FIXTURES_DIR)
            .filter(|d| !d.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_FIXTURES_DIR), PathBuf::from);
        let live_http = lookup(ENV_LIVE_HTTP)
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        Self {
            fixtures_dir,
            live_http,
            form: FormConfig::from_lookup(&lookup),
            availability: AvailabilityConfig::from_lookup(&lookup),
        }
    }

    #[must_use]
    pub fn fixtures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixtures_dir = dir.into();
        self
    }

    #[must_use]
    pub fn live_http(mut self, live: bool) -> Self {
        self.live_http = live;
        self
    }
}
