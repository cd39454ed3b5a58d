//! End-to-end driver for the CAC TAT contact form.
//!
//! A [`Session`] loads the form and its page chrome, resolves selector
//! strings, and exposes the command vocabulary of a browser driver. The
//! [`suite`] module holds every scenario; [`report`] writes a JSONL run log.
//!
//! # Running
//!
//! ```sh
//! cargo run -p cactat-harness -- --filter=product
//! RUST_LOG=cactat_core=debug cargo run -p cactat-harness -- --json
//! cargo run -p cactat-harness --features live-http -- --live
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod selector;
pub mod session;
pub mod suite;

pub use config::HarnessConfig;
pub use error::{HarnessError, HarnessResult};
pub use fixtures::FixtureRegistry;
pub use report::{RunEnv, RunLog};
pub use selector::Target;
pub use session::{Invoke, MandatoryFields, SUBMIT_LABEL, Session};
pub use suite::{CaseOutcome, CaseReport, Scenario, SuiteReport, run_scenario, run_suite, scenarios};
